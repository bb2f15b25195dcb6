//! # repo-admin
//!
//! Administration panel framework for repository host applications.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `repo-admin` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use repo_admin::prelude::*;
//!
//! # fn main() -> AdminResult<()> {
//! let settings = Settings::default();
//! repo_admin::core::logging::setup_logging(&settings);
//! let app = Arc::new(HostApp::new(settings));
//! let mut administration = Administration::builder(app).build()?;
//! ResourceViewSet::new("Records", "repo-records", "records_resource")
//!     .register(&mut administration)?;
//! let router = administration.into_router();
//! # Ok(())
//! # }
//! ```

/// Error taxonomy, settings, settings loading and logging.
pub use repo_admin_core as core;

/// View registry, resource views, menu and routing.
#[cfg(feature = "panel")]
pub use repo_admin_panel as panel;

/// Test client and host application fixtures.
#[cfg(feature = "testing")]
pub use repo_admin_test as test;

// Third-party re-exports
pub use async_trait;
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower_http;
pub use tracing;
pub use tracing_subscriber;

/// The types most host applications need.
pub mod prelude {
    pub use repo_admin_core::{AdminError, AdminResult, Settings};

    #[cfg(feature = "panel")]
    pub use repo_admin_panel::{
        administration::Administration,
        app::HostApp,
        auth::{Authorizer, Identity, RoleRequired},
        extensions::{Extension, ResourceExtension},
        render::TemplateResponse,
        resource::Resource,
        schema::{FieldSchema, FieldType, Schema},
        search::{FacetOption, SearchOptions, SortOption},
        views::{
            AdminView, BaseView, ResourceDetailView, ResourceListView, ResourceOptions,
            ResourceViewSet, ViewOptions, ViewRequest,
        },
    };

    pub use async_trait::async_trait;
}
