//! # repo-admin-panel
//!
//! Administration panel for repository host applications. Views are
//! registered with an [`Administration`], which resolves their URLs and
//! endpoints, binds them to host resources, collects the navigation menu
//! and serves them through an axum router.
//!
//! ## Modules
//!
//! - [`administration`] - The view registry and router generation
//! - [`views`] - Base, dashboard, detail, list and view-set views
//! - [`menu`] - Menu entries and the deferred navigation flush
//! - [`dashboard`] - The table of selectable dashboard views
//! - [`blueprint`] - The route namespace views are bound in
//! - [`dispatch`] - Request handling and error responses
//! - [`auth`] - Identities and the access check run before every view
//! - [`render`] - Template responses and the Tera renderer
//! - [`app`], [`extensions`], [`resource`] - The host application contract
//! - [`schema`], [`search`] - Schema serialization and search configuration

pub mod administration;
pub mod app;
pub mod auth;
pub mod blueprint;
pub mod dashboard;
pub mod dispatch;
pub mod extensions;
pub mod menu;
pub mod render;
pub mod resource;
pub mod schema;
pub mod search;
pub mod views;

pub use administration::Administration;
pub use app::HostApp;
pub use auth::{Authorizer, Identity, RoleRequired};
pub use views::AdminView;
