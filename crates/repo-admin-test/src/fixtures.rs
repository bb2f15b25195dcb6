//! Ready-made host applications and resources for administration tests.
//!
//! [`FixtureResource`] is an in-memory [`Resource`] built field by field,
//! and [`host_app`] assembles a [`HostApp`] exposing it through an
//! extension with its search endpoint declared.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repo_admin_test::fixtures::{self, FixtureResource};
//!
//! let app = fixtures::host_app(FixtureResource::records());
//! assert!(app.extensions().contains(fixtures::RECORDS_EXTENSION));
//! ```

use std::sync::Arc;

use repo_admin_core::Settings;
use repo_admin_panel::app::HostApp;
use repo_admin_panel::auth::Identity;
use repo_admin_panel::extensions::ResourceExtension;
use repo_admin_panel::resource::Resource;
use repo_admin_panel::schema::{FieldSchema, FieldType, Schema};
use repo_admin_panel::search::{FacetOption, SearchOptions, SortOption};

/// Extension name [`host_app`] registers the resource under.
pub const RECORDS_EXTENSION: &str = "repo-records";

/// Attribute the resource is exposed as on [`RECORDS_EXTENSION`].
pub const RECORDS_RESOURCE: &str = "records_resource";

/// An in-memory resource with a configurable schema and search options.
#[derive(Debug, Clone, Default)]
pub struct FixtureResource {
    blueprint_name: String,
    fields: Vec<FieldSchema>,
    search: SearchOptions,
}

impl FixtureResource {
    /// Creates a resource served by the given API blueprint.
    pub fn new(blueprint_name: &str) -> Self {
        Self {
            blueprint_name: blueprint_name.to_string(),
            ..Self::default()
        }
    }

    /// A records resource with a small schema, two facets and two sorts.
    pub fn records() -> Self {
        Self::new("records")
            .field(FieldSchema::new("id", FieldType::String).read_only())
            .field(FieldSchema::new("title", FieldType::String).required())
            .field(FieldSchema::new("created", FieldType::Datetime).read_only())
            .field(FieldSchema::new("access_token", FieldType::String).write_only())
            .facet(FacetOption::new("status", "Status", "status"))
            .facet(FacetOption::new("type", "Resource type", "metadata.type"))
            .sort(SortOption::new("newest", "Newest", vec!["-created"]))
            .sort(SortOption::new("oldest", "Oldest", vec!["created"]))
    }

    /// Appends a schema field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a service-level facet.
    #[must_use]
    pub fn facet(mut self, facet: FacetOption) -> Self {
        self.search.facets.push(facet);
        self
    }

    /// Appends a service-level sort option.
    #[must_use]
    pub fn sort(mut self, sort: SortOption) -> Self {
        self.search.sort_options.push(sort);
        self
    }
}

impl Resource for FixtureResource {
    fn blueprint_name(&self) -> &str {
        &self.blueprint_name
    }

    fn schema(&self) -> Schema {
        Schema::new(self.fields.clone())
    }

    fn search_options(&self) -> SearchOptions {
        self.search.clone()
    }
}

/// Settings declaring the `<blueprint>.search` endpoint of `resource`.
pub fn settings_for(resource: &FixtureResource) -> Settings {
    let mut settings = Settings::default();
    settings.api_endpoints.insert(
        format!("{}.search", resource.blueprint_name),
        format!("/{}", resource.blueprint_name),
    );
    settings
}

/// A host application exposing `resource` as
/// `RECORDS_EXTENSION` / `RECORDS_RESOURCE`.
pub fn host_app(resource: FixtureResource) -> HostApp {
    host_app_with_settings(settings_for(&resource), resource)
}

/// Like [`host_app`], with explicit settings.
pub fn host_app_with_settings(settings: Settings, resource: FixtureResource) -> HostApp {
    let extension = ResourceExtension::new().with_resource(RECORDS_RESOURCE, Arc::new(resource));
    HostApp::new(settings).extension(RECORDS_EXTENSION, Arc::new(extension))
}

/// An identity holding the default administration role.
pub fn admin_identity() -> Identity {
    Identity::new("admin-1").with_role(repo_admin_core::settings::DEFAULT_ADMIN_ROLE)
}

/// An authenticated identity without any role.
pub fn plain_identity() -> Identity {
    Identity::new("user-1")
}
