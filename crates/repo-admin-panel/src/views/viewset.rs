//! A list view and a detail view declared from one resource configuration.

use std::sync::Arc;

use repo_admin_core::AdminResult;

use super::list::{Column, ListOptions};
use super::{
    ActionSpec, AdminContext, DisplayFlags, ResourceDetailView, ResourceListView,
    ResourceOptions,
};
use crate::administration::Administration;
use crate::app::HostApp;
use crate::search::{FacetOption, SortOption};

/// Declares the admin pages of one resource.
///
/// The list view takes the lower-cased name as endpoint; the detail view
/// is named `<name> details`, takes `<endpoint>-details` and is mounted at
/// `/<endpoint>/{pid_value}`.
/// No detail view is created when `display_read` is off.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::views::ResourceViewSet;
///
/// let set = ResourceViewSet::new("Records", "repo-records", "records_resource")
///     .category("Content")
///     .display_read(false);
/// assert_eq!(set.list_endpoint(), "records");
/// assert_eq!(set.details_endpoint(), "records-details");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceViewSet {
    name: String,
    category: Option<String>,
    extension: String,
    resource_config: String,
    display: DisplayFlags,
    actions: Vec<ActionSpec>,
    sort_options: Vec<SortOption>,
    available_facets: Vec<FacetOption>,
    column_list: Option<Vec<Column>>,
    column_exclude_list: Vec<String>,
    item_field_list: Option<Vec<String>>,
    item_field_exclude_list: Vec<String>,
}

impl ResourceViewSet {
    /// Creates a view set for `extension`.`resource_config`.
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        resource_config: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: None,
            extension: extension.into(),
            resource_config: resource_config.into(),
            display: DisplayFlags::default(),
            actions: Vec::new(),
            sort_options: Vec::new(),
            available_facets: Vec::new(),
            column_list: None,
            column_exclude_list: Vec::new(),
            item_field_list: None,
            item_field_exclude_list: Vec::new(),
        }
    }

    /// Sets the menu category of the list view.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Shows or hides the "create" button.
    #[must_use]
    pub const fn display_create(mut self, display: bool) -> Self {
        self.display.create = display;
        self
    }

    /// Enables or disables the detail view.
    #[must_use]
    pub const fn display_read(mut self, display: bool) -> Self {
        self.display.read = display;
        self
    }

    /// Shows or hides the "edit" button.
    #[must_use]
    pub const fn display_edit(mut self, display: bool) -> Self {
        self.display.edit = display;
        self
    }

    /// Shows or hides the "delete" button.
    #[must_use]
    pub const fn display_delete(mut self, display: bool) -> Self {
        self.display.delete = display;
        self
    }

    /// Appends an item action.
    #[must_use]
    pub fn action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }

    /// Declares the sort options.
    #[must_use]
    pub fn sort_options(mut self, sort_options: Vec<SortOption>) -> Self {
        self.sort_options = sort_options;
        self
    }

    /// Declares the facets.
    #[must_use]
    pub fn available_facets(mut self, facets: Vec<FacetOption>) -> Self {
        self.available_facets = facets;
        self
    }

    /// Sets explicit list columns.
    #[must_use]
    pub fn column_list(mut self, columns: Vec<Column>) -> Self {
        self.column_list = Some(columns);
        self
    }

    /// Excludes fields from the list columns.
    #[must_use]
    pub fn column_exclude_list(mut self, fields: Vec<String>) -> Self {
        self.column_exclude_list = fields;
        self
    }

    /// Restricts the detail page to these fields.
    #[must_use]
    pub fn item_field_list(mut self, fields: Vec<String>) -> Self {
        self.item_field_list = Some(fields);
        self
    }

    /// Hides these fields on the detail page.
    #[must_use]
    pub fn item_field_exclude_list(mut self, fields: Vec<String>) -> Self {
        self.item_field_exclude_list = fields;
        self
    }

    /// Endpoint of the list view.
    pub fn list_endpoint(&self) -> String {
        self.name.to_lowercase()
    }

    /// Endpoint of the detail view.
    pub fn details_endpoint(&self) -> String {
        format!("{}-details", self.list_endpoint())
    }

    fn resource_options(&self, name: &str) -> ResourceOptions {
        let mut options = ResourceOptions::new(name)
            .extension(&self.extension)
            .resource_config(&self.resource_config);
        options.display = self.display;
        options.actions.clone_from(&self.actions);
        options
    }

    /// Builds the list view.
    ///
    /// # Errors
    ///
    /// Propagates list view construction errors.
    pub fn list_view(
        &self,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<ResourceListView> {
        let mut options = self
            .resource_options(&self.name)
            .endpoint(self.list_endpoint());
        if let Some(category) = &self.category {
            options = options.category(category);
        }
        let mut list = ListOptions::new()
            .sort_options(self.sort_options.clone())
            .available_facets(self.available_facets.clone())
            .column_exclude_list(self.column_exclude_list.clone());
        if let Some(columns) = &self.column_list {
            list = list.columns(columns.clone());
        }
        ResourceListView::with_list_options(options, list, admin, app)
    }

    /// Builds the detail view, or `None` when reading is disabled.
    ///
    /// # Errors
    ///
    /// Propagates detail view construction errors.
    pub fn details_view(
        &self,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<Option<ResourceDetailView>> {
        if !self.display.read {
            return Ok(None);
        }
        let options = self
            .resource_options(&format!("{} details", self.name))
            .endpoint(self.details_endpoint())
            .url(format!("/{}/{{pid_value}}", self.list_endpoint()));
        let mut view = ResourceDetailView::new(options, admin, app)?
            .item_field_exclude_list(self.item_field_exclude_list.clone());
        if let Some(fields) = &self.item_field_list {
            view = view.item_field_list(fields.clone());
        }
        Ok(Some(view))
    }

    /// Adds the list view and, if enabled, the detail view.
    ///
    /// # Errors
    ///
    /// Propagates construction and registration errors.
    pub fn register(&self, administration: &mut Administration) -> AdminResult<()> {
        let admin = Arc::clone(administration.context());
        let app = Arc::clone(administration.app());
        administration.add_view(Arc::new(self.list_view(&admin, &app)?))?;
        if let Some(details) = self.details_view(&admin, &app)? {
            administration.add_view(Arc::new(details))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repo_admin_core::Settings;

    use crate::extensions::ResourceExtension;
    use crate::resource::Resource;
    use crate::schema::{FieldSchema, FieldType, Schema};
    use crate::search::SearchOptions;
    use crate::views::AdminView;

    struct Records;

    impl Resource for Records {
        fn blueprint_name(&self) -> &str {
            "records"
        }
        fn schema(&self) -> Schema {
            Schema::new(vec![
                FieldSchema::new("id", FieldType::String),
                FieldSchema::new("title", FieldType::String),
            ])
        }
        fn search_options(&self) -> SearchOptions {
            SearchOptions::default()
        }
    }

    fn app() -> Arc<HostApp> {
        let mut settings = Settings::default();
        settings
            .api_endpoints
            .insert("records.search".into(), "/records".into());
        Arc::new(HostApp::new(settings).extension(
            "repo-records",
            Arc::new(ResourceExtension::new().with_resource("records_resource", Arc::new(Records))),
        ))
    }

    #[test]
    fn test_views_share_configuration() {
        let app = app();
        let admin = Arc::new(AdminContext::new(
            "Administration",
            "administration",
            "/administration",
            "repo_admin/base.html",
        ));
        let set = ResourceViewSet::new("Records", "repo-records", "records_resource")
            .display_delete(true)
            .item_field_list(vec!["title".into()]);

        let list = set.list_view(&admin, &app).unwrap();
        assert_eq!(list.base().endpoint(), "records");
        assert!(list.resource().display().delete);

        let details = set.details_view(&admin, &app).unwrap().unwrap();
        assert_eq!(details.base().name(), "Records details");
        assert_eq!(details.base().endpoint(), "records-details");
        assert_eq!(details.base().url(), "/records/{pid_value}");
        assert_eq!(details.fields(), vec!["title"]);
    }

    #[test]
    fn test_no_details_without_read() {
        let app = app();
        let admin = Arc::new(AdminContext::new("Admin", "admin", "/admin", "base.html"));
        let set = ResourceViewSet::new("Records", "repo-records", "records_resource")
            .display_read(false);
        assert!(set.details_view(&admin, &app).unwrap().is_none());
    }

    #[test]
    fn test_register_adds_both_views() {
        let mut administration = Administration::builder(app()).build().unwrap();
        ResourceViewSet::new("Records", "repo-records", "records_resource")
            .category("Content")
            .register(&mut administration)
            .unwrap();

        let endpoints: Vec<String> = administration
            .views()
            .iter()
            .map(|v| v.base().endpoint_location_name())
            .collect();
        assert_eq!(
            endpoints,
            vec![
                "administration.dashboard",
                "administration.records",
                "administration.records-details",
            ]
        );
        assert_eq!(administration.menu().len(), 3);
    }
}
