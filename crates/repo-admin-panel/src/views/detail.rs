//! Detail page of a single resource item.

use std::sync::Arc;

use async_trait::async_trait;
use repo_admin_core::{AdminError, AdminResult};
use serde_json::json;

use super::resource::ResourceView;
use super::{AdminContext, AdminView, BaseView, ResourceOptions, ViewRequest};
use crate::app::HostApp;
use crate::render::{TemplateResponse, DETAILS_TEMPLATE};
use crate::schema::jsonify_schema;

/// Path parameter carrying the item identifier.
pub const PID_PARAM: &str = "pid_value";

/// Shows one item of a resource.
///
/// The default URL is `/<endpoint>/{pid_value}`. The identifier is passed
/// through to the page untouched; its format is the resource's business.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use repo_admin_core::Settings;
/// # use repo_admin_panel::app::HostApp;
/// # use repo_admin_panel::extensions::ResourceExtension;
/// # use repo_admin_panel::resource::Resource;
/// # use repo_admin_panel::schema::{FieldSchema, FieldType, Schema};
/// # use repo_admin_panel::search::SearchOptions;
/// # use repo_admin_panel::views::{AdminContext, AdminView, ResourceDetailView, ResourceOptions};
/// # struct Records;
/// # impl Resource for Records {
/// #     fn blueprint_name(&self) -> &str { "records" }
/// #     fn schema(&self) -> Schema { Schema::new(vec![FieldSchema::new("id", FieldType::String)]) }
/// #     fn search_options(&self) -> SearchOptions { SearchOptions::default() }
/// # }
/// let app = HostApp::new(Settings::default()).extension(
///     "repo-records",
///     Arc::new(ResourceExtension::new().with_resource("records_resource", Arc::new(Records))),
/// );
/// let admin = Arc::new(AdminContext::new(
///     "Administration", "administration", "/administration", "repo_admin/base.html",
/// ));
/// let view = ResourceDetailView::new(
///     ResourceOptions::new("Record").extension("repo-records").resource_config("records_resource"),
///     &admin,
///     &app,
/// )
/// .unwrap();
/// assert_eq!(view.base().url(), "/record/{pid_value}");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceDetailView {
    resource: ResourceView,
    item_field_list: Option<Vec<String>>,
    item_field_exclude_list: Vec<String>,
}

impl ResourceDetailView {
    /// Creates a detail view and binds its resource.
    ///
    /// # Errors
    ///
    /// Propagates resource binding errors.
    pub fn new(
        mut options: ResourceOptions,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<Self> {
        if options.view.url.is_none() {
            let endpoint = options
                .view
                .endpoint
                .clone()
                .unwrap_or_else(|| options.view.name.to_lowercase());
            options.view.url = Some(format!("/{endpoint}/{{{PID_PARAM}}}"));
        }
        if options.view.template.is_none() {
            options.view.template = Some(DETAILS_TEMPLATE.to_string());
        }
        Ok(Self {
            resource: ResourceView::new::<Self>(options, admin, app)?,
            item_field_list: None,
            item_field_exclude_list: Vec::new(),
        })
    }

    /// Restricts the page to these fields, in this order.
    #[must_use]
    pub fn item_field_list(mut self, fields: Vec<String>) -> Self {
        self.item_field_list = Some(fields);
        self
    }

    /// Hides these fields.
    #[must_use]
    pub fn item_field_exclude_list(mut self, fields: Vec<String>) -> Self {
        self.item_field_exclude_list = fields;
        self
    }

    /// The shared resource view state.
    pub const fn resource(&self) -> &ResourceView {
        &self.resource
    }

    /// The fields shown on the page.
    pub fn fields(&self) -> Vec<String> {
        let candidates: Vec<String> = match &self.item_field_list {
            Some(fields) => fields.clone(),
            None => self
                .resource
                .binding()
                .schema()
                .field_names()
                .into_iter()
                .map(String::from)
                .collect(),
        };
        candidates
            .into_iter()
            .filter(|f| !self.item_field_exclude_list.contains(f))
            .collect()
    }
}

#[async_trait]
impl AdminView for ResourceDetailView {
    fn base(&self) -> &BaseView {
        self.resource.base()
    }

    async fn get(&self, request: ViewRequest) -> AdminResult<TemplateResponse> {
        let pid_value = request
            .param(PID_PARAM)
            .ok_or_else(|| AdminError::BadRequest(format!("Missing {PID_PARAM}")))?;
        let display = self.resource.display();
        self.resource.base().render(&json!({
            "name": self.resource.base().name(),
            "pid_value": pid_value,
            "schema": jsonify_schema(self.resource.binding().schema()),
            "fields": self.fields(),
            "display_edit": display.edit,
            "display_delete": display.delete,
            "actions": self.resource.serialize_actions(),
        }))
    }
}
