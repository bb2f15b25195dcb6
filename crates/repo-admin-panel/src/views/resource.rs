//! Views bound to a host resource.
//!
//! A resource view names a host extension and an attribute on it. The pair
//! is resolved once, when the view is constructed: the resulting
//! [`ResourceBinding`] holds the resource and its schema for the lifetime of
//! the view.

use std::sync::Arc;

use repo_admin_core::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AdminContext, BaseView, ViewOptions};
use crate::app::HostApp;
use crate::extensions::Extension;
use crate::resource::Resource;
use crate::schema::Schema;

/// An action offered on a resource item (e.g. "publish").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Action name.
    pub name: String,
    /// Button label.
    pub text: String,
    /// API endpoint the action posts to, when not derived from item links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    /// JSON schema of the action payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_schema: Option<serde_json::Value>,
}

impl ActionSpec {
    /// Creates an action with no endpoint and no payload.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            api_endpoint: None,
            payload_schema: None,
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the payload schema.
    #[must_use]
    pub fn payload_schema(mut self, schema: serde_json::Value) -> Self {
        self.payload_schema = Some(schema);
        self
    }
}

/// Which operations the UI offers on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Show a "create" button on the list page.
    pub create: bool,
    /// Link list rows to a detail page.
    pub read: bool,
    /// Show an "edit" button.
    pub edit: bool,
    /// Show a "delete" button.
    pub delete: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            create: false,
            read: true,
            edit: false,
            delete: false,
        }
    }
}

/// Labels and resource configuration of a resource view.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::views::ResourceOptions;
///
/// let options = ResourceOptions::new("Records")
///     .extension("repo-records")
///     .resource_config("records_resource")
///     .display_delete(true);
/// assert!(options.display.read);
/// assert!(options.display.delete);
/// assert!(!options.display.create);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceOptions {
    /// Base labels.
    pub view: ViewOptions,
    /// Name of the resource attribute on the extension.
    pub resource_config: Option<String>,
    /// Display flags.
    pub display: DisplayFlags,
    /// Item actions, in display order.
    pub actions: Vec<ActionSpec>,
}

impl ResourceOptions {
    /// Creates options with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            view: ViewOptions::new(name),
            ..Self::default()
        }
    }

    /// Sets the menu category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.view = self.view.category(category);
        self
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.view = self.view.endpoint(endpoint);
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.view = self.view.url(url);
        self
    }

    /// Sets the template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.view = self.view.template(template);
        self
    }

    /// Sets the extension name.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.view = self.view.extension(extension);
        self
    }

    /// Sets the resource attribute name.
    #[must_use]
    pub fn resource_config(mut self, resource_config: impl Into<String>) -> Self {
        self.resource_config = Some(resource_config.into());
        self
    }

    /// Shows or hides the "create" button.
    #[must_use]
    pub const fn display_create(mut self, display: bool) -> Self {
        self.display.create = display;
        self
    }

    /// Enables or disables the detail page.
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

    /// Appends an action.
    #[must_use]
    pub fn action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }
}

/// The resource a view is bound to, and its schema.
#[derive(Clone)]
pub struct ResourceBinding {
    extension: String,
    resource_config: String,
    resource: Arc<dyn Resource>,
    schema: Schema,
}

impl ResourceBinding {
    /// Resolves `extension`.`resource_config` against the host.
    ///
    /// # Errors
    ///
    /// - `ImproperlyConfigured` if no extension or no resource is configured.
    /// - `ExtensionNotFound` if the host has no such extension.
    /// - `InvalidResource` if the extension has no such resource.
    pub fn resolve(
        app: &HostApp,
        extension: Option<&str>,
        resource_config: Option<&str>,
        view_name: &str,
    ) -> AdminResult<Self> {
        let extension_name = extension.ok_or_else(|| {
            AdminError::ImproperlyConfigured(format!(
                "Cannot instantiate resource view {view_name} without an associated extension"
            ))
        })?;
        let host_extension =
            app.extensions()
                .get(extension_name)
                .ok_or_else(|| AdminError::ExtensionNotFound {
                    extension: extension_name.to_string(),
                    view: view_name.to_string(),
                })?;
        let resource_config = resource_config.ok_or_else(|| {
            AdminError::ImproperlyConfigured(format!(
                "Cannot instantiate resource view {view_name} without a resource"
            ))
        })?;
        let resource = lookup_resource(host_extension.as_ref(), resource_config, view_name)?;

        let mut binding = Self {
            extension: extension_name.to_string(),
            resource_config: resource_config.to_string(),
            resource,
            schema: Schema::default(),
        };
        binding.set_schema();
        debug!(
            view = view_name,
            extension = extension_name,
            resource = resource_config,
            fields = binding.schema.fields.len(),
            "resource view bound"
        );
        Ok(binding)
    }

    /// Rebinds to `resource` and refreshes the schema.
    pub fn set_resource(&mut self, resource: Arc<dyn Resource>) {
        self.resource = resource;
        self.set_schema();
    }

    /// Fetches the schema from the bound resource.
    pub fn set_schema(&mut self) {
        self.schema = self.resource.schema();
    }

    /// The bound resource.
    pub const fn resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }

    /// The resource's schema, as fetched at binding time.
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The extension name.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The resource attribute name.
    pub fn resource_config(&self) -> &str {
        &self.resource_config
    }
}

impl std::fmt::Debug for ResourceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceBinding")
            .field("extension", &self.extension)
            .field("resource_config", &self.resource_config)
            .field("blueprint", &self.resource.blueprint_name())
            .finish_non_exhaustive()
    }
}

fn lookup_resource(
    extension: &dyn Extension,
    resource_config: &str,
    view_name: &str,
) -> AdminResult<Arc<dyn Resource>> {
    extension
        .resource(resource_config)
        .ok_or_else(|| AdminError::InvalidResource {
            resource: resource_config.to_string(),
            view: view_name.to_string(),
        })
}

/// The shared state of resource-bound views: labels, binding, display
/// flags and actions.
#[derive(Debug, Clone)]
pub struct ResourceView {
    base: BaseView,
    binding: ResourceBinding,
    display: DisplayFlags,
    actions: Vec<ActionSpec>,
}

impl ResourceView {
    /// Resolves labels for a view of type `V` and binds its resource.
    ///
    /// Errors identify the view as `<type name> (<name>)`.
    ///
    /// # Errors
    ///
    /// See [`ResourceBinding::resolve`].
    pub fn new<V: 'static>(
        options: ResourceOptions,
        admin: &Arc<AdminContext>,
        app: &HostApp,
    ) -> AdminResult<Self> {
        let ResourceOptions {
            view,
            resource_config,
            display,
            actions,
        } = options;
        let base = BaseView::new::<V>(view, admin);
        let view_id = format!("{} ({})", std::any::type_name::<V>(), base.name());
        let binding = ResourceBinding::resolve(
            app,
            base.extension(),
            resource_config.as_deref(),
            &view_id,
        )?;
        Ok(Self {
            base,
            binding,
            display,
            actions,
        })
    }

    /// The resolved labels.
    pub const fn base(&self) -> &BaseView {
        &self.base
    }

    /// The resource binding.
    pub const fn binding(&self) -> &ResourceBinding {
        &self.binding
    }

    /// Mutable access to the binding.
    pub fn binding_mut(&mut self) -> &mut ResourceBinding {
        &mut self.binding
    }

    /// Display flags.
    pub const fn display(&self) -> DisplayFlags {
        self.display
    }

    /// Item actions.
    pub fn actions(&self) -> &[ActionSpec] {
        &self.actions
    }

    /// Serializes the actions for templates, keyed by action name.
    ///
    /// # Examples
    ///
    /// The output for a single "publish" action is
    /// `{"publish": {"text": "Publish"}}`.
    pub fn serialize_actions(&self) -> serde_json::Value {
        let mut actions = serde_json::Map::new();
        for action in &self.actions {
            let mut entry = serde_json::Map::new();
            entry.insert("text".into(), action.text.clone().into());
            if let Some(endpoint) = &action.api_endpoint {
                entry.insert("api_endpoint".into(), endpoint.clone().into());
            }
            if let Some(schema) = &action.payload_schema {
                entry.insert("payload_schema".into(), schema.clone());
            }
            actions.insert(action.name.clone(), serde_json::Value::Object(entry));
        }
        serde_json::Value::Object(actions)
    }
}
