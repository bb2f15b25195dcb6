//! Host extensions that expose resources to administration views.
//!
//! A resource view names an extension and a resource attribute on it. The
//! [`ExtensionRegistry`] is the host application's table of extensions,
//! keyed by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::resource::Resource;

/// A host extension exposing named resources.
pub trait Extension: Send + Sync {
    /// Returns the resource bound to `attribute`, if the extension has one.
    fn resource(&self, attribute: &str) -> Option<Arc<dyn Resource>>;
}

/// A map-backed [`Extension`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use repo_admin_panel::extensions::{Extension, ResourceExtension};
/// # use repo_admin_panel::resource::Resource;
/// # use repo_admin_panel::schema::Schema;
/// # use repo_admin_panel::search::SearchOptions;
/// # struct Records;
/// # impl Resource for Records {
/// #     fn blueprint_name(&self) -> &str { "records" }
/// #     fn schema(&self) -> Schema { Schema::default() }
/// #     fn search_options(&self) -> SearchOptions { SearchOptions::default() }
/// # }
///
/// let ext = ResourceExtension::new().with_resource("records_resource", Arc::new(Records));
/// assert!(ext.resource("records_resource").is_some());
/// assert!(ext.resource("users_resource").is_none());
/// ```
#[derive(Default)]
pub struct ResourceExtension {
    resources: HashMap<String, Arc<dyn Resource>>,
}

impl ResourceExtension {
    /// Creates an extension with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource under the given attribute name.
    #[must_use]
    pub fn with_resource(mut self, attribute: &str, resource: Arc<dyn Resource>) -> Self {
        self.resources.insert(attribute.to_string(), resource);
        self
    }

    /// Returns the attribute names, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Extension for ResourceExtension {
    fn resource(&self, attribute: &str) -> Option<Arc<dyn Resource>> {
        self.resources.get(attribute).cloned()
    }
}

impl fmt::Debug for ResourceExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceExtension")
            .field("resources", &self.attributes())
            .finish()
    }
}

/// The host application's extensions, keyed by name.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Arc<dyn Extension>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extension, replacing any extension with the same name.
    pub fn register(&mut self, name: &str, extension: Arc<dyn Extension>) {
        self.extensions.insert(name.to_string(), extension);
    }

    /// Returns the extension registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Extension>> {
        self.extensions.get(name)
    }

    /// Returns whether an extension is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Returns the registered extension names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.names())
            .finish()
    }
}
