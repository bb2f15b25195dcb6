//! The host application object.
//!
//! [`HostApp`] is what the administration is built against: the host's
//! settings, its extensions, and its global navigation menu.

use std::sync::Arc;

use repo_admin_core::Settings;

use crate::extensions::{Extension, ExtensionRegistry};
use crate::menu::NavigationMenu;

/// The host application the administration is mounted into.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use repo_admin_core::Settings;
/// use repo_admin_panel::app::HostApp;
/// use repo_admin_panel::extensions::ResourceExtension;
///
/// let app = HostApp::new(Settings::default())
///     .extension("repo-records", Arc::new(ResourceExtension::new()));
/// assert!(app.extensions().contains("repo-records"));
/// ```
#[derive(Debug)]
pub struct HostApp {
    settings: Settings,
    extensions: ExtensionRegistry,
    navigation: Arc<NavigationMenu>,
}

impl HostApp {
    /// Creates a host application with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            extensions: ExtensionRegistry::new(),
            navigation: Arc::new(NavigationMenu::new()),
        }
    }

    /// Registers an extension under `name`.
    #[must_use]
    pub fn extension(mut self, name: &str, extension: Arc<dyn Extension>) -> Self {
        self.extensions.register(name, extension);
        self
    }

    /// Returns the host settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the host extensions.
    pub const fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Returns the host's global navigation menu.
    pub const fn navigation(&self) -> &Arc<NavigationMenu> {
        &self.navigation
    }
}
