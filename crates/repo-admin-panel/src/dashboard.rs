//! Dashboard view registration.
//!
//! The dashboard is chosen by the `administration_dashboard_view` setting.
//! [`DashboardRegistry`] maps each accepted setting value to a factory for
//! the view, recording the view's concrete type so the dashboard can be
//! recognized when its URL is resolved.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use repo_admin_core::settings::DEFAULT_DASHBOARD_VIEW;
use repo_admin_core::{AdminError, AdminResult};

use crate::views::{AdminContext, AdminDashboardView, AdminView};

type DashboardFactory = Arc<dyn Fn(&Arc<AdminContext>) -> Arc<dyn AdminView> + Send + Sync>;

/// A registered dashboard: its view type and how to build it.
#[derive(Clone)]
pub struct DashboardEntry {
    type_id: TypeId,
    type_name: &'static str,
    factory: DashboardFactory,
}

impl DashboardEntry {
    /// The dashboard view's type.
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The dashboard view's type name, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Builds the dashboard view for `admin`.
    pub fn create(&self, admin: &Arc<AdminContext>) -> Arc<dyn AdminView> {
        (self.factory)(admin)
    }
}

impl fmt::Debug for DashboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardEntry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Table of dashboard views, keyed by setting value.
///
/// The default registry maps `"default"` to [`AdminDashboardView`].
///
/// # Examples
///
/// ```
/// use repo_admin_panel::dashboard::DashboardRegistry;
///
/// let registry = DashboardRegistry::default();
/// assert!(registry.resolve("default").is_ok());
/// assert!(registry.resolve("fancy").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DashboardRegistry {
    entries: HashMap<String, DashboardEntry>,
}

impl Default for DashboardRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register::<AdminDashboardView, _>(
            DEFAULT_DASHBOARD_VIEW,
            AdminDashboardView::new,
        );
        registry
    }
}

impl DashboardRegistry {
    /// Creates a registry with no dashboards.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a dashboard view of type `V` under `key`.
    ///
    /// The factory must build its view with `BaseView::new::<V>` for the
    /// dashboard to be mounted at the root URL.
    pub fn register<V, F>(&mut self, key: &str, factory: F)
    where
        V: AdminView + 'static,
        F: Fn(&Arc<AdminContext>) -> V + Send + Sync + 'static,
    {
        let factory: DashboardFactory =
            Arc::new(move |admin: &Arc<AdminContext>| -> Arc<dyn AdminView> {
                Arc::new(factory(admin))
            });
        self.entries.insert(
            key.to_string(),
            DashboardEntry {
                type_id: TypeId::of::<V>(),
                type_name: std::any::type_name::<V>(),
                factory,
            },
        );
    }

    /// Returns the entry registered under `key`.
    pub fn get(&self, key: &str) -> Option<&DashboardEntry> {
        self.entries.get(key)
    }

    /// Returns the registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Looks up `key`.
    ///
    /// # Errors
    ///
    /// Returns `ImproperlyConfigured` naming the key and the known keys if
    /// nothing is registered under it.
    pub fn resolve(&self, key: &str) -> AdminResult<&DashboardEntry> {
        self.entries.get(key).ok_or_else(|| {
            AdminError::ImproperlyConfigured(format!(
                "Unknown dashboard view '{key}' (known: {})",
                self.keys().join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::views::{BaseView, ViewOptions};

    struct CustomDashboard {
        base: BaseView,
    }

    #[async_trait]
    impl AdminView for CustomDashboard {
        fn base(&self) -> &BaseView {
            &self.base
        }
    }

    #[test]
    fn test_default_registry_has_default_dashboard() {
        let registry = DashboardRegistry::default();
        let entry = registry.resolve("default").unwrap();
        assert_eq!(entry.type_id(), TypeId::of::<AdminDashboardView>());
        assert!(entry.type_name().ends_with("AdminDashboardView"));
    }

    #[test]
    fn test_unknown_key_lists_known_keys() {
        let err = DashboardRegistry::default().resolve("fancy").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fancy"));
        assert!(msg.contains("default"));
    }

    #[test]
    fn test_register_custom_dashboard() {
        let mut registry = DashboardRegistry::empty();
        registry.register::<CustomDashboard, _>("custom", |admin| CustomDashboard {
            base: BaseView::new::<CustomDashboard>(ViewOptions::new("Home"), admin),
        });
        assert_eq!(registry.keys(), vec!["custom"]);

        let entry = registry.get("custom").unwrap();
        let admin = Arc::new(
            AdminContext::new("Admin", "admin", "/admin", "base.html")
                .with_dashboard(entry.type_id()),
        );
        let view = entry.create(&admin);
        assert_eq!(view.base().url(), "/");
        assert_eq!(view.base().name(), "Home");
    }
}
