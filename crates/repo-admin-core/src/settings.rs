//! Settings for the repo-admin framework.
//!
//! [`Settings`] holds the host application's configuration as seen by the
//! administration panel. Values are usually loaded through
//! [`settings_loader`](crate::settings_loader) and then handed to the host
//! application object; there is no global settings instance.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key of the built-in dashboard in the dashboard registration table.
pub const DEFAULT_DASHBOARD_VIEW: &str = "default";

/// Role required by every administration view unless configured otherwise.
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

/// Base template every administration page extends.
pub const DEFAULT_BASE_TEMPLATE: &str = "repo_admin/base.html";

/// The complete set of settings read by the administration panel.
///
/// # Examples
///
/// ```
/// use repo_admin_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.administration_role, "admin");
/// assert_eq!(settings.api_prefix, "/api");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "repo_admin_panel=trace").
    pub log_level: String,

    // ── Administration ───────────────────────────────────────────────

    /// Key of the dashboard view in the dashboard registration table.
    ///
    /// Mandatory: building the administration fails when this is unset.
    pub administration_dashboard_view: Option<String>,
    /// Role an identity must hold to access any administration view.
    pub administration_role: String,
    /// The base template merged into every view's render context.
    pub administration_base_template: String,

    // ── Search API ───────────────────────────────────────────────────

    /// URL prefix under which the REST API application is mounted.
    pub api_prefix: String,
    /// Declared API endpoint rules, keyed by endpoint name
    /// (e.g. `"records.search"` -> `"/records"`).
    pub api_endpoints: HashMap<String, String>,

    // ── Templates ────────────────────────────────────────────────────

    /// Additional directories searched for templates.
    pub template_dirs: Vec<PathBuf>,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Named configuration values, such as search facet and sort tables.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Settings {
    /// Returns a named configuration value from [`extra`](Self::extra).
    pub fn config_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.extra.get(name)
    }

    /// Returns the declared API rule for an endpoint name, if any.
    pub fn api_endpoint(&self, endpoint: &str) -> Option<&str> {
        self.api_endpoints.get(endpoint).map(String::as_str)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,
            log_level: "info".to_string(),

            // Administration
            administration_dashboard_view: Some(DEFAULT_DASHBOARD_VIEW.to_string()),
            administration_role: DEFAULT_ADMIN_ROLE.to_string(),
            administration_base_template: DEFAULT_BASE_TEMPLATE.to_string(),

            // Search API
            api_prefix: "/api".to_string(),
            api_endpoints: HashMap::new(),

            // Templates
            template_dirs: Vec::new(),

            // Extra
            extra: HashMap::new(),
        }
    }
}
