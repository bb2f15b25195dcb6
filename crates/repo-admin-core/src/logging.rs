//! Logging integration for the repo-admin framework.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; in production
/// a structured JSON format is used.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the call is a no-op.
///
/// # Examples
///
/// ```
/// use repo_admin_core::logging::setup_logging;
/// use repo_admin_core::Settings;
///
/// let settings = Settings {
///     log_level: "repo_admin_panel=debug".to_string(),
///     ..Settings::default()
/// };
/// assert!(setup_logging(&settings));
/// assert!(!setup_logging(&settings));
/// ```
pub fn setup_logging(settings: &Settings) -> bool {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .is_ok()
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .is_ok()
    }
}

/// Creates a tracing span for a request handled by an admin view.
///
/// # Examples
///
/// ```
/// use repo_admin_core::logging::request_span;
///
/// let span = request_span("administration.records");
/// let _guard = span.enter();
/// tracing::info!("rendering view");
/// ```
pub fn request_span(endpoint: &str) -> tracing::Span {
    tracing::info_span!("admin_request", endpoint = endpoint)
}
