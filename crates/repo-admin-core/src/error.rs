//! Core error types for the repo-admin framework.
//!
//! [`AdminError`] covers the three classes of failure the administration
//! panel can produce: startup/configuration errors raised while wiring views,
//! request-time errors raised by handlers, and errors surfaced by external
//! collaborators (templates, serialization, IO).

use thiserror::Error;

/// The primary error type for the repo-admin framework.
///
/// Startup errors are fatal: they are raised while the administration is
/// being built and views are being registered, and are never retried.
/// Request-time errors map to an HTTP status code via
/// [`AdminError::status_code`].
///
/// # Examples
///
/// ```
/// use repo_admin_core::error::AdminError;
///
/// let err = AdminError::InvalidResource {
///     resource: "records_resource".into(),
///     view: "RecordListView".into(),
/// };
/// assert!(err.is_startup_error());
/// assert!(err.to_string().contains("records_resource"));
/// ```
#[derive(Error, Debug)]
pub enum AdminError {
    // ── Startup / configuration ──────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A view or the registry is wired incorrectly.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// The host extension a resource view is bound to is not registered.
    #[error("Extension '{extension}' required by view '{view}' is not registered")]
    ExtensionNotFound {
        /// The extension name the view asked for.
        extension: String,
        /// The name of the offending view.
        view: String,
    },

    /// The extension does not expose the resource a view is configured with.
    #[error("Invalid resource '{resource}' configured for view '{view}'")]
    InvalidResource {
        /// The configured resource attribute name.
        resource: String,
        /// The name of the offending view.
        view: String,
    },

    /// A view's endpoint or URL collides with an already registered view.
    #[error("Cannot register view '{view}': {conflict}")]
    DuplicateView {
        /// The name of the view being registered.
        view: String,
        /// Description of what collided.
        conflict: String,
    },

    // ── Request-time ─────────────────────────────────────────────────

    /// HTTP 400 Bad Request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP 401 Unauthorized.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 403 Forbidden.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// HTTP 404 Not Found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 405 Method Not Allowed.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // ── Collaborators ────────────────────────────────────────────────

    /// The template could not be found or failed to render.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdminError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `BadRequest` -> 400
    /// - `Unauthorized` -> 401
    /// - `PermissionDenied` -> 403
    /// - `NotFound` -> 404
    /// - `MethodNotAllowed` -> 405
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::PermissionDenied(_) => 403,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::ExtensionNotFound { .. }
            | Self::InvalidResource { .. }
            | Self::DuplicateView { .. }
            | Self::TemplateError(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }

    /// Returns `true` for errors raised while wiring the administration.
    ///
    /// These abort application startup.
    pub const fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_)
                | Self::ImproperlyConfigured(_)
                | Self::ExtensionNotFound { .. }
                | Self::InvalidResource { .. }
                | Self::DuplicateView { .. }
        )
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, AdminError>`.
pub type AdminResult<T> = Result<T, AdminError>;
