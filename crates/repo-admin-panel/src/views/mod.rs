//! Administration views.
//!
//! Every page of the administration is an [`AdminView`]: a [`BaseView`]
//! carrying the registration labels (name, endpoint, URL, category) plus an
//! async GET handler returning a [`TemplateResponse`].
//!
//! ## Key Types
//!
//! - [`AdminView`] - The trait implemented by every registered view
//! - [`BaseView`] - Endpoint/URL resolution and template rendering
//! - [`AdminDashboardView`] - The built-in landing page
//! - [`ResourceDetailView`] / [`ResourceListView`] - Resource-bound pages
//! - [`ResourceViewSet`] - A list and detail view declared together

pub mod base;
pub mod dashboard;
pub mod detail;
pub mod list;
pub mod resource;
pub mod viewset;

use std::collections::HashMap;

use async_trait::async_trait;
use repo_admin_core::{AdminError, AdminResult};

use crate::auth::Identity;
use crate::render::TemplateResponse;

pub use base::{AdminContext, BaseView, ViewOptions};
pub use dashboard::AdminDashboardView;
pub use detail::ResourceDetailView;
pub use list::{Column, ListOptions, ResourceListView};
pub use resource::{ActionSpec, DisplayFlags, ResourceBinding, ResourceOptions, ResourceView};
pub use viewset::ResourceViewSet;

/// The request data handed to a view's GET handler.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// Captured path parameters, e.g. `pid_value`.
    pub path_params: HashMap<String, String>,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// The authenticated identity, if any.
    pub identity: Option<Identity>,
}

impl ViewRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Returns a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// A page of the administration.
///
/// Views only need to provide [`base`](Self::base) and [`get`](Self::get).
/// Other HTTP methods are not dispatched; a view that does not allow GET is
/// rejected when it is added to the administration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use repo_admin_core::AdminResult;
/// use repo_admin_panel::render::TemplateResponse;
/// use repo_admin_panel::views::{AdminContext, AdminView, BaseView, ViewOptions, ViewRequest};
///
/// struct StatsView {
///     base: BaseView,
/// }
///
/// #[async_trait]
/// impl AdminView for StatsView {
///     fn base(&self) -> &BaseView {
///         &self.base
///     }
///
///     async fn get(&self, _request: ViewRequest) -> AdminResult<TemplateResponse> {
///         self.base.render(&serde_json::json!({ "name": self.base.name() }))
///     }
/// }
///
/// let admin = Arc::new(AdminContext::new(
///     "Administration", "administration", "/administration", "repo_admin/base.html",
/// ));
/// let view = StatsView { base: BaseView::new::<StatsView>(ViewOptions::new("Stats"), &admin) };
/// assert_eq!(view.base().url(), "/stats");
/// ```
#[async_trait]
pub trait AdminView: Send + Sync {
    /// The view's registration labels.
    fn base(&self) -> &BaseView;

    /// Returns the HTTP methods this view serves.
    fn allowed_methods(&self) -> Vec<http::Method> {
        vec![http::Method::GET]
    }

    /// Handles GET requests.
    ///
    /// Renders the view's template with its name by default, so every view
    /// accepted by [`ensure_renderable`] can answer GET.
    async fn get(&self, _request: ViewRequest) -> AdminResult<TemplateResponse> {
        let base = self.base();
        base.render(&serde_json::json!({ "name": base.name() }))
    }
}

/// Checks that `view` can serve GET requests.
///
/// # Errors
///
/// Returns `ImproperlyConfigured` if GET is not among the allowed methods.
pub fn ensure_renderable(view: &dyn AdminView) -> AdminResult<()> {
    if view.allowed_methods().contains(&http::Method::GET) {
        Ok(())
    } else {
        Err(AdminError::ImproperlyConfigured(format!(
            "Cannot instantiate administration view {} without a default GET view",
            view.base().name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct PostOnly {
        base: BaseView,
    }

    #[async_trait]
    impl AdminView for PostOnly {
        fn base(&self) -> &BaseView {
            &self.base
        }

        fn allowed_methods(&self) -> Vec<http::Method> {
            vec![http::Method::POST]
        }
    }

    struct Plain {
        base: BaseView,
    }

    #[async_trait]
    impl AdminView for Plain {
        fn base(&self) -> &BaseView {
            &self.base
        }
    }

    fn admin() -> Arc<AdminContext> {
        Arc::new(AdminContext::new(
            "Administration",
            "administration",
            "/administration",
            "repo_admin/base.html",
        ))
    }

    #[test]
    fn test_ensure_renderable_rejects_missing_get() {
        let view = PostOnly {
            base: BaseView::new::<PostOnly>(ViewOptions::new("Uploads"), &admin()),
        };
        let err = ensure_renderable(&view).unwrap_err();
        assert!(matches!(err, AdminError::ImproperlyConfigured(_)));
        assert_eq!(
            err.to_string(),
            "Improperly configured: Cannot instantiate administration view Uploads without a default GET view"
        );
    }

    #[test]
    fn test_ensure_renderable_accepts_default_methods() {
        let view = Plain {
            base: BaseView::new::<Plain>(ViewOptions::new("Plain"), &admin()),
        };
        assert!(ensure_renderable(&view).is_ok());
    }

    #[tokio::test]
    async fn test_default_get_renders_template() {
        let view = Plain {
            base: BaseView::new::<Plain>(
                ViewOptions::new("Plain").template("custom/plain.html"),
                &admin(),
            ),
        };
        let response = view.get(ViewRequest::new()).await.unwrap();
        assert_eq!(response.template, "custom/plain.html");
        assert_eq!(response.get("name"), Some(&serde_json::json!("Plain")));
        assert_eq!(
            response.get("admin_base_template"),
            Some(&serde_json::json!("repo_admin/base.html"))
        );
    }

    #[test]
    fn test_view_request_params() {
        let request = ViewRequest::new().path_param("pid_value", "abc-123");
        assert_eq!(request.param("pid_value"), Some("abc-123"));
        assert!(request.param("other").is_none());
        assert!(request.query_param("q").is_none());
    }
}
