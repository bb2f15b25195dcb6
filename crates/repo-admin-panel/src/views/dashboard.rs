//! The built-in landing page.

use std::sync::Arc;

use async_trait::async_trait;
use repo_admin_core::AdminResult;
use serde_json::json;

use super::{AdminContext, AdminView, BaseView, ViewOptions, ViewRequest};
use crate::render::TemplateResponse;

/// The default administration dashboard.
///
/// Always mounted at the administration root and rendered with
/// `repo_admin/index.html`.
#[derive(Debug)]
pub struct AdminDashboardView {
    base: BaseView,
}

impl AdminDashboardView {
    /// View name, also the endpoint.
    pub const NAME: &'static str = "dashboard";
    /// Extension the dashboard belongs to.
    pub const EXTENSION: &'static str = "repo-admin";

    /// Creates the dashboard for `admin`.
    pub fn new(admin: &Arc<AdminContext>) -> Self {
        Self {
            base: BaseView::new::<Self>(
                ViewOptions::new(Self::NAME).extension(Self::EXTENSION),
                admin,
            ),
        }
    }
}

#[async_trait]
impl AdminView for AdminDashboardView {
    fn base(&self) -> &BaseView {
        &self.base
    }

    async fn get(&self, _request: ViewRequest) -> AdminResult<TemplateResponse> {
        self.base.render(&json!({ "name": self.base.name() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    use crate::render::INDEX_TEMPLATE;

    #[tokio::test]
    async fn test_dashboard_renders_index() {
        let admin = Arc::new(
            AdminContext::new(
                "Administration",
                "administration",
                "/administration",
                "repo_admin/base.html",
            )
            .with_dashboard(TypeId::of::<AdminDashboardView>()),
        );
        let view = AdminDashboardView::new(&admin);
        assert_eq!(view.base().url(), "/");
        assert_eq!(view.base().endpoint(), "dashboard");
        assert_eq!(view.base().extension(), Some("repo-admin"));

        let response = view.get(ViewRequest::new()).await.unwrap();
        assert_eq!(response.template, INDEX_TEMPLATE);
        assert_eq!(response.get("name").unwrap(), "dashboard");
    }
}
