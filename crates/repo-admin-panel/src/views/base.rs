//! Registration labels shared by every administration view.

use std::any::TypeId;
use std::sync::Arc;

use repo_admin_core::{AdminError, AdminResult};
use serde::Serialize;

use crate::render::{TemplateResponse, BASE_TEMPLATE_KEY, INDEX_TEMPLATE};

/// Class-level labels of a view, before resolution against an
/// administration.
///
/// # Examples
///
/// ```
/// use repo_admin_panel::views::ViewOptions;
///
/// let options = ViewOptions::new("Records")
///     .category("Site management")
///     .extension("repo-records");
/// assert_eq!(options.name, "Records");
/// assert!(options.url.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Display name, also used as the menu label.
    pub name: String,
    /// Menu grouping.
    pub category: Option<String>,
    /// Route name; defaults to the lower-cased name.
    pub endpoint: Option<String>,
    /// URL, absolute or relative to the administration prefix.
    pub url: Option<String>,
    /// Template rendered by GET; defaults to `repo_admin/index.html`.
    pub template: Option<String>,
    /// Name of the host extension the view belongs to.
    pub extension: Option<String>,
}

impl ViewOptions {
    /// Creates options with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the menu category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the extension name.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// What a view knows about the administration it is registered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    name: String,
    endpoint: String,
    url: String,
    base_template: String,
    dashboard: Option<TypeId>,
}

impl AdminContext {
    /// Creates a context with no dashboard type.
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        url: impl Into<String>,
        base_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            url: url.into(),
            base_template: base_template.into(),
            dashboard: None,
        }
    }

    /// Records the type of the configured dashboard view.
    #[must_use]
    pub const fn with_dashboard(mut self, dashboard: TypeId) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    /// The administration's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The administration's endpoint namespace.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The URL prefix.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The base template every view's template extends.
    pub fn base_template(&self) -> &str {
        &self.base_template
    }

    /// Returns whether `view_type` is the configured dashboard type.
    pub fn is_dashboard(&self, view_type: TypeId) -> bool {
        self.dashboard == Some(view_type)
    }
}

/// Resolved labels of a registered view.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use repo_admin_panel::views::{AdminContext, BaseView, ViewOptions};
///
/// struct RecordsView;
///
/// let admin = Arc::new(AdminContext::new(
///     "Administration", "administration", "/administration", "repo_admin/base.html",
/// ));
/// let base = BaseView::new::<RecordsView>(ViewOptions::new("Records"), &admin);
/// assert_eq!(base.endpoint(), "records");
/// assert_eq!(base.url(), "/records");
/// assert_eq!(base.endpoint_location_name(), "administration.records");
///
/// let relative = BaseView::new::<RecordsView>(ViewOptions::new("Stats").url("stats"), &admin);
/// assert_eq!(relative.url(), "/administration/stats");
/// ```
#[derive(Debug, Clone)]
pub struct BaseView {
    name: String,
    category: Option<String>,
    endpoint: String,
    url: String,
    template: String,
    extension: Option<String>,
    admin: Arc<AdminContext>,
}

impl BaseView {
    /// Resolves `options` for a view of type `V`.
    ///
    /// The endpoint is the explicit one or the lower-cased name. The URL is
    /// `/` for the configured dashboard type; otherwise `/<endpoint>` when
    /// unset, `<prefix>/<url>` when relative, and verbatim when absolute.
    pub fn new<V: 'static>(options: ViewOptions, admin: &Arc<AdminContext>) -> Self {
        let endpoint = options
            .endpoint
            .unwrap_or_else(|| options.name.to_lowercase());
        let url = if admin.is_dashboard(TypeId::of::<V>()) {
            "/".to_string()
        } else {
            match options.url {
                None => format!("/{endpoint}"),
                Some(url) if url.starts_with('/') => url,
                Some(url) => format!("{}/{url}", admin.url().trim_end_matches('/')),
            }
        };
        Self {
            name: options.name,
            category: options.category,
            endpoint,
            url,
            template: options
                .template
                .unwrap_or_else(|| INDEX_TEMPLATE.to_string()),
            extension: options.extension,
            admin: Arc::clone(admin),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The menu category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The resolved endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The resolved URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The template rendered by GET.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The host extension name.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The administration this view is registered with.
    pub const fn admin(&self) -> &Arc<AdminContext> {
        &self.admin
    }

    /// Returns `<administration endpoint>.<view endpoint>`.
    pub fn endpoint_location_name(&self) -> String {
        format!("{}.{}", self.admin.endpoint(), self.endpoint)
    }

    /// Builds the response for this view's template.
    ///
    /// `context` must serialize to a JSON object. `admin_base_template` and
    /// `admin_name` are added to it.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if `context` is not an object.
    pub fn render<C: Serialize + ?Sized>(&self, context: &C) -> AdminResult<TemplateResponse> {
        let serde_json::Value::Object(map) = serde_json::to_value(context)? else {
            return Err(AdminError::SerializationError(
                "template context must be a JSON object".to_string(),
            ));
        };
        let mut response = TemplateResponse::new(&self.template);
        response.context = map;
        response
            .with(BASE_TEMPLATE_KEY, self.admin.base_template())?
            .with("admin_name", self.admin.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dashboard;
    struct Records;

    fn admin() -> Arc<AdminContext> {
        Arc::new(
            AdminContext::new(
                "Administration",
                "administration",
                "/administration",
                "custom/base.html",
            )
            .with_dashboard(TypeId::of::<Dashboard>()),
        )
    }

    #[test]
    fn test_endpoint_defaults_to_lowercase_name() {
        let base = BaseView::new::<Records>(ViewOptions::new("Records"), &admin());
        assert_eq!(base.endpoint(), "records");
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let base = BaseView::new::<Records>(
            ViewOptions::new("Records").endpoint("record_list"),
            &admin(),
        );
        assert_eq!(base.endpoint(), "record_list");
        assert_eq!(base.url(), "/record_list");
    }

    #[test]
    fn test_dashboard_url_is_root() {
        let admin = admin();
        let base = BaseView::new::<Dashboard>(ViewOptions::new("dashboard"), &admin);
        assert_eq!(base.url(), "/");
        let base = BaseView::new::<Dashboard>(
            ViewOptions::new("dashboard").url("/elsewhere"),
            &admin,
        );
        assert_eq!(base.url(), "/");
    }

    #[test]
    fn test_relative_url_is_prefixed() {
        let base = BaseView::new::<Records>(ViewOptions::new("Stats").url("stats"), &admin());
        assert_eq!(base.url(), "/administration/stats");
    }

    #[test]
    fn test_absolute_url_is_verbatim() {
        let base = BaseView::new::<Records>(ViewOptions::new("Stats").url("/stats/all"), &admin());
        assert_eq!(base.url(), "/stats/all");
    }

    #[test]
    fn test_endpoint_location_name() {
        let base = BaseView::new::<Records>(ViewOptions::new("Records"), &admin());
        assert_eq!(base.endpoint_location_name(), "administration.records");
    }

    #[test]
    fn test_render_adds_base_template() {
        let base = BaseView::new::<Records>(ViewOptions::new("Records"), &admin());
        let response = base
            .render(&serde_json::json!({ "name": "Records" }))
            .unwrap();
        assert_eq!(response.template, INDEX_TEMPLATE);
        assert_eq!(response.get("admin_base_template").unwrap(), "custom/base.html");
        assert_eq!(response.get("admin_name").unwrap(), "Administration");
        assert_eq!(response.get("name").unwrap(), "Records");
    }

    #[test]
    fn test_render_rejects_non_object_context() {
        let base = BaseView::new::<Records>(ViewOptions::new("Records"), &admin());
        let err = base.render(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, AdminError::SerializationError(_)));
    }

    #[test]
    fn test_custom_template() {
        let base = BaseView::new::<Records>(
            ViewOptions::new("Records").template("custom/records.html"),
            &admin(),
        );
        assert_eq!(base.template(), "custom/records.html");
        assert!(base.category().is_none());
        assert!(base.extension().is_none());
        assert_eq!(base.admin().url(), "/administration");
    }
}
