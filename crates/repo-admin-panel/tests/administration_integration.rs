//! Integration tests for the administration: routing, access checks, list
//! and detail rendering, the deferred menu flush and registration errors.

use std::sync::Arc;

use async_trait::async_trait;
use repo_admin_core::{AdminError, AdminResult, Settings};
use repo_admin_panel::administration::Administration;
use repo_admin_panel::app::HostApp;
use repo_admin_panel::render::{TemplateResponse, TeraRenderer};
use repo_admin_panel::views::{
    ActionSpec, AdminView, BaseView, ResourceListView, ResourceOptions, ResourceViewSet,
    ViewOptions, ViewRequest,
};
use repo_admin_test::client::TestClient;
use repo_admin_test::fixtures::{
    self, admin_identity, plain_identity, FixtureResource, RECORDS_EXTENSION, RECORDS_RESOURCE,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn records_app() -> Arc<HostApp> {
    Arc::new(fixtures::host_app(FixtureResource::records()))
}

fn records_view_set() -> ResourceViewSet {
    ResourceViewSet::new("Records", RECORDS_EXTENSION, RECORDS_RESOURCE)
        .category("Content")
        .display_delete(true)
        .column_exclude_list(vec!["access_token".to_string()])
        .action(ActionSpec::new("publish", "Publish").api_endpoint("/api/records/publish"))
}

fn administration(app: &Arc<HostApp>) -> Administration {
    let mut administration = Administration::builder(Arc::clone(app)).build().unwrap();
    records_view_set().register(&mut administration).unwrap();
    administration
}

fn admin_client(app: &Arc<HostApp>) -> TestClient {
    let mut client = TestClient::new(administration(app).into_router());
    client.login_as(admin_identity());
    client
}

struct StatsView {
    base: BaseView,
}

#[async_trait]
impl AdminView for StatsView {
    fn base(&self) -> &BaseView {
        &self.base
    }

    async fn get(&self, request: ViewRequest) -> AdminResult<TemplateResponse> {
        let period = request.query_param("period").unwrap_or("week");
        self.base.render(&serde_json::json!({ "name": format!("Stats per {period}") }))
    }
}

struct LabelView {
    base: BaseView,
}

#[async_trait]
impl AdminView for LabelView {
    fn base(&self) -> &BaseView {
        &self.base
    }
}

fn stats_view(administration: &Administration, options: ViewOptions) -> Arc<dyn AdminView> {
    Arc::new(StatsView {
        base: BaseView::new::<StatsView>(options, administration.context()),
    })
}

// ═════════════════════════════════════════════════════════════════════
// 1. Dashboard
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_dashboard_served_at_prefix() {
    let app = records_app();
    let mut client = admin_client(&app);

    let response = client.get("/administration/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("<h1>Administration</h1>"));
    assert!(response.header("content-type").unwrap().starts_with("text/html"));

    let response = client.get("/administration").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("dashboard"));
}

#[tokio::test]
async fn test_custom_url_and_name() {
    let app = records_app();
    let administration = Administration::builder(Arc::clone(&app))
        .name("Back office")
        .url("/backoffice")
        .endpoint("backoffice")
        .build()
        .unwrap();
    assert_eq!(
        administration.views()[0].base().endpoint_location_name(),
        "backoffice.dashboard"
    );
    let mut client = TestClient::new(administration.into_router());
    client.login_as(admin_identity());

    let response = client.get("/backoffice/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("<h1>Back office</h1>"));
    assert_eq!(client.get("/administration/").await.status_code(), 404);
}

// ═════════════════════════════════════════════════════════════════════
// 2. Access checks
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_anonymous_request_is_unauthorized() {
    let app = records_app();
    let mut client = TestClient::new(administration(&app).into_router());

    for path in ["/administration/", "/administration/records", "/administration/records/1"] {
        let response = client.get(path).await;
        assert_eq!(response.status_code(), 401, "{path}");
        assert!(response.error_message().unwrap().contains("Authentication required"));
    }
}

#[tokio::test]
async fn test_missing_role_is_forbidden() {
    let app = records_app();
    let mut client = TestClient::new(administration(&app).into_router());
    client.login_as(plain_identity());

    let response = client.get("/administration/records").await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(
        response.error_message().as_deref(),
        Some("Permission denied: Role 'admin' required")
    );
}

#[tokio::test]
async fn test_role_comes_from_settings() {
    let resource = FixtureResource::records();
    let mut settings = fixtures::settings_for(&resource);
    settings.administration_role = "curator".to_string();
    let app = Arc::new(fixtures::host_app_with_settings(settings, resource));
    let mut client = TestClient::new(administration(&app).into_router());

    client.login_as(admin_identity());
    assert_eq!(client.get("/administration/").await.status_code(), 403);

    client.login_as(plain_identity().with_role("curator"));
    assert_eq!(client.get("/administration/").await.status_code(), 200);
}

// ═════════════════════════════════════════════════════════════════════
// 3. List and detail views
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_list_view_renders_search_config() {
    let app = records_app();
    let mut client = admin_client(&app);

    let response = client.get("/administration/records").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("<h2>Records</h2>"));
    assert!(response.contains("\"appId\":\"RECORDS_SEARCH\""));
    assert!(response.contains("\"url\":\"/api/records\""));
    assert!(response.contains("\"aggName\":\"status\""));
    assert!(response.contains("\"sortBy\":\"newest\""));
    assert!(response.contains("data-field=\"title\""));
    assert!(!response.contains("data-field=\"access_token\""));
    assert!(response.contains("\"publish\""));
}

#[tokio::test]
async fn test_detail_view_renders_pid() {
    let app = records_app();
    let mut client = admin_client(&app);

    let response = client.get("/administration/records/abc-123").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("data-pid=\"abc-123\""));
    assert!(response.contains("data-display-delete=\"true\""));
    assert!(response.contains("<dt>title</dt>"));
}

#[tokio::test]
async fn test_query_parameters_reach_view() {
    let app = records_app();
    let mut administration = administration(&app);
    let stats = StatsView {
        base: BaseView::new::<StatsView>(ViewOptions::new("Stats"), administration.context()),
    };
    administration.add_view(Arc::new(stats)).unwrap();
    let mut client = TestClient::new(administration.into_router());
    client.login_as(admin_identity());

    let response = client.get("/administration/stats?period=month").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("Stats per month"));
    assert!(client.get("/administration/stats").await.contains("Stats per week"));
}

#[tokio::test]
async fn test_only_get_is_routed() {
    let app = records_app();
    let mut client = admin_client(&app);

    let response = client
        .post_json("/administration/records", &serde_json::json!({"title": "x"}))
        .await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(client.delete("/administration/records/1").await.status_code(), 405);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = records_app();
    let mut client = admin_client(&app);
    assert_eq!(client.get("/administration/users").await.status_code(), 404);
}

#[tokio::test]
async fn test_view_without_get_override_renders_its_template() {
    let app = records_app();
    let mut administration = administration(&app);
    let view = LabelView {
        base: BaseView::new::<LabelView>(ViewOptions::new("Reports"), administration.context()),
    };
    administration.add_view(Arc::new(view)).unwrap();
    let mut client = TestClient::new(administration.into_router());
    client.login_as(admin_identity());

    let response = client.get("/administration/reports").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("<h2>Reports</h2>"));
}

#[tokio::test]
async fn test_pages_extend_configured_base_template() {
    let app = records_app();
    let mut renderer = TeraRenderer::new().unwrap();
    renderer
        .add_template(
            "custom/base.html",
            "CUSTOM-BASE {{ admin_name }} {% block content %}{% endblock content %}",
        )
        .unwrap();
    let mut administration = Administration::builder(Arc::clone(&app))
        .base_template("custom/base.html")
        .renderer(Arc::new(renderer))
        .build()
        .unwrap();
    records_view_set().register(&mut administration).unwrap();
    let mut client = TestClient::new(administration.into_router());
    client.login_as(admin_identity());

    let response = client.get("/administration/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("CUSTOM-BASE Administration"));
    assert!(response.contains("<h2>dashboard</h2>"));

    let response = client.get("/administration/records").await;
    assert!(response.contains("CUSTOM-BASE"));
    assert!(response.contains("<h2>Records</h2>"));

    let response = client.get("/administration/records/abc-123").await;
    assert!(response.contains("CUSTOM-BASE"));
    assert!(response.contains("data-pid=\"abc-123\""));
}

#[tokio::test]
async fn test_base_template_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("custom")).unwrap();
    std::fs::write(
        dir.path().join("custom/base.html"),
        "SETTINGS-BASE {% block content %}{% endblock content %}",
    )
    .unwrap();

    let resource = FixtureResource::records();
    let mut settings = fixtures::settings_for(&resource);
    settings.template_dirs = vec![dir.path().to_path_buf()];
    settings.administration_base_template = "custom/base.html".to_string();
    let app = Arc::new(fixtures::host_app_with_settings(settings, resource));
    let mut client = admin_client(&app);

    let response = client.get("/administration/records").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.contains("SETTINGS-BASE"));
    assert!(!response.contains("<h1>Administration</h1>"));
}

// ═════════════════════════════════════════════════════════════════════
// 4. Menu
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_menu_flushed_on_first_request() {
    let app = records_app();
    let mut client = admin_client(&app);
    assert!(app.navigation().is_empty());

    client.get("/administration/").await;
    let records = app.navigation().get("admin_navigation.Content.Records").unwrap();
    assert_eq!(records.endpoint.as_deref(), Some("administration.records"));
    let dashboard = app.navigation().get("admin_navigation.dashboard").unwrap();
    assert_eq!(dashboard.endpoint.as_deref(), Some("administration.dashboard"));
    let details = app.navigation().get("admin_navigation.Records details").unwrap();
    assert_eq!(details.endpoint.as_deref(), Some("administration.records-details"));
    let flushed = app.navigation().len();

    client.get("/administration/records").await;
    assert_eq!(app.navigation().len(), flushed);
}

#[tokio::test]
async fn test_menu_flushed_even_when_request_is_rejected() {
    let app = records_app();
    let mut client = TestClient::new(administration(&app).into_router());

    assert_eq!(client.get("/administration/").await.status_code(), 401);
    assert!(app.navigation().get("admin_navigation.dashboard").is_some());
}

// ═════════════════════════════════════════════════════════════════════
// 5. Registration errors
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_duplicate_view_set_is_rejected() {
    let app = records_app();
    let mut administration = administration(&app);
    let err = records_view_set().register(&mut administration).unwrap_err();
    assert!(matches!(err, AdminError::DuplicateView { .. }), "{err}");
    assert_eq!(administration.views().len(), 3);
}

#[test]
fn test_unknown_resource_is_rejected() {
    let app = records_app();
    let administration = Administration::builder(Arc::clone(&app)).build().unwrap();
    let options = ResourceOptions::new("Users")
        .extension(RECORDS_EXTENSION)
        .resource_config("users_resource");
    let err = ResourceListView::new(options, administration.context(), &app).unwrap_err();
    assert!(matches!(err, AdminError::InvalidResource { .. }), "{err}");
    assert!(err.is_startup_error());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let app = records_app();
    let administration = Administration::builder(Arc::clone(&app)).build().unwrap();
    let err = ResourceViewSet::new("Users", "repo-users", "users_resource")
        .list_view(administration.context(), &app)
        .unwrap_err();
    assert!(matches!(err, AdminError::ExtensionNotFound { .. }), "{err}");
}

#[test]
fn test_missing_search_endpoint_is_rejected() {
    let app = Arc::new(fixtures::host_app_with_settings(
        Settings::default(),
        FixtureResource::records(),
    ));
    let administration = Administration::builder(Arc::clone(&app)).build().unwrap();
    let err = records_view_set()
        .list_view(administration.context(), &app)
        .unwrap_err();
    assert!(matches!(err, AdminError::ImproperlyConfigured(_)), "{err}");
}

#[test]
fn test_renamed_path_parameter_is_rejected() {
    let app = records_app();
    let mut administration = administration(&app);
    let by_id = stats_view(
        &administration,
        ViewOptions::new("Record files").url("/records/{id}"),
    );
    let err = administration.add_view(by_id).unwrap_err();
    match &err {
        AdminError::DuplicateView { view, conflict } => {
            assert_eq!(view, "Record files");
            assert!(conflict.contains("/administration/records/{pid_value}"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(administration.views().len(), 3);
    let _router = administration.into_router();
}

#[test]
fn test_static_route_is_reserved() {
    let dir = tempfile::tempdir().unwrap();
    let app = records_app();
    let mut administration = Administration::builder(Arc::clone(&app))
        .static_dir(dir.path().to_path_buf())
        .build()
        .unwrap();
    let view = stats_view(&administration, ViewOptions::new("Static"));
    let err = administration.add_view(view).unwrap_err();
    assert!(matches!(err, AdminError::DuplicateView { .. }), "{err}");
    assert!(err.to_string().contains("reserved for static files"));

    let nested = stats_view(
        &administration,
        ViewOptions::new("Assets").url("/static/assets"),
    );
    assert!(administration.add_view(nested).is_err());
    let _router = administration.into_router();
}

#[test]
fn test_unset_dashboard_is_rejected() {
    let mut settings = Settings::default();
    settings.administration_dashboard_view = None;
    let err = Administration::builder(Arc::new(HostApp::new(settings)))
        .build()
        .unwrap_err();
    assert!(matches!(err, AdminError::ConfigurationError(_)), "{err}");
}

// ═════════════════════════════════════════════════════════════════════
// 6. Static files
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_static_folder_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("admin.css"), "body { margin: 0; }").unwrap();

    let app = records_app();
    let administration = Administration::builder(Arc::clone(&app))
        .static_dir(dir.path().to_path_buf())
        .build()
        .unwrap();
    let mut client = TestClient::new(administration.into_router());

    let response = client.get("/administration/static/admin.css").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "body { margin: 0; }");
}
