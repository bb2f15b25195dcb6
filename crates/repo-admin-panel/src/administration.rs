//! The administration registry and router generation.
//!
//! An [`Administration`] is built against a [`HostApp`]. It owns the route
//! namespace, the registered views and the menu, and produces an axum
//! router serving every view under its URL prefix.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::routing::get;
use axum::Router;
use repo_admin_core::{AdminError, AdminResult};
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::app::HostApp;
use crate::auth::{Authorizer, RoleRequired};
use crate::blueprint::Blueprint;
use crate::dashboard::DashboardRegistry;
use crate::dispatch::{dispatch, run_menu_hook, DispatchState};
use crate::menu::{AdminMenu, MenuInitHook, ADMIN_MENU_KEY};
use crate::render::{Renderer, TeraRenderer};
use crate::views::{ensure_renderable, AdminContext, AdminView};

/// Default display name.
pub const DEFAULT_NAME: &str = "Administration";
/// Default URL prefix.
pub const DEFAULT_URL: &str = "/administration";
/// Default endpoint namespace.
pub const DEFAULT_ENDPOINT: &str = "administration";

/// Configures and builds an [`Administration`].
pub struct AdministrationBuilder {
    app: Arc<HostApp>,
    name: String,
    url: String,
    endpoint: String,
    base_template: Option<String>,
    dashboards: DashboardRegistry,
    authorizer: Option<Arc<dyn Authorizer>>,
    renderer: Option<Arc<dyn Renderer>>,
    static_dir: Option<PathBuf>,
}

impl AdministrationBuilder {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets the URL prefix.
    #[must_use]
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Sets the endpoint namespace.
    #[must_use]
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Overrides the base template from the settings.
    #[must_use]
    pub fn base_template(mut self, template: &str) -> Self {
        self.base_template = Some(template.to_string());
        self
    }

    /// Replaces the dashboard table.
    #[must_use]
    pub fn dashboards(mut self, dashboards: DashboardRegistry) -> Self {
        self.dashboards = dashboards;
        self
    }

    /// Sets the access check.
    #[must_use]
    pub fn authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Sets the renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sets the directory served under `<url>/static`.
    #[must_use]
    pub fn static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    /// Builds the administration and registers its dashboard.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` if no dashboard view is configured.
    /// - `ImproperlyConfigured` if the configured dashboard is unknown.
    /// - `TemplateError` if the default renderer cannot load its templates.
    pub fn build(self) -> AdminResult<Administration> {
        let settings = self.app.settings();
        let key = settings
            .administration_dashboard_view
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AdminError::ConfigurationError(
                    "administration_dashboard_view is not set".to_string(),
                )
            })?;
        let dashboard = self.dashboards.resolve(&key)?;

        let base_template = self
            .base_template
            .unwrap_or_else(|| settings.administration_base_template.clone());
        let context = Arc::new(
            AdminContext::new(&self.name, &self.endpoint, &self.url, base_template)
                .with_dashboard(dashboard.type_id()),
        );
        let blueprint = Blueprint::new(&self.endpoint, &self.url).static_folder(self.static_dir);
        let authorizer: Arc<dyn Authorizer> = self
            .authorizer
            .unwrap_or_else(|| Arc::new(RoleRequired::new(&settings.administration_role)));
        let renderer: Arc<dyn Renderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(TeraRenderer::from_settings(settings)?),
        };
        let menu_hook = MenuInitHook::new(
            AdminMenu::new(),
            Arc::clone(self.app.navigation()),
            ADMIN_MENU_KEY,
        );
        let dashboard_view = dashboard.create(&context);

        let mut administration = Administration {
            app: self.app,
            context,
            blueprint,
            views: Vec::new(),
            menu_hook,
            authorizer,
            renderer,
        };
        administration.add_view(dashboard_view)?;
        info!(
            name = administration.name(),
            url = administration.url(),
            dashboard = %key,
            "administration initialized"
        );
        Ok(administration)
    }
}

impl std::fmt::Debug for AdministrationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdministrationBuilder")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// The administration: registered views, their routes and their menu.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use repo_admin_core::Settings;
/// use repo_admin_panel::administration::Administration;
/// use repo_admin_panel::app::HostApp;
///
/// let app = Arc::new(HostApp::new(Settings::default()));
/// let administration = Administration::builder(app).build().unwrap();
/// assert_eq!(administration.url(), "/administration");
/// assert_eq!(administration.views().len(), 1);
/// let router = administration.into_router();
/// ```
pub struct Administration {
    app: Arc<HostApp>,
    context: Arc<AdminContext>,
    blueprint: Blueprint,
    views: Vec<Arc<dyn AdminView>>,
    menu_hook: MenuInitHook,
    authorizer: Arc<dyn Authorizer>,
    renderer: Arc<dyn Renderer>,
}

impl Administration {
    /// Starts building an administration for `app`.
    pub fn builder(app: Arc<HostApp>) -> AdministrationBuilder {
        AdministrationBuilder {
            app,
            name: DEFAULT_NAME.to_string(),
            url: DEFAULT_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            base_template: None,
            dashboards: DashboardRegistry::default(),
            authorizer: None,
            renderer: None,
            static_dir: None,
        }
    }

    /// Registers `view`: binds its URL and adds it to the menu.
    ///
    /// # Errors
    ///
    /// - `ImproperlyConfigured` if the view cannot serve GET.
    /// - `DuplicateView` if its endpoint or URL is already taken.
    pub fn add_view(&mut self, view: Arc<dyn AdminView>) -> AdminResult<()> {
        ensure_renderable(view.as_ref())?;
        let base = view.base();
        let route = self
            .blueprint
            .add_url_rule(base.url(), base.endpoint())
            .map_err(|e| match e {
                AdminError::DuplicateView { conflict, .. } => AdminError::DuplicateView {
                    view: base.name().to_string(),
                    conflict,
                },
                other => other,
            })?
            .route
            .clone();
        self.menu_hook.menu_mut().add_view_to_menu(base);
        debug!(
            endpoint = %base.endpoint_location_name(),
            route = %route,
            "administration view registered"
        );
        self.views.push(view);
        Ok(())
    }

    /// The display name.
    pub fn name(&self) -> &str {
        self.context.name()
    }

    /// The endpoint namespace.
    pub fn endpoint(&self) -> &str {
        self.context.endpoint()
    }

    /// The URL prefix.
    pub fn url(&self) -> &str {
        self.context.url()
    }

    /// The base template.
    pub fn base_template(&self) -> &str {
        self.context.base_template()
    }

    /// The registered views, dashboard first.
    pub fn views(&self) -> &[Arc<dyn AdminView>] {
        &self.views
    }

    /// The menu collected so far.
    pub const fn menu(&self) -> &AdminMenu {
        self.menu_hook.menu()
    }

    /// The route namespace.
    pub const fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// What views know about this administration.
    pub const fn context(&self) -> &Arc<AdminContext> {
        &self.context
    }

    /// The deferred menu flush.
    pub const fn menu_hook(&self) -> &MenuInitHook {
        &self.menu_hook
    }

    /// The host application.
    pub const fn app(&self) -> &Arc<HostApp> {
        &self.app
    }

    /// Builds the router serving every registered view.
    ///
    /// The dashboard also answers on the bare prefix. The menu is flushed
    /// into the host navigation on the first request.
    pub fn into_router(self) -> Router {
        let state = Arc::new(DispatchState {
            authorizer: self.authorizer,
            renderer: self.renderer,
        });
        let mut router: Router<Arc<DispatchState>> = Router::new();
        let prefix = self.blueprint.url_prefix();
        let prefix_taken = self.blueprint.rules().iter().any(|r| r.route == prefix);
        for (view, rule) in self.views.iter().zip(self.blueprint.rules()) {
            router = route_view(router, &rule.route, view);
            if rule.rule == "/" && !prefix.is_empty() && !prefix_taken {
                router = route_view(router, prefix, view);
            }
        }
        if let Some(dir) = self.blueprint.static_folder_path() {
            router = router.nest_service(&self.blueprint.static_route(), ServeDir::new(dir));
        }
        let hook = Arc::new(self.menu_hook);
        router
            .with_state(state)
            .layer(axum::middleware::from_fn_with_state(hook, run_menu_hook))
    }
}

impl std::fmt::Debug for Administration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Administration")
            .field("name", &self.name())
            .field("url", &self.url())
            .field("endpoint", &self.endpoint())
            .field("view_count", &self.views.len())
            .finish_non_exhaustive()
    }
}

fn route_view(
    router: Router<Arc<DispatchState>>,
    path: &str,
    view: &Arc<dyn AdminView>,
) -> Router<Arc<DispatchState>> {
    let view = Arc::clone(view);
    if path.contains('{') {
        router.route(
            path,
            get(
                move |State(state): State<Arc<DispatchState>>,
                      Path(params): Path<HashMap<String, String>>,
                      request: Request| {
                    dispatch(state, Arc::clone(&view), params, request)
                },
            ),
        )
    } else {
        router.route(
            path,
            get(
                move |State(state): State<Arc<DispatchState>>, request: Request| {
                    dispatch(state, Arc::clone(&view), HashMap::new(), request)
                },
            ),
        )
    }
}
