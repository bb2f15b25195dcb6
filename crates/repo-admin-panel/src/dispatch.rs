//! Request handling for administration views.
//!
//! Every route runs the same pipeline: authorize, call the view's GET
//! handler, render the returned template. Failures become JSON error
//! responses of the form `{"error": "..."}`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use repo_admin_core::logging::request_span;
use repo_admin_core::{AdminError, AdminResult};
use tracing::{debug, error, warn, Instrument};

use crate::auth::{Authorizer, Identity};
use crate::menu::MenuInitHook;
use crate::render::Renderer;
use crate::views::{AdminView, ViewRequest};

/// Shared state of the administration router.
pub struct DispatchState {
    /// Access check run before every view.
    pub authorizer: Arc<dyn Authorizer>,
    /// Renders view responses.
    pub renderer: Arc<dyn Renderer>,
}

impl std::fmt::Debug for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchState").finish_non_exhaustive()
    }
}

/// Handles one request for `view`.
pub async fn dispatch(
    state: Arc<DispatchState>,
    view: Arc<dyn AdminView>,
    path_params: HashMap<String, String>,
    request: Request,
) -> Response {
    let span = request_span(&view.base().endpoint_location_name());
    async move {
        let query = match Query::<HashMap<String, String>>::try_from_uri(request.uri()) {
            Ok(Query(query)) => query,
            Err(e) => return error_response(&AdminError::BadRequest(e.to_string())),
        };
        let view_request = ViewRequest {
            path_params,
            query,
            identity: request.extensions().get::<Identity>().cloned(),
        };
        match handle(&state, view.as_ref(), view_request).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => error_response(&e),
        }
    }
    .instrument(span)
    .await
}

async fn handle(
    state: &DispatchState,
    view: &dyn AdminView,
    request: ViewRequest,
) -> AdminResult<String> {
    state.authorizer.authorize(request.identity.as_ref())?;
    let response = view.get(request).await?;
    debug!(template = %response.template, "rendering view");
    state.renderer.render(&response)
}

/// Converts an error into a JSON response with the matching status.
pub fn error_response(err: &AdminError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "administration view failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "administration request rejected");
    }
    (
        status,
        axum::Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// Middleware flushing the administration menu on the first request.
pub async fn run_menu_hook(
    State(hook): State<Arc<MenuInitHook>>,
    request: Request,
    next: Next,
) -> Response {
    hook.trigger();
    next.run(request).await
}
