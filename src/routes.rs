//! Request routing.
//!
//! Every request goes through one fallback handler, [`dispatch`], which walks an
//! ordered rule table and runs the action of the first rule that matches.
//!
//! # Rules (in precedence order)
//!
//! | # | Rule           | Match                              | Action             |
//! |---|----------------|------------------------------------|--------------------|
//! | 1 | `create-link`  | `POST /api/links`                  | create link (JSON) |
//! | 2 | `root`         | `GET /`                            | static files       |
//! | 3 | `reserved-api` | `GET /api/...`                     | 404 (JSON)         |
//! | 4 | `resolve`      | any other `GET`                    | redirect           |
//! | - | fallback       | everything else                    | static files       |
//!
//! Two invariants follow from the order: nothing under `/api/` is ever resolved as a
//! short code, and `/` is never resolved. Front-end assets such as `/style.css` go
//! through `resolve` like any other path; the redirect handler serves the file only
//! when no link is stored under that name.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use axum::{
    Router,
    extract::{Request, State},
    handler::Handler,
    http::Method,
    response::Response,
};

use crate::api::handlers::{
    create_link_handler, redirect_handler, reserved_api_handler, static_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Path of the link creation endpoint.
pub const CREATE_LINK_PATH: &str = "/api/links";

/// Prefix reserved for API endpoints.
pub const API_PREFIX: &str = "/api/";

/// What to do with a classified request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateLink,
    ResolveLink,
    ReservedNotFound,
    ServeStatic,
}

/// A named routing rule: a predicate over method and path plus the action to run.
pub struct Rule {
    pub name: &'static str,
    pub action: Action,
    matches: fn(&Method, &str) -> bool,
}

impl Rule {
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        (self.matches)(method, path)
    }
}

/// Routing rules, evaluated top to bottom.
pub static RULES: &[Rule] = &[
    Rule {
        name: "create-link",
        action: Action::CreateLink,
        matches: |method, path| method == Method::POST && path == CREATE_LINK_PATH,
    },
    Rule {
        name: "root",
        action: Action::ServeStatic,
        matches: |method, path| method == Method::GET && path == "/",
    },
    Rule {
        name: "reserved-api",
        action: Action::ReservedNotFound,
        matches: |method, path| method == Method::GET && path.starts_with(API_PREFIX),
    },
    Rule {
        name: "resolve",
        action: Action::ResolveLink,
        matches: |method, path| method == Method::GET && !path.is_empty(),
    },
];

/// Returns the first rule matching the request, if any.
pub fn matching_rule(method: &Method, path: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(method, path))
}

/// Classifies a request; unmatched requests are deferred to static serving.
pub fn classify(method: &Method, path: &str) -> Action {
    matching_rule(method, path)
        .map(|rule| rule.action)
        .unwrap_or(Action::ServeStatic)
}

/// Fallback handler running the rule table for every request.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let rule = matching_rule(request.method(), request.uri().path());
    let action = rule.map(|r| r.action).unwrap_or(Action::ServeStatic);

    ::tracing::debug!(
        rule = rule.map(|r| r.name).unwrap_or("fallback"),
        ?action,
        "Dispatching request"
    );

    match action {
        Action::CreateLink => create_link_handler.call(request, state).await,
        Action::ResolveLink => redirect_handler.call(request, state).await,
        Action::ReservedNotFound => reserved_api_handler.call(request, state).await,
        Action::ServeStatic => static_handler.call(request, state).await,
    }
}

/// Constructs the application router.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(tracing::layer())
}
