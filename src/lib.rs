use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod shell;

// Declarative route sets, the generator and the registry.
pub mod routes;

// --- Public Re-exports ---

pub use auth::{JwtSession, SessionService, SessionState};
pub use config::AppConfig;
pub use navigation::{AuthSnapshot, NavigationRoot, NavigationState, NavigationTree};
pub use routes::RouteSetRegistry;

/// AppState
///
/// The single container of shared services. Everything in it is immutable after
/// startup, so cloning it per request is a handful of `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
    /// Session collaborator: resolves and issues sessions.
    pub session: SessionState,
    /// The authenticated/unauthenticated routing switch.
    pub navigation: NavigationState,
}

impl AppState {
    /// Wires the default services: signed-cookie sessions and the canonical registry.
    pub fn new(config: AppConfig) -> Self {
        let session: SessionState = Arc::new(JwtSession::new(&config));
        let registry = Arc::new(RouteSetRegistry::new(&config));
        Self::with_parts(config, session, registry)
    }

    /// Wires explicit parts. Tests use this to substitute the session collaborator or the
    /// route sets.
    pub fn with_parts(
        config: AppConfig,
        session: SessionState,
        registry: Arc<RouteSetRegistry>,
    ) -> Self {
        let navigation = Arc::new(NavigationRoot::new(registry, Arc::clone(&session)));
        Self {
            config,
            session,
            navigation,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        Arc::clone(&app_state.session)
    }
}

impl FromRef<AppState> for NavigationState {
    fn from_ref(app_state: &AppState) -> NavigationState {
        Arc::clone(&app_state.navigation)
    }
}

/// create_router
///
/// Assembles the HTTP surface: the health probe and session endpoints are fixed routes,
/// everything else falls through to the navigation root. Observability layers wrap the
/// whole thing.
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .route("/health", get(handlers::health))
        .route("/session", post(handlers::login))
        .route("/session/logout", post(handlers::logout))
        .fallback(handlers::navigate)
        .with_state(state);

    base_router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// One `navigation_request` span per request. It carries the method, the path without its
/// query string (login errors and filters travel there), and the request id. `snapshot`
/// starts empty and is filled in by the navigation root once it has asked the session
/// collaborator, so every line of a page render says which route set served it. Session
/// endpoints and the health probe leave it unset.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "navigation_request",
        method = %request.method(),
        path = %request.uri().path(),
        req_id = %request_id,
        snapshot = tracing::field::Empty,
    )
}
