use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use crm_shell::{
    AppConfig, AppState, JwtSession, SessionService,
    auth::{Claims, OPERATOR_BYPASS_HEADER, SESSION_COOKIE},
    config::Env,
    create_router,
    handlers::LOGIN_FAILED_LOCATION,
    models::Role,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use tower::ServiceExt;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_SECRET: &str = "test-secret-value-1234567890";

fn test_config(env: Env) -> AppConfig {
    let mut config = AppConfig::default();
    config.env = env;
    config.session_secret = TEST_SECRET.to_string();
    config
}

/// Signs claims with an explicit expiry offset (negative means already expired).
fn create_token(exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::from_u128(1),
        name: "Administrador".to_string(),
        email: "admin@crm.local".to_string(),
        role: Role::Admin,
        iat: now as usize,
        exp: (now + exp_offset_secs) as usize,
    };

    let key = EncodingKey::from_secret(TEST_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn cookie_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
    );
    headers
}

async fn send(state: &AppState, request: Request<Body>) -> Response {
    create_router(state.clone()).oneshot(request).await.unwrap()
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::post("/session")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("email={email}&password={password}")))
        .unwrap()
}

// --- Session Snapshot ---

#[test]
fn valid_token_is_authenticated() {
    let session = JwtSession::new(&test_config(Env::Production));

    let user = session.snapshot(&cookie_headers(&create_token(3600))).unwrap();

    assert_eq!(user.id, Uuid::from_u128(1));
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn expired_token_fails_closed() {
    let session = JwtSession::new(&test_config(Env::Production));

    // Well past the decoder's default leeway.
    assert!(!session.is_authenticated(&cookie_headers(&create_token(-3600))));
}

#[test]
fn bypass_header_for_unknown_operator_is_ignored() {
    let session = JwtSession::new(&test_config(Env::Local));
    let mut headers = HeaderMap::new();
    headers.insert(OPERATOR_BYPASS_HEADER, HeaderValue::from_static("stranger@crm.local"));

    assert!(!session.is_authenticated(&headers));
}

// --- Login / Logout ---

#[tokio::test]
async fn login_sets_cookie_and_redirects_home() {
    let state = AppState::new(test_config(Env::Local));

    let response = send(&state, login_request("admin@crm.local", "admin")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_with_bad_password_returns_to_login_form() {
    let state = AppState::new(test_config(Env::Local));

    let response = send(&state, login_request("admin@crm.local", "wrong")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], LOGIN_FAILED_LOCATION);
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn issued_cookie_unlocks_private_routes() {
    let state = AppState::new(test_config(Env::Local));

    let login = send(&state, login_request("admin@crm.local", "admin")).await;
    let set_cookie = login.headers()[header::SET_COOKIE].to_str().unwrap();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let response = send(
        &state,
        Request::get("/dashboard")
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let state = AppState::new(test_config(Env::Local));

    let response = send(
        &state,
        Request::post("/session/logout")
            .header(header::COOKIE, format!("{SESSION_COOKIE}={}", create_token(3600)))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=;")));
}

#[tokio::test]
async fn bypass_header_renders_private_home_locally() {
    let state = AppState::new(test_config(Env::Local));

    let response = send(
        &state,
        Request::get("/")
            .header(OPERATOR_BYPASS_HEADER, "admin@crm.local")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Administrador (admin)"));
}

#[tokio::test]
async fn bypass_header_is_ignored_in_production() {
    let config = test_config(Env::Production);
    let session = Arc::new(JwtSession::new(&config));
    let state = AppState::with_parts(
        config.clone(),
        session,
        Arc::new(crm_shell::RouteSetRegistry::new(&config)),
    );

    let response = send(
        &state,
        Request::get("/dashboard")
            .header(OPERATOR_BYPASS_HEADER, "admin@crm.local")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
