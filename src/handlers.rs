use axum::{
    Form,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    auth::{SESSION_COOKIE, SessionError, SessionState},
    config::{AppConfig, Env},
    models::LoginForm,
    navigation::NavigationState,
};

/// Where a failed login lands: the public landing page, with the error flag the login
/// form knows how to display.
pub const LOGIN_FAILED_LOCATION: &str = "/?error=invalid_credentials";

// --- Handlers ---

/// navigate
///
/// Fallback for every path not claimed by the session endpoints: the navigation root
/// decides which route set answers.
pub async fn navigate(State(navigation): State<NavigationState>, request: Request) -> Response {
    navigation.dispatch(request).await
}

/// login
///
/// [Public Route] `POST /session`. Verifies the submitted credentials, stores the signed
/// token in the session cookie and redirects to `/`. The redirect is what makes the
/// browser ask again, and the next request is resolved against the private set.
pub async fn login(
    State(session): State<SessionState>,
    State(config): State<AppConfig>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match session.sign_in(&form) {
        Ok(token) => {
            tracing::info!(email = %form.email, "operator signed in");
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(config.env == Env::Production)
                .build();
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        Err(SessionError::InvalidCredentials) => {
            tracing::info!(email = %form.email, "rejected sign-in attempt");
            Redirect::to(LOGIN_FAILED_LOCATION).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "could not issue session token");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// logout
///
/// `POST /session/logout`. Drops the session cookie and sends the browser back to `/`,
/// which now resolves against the public set.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    (jar.remove(removal), Redirect::to("/"))
}

/// health
///
/// Liveness probe. Lives outside the navigation root so it answers regardless of session.
pub async fn health() -> &'static str {
    "ok"
}
