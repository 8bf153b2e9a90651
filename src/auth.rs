use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, StatusCode, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::{LoginForm, OperatorAccount, Role, SessionUser},
};

/// Cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "crm_auth_token";

/// Local-only header that authenticates as the configured operator without a token.
pub const OPERATOR_BYPASS_HEADER: &str = "x-crm-operator";

/// Claims
///
/// Payload of the session token. Everything the shell needs to render the header lives
/// here, so resolving a session never leaves the process.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the operator's id.
    pub sub: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Expiration Time (exp), seconds since the epoch. Enforced on every decode.
    pub exp: usize,
    /// Issued At (iat), seconds since the epoch.
    pub iat: usize,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        SessionUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session lifetime does not produce a valid expiry")]
    InvalidLifetime,

    #[error("failed to sign session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// SessionService
///
/// The session collaborator consulted by the navigation root. `snapshot` must be
/// synchronous and local: it runs once per request on the routing path. Any failure to
/// produce a user means "not authenticated".
pub trait SessionService: Send + Sync {
    /// Resolves the requesting user, if the request carries a valid session.
    fn snapshot(&self, headers: &HeaderMap) -> Option<SessionUser>;

    /// Verifies credentials and returns a freshly signed session token.
    fn sign_in(&self, form: &LoginForm) -> Result<String, SessionError>;

    fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        self.snapshot(headers).is_some()
    }
}

/// Shared handle stored in `AppState`.
pub type SessionState = Arc<dyn SessionService>;

/// JwtSession
///
/// Signed-cookie sessions: HS256 tokens in the `crm_auth_token` cookie, checked against
/// the single configured operator at sign-in.
pub struct JwtSession {
    env: Env,
    operator: OperatorAccount,
    // `None` when the configured lifetime is out of range; sign-in then fails instead of
    // issuing a token.
    ttl: Option<Duration>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSession {
    pub fn new(config: &AppConfig) -> Self {
        let secret = config.session_secret.as_bytes();
        Self {
            env: config.env,
            operator: config.operator.clone(),
            ttl: Duration::try_minutes(config.session_ttl_minutes),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Signs a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &SessionUser) -> Result<String, SessionError> {
        let now = Utc::now();
        let expires_at = self
            .ttl
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(SessionError::InvalidLifetime)?;
        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp().max(0) as usize,
            exp: expires_at.timestamp().max(0) as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    fn local_bypass(&self, headers: &HeaderMap) -> Option<SessionUser> {
        if self.env != Env::Local {
            return None;
        }

        let email = headers.get(OPERATOR_BYPASS_HEADER)?.to_str().ok()?;
        self.operator
            .email
            .eq_ignore_ascii_case(email.trim())
            .then(|| self.operator.to_session_user())
    }
}

impl SessionService for JwtSession {
    fn snapshot(&self, headers: &HeaderMap) -> Option<SessionUser> {
        if let Some(user) = self.local_bypass(headers) {
            return Some(user);
        }

        let jar = CookieJar::from_headers(headers);
        let cookie = jar.get(SESSION_COOKIE)?;

        // Expired, tampered and malformed tokens all fall through to the public routes.
        match decode::<Claims>(cookie.value(), &self.decoding_key, &Validation::default()) {
            Ok(data) => Some(data.claims.into()),
            Err(e) => {
                tracing::debug!(error = ?e.kind(), "rejected session token");
                None
            }
        }
    }

    fn sign_in(&self, form: &LoginForm) -> Result<String, SessionError> {
        if !self.operator.matches(&form.email, &form.password) {
            return Err(SessionError::InvalidCredentials);
        }

        self.issue(&self.operator.to_session_user())
    }
}

/// SessionUser Extractor
///
/// Reads the identity the navigation root attached to the request after taking the
/// authentication snapshot. It never re-reads the cookie, so a page handler sees exactly
/// the snapshot that selected its route table.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> OptionalFromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<SessionUser>().cloned())
    }
}
