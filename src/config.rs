use std::{env, net::SocketAddr};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{OperatorAccount, Role};

const LOCAL_SESSION_SECRET: &str = "crm-local-session-secret-change-me";
const LOCAL_OPERATOR_EMAIL: &str = "admin@crm.local";
const LOCAL_OPERATOR_PASSWORD: &str = "admin";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;
/// One year. Longer lifetimes are rejected rather than risk overflowing token expiry.
const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingInProduction(&'static str),

    #[error("CRM_BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(String),

    #[error("CRM_SESSION_TTL_MINUTES must be between 1 and 525600 minutes: {0}")]
    InvalidSessionTtl(String),

    #[error("CRM_OPERATOR_ROLE is not one of admin, manager, agent: {0}")]
    InvalidRole(String),
}

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and never
/// mutated; handlers and the session service pull it out of `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local login bypass and log format.
    pub env: Env,
    // Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    // HMAC key used to sign and verify session tokens.
    pub session_secret: String,
    // Lifetime of an issued session token.
    pub session_ttl_minutes: i64,
    // The single operator the login form accepts.
    pub operator: OperatorAccount,
    // REST backend the pages talk to. Displayed on the settings page.
    pub api_base_url: String,
}

/// Env
///
/// Runtime context: local development (pretty logs, bypass header, fallback secrets) or
/// production (JSON logs, every secret mandatory).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe fixture for tests: local env and known credentials, no environment reads.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session_secret: LOCAL_SESSION_SECRET.to_string(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            operator: local_operator(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

fn local_operator() -> OperatorAccount {
    OperatorAccount {
        id: Uuid::from_u128(1),
        name: "Administrador".to_string(),
        email: LOCAL_OPERATOR_EMAIL.to_string(),
        password: LOCAL_OPERATOR_PASSWORD.to_string(),
        role: Role::Admin,
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every setting from the process environment. Local runs fall back to
    /// development defaults; production refuses to start without its secrets.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let bind_raw = env::var("CRM_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw))?;

        let session_ttl_minutes = match env::var("CRM_SESSION_TTL_MINUTES") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(minutes) if (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) => minutes,
                _ => return Err(ConfigError::InvalidSessionTtl(raw)),
            },
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };

        let session_secret = required(env, "CRM_SESSION_SECRET", LOCAL_SESSION_SECRET)?;

        let fallback = local_operator();
        let role = match non_empty("CRM_OPERATOR_ROLE") {
            Some(raw) => Role::parse(&raw).ok_or(ConfigError::InvalidRole(raw))?,
            None => fallback.role,
        };
        let operator = OperatorAccount {
            id: fallback.id,
            name: non_empty("CRM_OPERATOR_NAME").unwrap_or(fallback.name),
            email: required(env, "CRM_OPERATOR_EMAIL", LOCAL_OPERATOR_EMAIL)?,
            password: required(env, "CRM_OPERATOR_PASSWORD", LOCAL_OPERATOR_PASSWORD)?,
            role,
        };

        let api_base_url =
            non_empty("CRM_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            env,
            bind_addr,
            session_secret,
            session_ttl_minutes,
            operator,
            api_base_url,
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Mandatory in production, falls back to `local_default` otherwise.
fn required(env: Env, key: &'static str, local_default: &str) -> Result<String, ConfigError> {
    match (non_empty(key), env) {
        (Some(value), _) => Ok(value),
        (None, Env::Production) => Err(ConfigError::MissingInProduction(key)),
        (None, Env::Local) => Ok(local_default.to_string()),
    }
}
