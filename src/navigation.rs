use std::{collections::HashSet, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, Request},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use maud::Markup;
use tower::ServiceExt;
use tracing::Span;

use crate::{
    auth::SessionState,
    models::SessionUser,
    pages::session::not_found,
    routes::{
        descriptor::{PageFactory, Params},
        generator::{RouteRegistration, generate_routes},
        registry::RouteSetRegistry,
    },
    shell::{AppShell, document},
};

/// AuthSnapshot
///
/// The two states of the navigation root. Taken once per request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSnapshot {
    Authenticated,
    Unauthenticated,
}

impl From<bool> for AuthSnapshot {
    fn from(authenticated: bool) -> Self {
        if authenticated {
            AuthSnapshot::Authenticated
        } else {
            AuthSnapshot::Unauthenticated
        }
    }
}

/// NavigationTree
///
/// What the navigation root mounts for a given snapshot: the private registrations inside
/// the application shell, or the public registrations directly at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTree {
    Shell(Vec<RouteRegistration>),
    TopLevel(Vec<RouteRegistration>),
}

impl NavigationTree {
    pub fn registrations(&self) -> &[RouteRegistration] {
        match self {
            NavigationTree::Shell(registrations) | NavigationTree::TopLevel(registrations) => {
                registrations
            }
        }
    }

    pub fn is_shell(&self) -> bool {
        matches!(self, NavigationTree::Shell(_))
    }
}

/// NavigationRoot
///
/// The single access-gating decision point. Holds the registry and the session
/// collaborator; for every request it takes the authentication snapshot exactly once and
/// hands the request to the matching route table.
///
/// Both route tables are compiled from `resolve` at construction. The registry is
/// immutable, so they are what `resolve` would produce on any request.
pub struct NavigationRoot {
    registry: Arc<RouteSetRegistry>,
    session: SessionState,
    private_router: Router,
    public_router: Router,
}

/// Shared handle stored in `AppState`.
pub type NavigationState = Arc<NavigationRoot>;

impl NavigationRoot {
    pub fn new(registry: Arc<RouteSetRegistry>, session: SessionState) -> Self {
        for omission in registry.audit() {
            tracing::warn!(%omission, "route descriptor contributes no pages");
        }

        let shell = Arc::new(AppShell::new(registry.private_routes()));

        let mut root = Self {
            registry,
            session,
            private_router: Router::new(),
            public_router: Router::new(),
        };
        root.private_router = mount(root.resolve(AuthSnapshot::Authenticated), Some(shell));
        root.public_router = mount(root.resolve(AuthSnapshot::Unauthenticated), None);

        tracing::info!(
            private = root.resolve(AuthSnapshot::Authenticated).registrations().len(),
            public = root.resolve(AuthSnapshot::Unauthenticated).registrations().len(),
            "navigation root ready"
        );

        root
    }

    pub fn registry(&self) -> &RouteSetRegistry {
        &self.registry
    }

    /// The mount plan for `snapshot`. Unauthenticated never looks at the private set.
    pub fn resolve(&self, snapshot: AuthSnapshot) -> NavigationTree {
        match snapshot {
            AuthSnapshot::Authenticated => {
                NavigationTree::Shell(generate_routes(self.registry.private_routes()))
            }
            AuthSnapshot::Unauthenticated => {
                NavigationTree::TopLevel(generate_routes(self.registry.public_routes()))
            }
        }
    }

    /// dispatch
    ///
    /// Renders one request: snapshot, select, route. The resolved user rides along in the
    /// request extensions so the shell shows the same identity that selected the table.
    pub async fn dispatch(&self, mut request: Request) -> Response {
        let user = self.session.snapshot(request.headers());
        let snapshot = AuthSnapshot::from(user.is_some());

        Span::current().record("snapshot", tracing::field::debug(snapshot));
        tracing::debug!(?snapshot, path = %request.uri().path(), "navigating");

        let router = match user {
            Some(user) => {
                request.extensions_mut().insert(user);
                self.private_router.clone()
            }
            None => self.public_router.clone(),
        };

        match router.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

/// Why a registration was left out of the compiled route table.
fn rejection(path: &str) -> Option<&'static str> {
    if !path.starts_with('/') {
        return Some("pattern must start with '/'");
    }
    if path.split('/').any(|segment| segment.starts_with(':') || segment.starts_with('*')) {
        return Some("pattern uses ':' or '*' captures; use '{name}' or '{*name}'");
    }
    None
}

/// Collapses capture names so `/customers/{id}` and `/customers/{slug}` compare equal:
/// the router cannot tell them apart either.
fn route_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// mount
///
/// Compiles registrations into an axum route table. Registration order is precedence:
/// when two registrations share a route shape the first one is kept and the later one is
/// logged and dropped. With a shell, every page and the fallback render inside it.
///
/// Every path is first inserted into a scratch `matchit` table, the matcher axum routes
/// with, so malformed or conflicting patterns are skipped here instead of panicking in
/// `Router::route`.
fn mount(tree: NavigationTree, shell: Option<Arc<AppShell>>) -> Router {
    let mut router = Router::new();
    let mut seen = HashSet::new();
    let mut matcher = matchit::Router::new();

    for registration in tree.registrations() {
        if let Some(reason) = rejection(&registration.path) {
            tracing::warn!(
                module = %registration.module,
                path = %registration.path,
                reason,
                "route not mounted"
            );
            continue;
        }
        let shape = route_shape(&registration.path);
        if seen.contains(&shape) {
            tracing::warn!(
                module = %registration.module,
                path = %registration.path,
                "duplicate route shadowed by an earlier registration"
            );
            continue;
        }
        if let Err(e) = matcher.insert(registration.path.as_str(), ()) {
            tracing::warn!(
                module = %registration.module,
                path = %registration.path,
                error = %e,
                "route not mounted"
            );
            continue;
        }
        seen.insert(shape);

        let page = Arc::clone(&registration.component);
        let shell = shell.clone();
        router = router.route(
            &registration.path,
            get(
                move |uri: Uri,
                      path: Option<Path<Params>>,
                      Query(query): Query<Params>,
                      user: Option<SessionUser>| async move {
                    let mut params = query;
                    if let Some(Path(captures)) = path {
                        params.extend(captures);
                    }
                    render(&page, &params, shell.as_deref(), user.as_ref(), uri.path())
                        .into_response()
                },
            ),
        );
    }

    let fallback_page: PageFactory = Arc::new(not_found);
    router.fallback(move |uri: Uri, user: Option<SessionUser>| async move {
        let body = render(
            &fallback_page,
            &Params::new(),
            shell.as_deref(),
            user.as_ref(),
            uri.path(),
        );
        (StatusCode::NOT_FOUND, body)
    })
}

fn render(
    page: &PageFactory,
    params: &Params,
    shell: Option<&AppShell>,
    user: Option<&SessionUser>,
    current_path: &str,
) -> Html<String> {
    let content: Markup = page.render(params);
    let markup = match (shell, user) {
        (Some(shell), Some(user)) => shell.wrap(user, current_path, content),
        _ => document("CRM System", content),
    };
    Html(markup.into_string())
}
