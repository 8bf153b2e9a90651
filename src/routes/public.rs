use crate::pages::session;

use super::descriptor::{RouteDescriptor, RouteEntry};

/// Public Route Set
///
/// Everything an anonymous visitor can reach. Rendered at the router's top level with no
/// application shell around it.
///
/// Any path not listed here falls through to the not-found page, including every
/// private path: deep links do not leak the authenticated surface.
pub fn public_routes() -> Vec<RouteDescriptor> {
    vec![
        // GET /
        // The landing path doubles as the login form while signed out.
        RouteDescriptor::leaf("login", RouteEntry::new("/", session::login)),
    ]
}
