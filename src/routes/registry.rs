use crate::config::AppConfig;

use super::{
    authenticated::authenticated_routes,
    descriptor::RouteDescriptor,
    generator::{Omission, audit_routes},
    public::public_routes,
};

/// RouteSetRegistry
///
/// The application's entire navigable surface: one ordered descriptor set for signed-in
/// operators and one for anonymous visitors. Built once at startup and only ever read
/// afterwards; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteSetRegistry {
    private_routes: Vec<RouteDescriptor>,
    public_routes: Vec<RouteDescriptor>,
}

impl RouteSetRegistry {
    /// The CRM's canonical route sets.
    pub fn new(config: &AppConfig) -> Self {
        Self::from_sets(authenticated_routes(config), public_routes())
    }

    /// Builds a registry from arbitrary sets. Used by tests and embedders that need a
    /// different navigable surface.
    pub fn from_sets(
        private_routes: Vec<RouteDescriptor>,
        public_routes: Vec<RouteDescriptor>,
    ) -> Self {
        Self {
            private_routes,
            public_routes,
        }
    }

    pub fn private_routes(&self) -> &[RouteDescriptor] {
        &self.private_routes
    }

    pub fn public_routes(&self) -> &[RouteDescriptor] {
        &self.public_routes
    }

    /// Omissions in both sets, private first. Empty for a well-formed registry.
    pub fn audit(&self) -> Vec<Omission> {
        let mut omissions = audit_routes(&self.private_routes);
        omissions.extend(audit_routes(&self.public_routes));
        omissions
    }
}
