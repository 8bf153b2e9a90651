use crate::{
    config::AppConfig,
    pages::{
        admin, customers, leads,
        workspace::{self, SettingsPage},
    },
};

use super::descriptor::{RouteDescriptor, RouteEntry, SubRouteEntry};

/// Authenticated Route Set
///
/// The whole navigable surface of a signed-in operator, in sidebar order. Every page is
/// mounted inside the application shell by the navigation root.
///
/// Leaf descriptors render one page; group descriptors render each of their sub-routes
/// and show up in the sidebar as a section. Parameterized paths (`{id}`) are routable
/// but never linked from the sidebar.
pub fn authenticated_routes(config: &AppConfig) -> Vec<RouteDescriptor> {
    vec![
        // GET /
        // Landing page once signed in.
        RouteDescriptor::leaf("home", RouteEntry::new("/", workspace::home)).with_icon("home"),
        // GET /dashboard
        RouteDescriptor::leaf("dashboard", RouteEntry::new("/dashboard", workspace::dashboard))
            .with_icon("chart"),
        // --- Customers ---
        // GET /customers?page=...
        // GET /customers/{id}
        RouteDescriptor::group(
            "customers",
            vec![
                SubRouteEntry::new("customer-list", RouteEntry::new("/customers", customers::list))
                    .with_icon("users"),
                SubRouteEntry::new(
                    "customer-detail",
                    RouteEntry::new("/customers/{id}", customers::detail),
                ),
            ],
        )
        .with_icon("users"),
        // --- Leads ---
        RouteDescriptor::group(
            "leads",
            vec![
                SubRouteEntry::new("lead-list", RouteEntry::new("/leads", leads::list))
                    .with_icon("funnel"),
                SubRouteEntry::new("lead-detail", RouteEntry::new("/leads/{id}", leads::detail)),
            ],
        )
        .with_icon("funnel"),
        // GET /tasks?status=...
        RouteDescriptor::leaf("tasks", RouteEntry::new("/tasks", workspace::tasks))
            .with_icon("check"),
        RouteDescriptor::leaf("reports", RouteEntry::new("/reports", workspace::reports))
            .with_icon("report"),
        // --- Administration ---
        // Account and permission management, one level deep.
        RouteDescriptor::group(
            "administration",
            vec![
                SubRouteEntry::new("users", RouteEntry::new("/users", admin::users))
                    .with_icon("user"),
                SubRouteEntry::new("roles", RouteEntry::new("/roles", admin::roles))
                    .with_icon("shield"),
            ],
        )
        .with_icon("lock"),
        RouteDescriptor::leaf(
            "settings",
            RouteEntry::new(
                "/settings",
                SettingsPage {
                    api_base_url: config.api_base_url.clone(),
                },
            ),
        )
        .with_icon("gear"),
        RouteDescriptor::leaf("profile", RouteEntry::new("/profile", workspace::profile))
            .with_icon("user"),
    ]
}
