use maud::{DOCTYPE, Markup, html};

use crate::{
    models::SessionUser,
    routes::descriptor::{RouteDescriptor, RouteTarget},
};

const PRODUCT_NAME: &str = "CRM System";

/// NavItem
///
/// One sidebar entry. Groups carry their linkable sub-routes as children and have no
/// link of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub module: String,
    pub label: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub children: Vec<NavItem>,
}

/// Turns a module identifier (`customer-list`) into a sidebar label (`Customer list`).
fn label_for(module: &str) -> String {
    let spaced = module.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parameterized patterns need a value to be navigable, so they never become links.
fn linkable(path: &str) -> bool {
    !path.is_empty() && !path.contains('{')
}

/// navigation_items
///
/// Derives the sidebar from the authenticated descriptors, in declaration order.
/// Empty descriptors and groups with nothing linkable are left out.
pub fn navigation_items(descriptors: &[RouteDescriptor]) -> Vec<NavItem> {
    descriptors
        .iter()
        .filter_map(|descriptor| match &descriptor.target {
            RouteTarget::Leaf(route) if linkable(&route.path) => Some(NavItem {
                module: descriptor.module.clone(),
                label: label_for(&descriptor.module),
                href: Some(route.path.clone()),
                icon: descriptor.icon.clone(),
                children: Vec::new(),
            }),
            RouteTarget::Group(subroutes) => {
                let children: Vec<NavItem> = subroutes
                    .iter()
                    .filter(|subroute| linkable(&subroute.route.path))
                    .map(|subroute| NavItem {
                        module: subroute.module.clone(),
                        label: label_for(&subroute.module),
                        href: Some(subroute.route.path.clone()),
                        icon: subroute.icon.clone(),
                        children: Vec::new(),
                    })
                    .collect();

                (!children.is_empty()).then(|| NavItem {
                    module: descriptor.module.clone(),
                    label: label_for(&descriptor.module),
                    href: None,
                    icon: descriptor.icon.clone(),
                    children,
                })
            }
            _ => None,
        })
        .collect()
}

/// document
///
/// Bare HTML document. Public pages are rendered straight into this, without the shell.
pub fn document(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                (body)
            }
        }
    }
}

/// AppShell
///
/// The persistent layout around every authenticated page: sidebar, header with the
/// signed-in user and a logout control, and the content region.
#[derive(Debug, Clone)]
pub struct AppShell {
    navigation: Vec<NavItem>,
}

impl AppShell {
    pub fn new(descriptors: &[RouteDescriptor]) -> Self {
        Self {
            navigation: navigation_items(descriptors),
        }
    }

    pub fn navigation(&self) -> &[NavItem] {
        &self.navigation
    }

    /// Wraps `content` in the full layout. `current_path` marks the active sidebar link.
    pub fn wrap(&self, user: &SessionUser, current_path: &str, content: Markup) -> Markup {
        document(
            PRODUCT_NAME,
            html! {
                div class="app-shell" {
                    (self.sidebar(current_path))
                    div class="app-main" {
                        (header(user))
                        main class="app-content" {
                            (content)
                        }
                    }
                }
            },
        )
    }

    fn sidebar(&self, current_path: &str) -> Markup {
        html! {
            aside class="sidebar" {
                nav {
                    ul {
                        @for item in &self.navigation {
                            (nav_entry(item, current_path))
                        }
                    }
                }
            }
        }
    }
}

fn nav_entry(item: &NavItem, current_path: &str) -> Markup {
    html! {
        li data-module=(item.module) {
            @if let Some(icon) = &item.icon {
                span class="icon" data-icon=(icon) {}
            }
            @match &item.href {
                Some(href) => {
                    a href=(href) aria-current=[(href == current_path).then_some("page")] {
                        (item.label)
                    }
                }
                None => {
                    span class="nav-group" { (item.label) }
                }
            }
            @if !item.children.is_empty() {
                ul {
                    @for child in &item.children {
                        (nav_entry(child, current_path))
                    }
                }
            }
        }
    }
}

fn header(user: &SessionUser) -> Markup {
    html! {
        header class="app-header" {
            h1 { (PRODUCT_NAME) }
            div class="session" {
                span class="user" { (user.name) " (" (user.role.as_str()) ")" }
                form method="post" action="/session/logout" {
                    button type="submit" { "Cerrar Sesión" }
                }
            }
        }
    }
}
