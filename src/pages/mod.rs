//! Page Module Index
//!
//! Every page the CRM can navigate to. Pages only know how to render themselves from a
//! parameter bag; where they are mounted, and whether they sit inside the application
//! shell, is decided by the route registry and the navigation root.

/// Landing, dashboard and the single-page modules (tasks, reports, settings, profile).
pub mod workspace;

/// Customer list and detail.
pub mod customers;

/// Lead pipeline list and detail.
pub mod leads;

/// User and role administration.
pub mod admin;

/// Login form (public) and the not-found fallback.
pub mod session;

use maud::{Markup, html};

use crate::routes::descriptor::Params;

/// Shared heading block used by most pages.
pub(crate) fn page_header(title: &str, subtitle: &str) -> Markup {
    html! {
        div class="page-header" {
            h2 { (title) }
            p class="page-subtitle" { (subtitle) }
        }
    }
}

/// Reads a parameter from the bag, falling back to `-` for display.
pub(crate) fn param<'a>(params: &'a Params, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or("-")
}
