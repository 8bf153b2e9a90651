//! Router Module Index
//!
//! The application's navigable surface, described as data. Descriptors are grouped into
//! two access-segregated sets (public and authenticated), flattened by the generator,
//! and mounted by the navigation root.

/// Data shapes: pages, route entries, sub-routes and descriptors.
pub mod descriptor;

/// Flattening of descriptors into router registrations, plus the omission audit.
pub mod generator;

/// Routes reachable only without a session (the login landing page).
pub mod public;

/// Routes reachable only with a valid session. Mounted inside the application shell.
pub mod authenticated;

/// The two route sets bundled as immutable startup configuration.
pub mod registry;

pub use descriptor::{
    Page, PageFactory, Params, RouteDescriptor, RouteEntry, RouteTarget, SubRouteEntry,
};
pub use generator::{Omission, OmissionReason, RouteRegistration, audit_routes, generate_routes};
pub use registry::RouteSetRegistry;
