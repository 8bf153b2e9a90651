use std::{fmt, sync::Arc};

use super::descriptor::{PageFactory, RouteDescriptor, RouteTarget};

/// RouteRegistration
///
/// One concrete `(path, page)` pair ready to be handed to the router. `module` names the
/// descriptor (or sub-route) it came from, for logging only.
#[derive(Clone)]
pub struct RouteRegistration {
    pub module: String,
    pub path: String,
    pub component: PageFactory,
}

impl PartialEq for RouteRegistration {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module
            && self.path == other.path
            && Arc::ptr_eq(&self.component, &other.component)
    }
}

impl Eq for RouteRegistration {}

impl fmt::Debug for RouteRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistration")
            .field("module", &self.module)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// generate_routes
///
/// Flattens an ordered set of descriptors into router registrations: descriptor order
/// outside, sub-route order inside. Groups emit one registration per member, leaves emit
/// one, and anything else (empty targets, empty paths) contributes nothing.
///
/// Duplicate paths pass through untouched; the router decides which one wins.
pub fn generate_routes(descriptors: &[RouteDescriptor]) -> Vec<RouteRegistration> {
    descriptors
        .iter()
        .flat_map(|descriptor| -> Vec<RouteRegistration> {
            match &descriptor.target {
                RouteTarget::Group(subroutes) => subroutes
                    .iter()
                    .filter(|subroute| subroute.route.has_path())
                    .map(|subroute| RouteRegistration {
                        module: subroute.module.clone(),
                        path: subroute.route.path.clone(),
                        component: Arc::clone(&subroute.route.component),
                    })
                    .collect(),
                RouteTarget::Leaf(route) if route.has_path() => vec![RouteRegistration {
                    module: descriptor.module.clone(),
                    path: route.path.clone(),
                    component: Arc::clone(&route.component),
                }],
                _ => Vec::new(),
            }
        })
        .collect()
}

/// Why an entry contributed no registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmissionReason {
    /// The descriptor has neither a route nor sub-routes.
    NoTarget,
    /// The descriptor is a group with no members.
    EmptyGroup,
    /// A route or sub-route was declared with an empty path.
    EmptyPath,
}

/// Omission
///
/// A descriptor, or a single sub-route of one, that `generate_routes` silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub module: String,
    pub subroute: Option<String>,
    pub reason: OmissionReason,
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            OmissionReason::NoTarget => "has neither a route nor subroutes",
            OmissionReason::EmptyGroup => "has an empty subroute list",
            OmissionReason::EmptyPath => "declares an empty path",
        };
        match &self.subroute {
            Some(subroute) => write!(f, "{}/{} {}", self.module, subroute, reason),
            None => write!(f, "{} {}", self.module, reason),
        }
    }
}

/// audit_routes
///
/// Lists every entry `generate_routes` would drop for the same input, in the same order.
/// Generation itself stays silent; callers decide whether to log or fail on these.
pub fn audit_routes(descriptors: &[RouteDescriptor]) -> Vec<Omission> {
    let mut omissions = Vec::new();

    for descriptor in descriptors {
        let omit = |subroute: Option<&str>, reason| Omission {
            module: descriptor.module.clone(),
            subroute: subroute.map(str::to_string),
            reason,
        };

        match &descriptor.target {
            RouteTarget::Empty => omissions.push(omit(None, OmissionReason::NoTarget)),
            RouteTarget::Leaf(route) if !route.has_path() => {
                omissions.push(omit(None, OmissionReason::EmptyPath))
            }
            RouteTarget::Leaf(_) => {}
            RouteTarget::Group(subroutes) if subroutes.is_empty() => {
                omissions.push(omit(None, OmissionReason::EmptyGroup))
            }
            RouteTarget::Group(subroutes) => omissions.extend(
                subroutes
                    .iter()
                    .filter(|subroute| !subroute.route.has_path())
                    .map(|subroute| omit(Some(subroute.module.as_str()), OmissionReason::EmptyPath)),
            ),
        }
    }

    omissions
}
