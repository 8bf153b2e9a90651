use std::{collections::HashMap, fmt, sync::Arc};

use maud::Markup;

/// Params
///
/// The parameter bag handed to every page: path placeholders captured by the router
/// (e.g. `id` for `/customers/{id}`) merged over the request's query string.
pub type Params = HashMap<String, String>;

/// Page
///
/// The capability every navigable page implements: render markup given a parameter bag.
/// Pages are referenced from route entries only through a `PageFactory`, never by name.
pub trait Page: Send + Sync {
    fn render(&self, params: &Params) -> Markup;
}

impl<F> Page for F
where
    F: Fn(&Params) -> Markup + Send + Sync,
{
    fn render(&self, params: &Params) -> Markup {
        self(params)
    }
}

/// Shared, cheaply clonable handle to a page.
pub type PageFactory = Arc<dyn Page>;

/// RouteEntry
///
/// A primary route: a router-matchable `path` pattern and the page rendered for it.
/// An empty path is never mounted.
#[derive(Clone)]
pub struct RouteEntry {
    pub path: String,
    pub component: PageFactory,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, component: impl Page + 'static) -> Self {
        Self {
            path: path.into(),
            component: Arc::new(component),
        }
    }

    /// Builds an entry around an already shared page, so several entries can point at
    /// the same factory.
    pub fn shared(path: impl Into<String>, component: PageFactory) -> Self {
        Self {
            path: path.into(),
            component,
        }
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// SubRouteEntry
///
/// A leaf route nested one level under a grouping module. `module` is unique within the
/// parent's list and only used for keys and telemetry, never for matching.
#[derive(Debug, Clone)]
pub struct SubRouteEntry {
    pub module: String,
    pub icon: Option<String>,
    pub route: RouteEntry,
}

impl SubRouteEntry {
    pub fn new(module: impl Into<String>, route: RouteEntry) -> Self {
        Self {
            module: module.into(),
            icon: None,
            route,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// RouteTarget
///
/// What a descriptor renders. Exactly one of the three shapes, fixed when the registry
/// is built, so "route and subroutes both set" cannot be represented.
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// A single navigable page.
    Leaf(RouteEntry),
    /// A module grouping several pages. May be empty, in which case it renders nothing.
    Group(Vec<SubRouteEntry>),
    /// Neither a route nor sub-routes: a configuration omission.
    Empty,
}

/// RouteDescriptor
///
/// One navigable module of the application and the page(s) it contributes.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub module: String,
    pub icon: Option<String>,
    pub target: RouteTarget,
}

impl RouteDescriptor {
    pub fn leaf(module: impl Into<String>, route: RouteEntry) -> Self {
        Self {
            module: module.into(),
            icon: None,
            target: RouteTarget::Leaf(route),
        }
    }

    pub fn group(module: impl Into<String>, subroutes: Vec<SubRouteEntry>) -> Self {
        Self {
            module: module.into(),
            icon: None,
            target: RouteTarget::Group(subroutes),
        }
    }

    pub fn empty(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            icon: None,
            target: RouteTarget::Empty,
        }
    }

    /// from_parts
    ///
    /// Accepts the loose configuration shape (optional route, optional sub-routes) and
    /// folds it into a tagged target. A present `subroutes` collection always wins, even
    /// when it is empty; the discarded primary route is reported with a warning.
    pub fn from_parts(
        module: impl Into<String>,
        route: Option<RouteEntry>,
        subroutes: Option<Vec<SubRouteEntry>>,
    ) -> Self {
        let module = module.into();
        let target = match (route, subroutes) {
            (Some(route), Some(subroutes)) => {
                tracing::warn!(
                    module = %module,
                    discarded_path = %route.path,
                    "descriptor declares both a route and subroutes; the route is ignored"
                );
                RouteTarget::Group(subroutes)
            }
            (_, Some(subroutes)) => RouteTarget::Group(subroutes),
            (Some(route), None) => RouteTarget::Leaf(route),
            (None, None) => RouteTarget::Empty,
        };

        Self {
            module,
            icon: None,
            target,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// A descriptor is renderable when it is a leaf or a group. A group with no members
    /// still counts; it simply renders nothing.
    pub fn is_renderable(&self) -> bool {
        !matches!(self.target, RouteTarget::Empty)
    }

    pub fn subroutes(&self) -> &[SubRouteEntry] {
        match &self.target {
            RouteTarget::Group(subroutes) => subroutes,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    fn page(label: &'static str) -> RouteEntry {
        RouteEntry::new(format!("/{label}"), move |_: &Params| html! { (label) })
    }

    #[test]
    fn from_parts_prefers_subroutes_over_route() {
        let descriptor = RouteDescriptor::from_parts(
            "admin",
            Some(page("ignored")),
            Some(vec![SubRouteEntry::new("users", page("users"))]),
        );

        match descriptor.target {
            RouteTarget::Group(ref subroutes) => {
                assert_eq!(subroutes.len(), 1);
                assert_eq!(subroutes[0].route.path, "/users");
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn from_parts_keeps_empty_subroutes_as_group() {
        let descriptor = RouteDescriptor::from_parts("admin", Some(page("ignored")), Some(vec![]));

        assert!(matches!(descriptor.target, RouteTarget::Group(ref s) if s.is_empty()));
        assert!(descriptor.is_renderable());
    }

    #[test]
    fn from_parts_without_fields_is_empty() {
        let descriptor = RouteDescriptor::from_parts("broken", None, None);

        assert!(matches!(descriptor.target, RouteTarget::Empty));
        assert!(!descriptor.is_renderable());
    }

    #[test]
    fn closures_render_as_pages() {
        let entry = RouteEntry::new("/customers/{id}", |params: &Params| {
            html! { p { (params.get("id").map(String::as_str).unwrap_or("-")) } }
        });

        let mut params = Params::new();
        params.insert("id".to_string(), "42".to_string());

        assert_eq!(entry.component.render(&params).into_string(), "<p>42</p>");
    }
}
