use std::sync::Arc;

use crm_shell::routes::{
    OmissionReason, PageFactory, Params, RouteDescriptor, RouteEntry, RouteTarget, SubRouteEntry,
    audit_routes, generate_routes,
};
use maud::html;

// --- Fixtures ---

fn page(label: &'static str) -> PageFactory {
    Arc::new(move |_: &Params| html! { (label) })
}

fn entry(path: &str, component: &PageFactory) -> RouteEntry {
    RouteEntry::shared(path, Arc::clone(component))
}

fn pairs(descriptors: &[RouteDescriptor]) -> Vec<(String, PageFactory)> {
    generate_routes(descriptors)
        .into_iter()
        .map(|registration| (registration.path, registration.component))
        .collect()
}

/// Every shape the generator distinguishes, including the degenerate ones.
fn mixed_descriptors() -> Vec<RouteDescriptor> {
    let p = page("p");
    vec![
        RouteDescriptor::leaf("home", entry("/", &p)),
        RouteDescriptor::empty("broken"),
        RouteDescriptor::group(
            "customers",
            vec![
                SubRouteEntry::new("list", entry("/customers", &p)),
                SubRouteEntry::new("detail", entry("/customers/{id}", &p)),
            ],
        ),
        RouteDescriptor::group("hollow", vec![]),
        RouteDescriptor::from_parts(
            "both",
            Some(entry("/shadowed", &p)),
            Some(vec![SubRouteEntry::new("kept", entry("/kept", &p))]),
        ),
        RouteDescriptor::leaf("tasks", entry("/tasks", &p)),
        RouteDescriptor::leaf("duplicate-home", entry("/", &p)),
    ]
}

// --- Scenarios ---

#[test]
fn scenario_a_single_leaf() {
    let home = page("home");
    let descriptors = vec![RouteDescriptor::leaf("home", entry("/", &home))];

    let output = pairs(&descriptors);

    assert_eq!(output.len(), 1);
    assert_eq!(output[0].0, "/");
    assert!(Arc::ptr_eq(&output[0].1, &home));
}

#[test]
fn scenario_b_group_flattens_in_order() {
    let users = page("users");
    let roles = page("roles");
    let descriptors = vec![RouteDescriptor::group(
        "admin",
        vec![
            SubRouteEntry::new("users", entry("/users", &users)),
            SubRouteEntry::new("roles", entry("/roles", &roles)),
        ],
    )];

    let output = pairs(&descriptors);

    assert_eq!(output.len(), 2);
    assert_eq!(output[0].0, "/users");
    assert!(Arc::ptr_eq(&output[0].1, &users));
    assert_eq!(output[1].0, "/roles");
    assert!(Arc::ptr_eq(&output[1].1, &roles));
}

#[test]
fn scenario_c_descriptor_without_target_renders_nothing() {
    let descriptors = vec![RouteDescriptor::empty("broken")];

    assert!(generate_routes(&descriptors).is_empty());
    assert_eq!(audit_routes(&descriptors)[0].reason, OmissionReason::NoTarget);
}

// --- Properties ---

#[test]
fn output_length_counts_leaves_plus_group_members() {
    let descriptors = mixed_descriptors();

    let expected: usize = descriptors
        .iter()
        .map(|descriptor| match &descriptor.target {
            RouteTarget::Leaf(_) => 1,
            RouteTarget::Group(subroutes) => subroutes.len(),
            RouteTarget::Empty => 0,
        })
        .sum();

    assert_eq!(generate_routes(&descriptors).len(), expected);
    assert_eq!(expected, 6);
}

#[test]
fn generation_is_idempotent() {
    let descriptors = mixed_descriptors();

    assert_eq!(generate_routes(&descriptors), generate_routes(&descriptors));
}

#[test]
fn subroutes_win_over_route_even_when_empty() {
    let p = page("p");
    let populated = RouteDescriptor::from_parts(
        "admin",
        Some(entry("/admin", &p)),
        Some(vec![SubRouteEntry::new("users", entry("/users", &p))]),
    );
    let empty = RouteDescriptor::from_parts("admin", Some(entry("/admin", &p)), Some(vec![]));

    let paths: Vec<_> = generate_routes(&[populated])
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/users"]);

    assert!(generate_routes(&[empty]).is_empty());
}

#[test]
fn earlier_descriptors_precede_later_ones() {
    let output = generate_routes(&mixed_descriptors());
    let modules: Vec<_> = output.iter().map(|r| r.module.as_str()).collect();

    assert_eq!(
        modules,
        vec!["home", "list", "detail", "kept", "tasks", "duplicate-home"]
    );
}

#[test]
fn duplicate_paths_pass_through() {
    let output = generate_routes(&mixed_descriptors());
    let landing = output.iter().filter(|r| r.path == "/").count();

    assert_eq!(landing, 2);
}

#[test]
fn empty_paths_are_omitted_and_audited() {
    let p = page("p");
    let descriptors = vec![
        RouteDescriptor::leaf("blank", entry("", &p)),
        RouteDescriptor::group("admin", vec![SubRouteEntry::new("ghost", entry("", &p))]),
    ];

    assert!(generate_routes(&descriptors).is_empty());

    let omissions = audit_routes(&descriptors);
    assert_eq!(omissions.len(), 2);
    assert_eq!(omissions[1].subroute.as_deref(), Some("ghost"));
}
