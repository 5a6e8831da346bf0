//! Quark extension resources: MAC address ranges, routes and IP policies

use super::descriptor::{ArgumentSpec, Resource, ResourceCommandDescriptor};

pub const MAC_ADDRESS_RANGES: Resource =
    Resource::new("mac_address_range", "mac_address_ranges", "/mac_address_ranges");

pub const ROUTES: Resource = Resource::new("route", "routes", "/routes");

pub const IP_POLICIES: Resource = Resource::new("ip_policy", "ip_policies", "/ip_policies");

const MAC_RANGE_COLUMNS: &[&str] = &["id", "cidr"];

const MAC_RANGE_CREATE_ARGS: &[ArgumentSpec] =
    &[ArgumentSpec::flag("cidr", "CIDR", "MAC address range in CIDR notation").required()];

const MAC_RANGE_CREATE_BODY: &[(&str, &str)] = &[("cidr", "cidr")];

const ROUTE_COLUMNS: &[&str] = &["id", "subnet_id", "cidr", "gateway"];

const ROUTE_CREATE_ARGS: &[ArgumentSpec] = &[
    ArgumentSpec::positional("subnet_id", "SUBNET_ID", "Subnet ID to associate the route with"),
    ArgumentSpec::positional("cidr", "CIDR", "CIDR mask for the route"),
    ArgumentSpec::positional("gateway", "GATEWAY", "Destination gateway for the route"),
];

const ROUTE_CREATE_BODY: &[(&str, &str)] =
    &[("cidr", "cidr"), ("subnet_id", "subnet_id"), ("gateway", "gateway")];

const IP_POLICY_COLUMNS: &[&str] = &["id", "tenant_id", "name", "subnet_ids", "network_ids", "exclude"];

const IP_POLICY_CREATE_ARGS: &[ArgumentSpec] = &[
    ArgumentSpec::flag("subnet_id", "SUBNET_ID", "Subnet ID the policy applies to (repeatable)").repeatable(),
    ArgumentSpec::flag("network_id", "NETWORK_ID", "Network ID the policy applies to (repeatable)").repeatable(),
    ArgumentSpec::flag("exclude", "CIDR", "CIDR excluded from allocation (repeatable)").repeatable(),
    ArgumentSpec::flag("name", "NAME", "Name of the IP policy"),
];

const IP_POLICY_CREATE_BODY: &[(&str, &str)] = &[
    ("subnet_ids", "subnet_id"),
    ("network_ids", "network_id"),
    ("exclude", "exclude"),
    ("name", "name"),
];

/// Every command this client registers, keyed by command name
pub fn commands() -> Vec<(&'static str, ResourceCommandDescriptor)> {
    vec![
        (
            "mac-range-list",
            ResourceCommandDescriptor::list(
                MAC_ADDRESS_RANGES,
                "(Admin-only) List all MAC address ranges",
                MAC_RANGE_COLUMNS,
            ),
        ),
        (
            "mac-range-show",
            ResourceCommandDescriptor::show(MAC_ADDRESS_RANGES, "(Admin-only) Show a MAC address range"),
        ),
        (
            "mac-range-create",
            ResourceCommandDescriptor::create(
                MAC_ADDRESS_RANGES,
                "(Admin-only) Create a MAC address range",
                MAC_RANGE_CREATE_ARGS,
                MAC_RANGE_CREATE_BODY,
            ),
        ),
        (
            "mac-range-delete",
            ResourceCommandDescriptor::delete(MAC_ADDRESS_RANGES, "(Admin-only) Delete a MAC address range by id"),
        ),
        (
            "route-list",
            ResourceCommandDescriptor::list(ROUTES, "List all routes for a tenant", ROUTE_COLUMNS),
        ),
        ("route-show", ResourceCommandDescriptor::show(ROUTES, "Show a route")),
        (
            "route-create",
            ResourceCommandDescriptor::create(
                ROUTES,
                "Create a new route for a given subnet",
                ROUTE_CREATE_ARGS,
                ROUTE_CREATE_BODY,
            ),
        ),
        ("route-delete", ResourceCommandDescriptor::delete(ROUTES, "Delete a route by id")),
        (
            "ip-policy-list",
            ResourceCommandDescriptor::list(IP_POLICIES, "List all IP policies for a tenant", IP_POLICY_COLUMNS),
        ),
        ("ip-policy-show", ResourceCommandDescriptor::show(IP_POLICIES, "Show an IP policy")),
        (
            "ip-policy-create",
            ResourceCommandDescriptor::create(
                IP_POLICIES,
                "Create an IP policy over subnets or networks",
                IP_POLICY_CREATE_ARGS,
                IP_POLICY_CREATE_BODY,
            ),
        ),
        ("ip-policy-delete", ResourceCommandDescriptor::delete(IP_POLICIES, "Delete an IP policy by id")),
    ]
}
