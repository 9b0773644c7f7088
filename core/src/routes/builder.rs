//! Command lines for the routing-table tool: add, delete and lookup.

use domroute_common::error::RoutingError;
use domroute_common::network::interface::NetworkInterface;
use domroute_common::network::target::RoutingTarget;

use crate::command::Invocation;

/// `<tool> add -host|-net <target> (<gateway> | -interface <name>)`
pub fn add_route(
    tool: &str,
    target: &RoutingTarget,
    interface: &NetworkInterface,
) -> Result<Invocation, RoutingError> {
    let mut args: Vec<String> = vec!["add".into(), target.flag().into(), target.to_string()];

    if interface.is_tunnel() {
        args.push("-interface".into());
        args.push(interface.name().into());
    } else {
        let gateway: &str = interface
            .gateway()
            .ok_or_else(|| RoutingError::GatewayRequired(interface.name().into()))?;
        args.push(gateway.into());
    }

    Ok(Invocation::new(tool, args))
}

/// `<tool> delete -host|-net <target>`
pub fn delete_route(tool: &str, target: &RoutingTarget) -> Invocation {
    Invocation::new(tool, ["delete".into(), target.flag().into(), target.to_string()])
}

/// `<tool> -n get <target>`
pub fn get_route(tool: &str, target: &str) -> Invocation {
    Invocation::new(tool, ["-n", "get", target])
}
