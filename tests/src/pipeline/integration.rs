#![cfg(test)]
use std::collections::BTreeSet;

use domroute_common::lists;
use domroute_common::network::domain::{Domain, RouteType};
use domroute_core::command::CommandOutput;
use domroute_core::resolver::DnsResolver;
use domroute_core::routes::RouteManager;

use crate::support::Sandbox;

/// List files through resolution to installed routes, as `domroute process` runs it.
#[tokio::test]
async fn vpn_lists_become_routes() -> anyhow::Result<()> {
    let sandbox = Sandbox::new()?;
    let lists_cfg = &sandbox.cfg.lists;
    sandbox.write_list(
        lists_cfg.domains(RouteType::Vpn),
        "# streaming\n*.video.test\n\nnews.test\n",
    )?;
    sandbox.write_list(lists_cfg.ips(RouteType::Vpn), "198.51.100.0/24\n203.0.113.5\n")?;

    sandbox.runner.respond("video.test A", CommandOutput::ok("203.0.113.5\n"));
    sandbox.runner.respond("www.video.test A", CommandOutput::ok("203.0.113.6\n"));
    sandbox.runner.respond("news.test A", CommandOutput::ok("203.0.113.6\n"));
    sandbox.runner.respond("route add", CommandOutput::ok(""));

    let domains: Vec<Domain> = lists::load_entries(lists_cfg.domains(RouteType::Vpn))?
        .iter()
        .map(|raw| Domain::parse(raw, RouteType::Vpn))
        .collect();
    assert_eq!(domains.len(), 2);

    let mut targets: BTreeSet<String> = lists::load_entries(lists_cfg.ips(RouteType::Vpn))?
        .into_iter()
        .collect();
    let mut resolver = DnsResolver::new(&sandbox.cfg, sandbox.runner());
    for result in resolver.resolve_domains(&domains).await {
        targets.extend(result.ips.iter().map(|ip| ip.to_string()));
    }
    let targets: Vec<String> = targets.into_iter().collect();
    assert_eq!(targets, vec!["198.51.100.0/24", "203.0.113.5", "203.0.113.6"]);

    let mut routes = RouteManager::new(&sandbox.cfg, sandbox.runner());
    let result = routes.add_routes_bulk(&targets, RouteType::Vpn).await;

    assert!(result.success);
    assert_eq!(result.message, "Added 3/3 routes successfully");
    assert_eq!(
        sandbox.runner.count_matching("route add -net 198.51.100.0/24 -interface utun4"),
        1
    );
    assert_eq!(routes.active_routes_count(), 3);
    Ok(())
}

#[test]
fn missing_list_files_are_empty() -> anyhow::Result<()> {
    let sandbox = Sandbox::new()?;
    assert!(lists::load_entries(sandbox.cfg.lists.domains(RouteType::Local))?.is_empty());
    Ok(())
}
