use std::collections::BTreeSet;

use domroute_common::lists;
use domroute_common::network::domain::{Domain, RouteType};
use domroute_common::{info, success, warn};
use domroute_core::resolver::DnsResolver;
use domroute_core::routes::RouteManager;

use crate::commands::routes::report;
use crate::commands::{Context, ProcessArgs};
use crate::terminal::print;

pub async fn process(ctx: &Context, args: ProcessArgs) -> anyhow::Result<()> {
    if args.dry_run {
        info!("Dry run: no routes will be changed");
    }

    let mut resolver = DnsResolver::new(&ctx.cfg, ctx.runner.clone());
    let mut manager = RouteManager::new(&ctx.cfg, ctx.runner.clone());

    for route_type in args.route_types() {
        print::header(&format!("{route_type} routes"));

        let domains: Vec<Domain> = lists::load_entries(ctx.cfg.lists.domains(route_type))?
            .iter()
            .map(|raw| Domain::parse(raw, route_type))
            .collect();
        let static_ips: Vec<String> = lists::load_entries(ctx.cfg.lists.ips(route_type))?;
        info!(
            "Loaded {} domains and {} static targets",
            domains.len(),
            static_ips.len()
        );

        if args.dry_run {
            let via = ctx.cfg.interface(route_type).name();
            info!(
                "Would resolve {} domains and add routes via {via}",
                domains.len()
            );
            for target in &static_ips {
                print::print_status(format!("{target} via {via}"));
            }
            continue;
        }

        let targets: Vec<String> = collect_targets(&mut resolver, &domains, static_ips).await;
        if targets.is_empty() {
            warn!("Nothing to route via {route_type}");
            continue;
        }

        info!("Adding {} unique routes...", targets.len());
        report(&manager.add_routes_bulk(&targets, route_type).await);
    }

    success!("Processing complete");
    print::end_of_program();
    Ok(())
}

/// Resolved addresses joined with the static targets, deduplicated.
async fn collect_targets(
    resolver: &mut DnsResolver,
    domains: &[Domain],
    static_ips: Vec<String>,
) -> Vec<String> {
    let mut targets: BTreeSet<String> = static_ips.into_iter().collect();

    for result in resolver.resolve_domains(domains).await {
        if !result.success {
            warn!(
                "No addresses for {}: {}",
                result.domain,
                result.error_message.as_deref().unwrap_or("empty answer")
            );
        }
        targets.extend(result.ips.iter().map(|ip| ip.to_string()));
    }

    targets.into_iter().collect()
}
