use colored::*;
use domroute_common::network::route::OperationResult;
use domroute_common::{info, success, warn};
use domroute_core::routes::RouteManager;

use crate::commands::{Context, RoutesCommand};
use crate::terminal::print;

pub async fn routes(ctx: &Context, command: RoutesCommand) -> anyhow::Result<()> {
    let mut manager = RouteManager::new(&ctx.cfg, ctx.runner.clone());

    match command {
        RoutesCommand::Add { target, via } => {
            info!("Adding route {target} via {via}...");
            report(&manager.add_route(&target, via).await);
        }
        RoutesCommand::Remove { target } => {
            info!("Removing route {target}...");
            report(&manager.remove_route(&target).await);
        }
        RoutesCommand::Check { target } => match manager.check_route(&target).await {
            Some(route) => {
                print::header(&format!("route to {target}"));
                print::set_key_width(route.iter().map(|(key, _)| key));
                for (key, value) in route.iter() {
                    print::aligned_line(key, value);
                }
            }
            None => warn!("No route information for {target}"),
        },
        RoutesCommand::Clear { yes } => {
            if !yes {
                warn!("Refusing to remove every route without --yes");
                return Ok(());
            }
            report(&manager.clear_all_routes().await);
        }
        RoutesCommand::Reconcile { prune } => {
            let drift = manager.reconcile().await;
            info!(
                "{} routes confirmed, {} drifted",
                drift.confirmed.len(),
                drift.drifted.len()
            );
            for key in &drift.drifted {
                print::print_status(format!("{} {key}", "drifted".yellow()));
            }
            if prune {
                let forgotten: usize = drift.drifted.iter().filter(|key| manager.forget(key)).count();
                success!("Stopped tracking {forgotten} routes");
            }
        }
    }

    Ok(())
}

pub fn report(result: &OperationResult) {
    if result.success {
        success!("{}", result.message);
    } else {
        warn!("{}", result.message);
    }
    for route in &result.affected_routes {
        print::print_status(route.to_string());
    }
    print::errors(&result.errors);
}
