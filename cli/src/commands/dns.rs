use colored::*;
use domroute_common::network::domain::{Domain, RouteType};
use domroute_common::{success, warn};
use domroute_core::resolver::DnsResolver;

use crate::commands::{Context, DnsCommand};
use crate::terminal::print;

pub async fn dns(ctx: &Context, command: DnsCommand) -> anyhow::Result<()> {
    let mut resolver = DnsResolver::new(&ctx.cfg, ctx.runner.clone());

    match command {
        DnsCommand::Resolve { domain } => {
            // Route type is irrelevant to resolution.
            let domain: Domain = Domain::parse(&domain, RouteType::Vpn);
            let result = resolver.resolve_domain(&domain).await;

            if result.success {
                success!("Found {} IP addresses for {}", result.ips.len(), result.domain);
                print::tree_head(0, &result.domain);
                print::as_tree(&result.sorted_ips());
                print::aligned_line(
                    "Resolution time",
                    format!("{:.3}s", result.resolution_time.as_secs_f64()),
                );
            } else {
                warn!(
                    "Failed: {}",
                    result.error_message.as_deref().unwrap_or("no addresses found")
                );
            }
        }
        DnsCommand::Cache => {
            let stats = resolver.cache_stats();
            print::set_key_width(["Expired entries"]);
            print::aligned_line("Total entries", stats.total_entries.to_string());
            print::aligned_line("Valid entries", stats.valid_entries.to_string().green());
            print::aligned_line("Expired entries", stats.expired_entries.to_string().yellow());
            print::aligned_line("Cache file", stats.cache_file.display().to_string());
        }
        DnsCommand::Clear { yes } => {
            if !yes {
                warn!("Refusing to clear the DNS cache without --yes");
                return Ok(());
            }
            match resolver.clear_cache() {
                Ok(()) => success!("DNS cache cleared"),
                Err(e) => warn!("Could not clear DNS cache: {e}"),
            }
        }
    }

    Ok(())
}
