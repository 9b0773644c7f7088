use colored::*;
use domroute_common::lists;
use domroute_common::network::domain::RouteType;
use domroute_common::network::interface::NetworkInterface;
use domroute_core::command;
use domroute_core::resolver::DnsResolver;
use domroute_core::routes::RouteManager;

use crate::commands::Context;
use crate::terminal::print;

const KEYS: [&str; 6] = ["Local", "VPN", "Sudo", "DNS cache", "Routes", "Route tool"];

pub async fn status(ctx: &Context) -> anyhow::Result<()> {
    let cfg = &ctx.cfg;
    print::set_key_width(KEYS);

    print::aligned_line("Local", describe_interface(&cfg.local_interface));
    print::aligned_line("VPN", describe_interface(&cfg.vpn_interface));

    let sudo: ColoredString = match (cfg.require_sudo, command::sudo_available(ctx.runner.as_ref()).await) {
        (false, _) => "not required".bright_black(),
        (true, true) => "available".green(),
        (true, false) => "password required".yellow(),
    };
    print::aligned_line("Sudo", sudo);

    let stats = DnsResolver::new(cfg, ctx.runner.clone()).cache_stats();
    print::aligned_line(
        "DNS cache",
        format!("{}/{} valid entries", stats.valid_entries, stats.total_entries),
    );

    let routes = RouteManager::new(cfg, ctx.runner.clone());
    print::aligned_line("Routes", format!("{} active", routes.active_routes_count()));
    print::aligned_line("Route tool", cfg.route_tool.clone());

    print::header("list files");
    for route_type in [RouteType::Local, RouteType::Vpn] {
        list_line(&format!("domains/{route_type}"), cfg.lists.domains(route_type));
        list_line(&format!("ips/{route_type}"), cfg.lists.ips(route_type));
    }

    Ok(())
}

fn describe_interface(interface: &NetworkInterface) -> ColoredString {
    let via: String = match interface.gateway() {
        Some(gateway) => format!("{} via {gateway}", interface.name()),
        None => format!("{} (tunnel)", interface.name()),
    };
    if interface.is_present() {
        via.green()
    } else {
        format!("{via}, not present").yellow()
    }
}

fn list_line(name: &str, path: &std::path::Path) {
    if !path.exists() {
        print::print_status(format!("{name}: {}", "not found".red()));
        return;
    }
    match lists::load_entries(path) {
        Ok(entries) => print::print_status(format!("{name}: {} entries", entries.len())),
        Err(e) => print::print_status(format!("{name}: {}", e.to_string().red())),
    }
}
