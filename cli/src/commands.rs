pub mod dns;
pub mod process;
pub mod routes;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use domroute_common::config::Config;
use domroute_common::network::domain::RouteType;
use domroute_core::command::CommandRunner;

#[derive(Parser)]
#[command(name = "domroute")]
#[command(about = "Routes domains through the local network or a VPN tunnel.")]
pub struct CommandLine {
    /// Configuration file (defaults to DOMROUTE_CONFIG or the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show interfaces, privileges, caches and list files
    #[command(alias = "s")]
    Status,
    /// Resolve domains and manage the DNS cache
    #[command(subcommand)]
    Dns(DnsCommand),
    /// Add, remove and inspect routes
    #[command(subcommand)]
    Routes(RoutesCommand),
    /// Resolve the domain lists and install their routes
    #[command(alias = "p")]
    Process(ProcessArgs),
}

#[derive(Subcommand)]
pub enum DnsCommand {
    /// Resolve a domain, including `*.` and `**.` wildcards
    Resolve { domain: String },
    /// Show DNS cache statistics
    Cache,
    /// Delete the DNS cache
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RoutesCommand {
    /// Route an IP or CIDR network through an interface
    Add {
        target: String,
        #[arg(long)]
        via: RouteType,
    },
    /// Remove the route to an IP or CIDR network
    Remove { target: String },
    /// Look a target up in the live routing table
    Check { target: String },
    /// Remove every route installed by domroute
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Compare tracked routes with the live routing table
    Reconcile {
        /// Stop tracking routes the routing table no longer confirms
        #[arg(long)]
        prune: bool,
    },
}

#[derive(Args)]
pub struct ProcessArgs {
    #[arg(long, conflicts_with = "vpn_only")]
    pub local_only: bool,
    #[arg(long)]
    pub vpn_only: bool,
    /// Resolve and list targets without touching routes
    #[arg(long)]
    pub dry_run: bool,
}

impl ProcessArgs {
    pub fn route_types(&self) -> Vec<RouteType> {
        match (self.local_only, self.vpn_only) {
            (true, _) => vec![RouteType::Local],
            (_, true) => vec![RouteType::Vpn],
            _ => vec![RouteType::Local, RouteType::Vpn],
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// What every command needs: the loaded configuration and the tool runner.
pub struct Context {
    pub cfg: Config,
    pub runner: Arc<dyn CommandRunner>,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
