//! # Routing Target Model
//!
//! Classifies the destination of a route:
//! * A single IPv4 address (host route, e.g. `10.0.0.5`).
//! * A CIDR block (network route, e.g. `10.0.0.0/24`).
//!
//! Classification is syntactic: anything containing a `/` is a network, even a
//! `/32` that covers exactly one address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::RoutingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingTarget {
    Host(Ipv4Addr),
    Network { addr: Ipv4Addr, prefix: u8 },
}

impl RoutingTarget {
    /// `true` unless the target was written in CIDR notation.
    pub fn is_host(&self) -> bool {
        matches!(self, RoutingTarget::Host(_))
    }

    /// Route-tool flag selecting host or network form.
    pub fn flag(&self) -> &'static str {
        match self {
            RoutingTarget::Host(_) => "-host",
            RoutingTarget::Network { .. } => "-net",
        }
    }
}

impl fmt::Display for RoutingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingTarget::Host(addr) => write!(f, "{addr}"),
            RoutingTarget::Network { addr, prefix } => write!(f, "{addr}/{prefix}"),
        }
    }
}

impl FromStr for RoutingTarget {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        classify(s)
    }
}

/// Parses `target` into a host or network route destination.
pub fn classify(target: &str) -> Result<RoutingTarget, RoutingError> {
    let target = target.trim();

    if target.contains('/') {
        return parse_cidr(target);
    }

    parse_host(target).ok_or_else(|| RoutingError::InvalidTarget(target.to_string()))
}

fn parse_host(s: &str) -> Option<RoutingTarget> {
    s.parse::<Ipv4Addr>().ok().map(RoutingTarget::Host)
}

/// Parses CIDR notation like "192.168.1.0/24". Host bits may be set.
fn parse_cidr(s: &str) -> Result<RoutingTarget, RoutingError> {
    let invalid = || RoutingError::InvalidTarget(s.to_string());

    let (ip_str, prefix_str) = s.split_once('/').ok_or_else(invalid)?;
    let addr: Ipv4Addr = ip_str.parse().map_err(|_| invalid())?;
    let prefix: u8 = prefix_str.parse().map_err(|_| invalid())?;

    // Rejects prefixes above 32.
    Ipv4Network::new(addr, prefix).map_err(|_| invalid())?;

    Ok(RoutingTarget::Network { addr, prefix })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
