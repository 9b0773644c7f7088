//! Parsers for the text output of the external tools.
//!
//! Each parser takes raw output and returns a typed value, so the resolver
//! and route manager never inspect tool text themselves.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// Extracts the IPv4 addresses from terse (`+short`) DNS tool output.
///
/// One address per line; CNAME targets and any other non-address lines are
/// skipped.
pub fn parse_dns_answers(stdout: &str) -> Vec<Ipv4Addr> {
    stdout
        .lines()
        .map(str::trim)
        .filter_map(|line| line.parse::<Ipv4Addr>().ok())
        .collect()
}

/// `key: value` report of a route lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteReport(BTreeMap<String, String>);

impl RouteReport {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn interface(&self) -> Option<&str> {
        self.get("interface")
    }

    pub fn gateway(&self) -> Option<&str> {
        self.get("gateway")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses the colon-delimited lines of a route lookup; lines without a colon
/// (the metrics table) are ignored.
pub fn parse_route_report(stdout: &str) -> RouteReport {
    let entries = stdout
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect();
    RouteReport(entries)
}

const ABSENT_ROUTE_MARKERS: [&str; 2] = ["not in table", "no such process"];

/// Recognises route-tool errors meaning the route was already absent.
pub fn is_absent_route_error(text: &str) -> bool {
    let lower = text.to_lowercase();
    ABSENT_ROUTE_MARKERS.iter().any(|marker| lower.contains(marker))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
