use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single routing or resolution item.
///
/// These never cross an operation boundary as `Err`; the resolver and the
/// route manager fold them into their result values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Invalid IP or network: {0}")]
    InvalidTarget(String),

    #[error("Gateway required for interface {0}")]
    GatewayRequired(String),

    #[error("Invalid interface {name}: {reason}")]
    InvalidInterface { name: String, reason: String },

    #[error("DNS resolution failed for {host}: {reason}")]
    DnsLookup { host: String, reason: String },

    #[error("{0}")]
    RouteCommand(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Expected at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
