//! # Configuration
//!
//! An explicit, immutable [`Config`] value handed to every component that
//! needs it. It is loaded once from a JSON document by [`load_config`];
//! nothing in the workspace keeps a global copy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::network::domain::RouteType;
use crate::network::interface::NetworkInterface;

pub const CONFIG_ENV_VAR: &str = "DOMROUTE_CONFIG";
pub const DNS_CACHE_FILE_NAME: &str = "dns_cache.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub local_interface: NetworkInterface,
    pub vpn_interface: NetworkInterface,

    pub dns: DnsConfig,
    /// How long a resolved hostname stays valid in the DNS cache.
    pub cache_ttl_hours: u64,
    pub dns_cache_file: PathBuf,
    pub routes_cache_file: PathBuf,

    /// Prefix route commands with `sudo`.
    pub require_sudo: bool,
    /// Routing-table tool, `route` on BSD-like systems.
    pub route_tool: String,

    pub lists: ListFiles,
}

#[derive(Debug, Clone)]
pub struct DnsConfig {
    /// Time per try handed to the DNS tool.
    pub timeout: Duration,
    pub retries: u32,
    pub tool: String,
}

impl DnsConfig {
    /// Ceiling for one DNS tool invocation, covering all of its own retries.
    pub fn process_timeout(&self) -> Duration {
        self.timeout
            .checked_mul(self.retries.max(1))
            .unwrap_or(Duration::MAX)
            .saturating_add(Duration::from_secs(1))
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 3,
            tool: "dig".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListFiles {
    pub domains_local: PathBuf,
    pub domains_vpn: PathBuf,
    pub ips_local: PathBuf,
    pub ips_vpn: PathBuf,
}

impl ListFiles {
    pub fn domains(&self, route_type: RouteType) -> &Path {
        match route_type {
            RouteType::Local => &self.domains_local,
            RouteType::Vpn => &self.domains_vpn,
        }
    }

    pub fn ips(&self, route_type: RouteType) -> &Path {
        match route_type {
            RouteType::Local => &self.ips_local,
            RouteType::Vpn => &self.ips_vpn,
        }
    }
}

impl Config {
    pub fn interface(&self, route_type: RouteType) -> &NetworkInterface {
        match route_type {
            RouteType::Local => &self.local_interface,
            RouteType::Vpn => &self.vpn_interface,
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    network: RawNetwork,
    files: RawFiles,
    paths: RawPaths,
    #[serde(default)]
    dns: RawDns,
    #[serde(default)]
    cache: RawCache,
    #[serde(default)]
    security: RawSecurity,
    #[serde(default = "default_route_tool")]
    route_tool: String,
}

#[derive(Deserialize)]
struct RawNetwork {
    local: RawInterface,
    vpn: RawInterface,
}

#[derive(Deserialize)]
struct RawInterface {
    interface: String,
    gateway: Option<String>,
    is_tunnel: Option<bool>,
}

#[derive(Deserialize)]
struct RawFiles {
    domains: RawPair,
    ips: RawPair,
}

#[derive(Deserialize)]
struct RawPair {
    local: PathBuf,
    vpn: PathBuf,
}

#[derive(Deserialize)]
struct RawPaths {
    cache_dir: PathBuf,
    routes_cache: PathBuf,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDns {
    timeout: u64,
    retries: u32,
    tool: String,
}

impl Default for RawDns {
    fn default() -> Self {
        Self {
            timeout: 5,
            retries: 3,
            tool: "dig".into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawCache {
    ttl_hours: u64,
}

impl Default for RawCache {
    fn default() -> Self {
        Self { ttl_hours: 24 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSecurity {
    require_sudo: bool,
}

impl Default for RawSecurity {
    fn default() -> Self {
        Self { require_sudo: true }
    }
}

fn default_route_tool() -> String {
    "route".into()
}

/// Picks the configuration file to load.
///
/// Order: explicit path, `DOMROUTE_CONFIG`, `./config/settings.json`,
/// `~/.domroute/settings.json`, `/etc/domroute/settings.json`.
pub fn find_config_file(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(ConfigError::NotFound(path.to_path_buf()))
        };
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        let env_path = PathBuf::from(env_path);
        if env_path.exists() {
            return Ok(env_path);
        }
    }

    let cwd_default: PathBuf = std::env::current_dir()
        .unwrap_or_default()
        .join("config")
        .join("settings.json");

    let mut candidates: Vec<PathBuf> = vec![cwd_default.clone()];
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(".domroute").join("settings.json"));
    }
    candidates.push(PathBuf::from("/etc/domroute/settings.json"));

    candidates
        .into_iter()
        .find(|path| path.exists())
        .ok_or(ConfigError::NotFound(cwd_default))
}

/// Loads and validates a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);

    let contents: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir: &Path = path.parent().unwrap_or(Path::new("."));
    parse_config(&contents, base_dir).map_err(|err| match err {
        ParseFailure::Json(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(err) => err,
    })
}

/// Parses a configuration document, resolving relative paths against `base_dir`.
pub fn load_config_str(json: &str, base_dir: &Path) -> Result<Config, ConfigError> {
    parse_config(json, base_dir).map_err(|err| match err {
        ParseFailure::Json(source) => ConfigError::Invalid(source.to_string()),
        ParseFailure::Invalid(err) => err,
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(ConfigError),
}

fn parse_config(json: &str, base_dir: &Path) -> Result<Config, ParseFailure> {
    let raw: RawConfig = serde_json::from_str(json).map_err(ParseFailure::Json)?;
    raw.into_config(base_dir).map_err(ParseFailure::Invalid)
}

impl RawConfig {
    fn into_config(self, base_dir: &Path) -> Result<Config, ConfigError> {
        let local_interface = build_interface(self.network.local, false)?;
        let vpn_interface = build_interface(self.network.vpn, true)?;

        if self.dns.retries == 0 {
            return Err(ConfigError::Invalid("dns.retries must be at least 1".into()));
        }
        if self.route_tool.trim().is_empty() {
            return Err(ConfigError::Invalid("route_tool must not be empty".into()));
        }

        let resolve = |p: PathBuf| -> PathBuf {
            if p.is_absolute() { p } else { base_dir.join(p) }
        };

        let cache_dir: PathBuf = resolve(self.paths.cache_dir);

        Ok(Config {
            local_interface,
            vpn_interface,
            dns: DnsConfig {
                timeout: Duration::from_secs(self.dns.timeout),
                retries: self.dns.retries,
                tool: self.dns.tool,
            },
            cache_ttl_hours: self.cache.ttl_hours,
            dns_cache_file: cache_dir.join(DNS_CACHE_FILE_NAME),
            routes_cache_file: resolve(self.paths.routes_cache),
            require_sudo: self.security.require_sudo,
            route_tool: self.route_tool,
            lists: ListFiles {
                domains_local: resolve(self.files.domains.local),
                domains_vpn: resolve(self.files.domains.vpn),
                ips_local: resolve(self.files.ips.local),
                ips_vpn: resolve(self.files.ips.vpn),
            },
        })
    }
}

fn build_interface(raw: RawInterface, tunnel_default: bool) -> Result<NetworkInterface, ConfigError> {
    let is_tunnel: bool = raw.is_tunnel.unwrap_or(tunnel_default);
    NetworkInterface::new(raw.interface, raw.gateway, is_tunnel)
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "network": {
            "local": {"interface": "en0", "gateway": "192.168.1.1"},
            "vpn": {"interface": "utun4"}
        },
        "files": {
            "domains": {"local": "lists/domains_local.txt", "vpn": "lists/domains_vpn.txt"},
            "ips": {"local": "lists/ips_local.txt", "vpn": "/srv/ips_vpn.txt"}
        },
        "paths": {"cache_dir": "cache", "routes_cache": "cache/active_routes.json"}
    }"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg = load_config_str(MINIMAL, Path::new("/opt/domroute")).unwrap();

        assert!(!cfg.local_interface.is_tunnel());
        assert!(cfg.vpn_interface.is_tunnel());
        assert_eq!(cfg.dns.timeout, Duration::from_secs(5));
        assert_eq!(cfg.dns.retries, 3);
        assert_eq!(cfg.dns.tool, "dig");
        assert_eq!(cfg.cache_ttl_hours, 24);
        assert!(cfg.require_sudo);
        assert_eq!(cfg.route_tool, "route");
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let cfg = load_config_str(MINIMAL, Path::new("/opt/domroute")).unwrap();

        assert_eq!(cfg.dns_cache_file, PathBuf::from("/opt/domroute/cache/dns_cache.json"));
        assert_eq!(
            cfg.routes_cache_file,
            PathBuf::from("/opt/domroute/cache/active_routes.json")
        );
        assert_eq!(
            cfg.lists.domains(RouteType::Local),
            Path::new("/opt/domroute/lists/domains_local.txt")
        );
        assert_eq!(cfg.lists.ips(RouteType::Vpn), Path::new("/srv/ips_vpn.txt"));
    }

    #[test]
    fn gatewayless_local_interface_is_invalid() {
        let json = MINIMAL.replace(r#", "gateway": "192.168.1.1""#, "");
        let err = load_config_str(&json, Path::new("/")).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn process_timeout_covers_retries() {
        let dns = DnsConfig::default();
        assert_eq!(dns.process_timeout(), Duration::from_secs(16));
    }

    #[test]
    fn huge_dns_timeout_saturates() {
        let dns = DnsConfig {
            timeout: Duration::from_secs(u64::MAX),
            retries: 3,
            tool: "dig".into(),
        };
        assert_eq!(dns.process_timeout(), Duration::MAX);
    }

    #[test]
    fn load_config_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.dns_cache_file, dir.path().join("cache").join(DNS_CACHE_FILE_NAME));

        let missing = find_config_file(Some(&dir.path().join("nope.json")));
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
    }
}
