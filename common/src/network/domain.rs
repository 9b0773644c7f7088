use std::fmt;
use std::str::FromStr;

/// Which egress path a domain or IP should be forced through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    Local,
    Vpn,
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Local => "local",
            RouteType::Vpn => "vpn",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(RouteType::Local),
            "vpn" => Ok(RouteType::Vpn),
            _ => Err(format!("invalid route type: {s} (expected 'local' or 'vpn')")),
        }
    }
}

/// How a domain pattern expands into concrete hostnames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainType {
    /// `example.com`
    Exact,
    /// `*.example.com`
    Wildcard,
    /// `**.example.com`
    DeepWildcard,
}

const DEEP_WILDCARD_PREFIX: &str = "**.";
const WILDCARD_PREFIX: &str = "*.";

/// A routing subject. The wildcard marker is stripped from `name` and kept
/// as `domain_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    pub name: String,
    pub domain_type: DomainType,
    pub route_type: RouteType,
}

impl Domain {
    /// Parses a raw pattern such as `**.example.com`.
    ///
    /// The deep marker is checked first since `**.` also starts with `*`.
    pub fn parse(raw: &str, route_type: RouteType) -> Self {
        let raw = raw.trim();

        let (name, domain_type) = if let Some(rest) = raw.strip_prefix(DEEP_WILDCARD_PREFIX) {
            (rest, DomainType::DeepWildcard)
        } else if let Some(rest) = raw.strip_prefix(WILDCARD_PREFIX) {
            (rest, DomainType::Wildcard)
        } else {
            (raw, DomainType::Exact)
        };

        Self {
            name: name.to_string(),
            domain_type,
            route_type,
        }
    }
}
