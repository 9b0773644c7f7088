use pnet::datalink;

use crate::error::RoutingError;

/// An egress path traffic can be forced through.
///
/// Tunnel interfaces (e.g. `utun4`) are addressed by name alone; every other
/// interface is addressed through its gateway, so a non-tunnel interface
/// cannot be built without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    name: String,
    gateway: Option<String>,
    is_tunnel: bool,
}

impl NetworkInterface {
    pub fn new(
        name: impl Into<String>,
        gateway: Option<String>,
        is_tunnel: bool,
    ) -> Result<Self, RoutingError> {
        let name: String = name.into();
        if name.trim().is_empty() {
            return Err(RoutingError::InvalidInterface {
                name,
                reason: "interface name is empty".into(),
            });
        }

        let gateway: Option<String> = gateway
            .map(|gw| gw.trim().to_string())
            .filter(|gw| !gw.is_empty());

        if !is_tunnel && gateway.is_none() {
            return Err(RoutingError::InvalidInterface {
                reason: format!("non-tunnel interface {name} requires gateway"),
                name,
            });
        }

        Ok(Self {
            name,
            gateway,
            is_tunnel,
        })
    }

    /// A tunnel interface addressed by name.
    pub fn tunnel(name: impl Into<String>) -> Result<Self, RoutingError> {
        Self::new(name, None, true)
    }

    /// A regular interface reached through `gateway`.
    pub fn via_gateway(
        name: impl Into<String>,
        gateway: impl Into<String>,
    ) -> Result<Self, RoutingError> {
        Self::new(name, Some(gateway.into()), false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gateway(&self) -> Option<&str> {
        self.gateway.as_deref()
    }

    pub fn is_tunnel(&self) -> bool {
        self.is_tunnel
    }

    /// Checks whether an interface with this name currently exists on the host.
    pub fn is_present(&self) -> bool {
        datalink::interfaces()
            .iter()
            .any(|intf| intf.name == self.name)
    }
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

    #[test]
    fn non_tunnel_without_gateway_is_rejected() {
        assert!(NetworkInterface::new("en0", None, false).is_err());
        assert!(NetworkInterface::new("en0", Some("  ".into()), false).is_err());
    }

    #[test]
    fn tunnel_needs_no_gateway() {
        let utun = NetworkInterface::tunnel("utun4").unwrap();
        assert!(utun.is_tunnel());
        assert_eq!(utun.gateway(), None);
    }

    #[test]
    fn gateway_interface_keeps_gateway() {
        let en0 = NetworkInterface::via_gateway("en0", "192.168.1.1").unwrap();
        assert!(!en0.is_tunnel());
        assert_eq!(en0.name(), "en0");
        assert_eq!(en0.gateway(), Some("192.168.1.1"));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(NetworkInterface::tunnel("").is_err());
    }
}
