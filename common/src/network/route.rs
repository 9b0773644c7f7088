use std::fmt;

/// Builds the identity of an installed route: `target:interface`.
pub fn route_key(target: &str, interface: &str) -> String {
    format!("{target}:{interface}")
}

/// Splits a route key back into its target and interface parts.
///
/// Targets never contain a colon (IPv4 only), so the first colon separates them.
pub fn split_route_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(':') {
        Some((target, interface)) => (target, Some(interface)),
        None => (key, None),
    }
}

/// A route this process installed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub target: String,
    pub interface: String,
    /// `None` for tunnel interfaces.
    pub gateway: Option<String>,
    pub is_host: bool,
}

impl Route {
    pub fn route_key(&self) -> String {
        route_key(&self.target, &self.interface)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.gateway {
            Some(gateway) => write!(f, "{} via {} ({})", self.target, gateway, self.interface),
            None => write!(f, "{} via {}", self.target, self.interface),
        }
    }
}

/// Outcome of a route mutation, single or bulk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    pub affected_routes: Vec<Route>,
    pub errors: Vec<String>,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_route(message: impl Into<String>, route: Route) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected_routes: vec![route],
            errors: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            affected_routes: Vec::new(),
            errors: vec![error.into()],
        }
    }
}
