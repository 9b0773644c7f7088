use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Outcome of resolving one (possibly wildcarded) domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResult {
    /// The domain name as given, wildcard marker stripped.
    pub domain: String,
    /// Every IPv4 address found across all expanded hostnames.
    pub ips: HashSet<Ipv4Addr>,
    /// `true` iff at least one address was found.
    pub success: bool,
    /// `"; "`-joined per-hostname failures, if any.
    pub error_message: Option<String>,
    pub resolution_time: Duration,
}

impl DnsResult {
    pub fn new(
        domain: impl Into<String>,
        ips: HashSet<Ipv4Addr>,
        errors: Vec<String>,
        resolution_time: Duration,
    ) -> Self {
        let error_message = (!errors.is_empty()).then(|| errors.join("; "));
        Self {
            domain: domain.into(),
            success: !ips.is_empty(),
            ips,
            error_message,
            resolution_time,
        }
    }

    /// Resolved addresses in ascending order, for display.
    pub fn sorted_ips(&self) -> Vec<Ipv4Addr> {
        let mut ips: Vec<Ipv4Addr> = self.ips.iter().copied().collect();
        ips.sort();
        ips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_follows_address_count() {
        let empty = DnsResult::new("a.test", HashSet::new(), vec![], Duration::ZERO);
        assert!(!empty.success);
        assert_eq!(empty.error_message, None);

        let ips = HashSet::from([Ipv4Addr::new(1, 1, 1, 1)]);
        let errors = vec!["first".to_string(), "second".to_string()];
        let partial = DnsResult::new("a.test", ips, errors, Duration::ZERO);
        assert!(partial.success);
        assert_eq!(partial.error_message.as_deref(), Some("first; second"));
    }
}
