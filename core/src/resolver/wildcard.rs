//! Wildcard domain patterns turned into concrete hostnames.

use domroute_common::network::domain::DomainType;

/// Subdomains tried for `**.` patterns, in order.
///
/// This is a guess list; the zone is never enumerated.
pub const COMMON_SUBDOMAINS: [&str; 12] = [
    "www", "api", "cdn", "static", "images", "assets", "mail", "ftp", "blog", "shop", "store",
    "admin",
];

/// Expands a hostname into the concrete names to resolve; `hostname` is always first.
pub fn expand(hostname: &str, domain_type: DomainType) -> Vec<String> {
    let mut hostnames: Vec<String> = vec![hostname.to_string()];

    match domain_type {
        DomainType::Exact => {}
        DomainType::Wildcard => hostnames.push(format!("www.{hostname}")),
        DomainType::DeepWildcard => hostnames.extend(
            COMMON_SUBDOMAINS
                .iter()
                .map(|label| format!("{label}.{hostname}")),
        ),
    }

    hostnames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_is_just_the_name() {
        assert_eq!(expand("example.com", DomainType::Exact), vec!["example.com"]);
    }

    #[test]
    fn wildcard_adds_www() {
        assert_eq!(
            expand("example.com", DomainType::Wildcard),
            vec!["example.com", "www.example.com"]
        );
    }

    #[test]
    fn deep_wildcard_adds_common_subdomains() {
        let expanded = expand("example.com", DomainType::DeepWildcard);
        assert_eq!(expanded.len(), 13);
        assert_eq!(expanded[0], "example.com");
        assert_eq!(expanded[1], "www.example.com");
        assert_eq!(expanded[12], "admin.example.com");
    }
}
