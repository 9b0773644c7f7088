#![cfg(test)]
use std::net::Ipv4Addr;
use std::time::Duration;

use domroute_common::network::domain::{Domain, DomainType, RouteType};
use domroute_core::command::CommandOutput;
use domroute_core::resolver::DnsResolver;
use domroute_core::resolver::cache::DnsCache;
use domroute_core::resolver::wildcard;
use domroute_core::store;

use crate::support::Sandbox;

#[test]
fn wildcard_patterns_expand_to_fixed_hostnames() {
    let domain = Domain::parse("*.example.com", RouteType::Vpn);
    assert_eq!(domain.name, "example.com");
    assert_eq!(domain.domain_type, DomainType::Wildcard);
    assert_eq!(
        wildcard::expand(&domain.name, domain.domain_type),
        vec!["example.com", "www.example.com"]
    );

    let deep = Domain::parse("**.example.com", RouteType::Vpn);
    assert_eq!(deep.domain_type, DomainType::DeepWildcard);
    let hosts = wildcard::expand(&deep.name, deep.domain_type);
    assert_eq!(hosts.len(), 13);
    assert_eq!(hosts[0], "example.com");

    assert_eq!(Domain::parse("example.com", RouteType::Local).domain_type, DomainType::Exact);
}

#[test]
fn cache_ttl_boundary() {
    let sandbox = Sandbox::new().unwrap();
    let ttl_hours: u64 = sandbox.cfg.cache_ttl_hours;
    let ttl_secs: f64 = (ttl_hours * 3600) as f64;

    let mut cache = DnsCache::new(&sandbox.cfg.dns_cache_file, Duration::from_secs(ttl_hours * 3600));
    let now: f64 = store::epoch_now();
    cache.put_at("fresh.test", vec![Ipv4Addr::new(1, 1, 1, 1)], now - ttl_secs + 1.0);
    cache.put_at("stale.test", vec![Ipv4Addr::new(2, 2, 2, 2)], now - ttl_secs - 1.0);

    assert!(cache.is_valid_at("fresh.test", now));
    assert!(!cache.is_valid_at("stale.test", now));
    assert!(!cache.is_valid_at("absent.test", now));
}

#[tokio::test]
async fn deep_wildcard_deduplicates_overlapping_answers() {
    let sandbox = Sandbox::new().unwrap();
    sandbox.runner.respond("example.com A", CommandOutput::ok("93.184.216.34\n"));
    sandbox.runner.respond("www.example.com A", CommandOutput::ok("93.184.216.34\n10.0.0.1\n"));
    sandbox.runner.respond("cdn.example.com A", CommandOutput::ok("cdn.edge.test.\n10.0.0.1\n"));

    let mut resolver = DnsResolver::new(&sandbox.cfg, sandbox.runner());
    let result = resolver
        .resolve_domain(&Domain::parse("**.example.com", RouteType::Vpn))
        .await;

    assert!(result.success);
    assert_eq!(
        result.sorted_ips(),
        vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(93, 184, 216, 34)]
    );
    assert_eq!(sandbox.runner.call_count(), 13);
    // Unscripted hostnames fail; their errors ride along with the success.
    assert!(result.error_message.is_some());
}

#[tokio::test]
async fn persisted_cache_serves_the_next_run() {
    let sandbox = Sandbox::new().unwrap();
    sandbox.runner.respond("example.com A", CommandOutput::ok("93.184.216.34\n"));

    let mut first = DnsResolver::new(&sandbox.cfg, sandbox.runner());
    first.resolve_domain(&Domain::parse("example.com", RouteType::Vpn)).await;
    assert!(sandbox.cfg.dns_cache_file.exists());

    let mut second = DnsResolver::new(&sandbox.cfg, sandbox.runner());
    let result = second.resolve_domain(&Domain::parse("example.com", RouteType::Vpn)).await;

    assert!(result.success);
    assert_eq!(sandbox.runner.call_count(), 1);
    assert_eq!(second.cache_stats().valid_entries, 1);
}

#[tokio::test]
async fn failed_domains_do_not_stop_the_batch() {
    let sandbox = Sandbox::new().unwrap();
    sandbox.runner.respond_timeout("down.test A");
    sandbox.runner.respond("up.test A", CommandOutput::ok("192.0.2.7\n"));

    let mut resolver = DnsResolver::new(&sandbox.cfg, sandbox.runner());
    let results = resolver
        .resolve_domains(&[
            Domain::parse("down.test", RouteType::Vpn),
            Domain::parse("up.test", RouteType::Vpn),
        ])
        .await;

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert!(results[0].ips.is_empty());
    assert!(results[0].error_message.as_deref().unwrap_or("").contains("timeout"));
    assert!(results[1].success);

    // Configured DNS timings reach the tool and its ceiling.
    let calls = sandbox.runner.calls();
    assert_eq!(calls[0].0, "dig +short +time=2 +tries=2 down.test A");
    assert_eq!(calls[0].1, Duration::from_secs(5));
}
