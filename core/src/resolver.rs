//! # DNS Resolution
//!
//! Turns routing domains into IPv4 address sets.
//!
//! For each domain the resolver:
//! 1. expands the pattern into concrete hostnames ([`wildcard`]),
//! 2. serves each hostname from the [`cache`] while its entry is valid,
//! 3. otherwise asks the external DNS tool through the [`CommandRunner`],
//! 4. aggregates and deduplicates everything found.
//!
//! A failing hostname is recorded and skipped; it never stops its siblings.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use domroute_common::config::{Config, DnsConfig};
use domroute_common::dns::DnsResult;
use domroute_common::error::RoutingError;
use domroute_common::network::domain::Domain;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, Invocation};
use crate::parse;
use crate::store::CacheError;

pub mod cache;
pub mod wildcard;

use cache::{CacheStats, DnsCache};

pub struct DnsResolver {
    runner: Arc<dyn CommandRunner>,
    cache: DnsCache,
    dns: DnsConfig,
}

impl DnsResolver {
    /// Builds a resolver from configuration, loading the persisted cache.
    pub fn new(cfg: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        let ttl = Duration::from_secs(cfg.cache_ttl_hours.saturating_mul(3600));
        let cache = DnsCache::load(&cfg.dns_cache_file, ttl);
        Self::with_cache(cache, cfg.dns.clone(), runner)
    }

    pub fn with_cache(cache: DnsCache, dns: DnsConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner, cache, dns }
    }

    pub fn cache(&self) -> &DnsCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) -> Result<(), CacheError> {
        self.cache.clear()?;
        debug!("DNS cache cleared");
        Ok(())
    }

    /// Resolves one domain, including its wildcard expansion.
    pub async fn resolve_domain(&mut self, domain: &Domain) -> DnsResult {
        let start: Instant = Instant::now();
        let mut unique_ips: HashSet<Ipv4Addr> = HashSet::new();
        let mut errors: Vec<String> = Vec::new();

        for hostname in wildcard::expand(&domain.name, domain.domain_type) {
            if self.cache.is_valid(&hostname) {
                let cached: &[Ipv4Addr] = self.cache.get(&hostname).unwrap_or_default();
                debug!("Cache hit for {hostname}: {cached:?}");
                unique_ips.extend(cached.iter().copied());
                continue;
            }

            match self.lookup(&hostname).await {
                Ok(ips) if ips.is_empty() => {
                    debug!("No A records for {hostname}");
                }
                Ok(ips) => {
                    debug!("Resolved {hostname}: {ips:?}");
                    unique_ips.extend(ips.iter().copied());
                    self.cache.put(hostname, ips);
                }
                Err(e) => {
                    warn!("{e}");
                    errors.push(e.to_string());
                }
            }
        }

        if !unique_ips.is_empty() {
            self.cache.save();
        }

        DnsResult::new(domain.name.clone(), unique_ips, errors, start.elapsed())
    }

    /// Resolves `domains` one after the other, in order.
    pub async fn resolve_domains(&mut self, domains: &[Domain]) -> Vec<DnsResult> {
        let total: usize = domains.len();
        info!("Resolving {total} domains...");

        let mut results: Vec<DnsResult> = Vec::with_capacity(total);
        for (idx, domain) in domains.iter().enumerate() {
            debug!("[{}/{total}] Resolving {}...", idx + 1, domain.name);
            results.push(self.resolve_domain(domain).await);
        }
        results
    }

    /// Queries the DNS tool for the A records of a single hostname. Bypasses the cache.
    pub async fn lookup(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, RoutingError> {
        let fail = |reason: String| RoutingError::DnsLookup {
            host: hostname.to_string(),
            reason,
        };

        let invocation: Invocation = self.query_invocation(hostname);
        let output = self
            .runner
            .run(&invocation, self.dns.process_timeout())
            .await
            .map_err(|e| fail(e.to_string()))?;

        if !output.success {
            let reason = match output.message() {
                "" => "non-zero exit status".to_string(),
                message => message.to_string(),
            };
            return Err(fail(reason));
        }

        Ok(parse::parse_dns_answers(&output.stdout))
    }

    fn query_invocation(&self, hostname: &str) -> Invocation {
        Invocation::new(
            self.dns.tool.as_str(),
            [
                "+short".to_string(),
                format!("+time={}", self.dns.timeout.as_secs()),
                format!("+tries={}", self.dns.retries),
                hostname.to_string(),
                "A".to_string(),
            ],
        )
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
