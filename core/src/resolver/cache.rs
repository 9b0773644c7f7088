//! Persisted hostname → addresses cache.
//!
//! On disk: `{ "<hostname>": {"ips": ["a.b.c.d", ...], "timestamp": <epoch seconds>} }`.
//! Entries are never expired proactively; validity is checked on read.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::{self, CacheError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub ips: Vec<Ipv4Addr>,
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub cache_file: PathBuf,
}

#[derive(Debug)]
pub struct DnsCache {
    path: PathBuf,
    ttl: Duration,
    entries: BTreeMap<String, CacheEntry>,
}

impl DnsCache {
    /// An empty cache backed by `path`; nothing is read.
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entries: BTreeMap::new(),
        }
    }

    /// Opens the cache at `path`. A corrupt file leaves the cache empty.
    pub fn load(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let mut cache = Self::new(path, ttl);
        match store::read_json::<BTreeMap<String, CacheEntry>>(&cache.path) {
            Ok(Some(entries)) => {
                debug!("DNS cache loaded: {} entries", entries.len());
                cache.entries = entries;
            }
            Ok(None) => {}
            Err(e) => warn!("Could not load DNS cache {}: {e}", cache.path.display()),
        }
        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_valid(&self, hostname: &str) -> bool {
        self.is_valid_at(hostname, store::epoch_now())
    }

    /// Validity against an explicit clock, `now` in epoch seconds.
    pub fn is_valid_at(&self, hostname: &str, now: f64) -> bool {
        self.entries
            .get(hostname)
            .is_some_and(|entry| now - entry.timestamp < self.ttl.as_secs_f64())
    }

    /// Cached addresses, regardless of validity. Check [`Self::is_valid`] first.
    pub fn get(&self, hostname: &str) -> Option<&[Ipv4Addr]> {
        self.entries.get(hostname).map(|entry| entry.ips.as_slice())
    }

    pub fn put(&mut self, hostname: impl Into<String>, ips: Vec<Ipv4Addr>) {
        self.put_at(hostname, ips, store::epoch_now());
    }

    pub fn put_at(&mut self, hostname: impl Into<String>, ips: Vec<Ipv4Addr>, timestamp: f64) {
        self.entries
            .insert(hostname.into(), CacheEntry { ips, timestamp });
    }

    /// Writes the cache to disk, logging instead of failing.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!("Could not save DNS cache {}: {e}", self.path.display());
        }
    }

    pub fn try_save(&self) -> Result<(), CacheError> {
        store::write_json(&self.path, &self.entries)
    }

    /// Drops every entry and deletes the backing file.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.entries.clear();
        store::remove_file(&self.path)
    }

    pub fn stats(&self) -> CacheStats {
        let now: f64 = store::epoch_now();
        let total_entries: usize = self.entries.len();
        let valid_entries: usize = self
            .entries
            .keys()
            .filter(|hostname| self.is_valid_at(hostname, now))
            .count();

        CacheStats {
            total_entries,
            valid_entries,
            expired_entries: total_entries - valid_entries,
            cache_file: self.path.clone(),
        }
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
