//! The persisted record of routes this process installed.
//!
//! Keys are `target:interface`. The set is the process's own log of intent,
//! not a mirror of the OS routing table, and is the only signal used for
//! idempotent adds.
//!
//! On disk: `{ "routes": ["<target>:<interface>", ...], "timestamp": <epoch seconds> }`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::store::{self, CacheError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RoutesDocument {
    #[serde(default)]
    routes: Vec<String>,
    #[serde(default)]
    timestamp: f64,
}

#[derive(Debug)]
pub struct ActiveRouteSet {
    path: PathBuf,
    routes: BTreeSet<String>,
    save_warned: bool,
}

impl ActiveRouteSet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            routes: BTreeSet::new(),
            save_warned: false,
        }
    }

    /// Opens the set at `path`. A corrupt file leaves the set empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut set = Self::new(path);
        match store::read_json::<RoutesDocument>(&set.path) {
            Ok(Some(doc)) => {
                set.routes = doc.routes.into_iter().collect();
                debug!("Routes cache loaded: {} active routes", set.routes.len());
            }
            Ok(None) => {}
            Err(e) => warn!("Could not load routes cache {}: {e}", set.path.display()),
        }
        set
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.routes.contains(key)
    }

    pub fn add(&mut self, key: impl Into<String>) {
        self.routes.insert(key.into());
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.routes.remove(key)
    }

    /// Removes every key belonging to `target`, whatever its interface.
    pub fn remove_target(&mut self, target: &str) -> usize {
        let prefix: String = format!("{target}:");
        let before: usize = self.routes.len();
        self.routes.retain(|key| !key.starts_with(&prefix));
        before - self.routes.len()
    }

    pub fn count(&self) -> usize {
        self.routes.len()
    }

    /// Copy of the current keys, safe to iterate while mutating the set.
    pub fn snapshot(&self) -> Vec<String> {
        self.routes.iter().cloned().collect()
    }

    /// Writes the set to disk. Only the first failure per set is reported.
    pub fn save(&mut self) {
        match self.try_save() {
            Ok(()) => {}
            Err(e) if !self.save_warned => {
                info!("Routes cache disabled: {e}");
                self.save_warned = true;
            }
            Err(_) => {}
        }
    }

    pub fn try_save(&self) -> Result<(), CacheError> {
        let doc = RoutesDocument {
            routes: self.snapshot(),
            timestamp: store::epoch_now(),
        };
        store::write_json(&self.path, &doc)?;
        hand_to_invoking_user(&self.path);
        Ok(())
    }
}

/// When running as root through `sudo`, gives the file back to the invoking
/// user so it can be read and removed without elevation. Best effort.
#[cfg(unix)]
fn hand_to_invoking_user(path: &Path) {
    if !is_root::is_root() {
        return;
    }
    let Some((uid, gid)) = sudo_ids() else {
        return;
    };
    if let Err(e) = std::os::unix::fs::chown(path, Some(uid), Some(gid)) {
        debug!("Could not hand {} to uid {uid}: {e}", path.display());
    }
}

#[cfg(not(unix))]
fn hand_to_invoking_user(_path: &Path) {}

#[cfg(unix)]
fn sudo_ids() -> Option<(u32, u32)> {
    let uid: u32 = std::env::var("SUDO_UID").ok()?.parse().ok()?;
    let gid: u32 = std::env::var("SUDO_GID").ok()?.parse().ok()?;
    Some((uid, gid))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
