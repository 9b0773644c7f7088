use std::fs;
use std::path::Path;
use std::sync::Arc;

use domroute_common::config::{self, Config};
use domroute_core::command::mock::MockRunner;
use domroute_core::command::{CommandOutput, CommandRunner};
use tempfile::TempDir;

/// A configuration file on disk with every path inside a temporary directory.
pub struct Sandbox {
    pub dir: TempDir,
    pub cfg: Config,
    pub runner: Arc<MockRunner>,
}

impl Sandbox {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_runner(MockRunner::new())
    }

    /// Every unmatched command succeeds with empty output.
    pub fn permissive() -> anyhow::Result<Self> {
        Self::with_runner(MockRunner::with_default(CommandOutput::ok("")))
    }

    fn with_runner(runner: MockRunner) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.json");
        fs::write(&path, SETTINGS)?;
        let cfg = config::load_config(&path)?;
        Ok(Self {
            dir,
            cfg,
            runner: Arc::new(runner),
        })
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        self.runner.clone()
    }

    pub fn write_list(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

const SETTINGS: &str = r#"{
    "network": {
        "local": {"interface": "en0", "gateway": "192.168.1.1"},
        "vpn": {"interface": "utun4", "is_tunnel": true}
    },
    "files": {
        "domains": {"local": "lists/domains_local.txt", "vpn": "lists/domains_vpn.txt"},
        "ips": {"local": "lists/ips_local.txt", "vpn": "lists/ips_vpn.txt"}
    },
    "paths": {"cache_dir": "cache", "routes_cache": "cache/active_routes.json"},
    "dns": {"timeout": 2, "retries": 2},
    "cache": {"ttl_hours": 24},
    "security": {"require_sudo": false}
}"#;
