//! # Route Management
//!
//! Installs and removes host/network routes through the external routing
//! tool, keeping an [`ActiveRouteSet`] of what this process installed.
//!
//! The set is trusted as the only idempotency signal: a route whose key is
//! already tracked is reported as present without touching the OS. Use
//! [`RouteManager::reconcile`] to compare the set against live lookups.

use std::sync::Arc;
use std::time::Duration;

use domroute_common::config::Config;
use domroute_common::error::RoutingError;
use domroute_common::network::domain::RouteType;
use domroute_common::network::interface::NetworkInterface;
use domroute_common::network::route::{OperationResult, Route, route_key, split_route_key};
use domroute_common::network::target::{RoutingTarget, classify};
use tracing::{debug, info, warn};

use crate::command::{CommandOutput, CommandRunner, Invocation};
use crate::parse::{self, RouteReport};

pub mod active;
pub mod builder;

use active::ActiveRouteSet;

/// Ceiling for every routing-tool invocation.
pub const ROUTE_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of comparing tracked routes with live route lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys whose lookup reports the tracked interface.
    pub confirmed: Vec<String>,
    /// Keys whose lookup failed or reports another interface.
    pub drifted: Vec<String>,
}

pub struct RouteManager {
    runner: Arc<dyn CommandRunner>,
    local: NetworkInterface,
    vpn: NetworkInterface,
    route_tool: String,
    require_sudo: bool,
    active: ActiveRouteSet,
}

impl RouteManager {
    /// Builds a manager from configuration, loading the persisted route set.
    pub fn new(cfg: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        let active = ActiveRouteSet::load(&cfg.routes_cache_file);
        Self::with_active(cfg, active, runner)
    }

    pub fn with_active(cfg: &Config, active: ActiveRouteSet, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            local: cfg.local_interface.clone(),
            vpn: cfg.vpn_interface.clone(),
            route_tool: cfg.route_tool.clone(),
            require_sudo: cfg.require_sudo,
            active,
        }
    }

    pub fn interface(&self, route_type: RouteType) -> &NetworkInterface {
        match route_type {
            RouteType::Local => &self.local,
            RouteType::Vpn => &self.vpn,
        }
    }

    pub fn active_routes(&self) -> &ActiveRouteSet {
        &self.active
    }

    pub fn active_routes_count(&self) -> usize {
        self.active.count()
    }

    /// Routes `target` through the interface bound to `route_type`.
    ///
    /// A target already tracked for that interface succeeds without running
    /// any command.
    pub async fn add_route(&mut self, target: &str, route_type: RouteType) -> OperationResult {
        let parsed: RoutingTarget = match classify(target) {
            Ok(parsed) => parsed,
            Err(e) => return failure(format!("Error adding route for {target}"), e),
        };

        let interface: NetworkInterface = self.interface(route_type).clone();
        let key: String = route_key(&parsed.to_string(), interface.name());

        if self.active.contains(&key) {
            debug!("Route {key} already tracked");
            return OperationResult::ok(format!(
                "Route {parsed} via {} already exists",
                interface.name()
            ));
        }

        let invocation: Invocation = match builder::add_route(&self.route_tool, &parsed, &interface) {
            Ok(invocation) => invocation,
            Err(e) => return failure(format!("Error adding route for {target}"), e),
        };

        match self.run(invocation).await {
            Ok(_) => {
                self.active.add(key);
                self.active.save();

                let route = Route {
                    target: parsed.to_string(),
                    interface: interface.name().to_string(),
                    gateway: (!interface.is_tunnel())
                        .then(|| interface.gateway())
                        .flatten()
                        .map(String::from),
                    is_host: parsed.is_host(),
                };
                info!("Route added: {route}");
                OperationResult::with_route(
                    format!("Route added: {parsed} via {}", interface.name()),
                    route,
                )
            }
            Err(e) => {
                warn!("Failed to add route {parsed}: {e}");
                failure("Failed to add route", e)
            }
        }
    }

    /// Deletes the route to `target`. A route the OS reports as absent counts
    /// as removed.
    pub async fn remove_route(&mut self, target: &str) -> OperationResult {
        let parsed: RoutingTarget = match classify(target) {
            Ok(parsed) => parsed,
            Err(e) => return failure(format!("Error removing route for {target}"), e),
        };

        let invocation: Invocation = builder::delete_route(&self.route_tool, &parsed);
        match self.run(invocation).await {
            Ok(_) => {
                self.purge(&parsed);
                info!("Route removed: {parsed}");
                OperationResult::ok(format!("Route removed: {parsed}"))
            }
            Err(e) if parse::is_absent_route_error(&e.to_string()) => {
                self.purge(&parsed);
                debug!("Route {parsed} was not present");
                OperationResult::ok(format!("Route {parsed} was not present"))
            }
            Err(e) => {
                warn!("Failed to remove route {parsed}: {e}");
                failure("Failed to remove route", e)
            }
        }
    }

    /// Adds every target in order. Succeeds when at least one add did.
    pub async fn add_routes_bulk<S: AsRef<str>>(
        &mut self,
        targets: &[S],
        route_type: RouteType,
    ) -> OperationResult {
        let total: usize = targets.len();
        let mut aggregate = OperationResult::default();
        let mut success_count: usize = 0;

        for target in targets {
            let result: OperationResult = self.add_route(target.as_ref(), route_type).await;
            if result.success {
                success_count += 1;
            }
            aggregate.affected_routes.extend(result.affected_routes);
            aggregate.errors.extend(result.errors);
        }

        aggregate.success = success_count > 0;
        aggregate.message = format!("Added {success_count}/{total} routes successfully");
        aggregate
    }

    /// Looks `target` up in the live routing table. `None` when the lookup fails.
    pub async fn check_route(&self, target: &str) -> Option<RouteReport> {
        let invocation: Invocation =
            builder::get_route(&self.route_tool, target.trim()).elevated(self.require_sudo);
        match self.runner.run(&invocation, ROUTE_COMMAND_TIMEOUT).await {
            Ok(output) if output.success => Some(parse::parse_route_report(&output.stdout)),
            Ok(output) => {
                debug!("Route lookup for {target} failed: {}", output.message());
                None
            }
            Err(e) => {
                debug!("Route lookup for {target} failed: {e}");
                None
            }
        }
    }

    /// Removes every tracked route, iterating over a snapshot of the set.
    pub async fn clear_all_routes(&mut self) -> OperationResult {
        let keys: Vec<String> = self.active.snapshot();
        if keys.is_empty() {
            return OperationResult::ok("No routes to clear");
        }

        let mut errors: Vec<String> = Vec::new();
        let mut removed: usize = 0;

        for key in &keys {
            let (target, _) = split_route_key(key);
            let result: OperationResult = self.remove_route(target).await;
            if result.success {
                removed += 1;
            } else {
                errors.extend(result.errors);
            }
        }

        OperationResult {
            success: removed > 0,
            message: format!("Removed {removed}/{} routes", keys.len()),
            affected_routes: Vec::new(),
            errors,
        }
    }

    /// Compares every tracked key with a live lookup. Never mutates the set.
    pub async fn reconcile(&self) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for key in self.active.snapshot() {
            let (target, interface) = split_route_key(&key);
            let live: Option<RouteReport> = self.check_route(target).await;
            let confirmed: bool = match (&live, interface) {
                (Some(live), Some(interface)) => live.interface() == Some(interface),
                _ => false,
            };

            if confirmed {
                report.confirmed.push(key);
            } else {
                debug!("Tracked route {key} not confirmed by lookup");
                report.drifted.push(key);
            }
        }

        report
    }

    /// Drops `key` from the tracked set without touching the OS.
    pub fn forget(&mut self, key: &str) -> bool {
        let removed: bool = self.active.remove(key);
        if removed {
            self.active.save();
            info!("Forgot route {key}");
        }
        removed
    }

    fn purge(&mut self, target: &RoutingTarget) {
        if self.active.remove_target(&target.to_string()) > 0 {
            self.active.save();
        }
    }

    /// Runs a mutating route command; any non-success is a [`RoutingError::RouteCommand`].
    async fn run(&self, invocation: Invocation) -> Result<CommandOutput, RoutingError> {
        let invocation: Invocation = invocation.elevated(self.require_sudo);
        debug!("Executing: {invocation}");

        let output: CommandOutput = self
            .runner
            .run(&invocation, ROUTE_COMMAND_TIMEOUT)
            .await
            .map_err(|e| RoutingError::RouteCommand(e.to_string()))?;

        if output.success {
            Ok(output)
        } else {
            Err(RoutingError::RouteCommand(output.message().to_string()))
        }
    }
}

fn failure(message: impl Into<String>, error: RoutingError) -> OperationResult {
    let error: String = error.to_string();
    OperationResult::failed(format!("{}: {error}", message.into()), error)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
