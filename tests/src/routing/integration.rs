#![cfg(test)]
use domroute_common::network::domain::RouteType;
use domroute_common::network::target::{RoutingTarget, classify};
use domroute_core::command::CommandOutput;
use domroute_core::routes::RouteManager;

use crate::support::Sandbox;

#[test]
fn classification_is_syntactic() {
    assert!(classify("not.an.ip").is_err());
    assert!(classify("10.0.0.0/33").is_err());
    assert!(matches!(classify("10.0.0.0/24"), Ok(RoutingTarget::Network { prefix: 24, .. })));
    assert!(matches!(classify("10.0.0.5"), Ok(RoutingTarget::Host(_))));
    assert!(!classify("10.0.0.5/32").unwrap().is_host());
}

#[tokio::test]
async fn add_is_idempotent_across_processes() {
    let sandbox = Sandbox::permissive().unwrap();

    let mut first = RouteManager::new(&sandbox.cfg, sandbox.runner());
    assert!(first.add_route("8.8.8.8", RouteType::Vpn).await.success);
    assert!(sandbox.cfg.routes_cache_file.exists());

    let mut second = RouteManager::new(&sandbox.cfg, sandbox.runner());
    let again = second.add_route("8.8.8.8", RouteType::Vpn).await;

    assert!(again.success);
    assert!(again.affected_routes.is_empty());
    assert_eq!(sandbox.runner.count_matching("route add"), 1);
}

#[tokio::test]
async fn removing_a_missing_route_succeeds() {
    let sandbox = Sandbox::new().unwrap();
    sandbox.runner.respond(
        "route delete",
        CommandOutput::failed("delete host 203.0.113.9: not in table"),
    );

    let mut routes = RouteManager::new(&sandbox.cfg, sandbox.runner());
    let result = routes.remove_route("203.0.113.9").await;

    assert!(result.success);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn other_removal_errors_are_failures() {
    let sandbox = Sandbox::new().unwrap();
    sandbox.runner.respond("route delete", CommandOutput::failed("route: must be root to alter routing table"));

    let mut routes = RouteManager::new(&sandbox.cfg, sandbox.runner());
    let result = routes.remove_route("203.0.113.9").await;

    assert!(!result.success);
    assert_eq!(result.errors, vec!["route: must be root to alter routing table"]);
}

#[tokio::test]
async fn bulk_add_with_one_invalid_target() {
    let sandbox = Sandbox::permissive().unwrap();
    let mut routes = RouteManager::new(&sandbox.cfg, sandbox.runner());

    let result = routes
        .add_routes_bulk(&["1.1.1.1", "999.1.1.1", "10.8.0.0/16"], RouteType::Local)
        .await;

    assert!(result.success);
    assert_eq!(result.affected_routes.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.affected_routes.iter().all(|r| r.gateway.as_deref() == Some("192.168.1.1")));
}

#[tokio::test]
async fn clear_then_reconcile_sees_nothing() {
    let sandbox = Sandbox::permissive().unwrap();
    let mut routes = RouteManager::new(&sandbox.cfg, sandbox.runner());

    routes.add_route("1.1.1.1", RouteType::Vpn).await;
    routes.add_route("1.0.0.0/24", RouteType::Local).await;

    let cleared = routes.clear_all_routes().await;
    assert!(cleared.success);
    assert_eq!(cleared.message, "Removed 2/2 routes");

    let reopened = RouteManager::new(&sandbox.cfg, sandbox.runner());
    assert_eq!(reopened.active_routes_count(), 0);
    assert_eq!(reopened.reconcile().await, Default::default());
}
