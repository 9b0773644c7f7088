//! # Routing Data Model
//!
//! * [`interface::NetworkInterface`]: an egress path (gateway-addressed or tunnel).
//! * [`domain::Domain`]: a routing subject parsed from a possibly wildcarded pattern.
//! * [`target::RoutingTarget`]: a classified host or network route destination.
//! * [`route::Route`] and [`route::OperationResult`]: outcomes of route mutations.

pub mod domain;
pub mod interface;
pub mod route;
pub mod target;
