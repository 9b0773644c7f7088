//! # Domroute Core
//!
//! The two halves of domain-driven routing:
//!
//! * **[`resolver`]**: expands wildcard domains, resolves them through an
//!   external DNS tool and keeps a persisted, TTL-bound cache.
//! * **[`routes`]**: installs and removes host/network routes through the
//!   external routing tool and tracks what it installed.
//!
//! Both talk to the outside world only through the [`command::CommandRunner`]
//! seam; [`parse`] turns the tools' text output into typed values.

pub mod command;
pub mod parse;
pub mod resolver;
pub mod routes;
pub mod store;
