//! # Domroute Common
//!
//! Shared vocabulary of the workspace: the routing data model, error kinds,
//! the configuration value and the list-file loader.
//!
//! Nothing in here performs routing or resolution; that lives in `domroute-core`.

pub mod config;
pub mod dns;
pub mod error;
pub mod lists;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing;
