//! # HTTP Gateway
//!
//! The authenticated administrative HTTP surface for the cluster control
//! plane.
//!
//! # Endpoints
//!
//! - `/users` - user management (create-user carries the bootstrap exception)
//! - `/db` - databases, plus per-database series, shards, retention policies
//! - `/data_nodes` - cluster membership
//! - `/ping`, `/authenticate` - liveness and reserved credential check

pub mod auth;
pub mod config;
pub mod credentials;
pub mod response;
pub mod server;

mod database_routes;
mod node_routes;
mod retention_routes;
mod series_routes;
mod shard_routes;
mod user_routes;

pub use config::GatewayConfig;
pub use server::{build_router, AdminServer, AppState};
