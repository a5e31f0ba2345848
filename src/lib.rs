//! nimbusdb - administrative HTTP gateway for a clustered time-series database
//!
//! The gateway fronts the cluster's control plane: it exposes resource-oriented
//! operations over users, databases, retention policies, data nodes, and shards,
//! and gates every protected operation behind an authentication policy with one
//! deliberate bootstrap exception for the very first administrator.
//!
//! Persistence and business rules live behind the [`store::ResourceStore`]
//! trait; query parsing and the series write path behind the collaborator
//! traits in [`query`].

pub mod cli;
pub mod gateway;
pub mod query;
pub mod store;
