//! # Resource Store
//!
//! Persistence and business rules for the cluster control plane, abstracted
//! behind the [`ResourceStore`] trait. The gateway only marshals resource
//! descriptors; uniqueness, existence, and the first-admin race are the
//! store's obligations, reported through the [`StoreError`] taxonomy.

pub mod errors;
pub mod memory;

pub use errors::{Resource, StoreError, StoreResult};
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

/// The authenticated caller resolved by the store.
///
/// Never persisted by the gateway; validity is entirely the store's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub admin: bool,
}

/// User summary returned on reads. The password never leaves the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
    pub admin: bool,
}

/// Partial user update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub admin: Option<bool>,
}

/// Database summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub name: String,
}

/// Retention policy descriptor. Duration and replication attributes are
/// opaque to the gateway and forwarded as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetentionPolicy {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_n: Option<u32>,
}

/// Partial retention policy update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetentionPolicyUpdate {
    pub duration: Option<String>,
    pub replica_n: Option<u32>,
}

/// A cluster member holding data. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataNode {
    pub id: u64,
    pub url: String,
}

/// Shard summary within a database.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ShardInfo {
    pub id: u64,
    pub retention_policy: String,
}

/// Persistence and business rules for the control plane.
///
/// All methods may be called concurrently. Two concurrent creates for the
/// same key must resolve so that at most one succeeds and the other observes
/// [`StoreError::AlreadyExists`]; likewise at most one caller may win the
/// first-admin bootstrap race.
pub trait ResourceStore: Send + Sync {
    // ==================
    // Authentication
    // ==================

    /// Resolve a username/password pair to an identity.
    ///
    /// Any failure is reported as [`StoreError::InvalidCredentials`]; the
    /// response never distinguishes an unknown user from a wrong password.
    fn authenticate(&self, username: &str, password: &str) -> StoreResult<Identity>;

    /// Whether at least one admin-flagged user exists.
    fn admin_user_exists(&self) -> StoreResult<bool>;

    // ==================
    // Users
    // ==================

    fn users(&self) -> StoreResult<Vec<UserInfo>>;
    fn create_user(&self, name: &str, password: &str, admin: bool) -> StoreResult<()>;
    fn update_user(&self, name: &str, update: &UserUpdate) -> StoreResult<()>;
    fn delete_user(&self, name: &str) -> StoreResult<()>;

    // ==================
    // Databases
    // ==================

    fn databases(&self) -> StoreResult<Vec<DatabaseInfo>>;
    fn create_database(&self, name: &str) -> StoreResult<()>;
    fn delete_database(&self, name: &str) -> StoreResult<()>;

    // ==================
    // Retention policies
    // ==================

    fn retention_policies(&self, database: &str) -> StoreResult<Vec<RetentionPolicy>>;
    fn create_retention_policy(&self, database: &str, policy: &RetentionPolicy) -> StoreResult<()>;
    fn update_retention_policy(
        &self,
        database: &str,
        name: &str,
        update: &RetentionPolicyUpdate,
    ) -> StoreResult<()>;
    fn delete_retention_policy(&self, database: &str, name: &str) -> StoreResult<()>;

    // ==================
    // Shards
    // ==================

    fn shards(&self, database: &str) -> StoreResult<Vec<ShardInfo>>;
    fn delete_shard(&self, database: &str, id: u64) -> StoreResult<()>;

    // ==================
    // Data nodes
    // ==================

    fn data_nodes(&self) -> StoreResult<Vec<DataNode>>;
    fn create_data_node(&self, url: &str) -> StoreResult<()>;

    /// Look up a node by URL; used to report the store-assigned id after a
    /// create.
    fn data_node_by_url(&self, url: &str) -> StoreResult<Option<DataNode>>;

    fn delete_data_node(&self, id: u64) -> StoreResult<()>;
}
