//! # In-Memory Store
//!
//! Reference [`ResourceStore`] implementation backing the standalone binary
//! and the integration tests. Passwords are stored as argon2id hashes only;
//! authentication failures always surface as the generic invalid-credentials
//! error.
//!
//! A single `RwLock` guards all resources, so duplicate-create and
//! first-admin races resolve to exactly one winner.

use std::collections::BTreeMap;
use std::sync::RwLock;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::errors::{Resource, StoreError, StoreResult};
use super::{
    DataNode, DatabaseInfo, Identity, ResourceStore, RetentionPolicy, RetentionPolicyUpdate,
    ShardInfo, UserInfo, UserUpdate,
};

struct UserRecord {
    password_hash: String,
    admin: bool,
}

#[derive(Default)]
struct DatabaseRecord {
    retention_policies: BTreeMap<String, RetentionPolicy>,
    shards: BTreeMap<u64, ShardInfo>,
}

struct Inner {
    users: BTreeMap<String, UserRecord>,
    databases: BTreeMap<String, DatabaseRecord>,
    data_nodes: BTreeMap<u64, String>,
    next_node_id: u64,
}

/// In-memory resource store.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: BTreeMap::new(),
                databases: BTreeMap::new(),
                data_nodes: BTreeMap::new(),
                next_node_id: 1,
            }),
        }
    }

    /// Seed a shard directly; shards are otherwise created by the (external)
    /// write path, which this store does not implement.
    pub fn add_shard(&self, database: &str, shard: ShardInfo) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let db = inner
            .databases
            .get_mut(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        db.shards.insert(shard.id, shard);
        Ok(())
    }

    fn hash_password(password: &str) -> StoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Internal(format!("password hashing failed: {e}")))
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for MemoryStore {
    fn authenticate(&self, username: &str, password: &str) -> StoreResult<Identity> {
        let inner = self.inner.read().unwrap();
        let record = inner
            .users
            .get(username)
            .ok_or(StoreError::InvalidCredentials)?;
        if !Self::verify_password(password, &record.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(Identity {
            name: username.to_string(),
            admin: record.admin,
        })
    }

    fn admin_user_exists(&self) -> StoreResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.values().any(|u| u.admin))
    }

    fn users(&self) -> StoreResult<Vec<UserInfo>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users
            .iter()
            .map(|(name, record)| UserInfo {
                name: name.clone(),
                admin: record.admin,
            })
            .collect())
    }

    fn create_user(&self, name: &str, password: &str, admin: bool) -> StoreResult<()> {
        let password_hash = Self::hash_password(password)?;
        let mut inner = self.inner.write().unwrap();
        if inner.users.contains_key(name) {
            return Err(StoreError::AlreadyExists(Resource::User));
        }
        inner.users.insert(
            name.to_string(),
            UserRecord {
                password_hash,
                admin,
            },
        );
        Ok(())
    }

    fn update_user(&self, name: &str, update: &UserUpdate) -> StoreResult<()> {
        let password_hash = match &update.password {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };
        let mut inner = self.inner.write().unwrap();
        let record = inner
            .users
            .get_mut(name)
            .ok_or(StoreError::NotFound(Resource::User))?;
        if let Some(hash) = password_hash {
            record.password_hash = hash;
        }
        if let Some(admin) = update.admin {
            record.admin = admin;
        }
        Ok(())
    }

    fn delete_user(&self, name: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .users
            .remove(name)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Resource::User))
    }

    fn databases(&self) -> StoreResult<Vec<DatabaseInfo>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .databases
            .keys()
            .map(|name| DatabaseInfo { name: name.clone() })
            .collect())
    }

    fn create_database(&self, name: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.databases.contains_key(name) {
            return Err(StoreError::AlreadyExists(Resource::Database));
        }
        inner
            .databases
            .insert(name.to_string(), DatabaseRecord::default());
        Ok(())
    }

    fn delete_database(&self, name: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .databases
            .remove(name)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Resource::Database))
    }

    fn retention_policies(&self, database: &str) -> StoreResult<Vec<RetentionPolicy>> {
        let inner = self.inner.read().unwrap();
        let db = inner
            .databases
            .get(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        Ok(db.retention_policies.values().cloned().collect())
    }

    fn create_retention_policy(&self, database: &str, policy: &RetentionPolicy) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let db = inner
            .databases
            .get_mut(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        if db.retention_policies.contains_key(&policy.name) {
            return Err(StoreError::AlreadyExists(Resource::RetentionPolicy));
        }
        db.retention_policies
            .insert(policy.name.clone(), policy.clone());
        Ok(())
    }

    fn update_retention_policy(
        &self,
        database: &str,
        name: &str,
        update: &RetentionPolicyUpdate,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let db = inner
            .databases
            .get_mut(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        let policy = db
            .retention_policies
            .get_mut(name)
            .ok_or(StoreError::NotFound(Resource::RetentionPolicy))?;
        if let Some(duration) = &update.duration {
            policy.duration = Some(duration.clone());
        }
        if let Some(replica_n) = update.replica_n {
            policy.replica_n = Some(replica_n);
        }
        Ok(())
    }

    fn delete_retention_policy(&self, database: &str, name: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let db = inner
            .databases
            .get_mut(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        db.retention_policies
            .remove(name)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Resource::RetentionPolicy))
    }

    fn shards(&self, database: &str) -> StoreResult<Vec<ShardInfo>> {
        let inner = self.inner.read().unwrap();
        let db = inner
            .databases
            .get(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        Ok(db.shards.values().cloned().collect())
    }

    fn delete_shard(&self, database: &str, id: u64) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let db = inner
            .databases
            .get_mut(database)
            .ok_or(StoreError::NotFound(Resource::Database))?;
        db.shards
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Resource::Shard))
    }

    fn data_nodes(&self) -> StoreResult<Vec<DataNode>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .data_nodes
            .iter()
            .map(|(&id, url)| DataNode {
                id,
                url: url.clone(),
            })
            .collect())
    }

    fn create_data_node(&self, url: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.data_nodes.values().any(|existing| existing == url) {
            return Err(StoreError::AlreadyExists(Resource::DataNode));
        }
        let id = inner.next_node_id;
        inner.next_node_id += 1;
        inner.data_nodes.insert(id, url.to_string());
        Ok(())
    }

    fn data_node_by_url(&self, url: &str) -> StoreResult<Option<DataNode>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .data_nodes
            .iter()
            .find(|(_, existing)| existing.as_str() == url)
            .map(|(&id, url)| DataNode {
                id,
                url: url.clone(),
            }))
    }

    fn delete_data_node(&self, id: u64) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .data_nodes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(Resource::DataNode))
    }
}
