//! Simulated storage engine
//!
//! Holds pool state in memory. Nothing here touches real block devices;
//! the engine exists to give the bus surface live objects to serve.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("pool `{0}` already exists")]
    DuplicatePool(String),
    #[error("no pool named `{0}`")]
    NoSuchPool(String),
}

#[derive(Debug, Clone)]
pub struct PoolInfo {
    pub uuid: Uuid,
    pub devices: Vec<String>,
}

/// In-memory pool table, keyed by pool name.
#[derive(Debug, Default)]
pub struct SimEngine {
    pools: HashMap<String, PoolInfo>,
}

impl SimEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Daemon version reported through the manager's `Version` property.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn create_pool(&mut self, name: &str, devices: Vec<String>) -> Result<Uuid, EngineError> {
        if self.pools.contains_key(name) {
            return Err(EngineError::DuplicatePool(name.to_string()));
        }
        let uuid = Uuid::new_v4();
        self.pools.insert(name.to_string(), PoolInfo { uuid, devices });
        Ok(uuid)
    }

    /// Remove a pool; `Some(uuid)` when one existed under `name`.
    pub fn destroy_pool(&mut self, name: &str) -> Option<Uuid> {
        self.pools.remove(name).map(|info| info.uuid)
    }

    pub fn rename_pool(&mut self, old: &str, new: &str) -> Result<(), EngineError> {
        if old == new {
            return Ok(());
        }
        if self.pools.contains_key(new) {
            return Err(EngineError::DuplicatePool(new.to_string()));
        }
        match self.pools.remove(old) {
            Some(info) => {
                self.pools.insert(new.to_string(), info);
                Ok(())
            }
            None => Err(EngineError::NoSuchPool(old.to_string())),
        }
    }

    pub fn pool(&self, name: &str) -> Option<&PoolInfo> {
        self.pools.get(name)
    }
}
