pub mod config;
mod db;
mod integrity;
pub mod migration;
pub mod service;
pub mod store;
pub mod stored;

pub use lpforge_model_core::*;
pub use config::{DatabaseConfig, IntegrityConfig, PoolConfig, StoreConfig, ValidationMode};
pub use service::EntityService;
pub use store::ModelStore;
pub use stored::{StoredEntity, WriteKind};
