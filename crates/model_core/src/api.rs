use async_trait::async_trait;

use crate::{DanglingReference, Entity, ModelResult};

/// CRUD contract for one entity kind.
///
/// Every operation is a single statement against the store; `update` is a
/// full replace and `delete` returns the removed row.
#[async_trait]
pub trait EntityApi<E: Entity>: Send + Sync {
    async fn create(&self, input: E::Input) -> ModelResult<E>;
    async fn list(&self) -> ModelResult<Vec<E>>;
    async fn get(&self, id: i64) -> ModelResult<E>;
    async fn update(&self, id: i64, input: E::Input) -> ModelResult<E>;
    async fn delete(&self, id: i64) -> ModelResult<E>;
}

#[async_trait]
pub trait ReferenceAuditApi {
    /// Every stored reference token that resolves to no row of its target kind.
    async fn dangling_references(&self) -> ModelResult<Vec<DanglingReference>>;
}
