use std::marker::PhantomData;

use async_trait::async_trait;
use log::{debug, info};

use crate::ModelStore;
use crate::stored::StoredEntity;
use lpforge_model_core::{EntityApi, ModelError, ModelResult};

/// CRUD service for one entity kind, backed by a shared [`ModelStore`].
pub struct EntityService<E> {
    store: ModelStore,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: StoredEntity> EntityService<E> {
    pub(crate) fn new(store: ModelStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn not_found() -> ModelError {
        ModelError::not_found(format!("{} not found", E::KIND.label()))
    }
}

#[async_trait]
impl<E: StoredEntity> EntityApi<E> for EntityService<E> {
    async fn create(&self, input: E::Input) -> ModelResult<E> {
        let fields = E::validate(input)?;
        self.store
            .verify_references(E::KIND, &E::field_refs(&fields))
            .await?;
        let entity = self.store.insert_row::<E>(&fields).await?;
        info!("store: created {} id={}", E::KIND.noun(), entity.id());
        Ok(entity)
    }

    async fn list(&self) -> ModelResult<Vec<E>> {
        let entities = self.store.select_all::<E>().await?;
        debug!("store: listed {} count={}", E::KIND.plural(), entities.len());
        Ok(entities)
    }

    async fn get(&self, id: i64) -> ModelResult<E> {
        debug!("store: read {} id={id}", E::KIND.noun());
        self.store
            .select_one::<E>(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    async fn update(&self, id: i64, input: E::Input) -> ModelResult<E> {
        let fields = E::validate(input)?;
        self.store
            .verify_references(E::KIND, &E::field_refs(&fields))
            .await?;
        let entity = self
            .store
            .update_row::<E>(id, &fields)
            .await?
            .ok_or_else(Self::not_found)?;
        info!("store: updated {} id={id}", E::KIND.noun());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> ModelResult<E> {
        let entity = self
            .store
            .delete_row::<E>(id)
            .await?
            .ok_or_else(Self::not_found)?;
        info!("store: deleted {} id={id}", E::KIND.noun());
        Ok(entity)
    }
}
