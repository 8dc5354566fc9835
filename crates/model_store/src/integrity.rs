//! Optional reference checking and the dangling-reference audit.
//!
//! A token resolves when it is the decimal id of a row in the target table or
//! equals that row's name column.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::{debug, warn};
use sea_orm::sea_query::Query;

use crate::store::query_all;
use crate::stored::{StoredEntity, read};
use crate::{ModelStore, ValidationMode};
use lpforge_model_core::{
    Constraint, DanglingReference, DecisionVariable, EntityKind, ModelError, ModelResult,
    ObjectiveFunction, Parameter, Reference, ReferenceAuditApi, Set,
};

#[derive(Debug, Default)]
pub(crate) struct ReferenceIndex {
    ids: HashSet<i64>,
    names: HashSet<String>,
}

impl ReferenceIndex {
    pub(crate) fn resolves(&self, token: &str) -> bool {
        if let Ok(id) = token.parse::<i64>()
            && self.ids.contains(&id)
        {
            return true;
        }
        self.names.contains(token)
    }
}

impl ModelStore {
    async fn reference_index(&self, kind: EntityKind) -> ModelResult<ReferenceIndex> {
        match kind {
            EntityKind::Set => self.reference_index_for::<Set>().await,
            EntityKind::Parameter => self.reference_index_for::<Parameter>().await,
            EntityKind::DecisionVariable => self.reference_index_for::<DecisionVariable>().await,
            EntityKind::Constraint => self.reference_index_for::<Constraint>().await,
            EntityKind::ObjectiveFunction => {
                self.reference_index_for::<ObjectiveFunction>().await
            }
        }
    }

    async fn reference_index_for<E: StoredEntity>(&self) -> ModelResult<ReferenceIndex> {
        let select = Query::select()
            .columns([E::ID, E::NAME])
            .from(E::TABLE)
            .to_owned();
        let mut index = ReferenceIndex::default();
        for row in query_all(self.connection(), &select).await? {
            index.ids.insert(read(&row, E::ID)?);
            index.names.insert(read(&row, E::NAME)?);
        }
        Ok(index)
    }

    fn reference_failure(&self, message: String) -> ModelResult<()> {
        match self.reference_checks() {
            ValidationMode::Error => Err(ModelError::validation(message)),
            ValidationMode::Warn => {
                warn!("store: reference check warning: {message}");
                Ok(())
            }
            ValidationMode::Off => Ok(()),
        }
    }

    /// Verifies `refs` against their target tables unless checks are off.
    pub(crate) async fn verify_references(
        &self,
        kind: EntityKind,
        refs: &[Reference<'_>],
    ) -> ModelResult<()> {
        if self.reference_checks() == ValidationMode::Off {
            return Ok(());
        }
        let mut indexes: HashMap<EntityKind, ReferenceIndex> = HashMap::new();
        for reference in refs.iter().filter(|reference| !reference.refs.is_empty()) {
            let index = match indexes.entry(reference.target) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.reference_index(reference.target).await?),
            };
            for token in reference.refs.iter() {
                if !index.resolves(token) {
                    self.reference_failure(format!(
                        "{} {} references unknown {} '{token}'",
                        kind.label(),
                        reference.field,
                        reference.target.noun()
                    ))?;
                }
            }
        }
        Ok(())
    }

    async fn collect_dangling<E: StoredEntity>(
        &self,
        indexes: &HashMap<EntityKind, ReferenceIndex>,
        dangling: &mut Vec<DanglingReference>,
    ) -> ModelResult<()> {
        for entity in self.select_all::<E>().await? {
            for reference in entity.refs() {
                let Some(index) = indexes.get(&reference.target) else {
                    continue;
                };
                for token in reference.refs.iter().filter(|token| !index.resolves(token)) {
                    dangling.push(DanglingReference {
                        kind: E::KIND,
                        id: entity.id(),
                        field: reference.field.to_string(),
                        target: reference.target,
                        token: token.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ReferenceAuditApi for ModelStore {
    async fn dangling_references(&self) -> ModelResult<Vec<DanglingReference>> {
        let mut indexes = HashMap::new();
        for kind in [
            EntityKind::Set,
            EntityKind::Parameter,
            EntityKind::DecisionVariable,
        ] {
            indexes.insert(kind, self.reference_index(kind).await?);
        }
        let mut dangling = Vec::new();
        self.collect_dangling::<Parameter>(&indexes, &mut dangling)
            .await?;
        self.collect_dangling::<DecisionVariable>(&indexes, &mut dangling)
            .await?;
        self.collect_dangling::<Constraint>(&indexes, &mut dangling)
            .await?;
        self.collect_dangling::<ObjectiveFunction>(&indexes, &mut dangling)
            .await?;
        debug!("store: reference audit found {} dangling", dangling.len());
        Ok(dangling)
    }
}
