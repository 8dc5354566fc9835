use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{EntityKind, ModelResult, Reference};

/// One of the five model building blocks.
///
/// `Input` is the loosely-typed client payload, `Fields` the validated and
/// normalized column set that a create or full-replace update writes.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    type Input: DeserializeOwned + Send + 'static;
    type Fields: Clone + Debug + Send + Sync + 'static;

    fn validate(input: Self::Input) -> ModelResult<Self::Fields>;

    fn id(&self) -> i64;

    /// Label other entities may use to refer to this one.
    fn name(&self) -> &str;

    fn field_refs(fields: &Self::Fields) -> Vec<Reference<'_>>;

    fn refs(&self) -> Vec<Reference<'_>>;
}
