//! Reference lists linking one entity to entities of another kind.
//!
//! Clients send a reference field either as a JSON array or as a single
//! comma-delimited string. Both forms collapse into a [`RefList`] before
//! anything is validated, counted, or stored.

use serde::{Deserialize, Serialize};

use crate::{EntityKind, ModelError, ModelResult};

/// Client-facing shape of a reference field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefInput {
    Delimited(String),
    List(Vec<RefToken>),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefToken {
    Text(String),
    Integer(i64),
}

impl RefToken {
    fn into_text(self) -> String {
        match self {
            RefToken::Text(text) => text,
            RefToken::Integer(value) => value.to_string(),
        }
    }
}

impl RefInput {
    pub fn normalize(self) -> RefList {
        match self {
            RefInput::Delimited(raw) => RefList::from_delimited(&raw),
            RefInput::List(tokens) => RefList::new(tokens.into_iter().map(RefToken::into_text)),
        }
    }
}

/// Ordered reference tokens: trimmed, never empty, duplicates kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefList(Vec<String>);

impl RefList {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .filter_map(|token| {
                    let trimmed = token.as_ref().trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .collect(),
        )
    }

    pub fn from_delimited(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// JSON text form used by the relational store.
    pub fn to_json(&self) -> ModelResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|err| ModelError::storage(format!("encode reference list: {err}")))
    }

    pub fn from_json(raw: &str) -> ModelResult<Self> {
        let tokens: Vec<String> = serde_json::from_str(raw)
            .map_err(|err| ModelError::storage(format!("decode reference list: {err}")))?;
        Ok(Self(tokens))
    }
}

/// A reference field bound to the kind its tokens point at.
#[derive(Clone, Copy, Debug)]
pub struct Reference<'a> {
    pub field: &'static str,
    pub target: EntityKind,
    pub refs: &'a RefList,
}

impl<'a> Reference<'a> {
    pub fn new(field: &'static str, target: EntityKind, refs: &'a RefList) -> Self {
        Self {
            field,
            target,
            refs,
        }
    }
}

/// A stored token that resolves to no row of its target kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    pub kind: EntityKind,
    pub id: i64,
    pub field: String,
    pub target: EntityKind,
    pub token: String,
}
