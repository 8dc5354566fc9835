//! Uniform response envelopes.
//!
//! Success: `{success: true, data, message?}`.
//! Failure: `{success: false, error, details?}` where `details` carries the
//! underlying cause of storage failures only.

use serde::{Deserialize, Serialize};

use crate::{EntityKind, ModelError};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Create,
    List,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn success_message(self, kind: EntityKind) -> Option<String> {
        let verb = match self {
            Action::Create => "created",
            Action::Update => "updated",
            Action::Delete => "deleted",
            Action::List | Action::Read => return None,
        };
        Some(format!("{} {verb} successfully", kind.label()))
    }

    pub fn failure_summary(self, kind: EntityKind) -> String {
        match self {
            Action::Create => format!("Error creating {}", kind.noun()),
            Action::List => format!("Error fetching {}", kind.plural()),
            Action::Read => format!("Error fetching {}", kind.noun()),
            Action::Update => format!("Error updating {}", kind.noun()),
            Action::Delete => format!("Error deleting {}", kind.noun()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn for_action(kind: EntityKind, action: Action, data: T) -> Self {
        Self {
            success: true,
            data,
            message: action.success_message(kind),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn for_error(kind: EntityKind, action: Action, err: &ModelError) -> Self {
        match err {
            ModelError::Validation { message } | ModelError::NotFound { message } => {
                Self::new(message.clone())
            }
            ModelError::Storage { message } => Self {
                success: false,
                error: action.failure_summary(kind),
                details: Some(message.clone()),
            },
        }
    }
}
