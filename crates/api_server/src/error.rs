use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use lpforge_model_store::{Action, EntityKind, ErrorEnvelope, ModelError};

/// A failed entity operation, rendered as the error envelope.
#[derive(Debug)]
pub struct ApiError {
    kind: EntityKind,
    action: Action,
    source: ModelError,
}

impl ApiError {
    pub fn new(kind: EntityKind, action: Action, source: ModelError) -> Self {
        Self {
            kind,
            action,
            source,
        }
    }

    pub fn rejected_body(kind: EntityKind, action: Action, rejection: JsonRejection) -> Self {
        Self::new(
            kind,
            action,
            ModelError::validation(format!("Invalid request body: {}", rejection.body_text())),
        )
    }

    pub fn status(&self) -> StatusCode {
        match self.source {
            ModelError::Validation { .. } => StatusCode::BAD_REQUEST,
            ModelError::NotFound { .. } => StatusCode::NOT_FOUND,
            ModelError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.source {
            ModelError::Storage { message } => {
                error!(
                    "api: {} failed ({}): {message}",
                    self.action.failure_summary(self.kind),
                    self.source.code()
                );
            }
            ModelError::Validation { message } => {
                warn!(
                    "api: rejected {} input ({}): {message}",
                    self.kind.noun(),
                    self.source.code()
                );
            }
            ModelError::NotFound { .. } => {}
        }
        let envelope = ErrorEnvelope::for_error(self.kind, self.action, &self.source);
        (status, Json(envelope)).into_response()
    }
}
