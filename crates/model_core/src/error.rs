use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("storage error: {message}")]
    Storage { message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("validation error: {message}")]
    Validation { message: String },
}

impl ModelError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Storage { .. } => "storage_error",
            ModelError::NotFound { .. } => "not_found",
            ModelError::Validation { .. } => "validation_failed",
        }
    }

    /// The message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Storage { message }
            | ModelError::NotFound { message }
            | ModelError::Validation { message } => message,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<sea_orm::DbErr> for ModelError {
    fn from(value: sea_orm::DbErr) -> Self {
        ModelError::storage(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ModelError;

    #[test]
    fn helper_constructors_set_variants() {
        let err = ModelError::storage("disk");
        assert!(matches!(err, ModelError::Storage { .. }));
        assert_eq!(err.code(), "storage_error");
        let err = ModelError::not_found("missing");
        assert!(matches!(err, ModelError::NotFound { .. }));
        assert_eq!(err.code(), "not_found");
        let err = ModelError::validation("bad");
        assert!(matches!(err, ModelError::Validation { .. }));
        assert_eq!(err.message(), "bad");
    }

    #[test]
    fn db_errors_become_storage_errors() {
        let err = ModelError::from(sea_orm::DbErr::Custom("connection refused".into()));
        assert!(matches!(err, ModelError::Storage { .. }));
        assert!(err.message().contains("connection refused"));
    }
}
