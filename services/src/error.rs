use sea_orm::DbErr;
use thiserror::Error;

/// Failures that abort a workflow step. Validation problems are not errors;
/// they come back as part of the form.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Attachment storage error: {0}")]
    Storage(#[from] std::io::Error),
}
