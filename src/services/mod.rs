//! Services coordinating the directory, the dispatcher and the HTTP layer.

use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::services::dispatch::DispatchError;

pub mod api;
pub mod directory;
pub mod dispatch;
pub mod main;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Type constraint error: {0}")]
    TypeConstraint(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Failed to load clients: {0}")]
    Load(#[from] RepositoryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
