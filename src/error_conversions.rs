//! Error conversion glue between the domain and the outer layers.
//!
//! The domain layer must not depend on service/repository error types.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}
