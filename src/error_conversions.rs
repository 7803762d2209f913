//! Error conversion glue between the domain, persistence and service layers.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::points::CreatePointFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<CreatePointFormError> for ServiceError {
        fn from(val: CreatePointFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
