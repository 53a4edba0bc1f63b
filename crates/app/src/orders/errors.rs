//! Orders storage errors.

use morsel::repository::RepositoryError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};

/// Translate a sqlx failure into the repository's error vocabulary.
pub(crate) fn repository_error(error: Error) -> RepositoryError {
    if matches!(error, Error::RowNotFound) {
        return RepositoryError::NotFound;
    }

    match error.as_database_error().map(DatabaseError::kind) {
        Some(ErrorKind::UniqueViolation) => RepositoryError::AlreadyExists,
        Some(
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation,
        ) => RepositoryError::InvalidData,
        Some(ErrorKind::Other | _) | None => RepositoryError::Storage(Box::new(error)),
    }
}
