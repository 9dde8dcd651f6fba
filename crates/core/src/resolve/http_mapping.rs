//! HTTP status codes for [`ResolveError`].

use super::ResolveError;
use crate::storage::repository_error_to_status_code;

/// Maps a [`ResolveError`] to an HTTP status code.
///
/// Validation and identifier failures are 400, missing records 404, a delete
/// that is still visible after commit 500, and store errors use
/// [`repository_error_to_status_code`].
pub fn resolve_error_to_status_code(error: &ResolveError) -> u16 {
    match error {
        ResolveError::MissingFields(_)
        | ResolveError::InvalidDatabase
        | ResolveError::NothingToUpdate
        | ResolveError::InvalidBody(_)
        | ResolveError::InvalidIdentifier(_) => 400,
        ResolveError::NotFound { .. } => 404,
        ResolveError::DeleteNotConfirmed { .. } => 500,
        ResolveError::Repository(repo) => repository_error_to_status_code(repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{RepositoryError, StoreKind};

    #[test]
    fn test_validation_errors_map_to_400() {
        for err in [
            ResolveError::MissingFields(vec!["imagen"]),
            ResolveError::InvalidDatabase,
            ResolveError::NothingToUpdate,
            ResolveError::InvalidBody("expected object".to_string()),
            ResolveError::InvalidIdentifier("xyz".to_string()),
        ] {
            assert_eq!(resolve_error_to_status_code(&err), 400, "{err:?}");
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ResolveError::not_found(StoreKind::Relational, 9);
        assert_eq!(resolve_error_to_status_code(&err), 404);
    }

    #[test]
    fn test_unconfirmed_delete_maps_to_500() {
        let err = ResolveError::DeleteNotConfirmed {
            store: StoreKind::Relational,
            key: "9".to_string(),
        };
        assert_eq!(resolve_error_to_status_code(&err), 500);
    }

    #[test]
    fn test_repository_errors_delegate() {
        let err = ResolveError::from(RepositoryError::Timeout("probe".to_string()));
        assert_eq!(resolve_error_to_status_code(&err), 504);

        let err = ResolveError::from(RepositoryError::ConnectionFailed("down".to_string()));
        assert_eq!(resolve_error_to_status_code(&err), 503);
    }
}
