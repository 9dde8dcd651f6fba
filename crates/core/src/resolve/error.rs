use thiserror::Error;

use crate::storage::{RepositoryError, StoreKind};

/// Errors produced while resolving a request against the two stores.
///
/// Display strings are the user-facing messages returned in error bodies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Faltan campos requeridos: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Debe especificar una base de datos válida (mongo o sql)")]
    InvalidDatabase,
    #[error("Debe proporcionar al menos un campo válido para actualizar")]
    NothingToUpdate,
    #[error("Cuerpo de la petición inválido: {0}")]
    InvalidBody(String),
    #[error("ID no válido para ninguna base de datos: {0}")]
    InvalidIdentifier(String),
    #[error("Personaje no encontrado{}", store_suffix(.store))]
    NotFound {
        store: Option<StoreKind>,
        key: String,
    },
    #[error("El personaje {key} sigue presente en {store} después de eliminarlo")]
    DeleteNotConfirmed { store: StoreKind, key: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ResolveError {
    pub fn not_found(store: StoreKind, key: impl ToString) -> Self {
        Self::NotFound {
            store: Some(store),
            key: key.to_string(),
        }
    }

    pub fn not_found_anywhere(key: impl ToString) -> Self {
        Self::NotFound {
            store: None,
            key: key.to_string(),
        }
    }

    /// The store the error concerns, if it concerns exactly one.
    pub fn store(&self) -> Option<StoreKind> {
        match self {
            ResolveError::NotFound { store, .. } => *store,
            ResolveError::DeleteNotConfirmed { store, .. } => Some(*store),
            _ => None,
        }
    }
}

fn store_suffix(store: &Option<StoreKind>) -> String {
    match store {
        Some(store) => format!(" en {store}"),
        None => " en ninguna base de datos".to_string(),
    }
}
