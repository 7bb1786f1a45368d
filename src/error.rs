//! Errores del resaltador

use std::path::PathBuf;

use thiserror::Error;

/// Errores de la biblioteca
#[derive(Debug, Error)]
pub enum Error {
    /// Un desplazamiento de palabra cae fuera del texto (texto y documento desincronizados)
    #[error("desplazamiento {offset} fuera del texto (longitud {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("error de E/S en '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("el documento está bloqueado; desbloquéalo para editar")]
    DocumentLocked,

    #[error("el documento no está bloqueado; bloquéalo para resaltar")]
    DocumentUnlocked,

    #[error("límite de {limit} búsquedas alcanzado")]
    TooManyQueries { limit: usize },

    #[error("no existe la búsqueda {0}")]
    QueryNotFound(usize),

    #[error("color no válido: {0}")]
    InvalidColor(String),

    #[error("ámbito no válido: {0}")]
    InvalidScope(String),

    #[error("formato no válido: {0}")]
    InvalidFormat(String),

    #[error("archivo de búsquedas '{}' mal formado: {source}", path.display())]
    QueryFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
