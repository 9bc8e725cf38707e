//! Error types for Trotter error calculations

use crate::term::Term;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or expanding a Hamiltonian
#[derive(Debug, Error)]
pub enum TrotterError {
    /// A term was requested that was never inserted into the map.
    ///
    /// This means the enumeration order and the ingested terms disagree,
    /// so the computation must stop instead of assuming a zero coefficient.
    #[error("Term {term} is not present in the coefficient map")]
    MissingTerm { term: Term },

    /// The integral file could not be opened or read
    #[error("Unable to read integral file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the result listing failed
    #[error("Failed to write results")]
    Output {
        #[from]
        source: std::io::Error,
    },

    /// Serializing the results to JSON failed
    #[error("Failed to serialize results to JSON")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for Trotter error operations
pub type Result<T> = std::result::Result<T, TrotterError>;
