//! Error types for coalres

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    /// The input or ordering file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid syntax in the clause or ordering file. The offset is the
    /// zero-based byte position at which parsing halted.
    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// The input parsed but contained no clauses.
    #[error("no clauses were parsed")]
    NoClauses,
}

pub type Result<T> = std::result::Result<T, ProverError>;
