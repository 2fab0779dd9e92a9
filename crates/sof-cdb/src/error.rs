//! Error types for sof-cdb

use thiserror::Error;

use crate::source::SourceError;

pub type Result<T> = std::result::Result<T, CdbError>;

#[derive(Error, Debug)]
pub enum CdbError {
    /// A point lookup missed and the caller supplied no default.
    #[error("{table} entry not found for {lookup}")]
    NotFound {
        table: &'static str,
        lookup: String,
    },

    /// An enumerated code in a record has no known mapping. The load that
    /// hit it is aborted before any table state changes.
    #[error("unknown {table} load type code {code} for element {element}")]
    UnknownLoadType {
        table: &'static str,
        code: u32,
        element: u32,
    },

    /// A record payload is shorter than its static schema.
    #[error("{table} record is truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The record source signalled a failure mid-fetch. Never retried.
    #[error("record source failed on key {key}/{subkey}")]
    Source {
        key: u16,
        subkey: u32,
        #[source]
        source: SourceError,
    },

    /// Opening the database handle failed.
    #[error("failed to open the cdb")]
    Open(#[source] SourceError),

    /// An operation that needs the database was invoked while it is closed.
    #[error("cdb is not open")]
    NotOpen,
}
