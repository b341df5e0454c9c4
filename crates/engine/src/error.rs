//! Engine error types

use thiserror::Error;

/// Errors that can occur while ingesting or predicting.
///
/// The display strings are part of the wire contract: they are returned
/// verbatim in the `error` field of 400 responses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Upload payload's `data` field was not a list of records
    #[error("Data must be a list")]
    InvalidInput,

    /// The offers collection is empty; there is no basis for an estimate
    #[error("No historical offer data available")]
    InsufficientData,
}
