use thiserror::Error;

use crate::base::family::Family;

/// Errors surfaced by the resolution adapter.
///
/// Engine failures are reported, never retried; retry and timeout policy
/// belongs to the resolver engine.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DnsError {
    /// Record-type string not in the supported set. Raised before any
    /// engine call is made.
    #[error("unsupported DNS record type {0:?}")]
    UnsupportedRecordType(String),

    /// The resolver engine completed the query with a non-zero error
    /// code. `message` is the engine's own description of that code.
    #[error("resolver engine error {code}: {message} while resolving {host}")]
    Engine {
        code: i32,
        message: String,
        host: String,
    },

    /// An answer's inferred family conflicts with the family the caller
    /// requested. Fails the whole call; no partial result is produced.
    #[error("requested address family {requested} but {address} is {actual}")]
    FamilyMismatch {
        requested: Family,
        actual: Family,
        address: String,
    },

    /// The engine dropped the completion callback without invoking it.
    /// Violates the engine's one-shot contract; surfaced instead of
    /// suspending forever.
    #[error("resolution of {0} abandoned before completion")]
    Canceled(String),
}
