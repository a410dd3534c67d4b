//! Error types for facet classification.
//!
//! This module provides the [`FacetError`] type for all fallible library
//! operations and the [`Result`] convenience type. The classification engines
//! themselves never fail; errors arise only on the construction side, when
//! building records from raw bytes or parsing field selector specs.

use thiserror::Error;

/// Error type for all fallible library operations.
///
/// Classification itself is total; these variants cover malformed inputs to
/// the construction APIs.
#[derive(Error, Debug)]
pub enum FacetError {
    /// Error indicating an invalid leader (24-byte header).
    #[error("Invalid leader: {0}")]
    InvalidLeader(String),

    /// Error indicating a malformed field selector spec (e.g. `"952e:050ab"`).
    #[error("Invalid field spec: {0}")]
    InvalidFieldSpec(String),
}

/// Convenience type alias for [`std::result::Result`] with [`FacetError`].
pub type Result<T> = std::result::Result<T, FacetError>;
