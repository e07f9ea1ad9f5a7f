//! Error taxonomy
//!
//! All inputs are caller-controlled and deterministic, so nothing is retried
//! internally; failures propagate to the caller, tagged with the offending
//! collision record index where one exists.

use std::fmt;

use crate::geom::Wall;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Non-positive arena dimensions, or a heading at a vertical asymptote
    /// (90°/270°) handed to an intersection routine that cannot hold it.
    InvalidGeometry { reason: String },
    /// The requested wall sequence is not realizable between the given start
    /// and end points; the forward simulation from the solved heading struck
    /// different walls than requested.
    UnreachableBounceSequence {
        /// Collision record being built, if known
        record: Option<usize>,
        requested: Vec<Wall>,
        actual: Vec<Wall>,
    },
    /// Unknown or out-of-range style/timing option
    InvalidConfiguration { reason: String },
}

impl Error {
    pub fn geometry(reason: impl Into<String>) -> Self {
        Error::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Attach the collision record index this error surfaced in
    pub fn tag_record(self, index: usize) -> Self {
        match self {
            Error::UnreachableBounceSequence {
                requested, actual, ..
            } => Error::UnreachableBounceSequence {
                record: Some(index),
                requested,
                actual,
            },
            Error::InvalidGeometry { reason } => Error::InvalidGeometry {
                reason: format!("record {index}: {reason}"),
            },
            Error::InvalidConfiguration { reason } => Error::InvalidConfiguration {
                reason: format!("record {index}: {reason}"),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Error::UnreachableBounceSequence {
                record,
                requested,
                actual,
            } => {
                if let Some(i) = record {
                    write!(f, "record {i}: ")?;
                }
                write!(
                    f,
                    "unreachable bounce sequence: requested {requested:?}, simulation struck {actual:?}"
                )
            }
            Error::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}
