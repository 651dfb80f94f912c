//! Error types shared across the crate.
//!
//! Codec failures, constructor validation, fee arithmetic and key parsing
//! each have their own enum; [`Error`] wraps them all so that `sign`,
//! `from_bytes` and the fee functions return one type. Nothing in here is
//! fatal to the process. Every error is scoped to the single call that
//! produced it.

use std::fmt;

use thiserror::Error;

use crate::codec::CodecError;
use crate::crypto::KeyError;
use crate::fees::FeeError;

/// Which registry a type tag was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Action,
    Auth,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Auth => write!(f, "auth"),
        }
    }
}

/// A constructed action violated one of its declared constraints.
///
/// Raised at construction time and again at decode time, since decoding
/// funnels every payload back through its constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} has length {len}, expected {min}..={max}")]
    FieldLength {
        field: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    /// A required id or address was left as the all-zero value.
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("decimals {decimals} exceeds maximum {max}")]
    InvalidDecimals { decimals: u8, max: u8 },

    #[error("unknown asset type {0}")]
    InvalidAssetType(u8),

    /// A field that only makes sense for another asset type was set.
    #[error("{field} is not allowed for {asset_type} assets")]
    AssetTypeMismatch {
        field: &'static str,
        asset_type: &'static str,
    },

    #[error("update does not change any field")]
    NothingToUpdate,

    #[error("transaction carries {count} actions, maximum is {max}")]
    TooManyActions { count: usize, max: usize },
}

/// The crate-wide error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("timestamp {0} is not a whole number of seconds")]
    MisalignedTimestamp(i64),

    #[error("no {kind} registered for type tag {tag}")]
    UnknownTypeTag { kind: TagKind, tag: u8 },

    #[error("{kind} type tag {tag} is already registered")]
    DuplicateTypeTag { kind: TagKind, tag: u8 },

    #[error("transaction must carry at least one action")]
    NoActions,

    #[error("{remaining} unexpected bytes after transaction")]
    TrailingBytes { remaining: usize },

    #[error("transaction is unsigned")]
    Unsigned,

    #[error("transaction is already signed")]
    AlreadySigned,

    #[error("timestamp {timestamp} is before {now}")]
    Expired { timestamp: i64, now: i64 },

    #[error("timestamp {timestamp} is more than {window}ms after {now}")]
    FutureTimestamp { timestamp: i64, now: i64, window: i64 },

    #[error("signature does not verify against the transaction digest")]
    InvalidSignature,

    #[error("invalid genesis: {0}")]
    Config(#[source] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    /// A decode step failed. `step` says which one.
    #[error("failed to decode {step}: {source}")]
    Decode {
        step: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn decode(step: impl Into<String>, source: Error) -> Self {
        Self::Decode {
            step: step.into(),
            source: Box::new(source),
        }
    }

    /// Strips `Decode` context wrappers and returns the underlying failure.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Self::Decode { source, .. } = err {
            err = source;
        }
        err
    }
}
