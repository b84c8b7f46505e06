//! Top-level error type for the trackpack library
//!

use crate::payload::{DecodeError, EncodeError, Field};

/// Errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A track's identifiers could not be packed.
    #[error("could not encode track payload: {0}")]
    Encode(#[from] EncodeError),
    /// A scanned payload could not be unpacked.
    #[error("could not decode track payload: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// The payload field the error is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Encode(error) => error.field(),
            Error::Decode(error) => error.field(),
        }
    }

    /// Whether the error reveals a bug in the codec rather than bad input.
    ///
    /// Input problems (identifiers too long or malformed, truncated or
    /// malformed payloads) concern a single record and can be skipped. A
    /// codec defect means every payload is suspect and a batch run should
    /// stop.
    pub fn is_codec_defect(&self) -> bool {
        match self {
            Error::Encode(error) => error.is_codec_defect(),
            Error::Decode(_) => false,
        }
    }
}
