//! # Track Payload Codec
//!
//! Packs one track's platform identifiers and explicit flag into the
//! payload carried by a card's QR symbol. The encoder runs offline in the
//! asset pipeline and the decoder runs in the scanner; the two only agree
//! through the byte layout below, so it is the contract.
//!
//! ## Format
//!
//! | Offset   | Length | Content                                            |
//! |----------|--------|----------------------------------------------------|
//! | 0        | 7      | Amazon album ASIN (Base36, big-endian); bit 7 of byte 0 is the explicit flag |
//! | 7        | 7      | Amazon track ASIN (Base36, big-endian)             |
//! | 14       | 1-10   | Apple album ID (unsigned LEB128)                   |
//! | variable | 1-10   | Apple track ID minus album ID (zig-zag LEB128)     |
//! | variable | 17     | Spotify track ID (Base62, big-endian)              |
//! | variable | 9      | YouTube video ID (Base64url, big-endian)           |
//!
//! There is no header, tag or version byte. Fixed slots are zero-padded on
//! the left and an absent identifier is an all-zero slot (or a zero varint).
//! Decoding a zero slot yields an empty string, while non-zero BaseN slots
//! decode left-padded with the alphabet's zero symbol to the identifier's
//! canonical length.
//!
//! Every successful [`Encodable::encode`] has already decoded its own output
//! and compared it with the input, see [`RoundTripError`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::{self, Alphabet, BASE36, BASE62, BASE64_URL};
use crate::leb128::{self, Leb128};

mod decoder;
mod encoder;
mod verify;


pub use verify::RoundTripError;

/// Bit of byte 0 carrying the explicit-content flag. The remaining bits
/// of the byte belong to the Amazon album slot.
pub const EXPLICIT_FLAG: u8 = 0b1000_0000;

/// Size in bytes of each Amazon slot. A 10-character Base36 ASIN needs at
/// most 52 bits, leaving the top bit free for the explicit flag.
pub const AMAZON_SLOT_WIDTH: usize = 7;

/// Size in bytes of the Spotify slot (22 Base62 characters need 131 bits).
pub const SPOTIFY_SLOT_WIDTH: usize = 17;

/// Size in bytes of the YouTube slot (11 Base64url characters need 66 bits).
pub const YOUTUBE_SLOT_WIDTH: usize = 9;

/// Canonical length of an Amazon ASIN.
pub const AMAZON_ID_LEN: usize = 10;

/// Canonical length of a Spotify track ID.
pub const SPOTIFY_ID_LEN: usize = 22;

/// Canonical length of a YouTube video ID.
pub const YOUTUBE_ID_LEN: usize = 11;

/// Size of a payload with both Apple identifiers absent.
pub const MIN_PAYLOAD_LEN: usize =
    2 * AMAZON_SLOT_WIDTH + 2 + SPOTIFY_SLOT_WIDTH + YOUTUBE_SLOT_WIDTH;

/// Size of a payload with both Apple varints at their longest.
pub const MAX_PAYLOAD_LEN: usize =
    2 * AMAZON_SLOT_WIDTH + 2 * leb128::MAX_BYTES + SPOTIFY_SLOT_WIDTH + YOUTUBE_SLOT_WIDTH;

/// The logical fields of a payload, used to scope errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The explicit-content flag.
    Explicit,
    /// Amazon Music album ASIN.
    AmazonAlbum,
    /// Amazon Music track ASIN.
    AmazonTrack,
    /// Apple Music album ID.
    AppleAlbum,
    /// Apple Music track ID.
    AppleTrack,
    /// Spotify track ID.
    Spotify,
    /// YouTube Music video ID.
    YouTube,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Explicit => "explicit flag",
            Field::AmazonAlbum => "Amazon album",
            Field::AmazonTrack => "Amazon track",
            Field::AppleAlbum => "Apple album",
            Field::AppleTrack => "Apple track",
            Field::Spotify => "Spotify",
            Field::YouTube => "YouTube",
        };
        f.write_str(name)
    }
}

/// A fixed-width slot holding a BaseN identifier.
#[derive(Debug, Clone, Copy)]
pub struct BaseNSlot {
    /// The field stored in the slot.
    pub field: Field,
    /// Alphabet the identifier is written in.
    pub alphabet: Alphabet,
    /// Width of the slot in bytes.
    pub width: usize,
    /// Canonical identifier length, restored by padding on decode.
    pub id_len: usize,
}

impl BaseNSlot {
    /// Canonical form of `id` as the decoder will reproduce it: empty if
    /// its value is zero, otherwise stripped of leading zero symbols and
    /// re-padded to the canonical length.
    pub fn canonicalize(&self, id: &str) -> String {
        let zero = self.alphabet.zero_symbol();
        let significant = id.trim_start_matches(zero);
        if significant.is_empty() {
            return String::new();
        }
        alphabet::pad_left(significant, self.id_len, zero)
    }
}

/// Slot layout of the Amazon album ASIN.
pub const AMAZON_ALBUM_SLOT: BaseNSlot = BaseNSlot {
    field: Field::AmazonAlbum,
    alphabet: BASE36,
    width: AMAZON_SLOT_WIDTH,
    id_len: AMAZON_ID_LEN,
};

/// Slot layout of the Amazon track ASIN.
pub const AMAZON_TRACK_SLOT: BaseNSlot = BaseNSlot {
    field: Field::AmazonTrack,
    alphabet: BASE36,
    width: AMAZON_SLOT_WIDTH,
    id_len: AMAZON_ID_LEN,
};

/// Slot layout of the Spotify track ID.
pub const SPOTIFY_SLOT: BaseNSlot = BaseNSlot {
    field: Field::Spotify,
    alphabet: BASE62,
    width: SPOTIFY_SLOT_WIDTH,
    id_len: SPOTIFY_ID_LEN,
};

/// Slot layout of the YouTube video ID.
pub const YOUTUBE_SLOT: BaseNSlot = BaseNSlot {
    field: Field::YouTube,
    alphabet: BASE64_URL,
    width: YOUTUBE_SLOT_WIDTH,
    id_len: YOUTUBE_ID_LEN,
};

/// The identifiers of one track on every supported platform.
///
/// An empty string means the track is not available on that platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackIds {
    /// Whether the track is flagged as explicit content.
    pub explicit: bool,
    /// Amazon Music album ASIN (Base36).
    pub amazon_album: String,
    /// Amazon Music track ASIN (Base36).
    pub amazon_track: String,
    /// Apple Music album ID (decimal).
    pub apple_album: String,
    /// Apple Music track ID (decimal).
    pub apple_track: String,
    /// Spotify track ID (Base62).
    pub spotify: String,
    /// YouTube Music video ID (Base64url).
    pub youtube: String,
}

impl TrackIds {
    /// The identifiers as the decoder reproduces them from an encoding of
    /// `self`: BaseN identifiers canonicalized per [`BaseNSlot::canonicalize`]
    /// and Apple IDs without leading zeros, with zero meaning absent.
    pub fn canonical(&self) -> TrackIds {
        TrackIds {
            explicit: self.explicit,
            amazon_album: AMAZON_ALBUM_SLOT.canonicalize(&self.amazon_album),
            amazon_track: AMAZON_TRACK_SLOT.canonicalize(&self.amazon_track),
            apple_album: canonical_decimal(&self.apple_album),
            apple_track: canonical_decimal(&self.apple_track),
            spotify: SPOTIFY_SLOT.canonicalize(&self.spotify),
            youtube: YOUTUBE_SLOT.canonicalize(&self.youtube),
        }
    }

    /// Exact size of the payload `self` encodes to, computed without
    /// encoding.
    pub fn encoded_len(&self) -> Result<usize, EncodeError> {
        let album = encoder::parse_decimal(Field::AppleAlbum, &self.apple_album)?;
        let track = encoder::parse_decimal(Field::AppleTrack, &self.apple_track)?;

        Ok(2 * AMAZON_SLOT_WIDTH
            + Leb128::calculate_size(album)
            + Leb128::calculate_signed_size(encoder::apple_delta(album, track))
            + SPOTIFY_SLOT_WIDTH
            + YOUTUBE_SLOT_WIDTH)
    }

    /// Decodes `bytes` like [`Decodable::decode`], additionally rejecting
    /// bytes after the YouTube slot.
    pub fn decode_strict(bytes: &[u8]) -> Result<Self, DecodeError> {
        decoder::decode_payload(bytes, true)
    }
}

fn canonical_decimal(id: &str) -> String {
    id.trim_start_matches('0').to_string()
}

/// Trait for types that can be packed into a payload.
pub trait Encodable {
    /// Encodes the implementing type into a payload, verified to decode
    /// back to the canonical form of its input.
    fn encode(&self) -> Result<Vec<u8>, EncodeError>;
}

/// Trait for types that can be unpacked from a payload.
pub trait Decodable: Sized {
    /// Decodes an instance from a payload.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Errors that can occur while encoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The identifier's value needs more bytes than its slot.
    #[error("{field} id is too long for its {width}-byte slot")]
    TooLong {
        /// The offending field.
        field: Field,
        /// Width of the slot in bytes.
        width: usize,
    },

    /// The Amazon album value reaches into the explicit-flag bit.
    #[error("Amazon album id overlaps the explicit flag bit")]
    ExplicitBitCollision,

    /// The identifier contains a character outside its alphabet.
    #[error("invalid {field} id: {source}")]
    InvalidNumeral {
        /// The offending field.
        field: Field,
        /// Details of the invalid character.
        #[source]
        source: alphabet::Error,
    },

    /// An Apple ID is not a plain decimal number.
    #[error("invalid {field} id {value:?}: expected a decimal number")]
    InvalidDecimal {
        /// The offending field.
        field: Field,
        /// The rejected input.
        value: String,
    },

    /// An Apple ID is a decimal number beyond 64 bits.
    #[error("{field} id {value} does not fit in 64 bits")]
    DecimalOutOfRange {
        /// The offending field.
        field: Field,
        /// The rejected input.
        value: String,
    },

    /// The freshly encoded payload did not decode back to its input. This
    /// is a codec defect, not a data problem.
    #[error("round-trip verification failed: {0}")]
    RoundTrip(#[from] RoundTripError),
}

impl EncodeError {
    /// The field the error is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            EncodeError::TooLong { field, .. }
            | EncodeError::InvalidNumeral { field, .. }
            | EncodeError::InvalidDecimal { field, .. }
            | EncodeError::DecimalOutOfRange { field, .. } => Some(*field),
            EncodeError::ExplicitBitCollision => Some(Field::AmazonAlbum),
            EncodeError::RoundTrip(error) => error.field(),
        }
    }

    /// Whether the error reveals a bug in the codec rather than bad input.
    /// Batch runs should stop on these instead of skipping the record.
    pub fn is_codec_defect(&self) -> bool {
        matches!(self, EncodeError::RoundTrip(_))
    }
}

/// Errors that can occur while decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ended before the field was complete.
    #[error("short data: {field} field needs {needed} bytes, {remaining} remaining")]
    ShortData {
        /// The field being read.
        field: Field,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A varint field could not be decoded.
    #[error("malformed varint in {field} field: {source}")]
    MalformedVarint {
        /// The field being read.
        field: Field,
        /// The LEB128 decoding failure.
        #[source]
        source: leb128::Error,
    },

    /// Strict decoding found bytes after the last field.
    #[error("{0} trailing bytes after the YouTube field")]
    TrailingBytes(usize),
}

impl DecodeError {
    /// The field the error is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            DecodeError::ShortData { field, .. } | DecodeError::MalformedVarint { field, .. } => {
                Some(*field)
            }
            DecodeError::TrailingBytes(_) => None,
        }
    }
}
