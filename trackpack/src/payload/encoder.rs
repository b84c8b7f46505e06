//! Payload encoding, one slot at a time in wire order.

use tracing::debug;

use crate::fixed;
use crate::leb128::Leb128;

use super::verify::verify_round_trip;
use super::{
    BaseNSlot, EncodeError, Encodable, Field, TrackIds, AMAZON_ALBUM_SLOT, AMAZON_TRACK_SLOT,
    EXPLICIT_FLAG, SPOTIFY_SLOT, YOUTUBE_SLOT,
};

impl Encodable for TrackIds {
    /// Encodes the identifiers, then decodes the result and checks it
    /// against the canonical form of the input before handing it out.
    ///
    /// ## Errors
    /// * `TooLong` / `ExplicitBitCollision` - an identifier does not fit its slot
    /// * `InvalidNumeral` / `InvalidDecimal` / `DecimalOutOfRange` - malformed identifier
    /// * `RoundTrip` - the encoder and decoder disagree (codec defect)
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let payload = encode_unverified(self)?;
        verify_round_trip(self, &payload)?;

        debug!(
            payload_len = payload.len(),
            explicit = self.explicit,
            "encoded track payload"
        );

        Ok(payload)
    }
}

/// Builds the payload without checking it. Only [`Encodable::encode`]
/// may hand its output out.
fn encode_unverified(ids: &TrackIds) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::with_capacity(super::MAX_PAYLOAD_LEN);

    // The explicit flag shares byte 0 with the Amazon album slot.
    let album_start = bytes.len();
    encode_basen_into(&AMAZON_ALBUM_SLOT, &ids.amazon_album, &mut bytes)?;
    if bytes[album_start] & EXPLICIT_FLAG != 0 {
        return Err(EncodeError::ExplicitBitCollision);
    }
    if ids.explicit {
        bytes[album_start] |= EXPLICIT_FLAG;
    }

    encode_basen_into(&AMAZON_TRACK_SLOT, &ids.amazon_track, &mut bytes)?;

    // The track ID is usually close to its album ID, so it is stored as a
    // signed delta from it.
    let apple_album = parse_decimal(Field::AppleAlbum, &ids.apple_album)?;
    let apple_track = parse_decimal(Field::AppleTrack, &ids.apple_track)?;
    Leb128::encode_into(apple_album, &mut bytes);
    Leb128::encode_signed_into(apple_delta(apple_album, apple_track), &mut bytes);

    encode_basen_into(&SPOTIFY_SLOT, &ids.spotify, &mut bytes)?;
    encode_basen_into(&YOUTUBE_SLOT, &ids.youtube, &mut bytes)?;

    Ok(bytes)
}

/// Parses `id` in the slot's alphabet and appends it as a zero-padded
/// big-endian integer of the slot's width. An empty `id` is zero.
fn encode_basen_into(slot: &BaseNSlot, id: &str, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
    let value = slot
        .alphabet
        .decode(id)
        .map_err(|source| EncodeError::InvalidNumeral { field: slot.field, source })?;

    fixed::encode_into(&value, slot.width, bytes).map_err(|_| EncodeError::TooLong {
        field: slot.field,
        width: slot.width,
    })
}

/// Parses an Apple ID as a non-negative decimal number; empty is zero.
///
/// Only ASCII digits are accepted, so signs and whitespace are rejected.
pub(super) fn parse_decimal(field: Field, id: &str) -> Result<u64, EncodeError> {
    if id.is_empty() {
        return Ok(0);
    }

    if !id.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(EncodeError::InvalidDecimal { field, value: id.to_string() });
    }

    id.parse::<u64>()
        .map_err(|_| EncodeError::DecimalOutOfRange { field, value: id.to_string() })
}

/// Signed distance from the album ID to the track ID.
///
/// The subtraction wraps in 64-bit two's complement, and the decoder adds
/// the delta back with the same wrapping, so every pair of `u64` IDs is
/// reproduced exactly. For IDs below 2^63 this is ordinary subtraction.
pub(super) fn apple_delta(album: u64, track: u64) -> i64 {
    track.wrapping_sub(album) as i64
}
