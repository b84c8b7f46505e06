//! Round-trip verification of freshly encoded payloads.
//!
//! The encoder and the scanner's decoder share no code or types, only the
//! byte layout. Decoding every payload right after building it and
//! comparing field by field catches alphabet or width mistakes before a
//! card is printed.

use tracing::error;

use super::{decoder, DecodeError, Field, TrackIds};

/// The encoder produced a payload that does not decode to its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundTripError {
    /// The payload could not be decoded at all.
    #[error("payload does not decode: {0}")]
    Decode(#[source] DecodeError),

    /// A field decoded to something other than the canonical input.
    #[error("{field} mismatch: got {actual:?}, want {expected:?}")]
    Mismatch {
        /// The field that differs.
        field: Field,
        /// The canonical form of the input.
        expected: String,
        /// What the payload decoded to.
        actual: String,
    },
}

impl RoundTripError {
    /// The field the mismatch is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            RoundTripError::Decode(error) => error.field(),
            RoundTripError::Mismatch { field, .. } => Some(*field),
        }
    }
}

/// Decodes `payload` and checks every field against the canonical form of
/// `ids`.
pub(super) fn verify_round_trip(ids: &TrackIds, payload: &[u8]) -> Result<(), RoundTripError> {
    let decoded = decoder::decode_payload(payload, true).map_err(|source| {
        error!(%source, "freshly encoded payload does not decode");
        RoundTripError::Decode(source)
    })?;

    let expected = ids.canonical();

    let fields = [
        (Field::Explicit, expected.explicit.to_string(), decoded.explicit.to_string()),
        (Field::AmazonAlbum, expected.amazon_album, decoded.amazon_album),
        (Field::AmazonTrack, expected.amazon_track, decoded.amazon_track),
        (Field::AppleAlbum, expected.apple_album, decoded.apple_album),
        (Field::AppleTrack, expected.apple_track, decoded.apple_track),
        (Field::Spotify, expected.spotify, decoded.spotify),
        (Field::YouTube, expected.youtube, decoded.youtube),
    ];

    for (field, expected, actual) in fields {
        if expected != actual {
            error!(%field, %expected, %actual, "payload round-trip mismatch");
            return Err(RoundTripError::Mismatch { field, expected, actual });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_log::test;

    use crate::payload::{Encodable, EXPLICIT_FLAG, MIN_PAYLOAD_LEN};

    fn sample() -> TrackIds {
        TrackIds {
            explicit: false,
            amazon_album: "B000002UJE".into(),
            amazon_track: "B000002UJF".into(),
            apple_album: "123456".into(),
            apple_track: "123460".into(),
            spotify: "4cOdK2wGLETKBW3PvgPWqT".into(),
            youtube: "dQw4w9WgXcQ".into(),
        }
    }

    #[test]
    fn encoded_payload_verifies() {
        let ids = sample();
        let payload = ids.encode().unwrap();
        verify_round_trip(&ids, &payload).unwrap();
    }

    #[test]
    fn flipped_explicit_bit_is_caught() {
        let ids = sample();
        let mut payload = ids.encode().unwrap();
        payload[0] ^= EXPLICIT_FLAG;

        assert_matches!(
            verify_round_trip(&ids, &payload),
            Err(RoundTripError::Mismatch { field: Field::Explicit, .. })
        );
    }

    #[test]
    fn corrupted_slot_is_caught() {
        let ids = sample();
        let mut payload = ids.encode().unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0x01;

        let error = verify_round_trip(&ids, &payload).unwrap_err();
        assert_matches!(
            &error,
            RoundTripError::Mismatch { field: Field::YouTube, expected, .. } if expected == "dQw4w9WgXcQ"
        );
        assert_eq!(error.field(), Some(Field::YouTube));
    }

    #[test]
    fn truncated_payload_is_caught() {
        let ids = TrackIds::default();
        let payload = [0u8; MIN_PAYLOAD_LEN - 1];

        assert_matches!(
            verify_round_trip(&ids, &payload),
            Err(RoundTripError::Decode(DecodeError::ShortData { field: Field::YouTube, .. }))
        );
    }

    #[test]
    fn extra_bytes_are_caught() {
        let ids = TrackIds::default();
        let payload = [0u8; MIN_PAYLOAD_LEN + 1];

        assert_matches!(
            verify_round_trip(&ids, &payload),
            Err(RoundTripError::Decode(DecodeError::TrailingBytes(1)))
        );
    }
}
