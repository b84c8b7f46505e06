//! Payloads pinned byte for byte. Cards already printed carry these bytes,
//! so any change here breaks scanning in the field.

use assert_matches::assert_matches;
use more_asserts::assert_ge;
use test_case::test_case;

use trackpack::payload::{
    Decodable, DecodeError, Encodable, Field, TrackIds, MAX_PAYLOAD_LEN, MIN_PAYLOAD_LEN,
};

const KNOWN_TRACK_EXPLICIT: &str = "83f80cf88e071a03f80cf88e071bb5fd86af05480097c6abc29b25b083eceee3fe7fba0dad01d430e30f56817710";
const KNOWN_TRACK_CLEAN: &str = "03f80cf88e071a03f80cf88e071bb5fd86af05480097c6abc29b25b083eceee3fe7fba0dad01d430e30f56817710";
const APPLE_ONLY_NEGATIVE_DELTA: &str = "0000000000000000000000000000c4c407070000000000000000000000000000000000000000000000000000";

fn known_track(explicit: bool) -> TrackIds {
    TrackIds::from_combined(
        explicit,
        "B000002UJE:B000002UJF",
        "1440857781:1440857817",
        "4cOdK2wGLETKBW3PvgPWqT",
        "dQw4w9WgXcQ",
    )
}

#[test_case(true, KNOWN_TRACK_EXPLICIT; "explicit")]
#[test_case(false, KNOWN_TRACK_CLEAN; "clean")]
fn known_track_payload(explicit: bool, golden: &str) {
    let ids = known_track(explicit);
    let payload = ids.encode().unwrap();

    assert_eq!(hex::encode(&payload), golden);
    assert_eq!(TrackIds::decode(&hex::decode(golden).unwrap()).unwrap(), ids);
}

#[test]
fn empty_track_is_all_zero_minimum_payload() {
    let payload = TrackIds::default().encode().unwrap();

    assert_eq!(payload, vec![0u8; MIN_PAYLOAD_LEN]);
    assert_eq!(TrackIds::decode(&payload).unwrap(), TrackIds::default());
}

#[test]
fn apple_track_before_album() {
    let ids = TrackIds::from_combined(false, "", "123460:123456", "", "");
    let payload = ids.encode().unwrap();

    assert_eq!(hex::encode(&payload), APPLE_ONLY_NEGATIVE_DELTA);
    assert_eq!(TrackIds::decode(&payload).unwrap(), ids);
}

#[test]
fn largest_payload_fits_the_bound() {
    let ids = TrackIds::from_combined(
        true,
        "ZZZZZZZZZZ:ZZZZZZZZZZ",
        &format!("{}:1", u64::MAX),
        &"z".repeat(22),
        &"_".repeat(11),
    );
    let payload = ids.encode().unwrap();

    assert_ge!(MAX_PAYLOAD_LEN, payload.len());
    assert_eq!(TrackIds::decode(&payload).unwrap(), ids);
}

#[test]
fn trailing_bytes_only_fail_strict_decoding() {
    let mut payload = hex::decode(KNOWN_TRACK_EXPLICIT).unwrap();
    payload.extend_from_slice(&[0xde, 0xad]);

    assert_eq!(TrackIds::decode(&payload).unwrap(), known_track(true));
    assert_eq!(TrackIds::decode_strict(&payload), Err(DecodeError::TrailingBytes(2)));
}

#[test]
fn every_truncation_is_rejected() {
    let payload = hex::decode(KNOWN_TRACK_EXPLICIT).unwrap();

    for len in 0..payload.len() {
        let error = TrackIds::decode(&payload[..len]).unwrap_err();
        assert_ne!(error.field(), Some(Field::Explicit));
        assert_ne!(error.field(), None);
    }
}

#[test]
fn unterminated_apple_varint() {
    let mut payload = vec![0u8; 14];
    payload.extend_from_slice(&[0xff; 10]);

    assert_matches!(
        TrackIds::decode(&payload),
        Err(DecodeError::MalformedVarint { field: Field::AppleAlbum, .. })
    );
}
