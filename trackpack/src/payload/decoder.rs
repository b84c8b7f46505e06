//! Payload decoding, mirroring the encoder slot by slot with a running
//! cursor.

use std::io::Cursor;

use crate::fixed;
use crate::leb128::{self, ReadLeb128};

use super::{
    BaseNSlot, DecodeError, Decodable, Field, TrackIds, AMAZON_ALBUM_SLOT, AMAZON_TRACK_SLOT,
    EXPLICIT_FLAG, SPOTIFY_SLOT, YOUTUBE_SLOT,
};

impl Decodable for TrackIds {
    /// Decodes a scanned payload. Bytes after the YouTube slot are
    /// ignored; use [`TrackIds::decode_strict`] to reject them.
    ///
    /// ## Errors
    /// * `ShortData` - the buffer ends inside a field
    /// * `MalformedVarint` - an Apple varint never terminates or overflows
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_payload(bytes, false)
    }
}

pub(super) fn decode_payload(bytes: &[u8], strict: bool) -> Result<TrackIds, DecodeError> {
    let mut cursor = Cursor::new(bytes);

    // Byte 0 carries the explicit flag on top of the Amazon album slot.
    let mut album_slot = read_slot(&mut cursor, AMAZON_ALBUM_SLOT.field, AMAZON_ALBUM_SLOT.width)?
        .to_vec();
    let explicit = album_slot[0] & EXPLICIT_FLAG != 0;
    album_slot[0] &= !EXPLICIT_FLAG;
    let amazon_album = basen_from_slot(&AMAZON_ALBUM_SLOT, &album_slot);

    let amazon_track = read_basen(&mut cursor, &AMAZON_TRACK_SLOT)?;

    let apple_album = read_varint(&mut cursor, Field::AppleAlbum, |c| c.read_leb128())?;
    let delta = read_varint(&mut cursor, Field::AppleTrack, |c| c.read_signed_leb128())?;
    let apple_track = apple_album.wrapping_add(delta as u64);

    let spotify = read_basen(&mut cursor, &SPOTIFY_SLOT)?;
    let youtube = read_basen(&mut cursor, &YOUTUBE_SLOT)?;

    let trailing = remaining(&cursor);
    if strict && trailing > 0 {
        return Err(DecodeError::TrailingBytes(trailing));
    }

    Ok(TrackIds {
        explicit,
        amazon_album,
        amazon_track,
        apple_album: decimal_or_empty(apple_album),
        apple_track: decimal_or_empty(apple_track),
        spotify,
        youtube,
    })
}

/// Reads the next `width` bytes, or fails naming `field`.
fn read_slot<'a>(
    cursor: &mut Cursor<&'a [u8]>,
    field: Field,
    width: usize,
) -> Result<&'a [u8], DecodeError> {
    let buffer: &'a [u8] = *cursor.get_ref();
    let start = position(cursor);
    let remaining = buffer.len().saturating_sub(start);

    if remaining < width {
        return Err(DecodeError::ShortData { field, needed: width, remaining });
    }

    cursor.set_position((start + width) as u64);
    Ok(&buffer[start..start + width])
}

fn read_basen(cursor: &mut Cursor<&[u8]>, slot: &BaseNSlot) -> Result<String, DecodeError> {
    let bytes = read_slot(cursor, slot.field, slot.width)?;
    Ok(basen_from_slot(slot, bytes))
}

/// Zero slots decode to the empty string, anything else to the identifier
/// padded to its canonical length.
fn basen_from_slot(slot: &BaseNSlot, bytes: &[u8]) -> String {
    let value = fixed::from_fixed_bytes(bytes);
    if value.is_zero() {
        return String::new();
    }
    slot.alphabet.encode_padded(&value, slot.id_len)
}

/// Reads one varint with `read`, mapping failures onto `field`. Running
/// out of input before the varint starts counts as short data.
fn read_varint<'a, T, F>(
    cursor: &mut Cursor<&'a [u8]>,
    field: Field,
    read: F,
) -> Result<T, DecodeError>
where
    F: FnOnce(&mut Cursor<&'a [u8]>) -> Result<T, leb128::Error>,
{
    read(cursor).map_err(|source| match source {
        leb128::Error::IndexOutOfBounds | leb128::Error::EmptyInput => {
            DecodeError::ShortData { field, needed: 1, remaining: 0 }
        }
        source => DecodeError::MalformedVarint { field, source },
    })
}

fn decimal_or_empty(value: u64) -> String {
    if value == 0 {
        return String::new();
    }
    value.to_string()
}

fn position(cursor: &Cursor<&[u8]>) -> usize {
    usize::try_from(cursor.position()).unwrap_or(usize::MAX)
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len().saturating_sub(position(cursor))
}
