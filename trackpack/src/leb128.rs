//! # LEB128 Variable-Length Integers
//!
//! Apple Music identifiers are plain decimal numbers which are packed as
//! Little Endian Base 128 varints: small values take one byte and a full
//! `u64` takes ten.
//!
//! ## Encoding Format
//!
//! Each byte uses:
//! - Lower 7 bits for value data, least-significant group first
//! - High bit (0x80) as continuation flag
//!
//! For example, decimal 300 encodes as: [0xAC, 0x02]
//! - 0xAC = 10101100: High bit set (more bytes follow) + bits 0-6 of value
//! - 0x02 = 00000010: High bit clear (final byte) + bits 7-13 of value
//!
//! ## Signed Values
//!
//! Signed values are zig-zag mapped before the unsigned encoding, so that
//! small magnitudes of either sign stay short:
//!
//! | signed | unsigned |
//! |--------|----------|
//! | 0      | 0        |
//! | -1     | 1        |
//! | 1      | 2        |
//! | -2     | 3        |
//!
//! The Apple track ID is stored as a signed delta from the album ID, which
//! is where the zig-zag mapping pays off.

use std::io::Cursor;

/// Maximum number of bytes required to encode a u64 in LEB128 format.
/// For u64 (64 bits), we need at most 10 bytes because each byte provides 7 bits,
/// with 9 bytes covering 63 bits and the 10th byte providing the final bit.
pub const MAX_BYTES: usize = 10;

/// Number of value bits stored in each LEB128 byte.
const BITS_PER_BYTE: u32 = 7;

/// Bit mask to extract the lower 7 bits (value data) from a LEB128 byte.
const LOWER_BITS_MASK: u8 = 0x7F;

/// Flag bit indicating that more bytes follow in the LEB128 sequence.
const CONTINUATION_FLAG: u8 = 0x80;

/// Values below this threshold fit in a single byte.
const MULTI_BYTE_THRESHOLD: u64 = 0x80;

/// Errors that can occur during LEB128 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The LEB128 sequence was incomplete (ended with continuation bit).
    #[error("incomplete LEB128 sequence")]
    IncompleteSequence,

    /// The LEB128 sequence had an invalid continuation pattern.
    #[error("invalid LEB128 continuation pattern")]
    InvalidContinuation,

    /// Attempted to decode from an empty input.
    #[error("empty input")]
    EmptyInput,

    /// Value exceeds 64 bits (u64 maximum).
    #[error("attempted to decode a value exceeding {} bits", u64::BITS)]
    ValueOutOfBounds,

    /// Attempted to access an index outside the bounds of the input.
    #[error("attempted to access an index outside the bounds of the input")]
    IndexOutOfBounds,

    /// Generic LEB128 decoding error (fallback).
    #[error("unexpected LEB128 decoding error")]
    UnexpectedDecodeError,
}

/// Utility for LEB128 encoding/decoding operations.
#[derive(Debug, Clone)]
pub struct Leb128;

impl Leb128 {
    /// Encodes a u64 into LEB128 format, appending to the provided buffer.
    pub fn encode_into(mut value: u64, bytes: &mut Vec<u8>) {
        loop {
            let mut byte = (value & LOWER_BITS_MASK as u64) as u8;
            value >>= BITS_PER_BYTE;

            if value != 0 {
                byte |= CONTINUATION_FLAG;
            }

            bytes.push(byte);

            if value == 0 {
                break;
            }
        }
    }

    /// Zig-zag maps `value` and encodes it as an unsigned LEB128 value,
    /// appending to the provided buffer.
    pub fn encode_signed_into(value: i64, bytes: &mut Vec<u8>) {
        Self::encode_into(zigzag_encode(value), bytes);
    }

    /// Decodes a LEB128-encoded value from bytes.
    ///
    /// Parses a variable-length integer and returns both the decoded value
    /// and the number of bytes consumed from the input. Bytes after the
    /// final group are left alone.
    ///
    /// ## Returns
    /// * `Ok((value, bytes_read))` - The decoded value and consumed bytes
    /// * `Err(Error)` - If decoding fails
    pub fn try_decode(bytes: &[u8]) -> Result<(u64, usize), Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut result: u64 = 0;
        let mut shift = 0;

        for (position, &byte) in bytes.iter().enumerate() {
            let value = (byte & LOWER_BITS_MASK) as u64;

            // The 10th byte may only carry the final bit of a u64.
            if position == MAX_BYTES - 1 {
                if value > 0x01 {
                    return Err(Error::ValueOutOfBounds);
                }
                if byte & CONTINUATION_FLAG != 0 {
                    return Err(Error::InvalidContinuation);
                }
            }

            // Never fails: the shift tops out at 63 bits, checked above.
            match value.checked_shl(shift) {
                Some(shifted) => result |= shifted,
                None => return Err(Error::ValueOutOfBounds),
            }
            shift += BITS_PER_BYTE;

            if byte & CONTINUATION_FLAG == 0 {
                return Ok((result, position + 1));
            }
        }

        Err(Error::IncompleteSequence)
    }

    /// Decodes a zig-zag mapped LEB128 value from bytes, returning the
    /// signed value and the number of bytes consumed.
    pub fn try_decode_signed(bytes: &[u8]) -> Result<(i64, usize), Error> {
        let (value, bytes_read) = Self::try_decode(bytes)?;
        Ok((zigzag_decode(value), bytes_read))
    }

    /// Calculates the size in bytes that a value would occupy when LEB128 encoded.
    pub fn calculate_size(mut value: u64) -> usize {
        let mut size = 1;
        while value >= MULTI_BYTE_THRESHOLD {
            size += 1;
            value >>= BITS_PER_BYTE;
        }
        size
    }

    /// Calculates the size in bytes of a zig-zag mapped signed value.
    pub fn calculate_signed_size(value: i64) -> usize {
        Self::calculate_size(zigzag_encode(value))
    }
}

/// Maps a signed value onto an unsigned one: non-negative values become
/// even codes and negative values odd codes.
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Trait for reading LEB128-encoded values from a data source.
///
/// On error the source position is left unchanged.
pub trait ReadLeb128 {
    /// Reads an unsigned LEB128-encoded value from the source.
    fn read_leb128(&mut self) -> Result<u64, Error>;

    /// Reads a zig-zag mapped signed LEB128 value from the source.
    fn read_signed_leb128(&mut self) -> Result<i64, Error> {
        self.read_leb128().map(zigzag_decode)
    }
}

/// Reads LEB128 values from a byte cursor, advancing its position past
/// each decoded value.
impl ReadLeb128 for Cursor<&[u8]> {
    fn read_leb128(&mut self) -> Result<u64, Error> {
        // Safely convert u64 position to usize, preventing truncation on 32-bit platforms
        let start_pos: usize = self
            .position()
            .try_into()
            .map_err(|_| Error::IndexOutOfBounds)?;

        let buffer = self.get_ref();

        if start_pos >= buffer.len() {
            return Err(Error::IndexOutOfBounds);
        }

        let (value, bytes_read) = Leb128::try_decode(&buffer[start_pos..])?;
        self.set_position((start_pos + bytes_read) as u64);

        Ok(value)
    }
}
