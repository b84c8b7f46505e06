//! Fixed-width big-endian packing of arbitrary-precision integers.
//!
//! A slot of `width` bytes holds the value's natural big-endian bytes,
//! left-padded with zeros. A value whose natural representation is wider
//! than the slot is rejected; it is never truncated.

use crate::bignum::BigUint;

/// Errors from packing an integer into a fixed-width slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value needs more bytes than the slot provides.
    #[error("value needs {actual} bytes but the slot holds {width}")]
    Overflow {
        /// Width of the slot in bytes.
        width: usize,
        /// Bytes needed by the value.
        actual: usize,
    },
}

/// Packs `value` into exactly `width` big-endian bytes.
pub fn to_fixed_bytes(value: &BigUint, width: usize) -> Result<Vec<u8>, Error> {
    let natural = value.as_be_bytes();
    if natural.len() > width {
        return Err(Error::Overflow { width, actual: natural.len() });
    }

    let mut slot = vec![0u8; width];
    slot[width - natural.len()..].copy_from_slice(natural);
    Ok(slot)
}

/// Packs `value` into `width` big-endian bytes, appending to `bytes`.
pub fn encode_into(value: &BigUint, width: usize, bytes: &mut Vec<u8>) -> Result<(), Error> {
    let slot = to_fixed_bytes(value, width)?;
    bytes.extend_from_slice(&slot);
    Ok(())
}

/// Reads a big-endian integer from a slot of any width.
pub fn from_fixed_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_be_bytes(bytes)
}
