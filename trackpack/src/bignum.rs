//! # Byte-Wise Arbitrary-Precision Unsigned Integers
//!
//! Identifier values exceed native integer widths in the worst case (a
//! 22-character Base62 Spotify ID needs 131 bits), so numeral conversion is
//! done on a big-endian byte string with schoolbook multiply/accumulate and
//! short division by a single-digit divisor.
//!
//! Only the operations the numeral codecs need are provided:
//!
//! - `value = value * base + digit` while parsing a numeral
//! - `(value, remainder) = divmod(value, base)` while rendering one
//! - conversion to and from minimal big-endian bytes

use std::fmt;

/// Number of bits in one limb of the representation.
const LIMB_BITS: u32 = u8::BITS;

/// An arbitrary-precision unsigned integer stored as big-endian bytes.
///
/// The representation is always minimal: it never starts with a zero
/// byte, and zero itself is the empty byte string. This makes
/// [`BigUint::as_be_bytes`] the "natural" byte representation used to
/// decide whether a value fits a fixed-width slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigUint {
    bytes: Vec<u8>,
}

impl BigUint {
    /// Returns the value zero.
    pub const fn zero() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Builds a value from big-endian bytes. Leading zero bytes are
    /// ignored, so any zero-padded slot decodes to the same value as its
    /// unpadded form.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let first_nonzero = bytes
            .iter()
            .position(|&byte| byte != 0)
            .unwrap_or(bytes.len());

        Self { bytes: bytes[first_nonzero..].to_vec() }
    }

    /// The minimal big-endian representation; empty for zero.
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the minimal big-endian representation.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Computes `self = self * multiplier + addend` in place.
    ///
    /// This is the fold step for parsing a big-endian numeral: one call
    /// per digit, with `multiplier` set to the radix.
    pub fn mul_add_small(&mut self, multiplier: u32, addend: u32) {
        let mut carry = u64::from(addend);

        for byte in self.bytes.iter_mut().rev() {
            let product = u64::from(*byte) * u64::from(multiplier) + carry;
            *byte = product as u8;
            carry = product >> LIMB_BITS;
        }

        // Whatever carry is left becomes new most-significant bytes.
        let mut head = Vec::new();
        while carry != 0 {
            head.push(carry as u8);
            carry >>= LIMB_BITS;
        }

        if !head.is_empty() {
            head.reverse();
            head.extend_from_slice(&self.bytes);
            self.bytes = head;
        }

        self.normalize();
    }

    /// Divides the value by `divisor` in place and returns the remainder.
    ///
    /// Returns `None`, leaving the value untouched, when `divisor` is zero.
    pub fn div_rem_small(&mut self, divisor: u32) -> Option<u32> {
        if divisor == 0 {
            return None;
        }

        let divisor = u64::from(divisor);
        let mut remainder = 0u64;

        for byte in self.bytes.iter_mut() {
            let current = (remainder << LIMB_BITS) | u64::from(*byte);
            *byte = (current / divisor) as u8;
            remainder = current % divisor;
        }

        self.normalize();
        // The remainder is strictly less than a u32 divisor.
        Some(remainder as u32)
    }

    /// Drops leading zero bytes so the representation stays minimal.
    fn normalize(&mut self) {
        let leading_zeros = self.bytes.iter().take_while(|&&byte| byte == 0).count();
        if leading_zeros > 0 {
            self.bytes.drain(..leading_zeros);
        }
    }
}

impl From<u64> for BigUint {
    fn from(value: u64) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }
}

impl From<u128> for BigUint {
    fn from(value: u128) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
