//! Prime field element (felt)
//!
//! A [`Felt`] is an integer modulo `P = 2^251 + 17 * 2^192 + 1`, always held
//! in its canonical representative in `[0, P)`. Addition, subtraction and
//! multiplication wrap modulo `P` and never fail.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use primitive_types::{U256 as PU256, U512 as PU512};
use thiserror::Error;

/// The field modulus as little-endian 64-bit words
const PRIME: PU256 = PU256([1, 0, 0, 0x0800_0000_0000_0011]);

/// Largest byte length of a short string held in one felt
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// Felt parsing and conversion error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeltError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid felt length: expected at most 32 bytes, got {0}")]
    InvalidLength(usize),
    /// Value is not below the field modulus
    #[error("value is not below the field modulus")]
    NotCanonical,
    /// Value does not fit the target integer
    #[error("felt does not fit in {bits} bits")]
    DoesNotFit {
        /// Target width
        bits: u32,
    },
    /// Short string longer than 31 bytes
    #[error("short string too long: {0} bytes (max 31)")]
    ShortStringTooLong(usize),
    /// Short string with a non-ASCII byte
    #[error("short string must be ASCII")]
    NonAscii,
}

/// Element of the prime field
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Felt(PU256);

impl Felt {
    /// Zero
    pub const ZERO: Felt = Felt(PU256([0, 0, 0, 0]));

    /// One
    pub const ONE: Felt = Felt(PU256([1, 0, 0, 0]));

    /// `P - 1`, the greatest canonical representative
    pub const MAX: Felt = Felt(PU256([0, 0, 0, 0x0800_0000_0000_0011]));

    /// Values below this bound order the same way as the integers they encode
    pub const COMPARISON_BOUND_BITS: u32 = 128;

    /// The modulus `P` as big-endian bytes
    pub fn prime() -> [u8; 32] {
        let mut out = [0u8; 32];
        PRIME.to_big_endian(&mut out);
        out
    }

    /// Create from a `u128`; always canonical
    pub const fn from_u128(value: u128) -> Self {
        Felt(PU256([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Create from little-endian 64-bit words; caller keeps the value below `P`
    pub(crate) const fn from_words(words: [u64; 4]) -> Self {
        Felt(PU256(words))
    }

    /// Create from 32 big-endian bytes, reducing modulo `P`
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        Felt(PU256::from_big_endian(bytes) % PRIME)
    }

    /// Create from a big-endian slice of at most 32 bytes.
    ///
    /// Unlike [`Felt::from_bytes_be`] this rejects non-canonical values.
    pub fn from_slice(slice: &[u8]) -> Result<Self, FeltError> {
        if slice.len() > 32 {
            return Err(FeltError::InvalidLength(slice.len()));
        }
        let value = PU256::from_big_endian(slice);
        if value >= PRIME {
            return Err(FeltError::NotCanonical);
        }
        Ok(Felt(value))
    }

    /// Parse from hex string (with or without 0x prefix, leading zeros optional)
    pub fn from_hex(s: &str) -> Result<Self, FeltError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let padded;
        let s = if s.len() % 2 == 1 {
            padded = format!("0{s}");
            padded.as_str()
        } else {
            s
        };
        let bytes = hex::decode(s).map_err(|e| FeltError::InvalidHex(e.to_string()))?;
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self::from_slice(&bytes[start..])
    }

    /// Encode an ASCII string of at most 31 bytes, first byte most significant
    pub fn from_short_string(s: &str) -> Result<Self, FeltError> {
        if !s.is_ascii() {
            return Err(FeltError::NonAscii);
        }
        if s.len() > SHORT_STRING_MAX_LEN {
            return Err(FeltError::ShortStringTooLong(s.len()));
        }
        Ok(Self::from_short_bytes(s.as_bytes()))
    }

    /// At most 31 bytes always fit below the modulus
    pub(crate) fn from_short_bytes(bytes: &[u8]) -> Felt {
        debug_assert!(bytes.len() <= SHORT_STRING_MAX_LEN);
        Felt(PU256::from_big_endian(bytes))
    }

    /// Decode a short string; `None` unless every significant byte is printable ASCII
    pub fn to_short_string(&self) -> Option<String> {
        let bytes = self.to_bytes_be();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let text = &bytes[start..];
        if text.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            Some(text.iter().map(|&b| b as char).collect())
        } else {
            None
        }
    }

    /// Canonical representative as 32 big-endian bytes
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Minimal hex form with 0x prefix
    pub fn to_hex(&self) -> String {
        let encoded = hex::encode(self.to_bytes_be());
        let digits = encoded.trim_start_matches('0');
        if digits.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{digits}")
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value lies below `2^COMPARISON_BOUND_BITS`
    pub fn is_small(&self) -> bool {
        self.0.bits() <= Self::COMPARISON_BOUND_BITS as usize
    }

    pub(crate) fn repr(&self) -> PU256 {
        self.0
    }
}

fn add_mod(a: PU256, b: PU256) -> PU256 {
    // Both operands are below 2^252, the sum cannot leave 256 bits.
    let sum = a + b;
    if sum >= PRIME {
        sum - PRIME
    } else {
        sum
    }
}

fn sub_mod(a: PU256, b: PU256) -> PU256 {
    if a >= b {
        a - b
    } else {
        (PRIME - b) + a
    }
}

fn mul_mod(a: PU256, b: PU256) -> PU256 {
    let reduced = a.full_mul(b) % PU512::from(PRIME);
    let words = reduced.0;
    PU256([words[0], words[1], words[2], words[3]])
}

impl Add for Felt {
    type Output = Felt;

    fn add(self, rhs: Felt) -> Felt {
        Felt(add_mod(self.0, rhs.0))
    }
}

impl Sub for Felt {
    type Output = Felt;

    fn sub(self, rhs: Felt) -> Felt {
        Felt(sub_mod(self.0, rhs.0))
    }
}

impl Mul for Felt {
    type Output = Felt;

    fn mul(self, rhs: Felt) -> Felt {
        Felt(mul_mod(self.0, rhs.0))
    }
}

impl Neg for Felt {
    type Output = Felt;

    fn neg(self) -> Felt {
        Felt(sub_mod(PU256::zero(), self.0))
    }
}

impl AddAssign for Felt {
    fn add_assign(&mut self, rhs: Felt) {
        *self = *self + rhs;
    }
}

impl SubAssign for Felt {
    fn sub_assign(&mut self, rhs: Felt) {
        *self = *self - rhs;
    }
}

impl MulAssign for Felt {
    fn mul_assign(&mut self, rhs: Felt) {
        *self = *self * rhs;
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Felt({})", self.to_hex())
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<bool> for Felt {
    fn from(value: bool) -> Self {
        if value {
            Felt::ONE
        } else {
            Felt::ZERO
        }
    }
}

macro_rules! impl_felt_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Felt {
                fn from(value: $t) -> Self {
                    Felt::from_u128(value as u128)
                }
            }
        )*
    };
}

impl_felt_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<Felt> for u128 {
    type Error = FeltError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        if value.is_small() {
            Ok(value.0.low_u128())
        } else {
            Err(FeltError::DoesNotFit { bits: 128 })
        }
    }
}

// RLP implementation (behind feature flag)
#[cfg(feature = "rlp")]
mod rlp_impl {
    use super::*;
    use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

    impl Encodable for Felt {
        fn rlp_append(&self, s: &mut RlpStream) {
            let bytes = self.to_bytes_be();
            let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
            s.encoder().encode_value(&bytes[start..]);
        }
    }

    impl Decodable for Felt {
        fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
            rlp.decoder().decode_value(|bytes| {
                if bytes.first() == Some(&0) {
                    return Err(DecoderError::RlpInvalidIndirection);
                }
                Felt::from_slice(bytes).map_err(|_| DecoderError::RlpIsTooBig)
            })
        }
    }
}

// Serde implementation (behind feature flag)
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Felt {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Felt {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Felt::from_hex(&s).map_err(de::Error::custom)
        }
    }
}
