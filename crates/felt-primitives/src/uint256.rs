//! Checked 256-bit unsigned integer over two [`U128`] limbs
//!
//! The value is `high * 2^128 + low`. Addition carries out of the low limb,
//! subtraction borrows into it, and multiplication accounts for every limb
//! cross-product before deciding whether the result fits.

use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, Mul, MulAssign, Rem, Sub, SubAssign,
};
use primitive_types::U256 as PU256;
use thiserror::Error;

use crate::error::{Fault, FaultResult};
use crate::felt::Felt;
use crate::panic::UnwrapOrRaise;
use crate::uint128::{wide_mul, U128};

/// U256 parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum U256Error {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid u256 length: expected at most 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Unsigned integer in `[0, 2^256)` with checked arithmetic.
///
/// Ordering is lexicographic on `(high, low)`, following field declaration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct U256 {
    /// Upper 128 bits
    pub high: U128,
    /// Lower 128 bits
    pub low: U128,
}

impl U256 {
    /// Zero
    pub const ZERO: U256 = U256::from_limbs(0, 0);

    /// One
    pub const ONE: U256 = U256::from_limbs(0, 1);

    /// `2^256 - 1`
    pub const MAX: U256 = U256::from_limbs(u128::MAX, u128::MAX);

    /// Create from limbs
    pub const fn new(high: U128, low: U128) -> Self {
        U256 { high, low }
    }

    /// Create from native limbs
    pub const fn from_limbs(high: u128, low: u128) -> Self {
        U256 {
            high: U128::new(high),
            low: U128::new(low),
        }
    }

    /// Check if zero
    pub const fn is_zero(&self) -> bool {
        self.high.is_zero() && self.low.is_zero()
    }

    /// Limb-wise addition with carry; `Overflow` if the high limb overflows
    pub fn checked_add(self, rhs: U256) -> FaultResult<U256> {
        let (low, carry) = self.low.add_with_carry(rhs.low);
        let high = self
            .high
            .checked_add(rhs.high)
            .and_then(|high| high.checked_add(U128::from(carry)))
            .map_err(|_| Fault::overflow("u256_add"))?;
        Ok(U256 { high, low })
    }

    /// Limb-wise subtraction with borrow; `Underflow` iff `rhs > self`
    pub fn checked_sub(self, rhs: U256) -> FaultResult<U256> {
        let (low, borrow) = self.low.sub_with_borrow(rhs.low);
        let high = self
            .high
            .checked_sub(rhs.high)
            .and_then(|high| high.checked_sub(U128::from(borrow)))
            .map_err(|_| Fault::underflow("u256_sub"))?;
        Ok(U256 { high, low })
    }

    /// Product, or `Overflow` iff the true product reaches `2^256`
    pub fn checked_mul(self, rhs: U256) -> FaultResult<U256> {
        let overflow = || Fault::overflow("u256_mul");

        // high * high lands entirely at 2^256 and above
        if !self.high.is_zero() && !rhs.high.is_zero() {
            return Err(overflow());
        }

        let (ll_high, ll_low) = wide_mul(self.low.get(), rhs.low.get());
        let (lh_high, lh_low) = wide_mul(self.low.get(), rhs.high.get());
        let (hl_high, hl_low) = wide_mul(self.high.get(), rhs.low.get());

        // Cross-products are shifted by 2^128; their upper halves cannot fit
        if lh_high != 0 || hl_high != 0 {
            return Err(overflow());
        }

        let high = U128::new(ll_high)
            .checked_add(U128::new(lh_low))
            .and_then(|high| high.checked_add(U128::new(hl_low)))
            .map_err(|_| overflow())?;
        Ok(U256 {
            high,
            low: U128::new(ll_low),
        })
    }

    /// Floor division, or `DivisionByZero`
    pub fn checked_div(self, rhs: U256) -> FaultResult<U256> {
        if rhs.is_zero() {
            return Err(Fault::DivisionByZero);
        }
        Ok(U256::from(PU256::from(self) / PU256::from(rhs)))
    }

    /// Remainder, or `DivisionByZero`
    pub fn checked_rem(self, rhs: U256) -> FaultResult<U256> {
        if rhs.is_zero() {
            return Err(Fault::DivisionByZero);
        }
        Ok(U256::from(PU256::from(self) % PU256::from(rhs)))
    }

    /// Create from 32 big-endian bytes
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut high = [0u8; 16];
        let mut low = [0u8; 16];
        high.copy_from_slice(&bytes[..16]);
        low.copy_from_slice(&bytes[16..]);
        U256::from_limbs(u128::from_be_bytes(high), u128::from_be_bytes(low))
    }

    /// 32 big-endian bytes
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.high.get().to_be_bytes());
        out[16..].copy_from_slice(&self.low.get().to_be_bytes());
        out
    }

    /// Parse from hex string (with or without 0x prefix, leading zeros optional)
    pub fn from_hex(s: &str) -> Result<Self, U256Error> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let padded;
        let s = if s.len() % 2 == 1 {
            padded = format!("0{s}");
            padded.as_str()
        } else {
            s
        };
        let bytes = hex::decode(s).map_err(|e| U256Error::InvalidHex(e.to_string()))?;
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[start..];
        if bytes.len() > 32 {
            return Err(U256Error::InvalidLength(bytes.len()));
        }
        let mut be = [0u8; 32];
        be[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(U256::from_be_bytes(be))
    }

    /// Full-width hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }
}

macro_rules! impl_checked_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for U256 {
            type Output = U256;

            fn $method(self, rhs: U256) -> U256 {
                self.$checked(rhs).unwrap_or_raise()
            }
        }
    };
}

impl_checked_op!(Add, add, checked_add);
impl_checked_op!(Sub, sub, checked_sub);
impl_checked_op!(Mul, mul, checked_mul);
impl_checked_op!(Div, div, checked_div);
impl_checked_op!(Rem, rem, checked_rem);

impl AddAssign for U256 {
    fn add_assign(&mut self, rhs: U256) {
        *self = *self + rhs;
    }
}

impl SubAssign for U256 {
    fn sub_assign(&mut self, rhs: U256) {
        *self = *self - rhs;
    }
}

impl MulAssign for U256 {
    fn mul_assign(&mut self, rhs: U256) {
        *self = *self * rhs;
    }
}

macro_rules! impl_limbwise_op {
    ($trait:ident, $method:ident) => {
        impl $trait for U256 {
            type Output = U256;

            fn $method(self, rhs: U256) -> U256 {
                U256 {
                    high: self.high.$method(rhs.high),
                    low: self.low.$method(rhs.low),
                }
            }
        }
    };
}

impl_limbwise_op!(BitAnd, bitand);
impl_limbwise_op!(BitOr, bitor);
impl_limbwise_op!(BitXor, bitxor);

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("U256")
            .field("high", &self.high.get())
            .field("low", &self.low.get())
            .finish()
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PU256::from(*self))
    }
}

impl From<U128> for U256 {
    fn from(low: U128) -> Self {
        U256 {
            high: U128::ZERO,
            low,
        }
    }
}

impl From<u128> for U256 {
    fn from(low: u128) -> Self {
        U256::from_limbs(0, low)
    }
}

impl From<u64> for U256 {
    fn from(low: u64) -> Self {
        U256::from_limbs(0, low as u128)
    }
}

impl From<Felt> for U256 {
    fn from(value: Felt) -> Self {
        U256::from(value.repr())
    }
}

impl From<PU256> for U256 {
    fn from(value: PU256) -> Self {
        let words = value.0;
        U256::from_limbs(
            ((words[3] as u128) << 64) | words[2] as u128,
            ((words[1] as u128) << 64) | words[0] as u128,
        )
    }
}

impl From<U256> for PU256 {
    fn from(value: U256) -> Self {
        let (high, low) = (value.high.get(), value.low.get());
        PU256([
            low as u64,
            (low >> 64) as u64,
            high as u64,
            (high >> 64) as u64,
        ])
    }
}

// RLP implementation (behind feature flag)
#[cfg(feature = "rlp")]
mod rlp_impl {
    use super::*;
    use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

    impl Encodable for U256 {
        fn rlp_append(&self, s: &mut RlpStream) {
            let bytes = self.to_be_bytes();
            let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
            s.encoder().encode_value(&bytes[start..]);
        }
    }

    impl Decodable for U256 {
        fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
            rlp.decoder().decode_value(|bytes| {
                if bytes.first() == Some(&0) {
                    return Err(DecoderError::RlpInvalidIndirection);
                }
                if bytes.len() > 32 {
                    return Err(DecoderError::RlpIsTooBig);
                }
                let mut be = [0u8; 32];
                be[32 - bytes.len()..].copy_from_slice(bytes);
                Ok(U256::from_be_bytes(be))
            })
        }
    }
}
