//! Checked 128-bit unsigned integer
//!
//! Every producing operation either stays inside `[0, 2^128)` or reports a
//! [`Fault`]. The operator impls raise that fault on the panic channel.

use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, Mul, MulAssign, Rem, Sub, SubAssign,
};

use crate::error::{Fault, FaultResult};
use crate::felt::{Felt, FeltError};
use crate::panic::UnwrapOrRaise;

const HALF_BITS: u32 = 64;
const HALF_MASK: u128 = u64::MAX as u128;

/// Full 256-bit product of two 128-bit values as `(high, low)`.
///
/// Schoolbook over 64-bit halves; no partial sum leaves 128 bits.
pub(crate) fn wide_mul(a: u128, b: u128) -> (u128, u128) {
    let (a_hi, a_lo) = (a >> HALF_BITS, a & HALF_MASK);
    let (b_hi, b_lo) = (b >> HALF_BITS, b & HALF_MASK);

    let lo_lo = a_lo * b_lo;
    let hi_lo = a_hi * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_hi = a_hi * b_hi;

    // Middle column: at most 3 * (2^64 - 1), fits in 128 bits
    let cross = (lo_lo >> HALF_BITS) + (hi_lo & HALF_MASK) + (lo_hi & HALF_MASK);

    let low = (cross << HALF_BITS) | (lo_lo & HALF_MASK);
    let high = hi_hi + (hi_lo >> HALF_BITS) + (lo_hi >> HALF_BITS) + (cross >> HALF_BITS);
    (high, low)
}

/// Unsigned integer in `[0, 2^128)` with checked arithmetic
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct U128(u128);

impl U128 {
    /// Zero
    pub const ZERO: U128 = U128(0);

    /// One
    pub const ONE: U128 = U128(1);

    /// `2^128 - 1`
    pub const MAX: U128 = U128(u128::MAX);

    /// Create from a native value
    pub const fn new(value: u128) -> Self {
        U128(value)
    }

    /// Native value
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Check if zero
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self + rhs`, or `Overflow` if the sum reaches `2^128`
    pub fn checked_add(self, rhs: U128) -> FaultResult<U128> {
        if self.0 > u128::MAX - rhs.0 {
            return Err(Fault::overflow("u128_add"));
        }
        Ok(U128(self.0 + rhs.0))
    }

    /// `self - rhs`, or `Underflow` if `rhs > self`
    pub fn checked_sub(self, rhs: U128) -> FaultResult<U128> {
        if self.0 < rhs.0 {
            return Err(Fault::underflow("u128_sub"));
        }
        Ok(U128(self.0 - rhs.0))
    }

    /// `self * rhs`, or `Overflow` if the product reaches `2^128`
    pub fn checked_mul(self, rhs: U128) -> FaultResult<U128> {
        match wide_mul(self.0, rhs.0) {
            (0, low) => Ok(U128(low)),
            _ => Err(Fault::overflow("u128_mul")),
        }
    }

    /// Floor division, or `DivisionByZero`
    pub fn checked_div(self, rhs: U128) -> FaultResult<U128> {
        if rhs.0 == 0 {
            return Err(Fault::DivisionByZero);
        }
        Ok(U128(self.0 / rhs.0))
    }

    /// Remainder, or `DivisionByZero`
    pub fn checked_rem(self, rhs: U128) -> FaultResult<U128> {
        if rhs.0 == 0 {
            return Err(Fault::DivisionByZero);
        }
        Ok(U128(self.0 % rhs.0))
    }

    /// Quotient and remainder together
    pub fn checked_div_rem(self, rhs: U128) -> FaultResult<(U128, U128)> {
        Ok((self.checked_div(rhs)?, self.checked_rem(rhs)?))
    }

    /// Low limb of `self + rhs` and whether a carry left bit 128
    pub(crate) fn add_with_carry(self, rhs: U128) -> (U128, bool) {
        let (sum, carry) = self.0.overflowing_add(rhs.0);
        (U128(sum), carry)
    }

    /// `self - rhs + 2^128` when `rhs > self`, with the borrow flag
    pub(crate) fn sub_with_borrow(self, rhs: U128) -> (U128, bool) {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        (U128(diff), borrow)
    }
}

macro_rules! impl_checked_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for U128 {
            type Output = U128;

            fn $method(self, rhs: U128) -> U128 {
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

impl AddAssign for U128 {
    fn add_assign(&mut self, rhs: U128) {
        *self = *self + rhs;
    }
}

impl SubAssign for U128 {
    fn sub_assign(&mut self, rhs: U128) {
        *self = *self - rhs;
    }
}

impl MulAssign for U128 {
    fn mul_assign(&mut self, rhs: U128) {
        *self = *self * rhs;
    }
}

impl BitAnd for U128 {
    type Output = U128;

    fn bitand(self, rhs: U128) -> U128 {
        U128(self.0 & rhs.0)
    }
}

impl BitOr for U128 {
    type Output = U128;

    fn bitor(self, rhs: U128) -> U128 {
        U128(self.0 | rhs.0)
    }
}

impl BitXor for U128 {
    type Output = U128;

    fn bitxor(self, rhs: U128) -> U128 {
        U128(self.0 ^ rhs.0)
    }
}

impl fmt::Debug for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U128({})", self.0)
    }
}

impl fmt::Display for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_u128_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for U128 {
                fn from(value: $t) -> Self {
                    U128(value as u128)
                }
            }
        )*
    };
}

impl_u128_from_unsigned!(u8, u16, u32, u64, u128);

impl From<bool> for U128 {
    fn from(value: bool) -> Self {
        U128(value as u128)
    }
}

impl From<U128> for u128 {
    fn from(value: U128) -> Self {
        value.0
    }
}

impl From<U128> for Felt {
    fn from(value: U128) -> Self {
        Felt::from_u128(value.0)
    }
}

impl TryFrom<Felt> for U128 {
    type Error = FeltError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        u128::try_from(value).map(U128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panic::catch;

    // ==================== wide_mul ====================

    #[test]
    fn test_wide_mul_small() {
        assert_eq!(wide_mul(6, 7), (0, 42));
    }

    #[test]
    fn test_wide_mul_power_of_two() {
        assert_eq!(wide_mul(1 << 64, 1 << 64), (1, 0));
        assert_eq!(wide_mul(1 << 127, 2), (1, 0));
    }

    #[test]
    fn test_wide_mul_max() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(wide_mul(u128::MAX, u128::MAX), (u128::MAX - 1, 1));
    }

    // ==================== Checked ops ====================

    #[test]
    fn test_checked_add_boundary() {
        assert_eq!(U128::MAX.checked_add(U128::ZERO), Ok(U128::MAX));
        assert_eq!(
            U128::MAX.checked_add(U128::ONE),
            Err(Fault::overflow("u128_add"))
        );
    }

    #[test]
    fn test_checked_sub_underflow() {
        for (a, b) in [(0u128, 1u128), (0, 3), (1, 3), (100, 1000)] {
            assert_eq!(
                U128::new(a).checked_sub(U128::new(b)),
                Err(Fault::underflow("u128_sub"))
            );
        }
    }

    #[test]
    fn test_checked_mul_boundary() {
        let two_64 = U128::new(1 << 64);
        assert_eq!(
            two_64.checked_mul(two_64),
            Err(Fault::overflow("u128_mul"))
        );
        assert_eq!(
            two_64.checked_mul(U128::new(u64::MAX as u128)),
            Ok(U128::new((1u128 << 64) * u64::MAX as u128))
        );
    }

    #[test]
    fn test_checked_div_rem() {
        assert_eq!(
            U128::new(17).checked_div_rem(U128::new(5)),
            Ok((U128::new(3), U128::new(2)))
        );
        assert_eq!(U128::new(17).checked_div(U128::ZERO), Err(Fault::DivisionByZero));
        assert_eq!(U128::new(17).checked_rem(U128::ZERO), Err(Fault::DivisionByZero));
    }

    #[test]
    fn test_add_with_carry() {
        let half = U128::new(1 << 127);
        assert_eq!(half.add_with_carry(half), (U128::ZERO, true));
        assert_eq!(U128::ONE.add_with_carry(U128::ONE), (U128::new(2), false));
    }

    #[test]
    fn test_sub_with_borrow() {
        assert_eq!(
            U128::ZERO.sub_with_borrow(U128::new(1 << 127)),
            (U128::new(1 << 127), true)
        );
    }

    // ==================== Operators ====================

    #[test]
    fn test_operators() {
        let a = U128::new(12);
        let b = U128::new(5);
        assert_eq!(a + b, U128::new(17));
        assert_eq!(a - b, U128::new(7));
        assert_eq!(a * b, U128::new(60));
        assert_eq!(a / b, U128::new(2));
        assert_eq!(a % b, U128::new(2));
        assert_eq!(a & b, U128::new(4));
        assert_eq!(a | b, U128::new(13));
        assert_eq!(a ^ b, U128::new(9));
    }

    #[test]
    fn test_overflow_payload() {
        let caught = catch(|| U128::new(1 << 127) + U128::new(1 << 127));
        assert!(caught.unwrap_err().contains_message("u128_add Overflow"));
    }

    #[test]
    fn test_underflow_payload() {
        let caught = catch(|| U128::ZERO - U128::ONE);
        assert!(caught.unwrap_err().contains_message("u128_sub Overflow"));
    }

    #[test]
    fn test_assign_ops() {
        let mut x = U128::new(3);
        x += U128::new(4);
        x *= U128::new(3);
        x -= U128::new(1);
        assert_eq!(x, U128::new(20));
    }

    // ==================== Conversions ====================

    #[test]
    fn test_felt_roundtrip() {
        let felt = Felt::from(U128::MAX);
        assert_eq!(U128::try_from(felt), Ok(U128::MAX));
        assert!(U128::try_from(Felt::MAX).is_err());
    }

    #[test]
    fn test_display_debug() {
        assert_eq!(U128::new(42).to_string(), "42");
        assert_eq!(format!("{:?}", U128::new(42)), "U128(42)");
    }
}
