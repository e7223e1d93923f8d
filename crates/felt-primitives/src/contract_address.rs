//! Contract address, a felt in `[0, 2^251)`

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::felt::{Felt, FeltError};

/// Contract address error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractAddressError {
    /// Felt at or above `2^251`
    #[error("contract address out of range: {0}")]
    OutOfRange(String),
    /// Not a valid felt
    #[error("invalid contract address: {0}")]
    Felt(#[from] FeltError),
}

/// Address of a deployed contract
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractAddress(Felt);

impl ContractAddress {
    /// Exclusive upper bound, `2^251`
    pub const BOUND: Felt = Felt::from_words([0, 0, 0, 0x0800_0000_0000_0000]);

    /// Zero address
    pub const ZERO: ContractAddress = ContractAddress(Felt::ZERO);

    /// Compile-time constant; every `u128` is in range
    pub const fn from_u128(value: u128) -> Self {
        ContractAddress(Felt::from_u128(value))
    }

    /// Parse from hex, then range-check
    pub fn from_hex(s: &str) -> Result<Self, ContractAddressError> {
        Self::try_from(Felt::from_hex(s)?)
    }

    /// Underlying felt
    pub fn as_felt(&self) -> Felt {
        self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Felt> for ContractAddress {
    type Error = ContractAddressError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        if value >= Self::BOUND {
            return Err(ContractAddressError::OutOfRange(value.to_hex()));
        }
        Ok(ContractAddress(value))
    }
}

impl FromStr for ContractAddress {
    type Err = ContractAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<ContractAddress> for Felt {
    fn from(value: ContractAddress) -> Self {
        value.0
    }
}

impl fmt::Debug for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractAddress({})", self.0.to_hex())
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ContractAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let felt = <Felt as serde::Deserialize>::deserialize(deserializer)?;
        ContractAddress::try_from(felt).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_value() {
        let two_251 = Felt::from_hex(&format!("0x8{}", "0".repeat(62))).unwrap();
        assert_eq!(ContractAddress::BOUND, two_251);
        assert!(ContractAddress::BOUND < Felt::MAX);
    }

    #[test]
    fn test_try_from_in_range() {
        let last = ContractAddress::BOUND - Felt::ONE;
        let address = ContractAddress::try_from(last).unwrap();
        assert_eq!(address.as_felt(), last);
        assert!(ContractAddress::try_from(Felt::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert_eq!(
            ContractAddress::try_from(ContractAddress::BOUND),
            Err(ContractAddressError::OutOfRange(ContractAddress::BOUND.to_hex()))
        );
        assert!(ContractAddress::try_from(Felt::MAX).is_err());
    }

    #[test]
    fn test_from_hex() {
        let address: ContractAddress = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
            .parse()
            .unwrap();
        assert_eq!(
            address.to_string(),
            "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
        );
        assert!(matches!(
            ContractAddress::from_hex("0xzz"),
            Err(ContractAddressError::Felt(FeltError::InvalidHex(_)))
        ));
        assert!(matches!(
            ContractAddress::from_hex(&format!("0x8{}", "0".repeat(62))),
            Err(ContractAddressError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_const_address() {
        const OWNER: ContractAddress = ContractAddress::from_u128(0x1234);
        assert_eq!(Felt::from(OWNER), Felt::from(0x1234u32));
        assert_eq!(format!("{OWNER:?}"), "ContractAddress(0x1234)");
    }
}
