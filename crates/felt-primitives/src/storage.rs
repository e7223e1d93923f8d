//! Storage address, a felt in `[0, 2^251 - 256)`

use std::fmt;
use thiserror::Error;

use crate::felt::Felt;

/// Storage address error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageAddressError {
    /// Felt at or above `2^251 - 256`
    #[error("storage address out of range: {0}")]
    OutOfRange(String),
}

/// Address of a storage slot
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StorageAddress(Felt);

impl StorageAddress {
    /// Exclusive upper bound, `2^251 - 256`
    pub const BOUND: Felt = Felt::from_words([
        0xFFFF_FFFF_FFFF_FF00,
        u64::MAX,
        u64::MAX,
        0x07FF_FFFF_FFFF_FFFF,
    ]);

    /// Zero address
    pub const ZERO: StorageAddress = StorageAddress(Felt::ZERO);

    /// Compile-time constant; every `u128` is in range
    pub const fn from_u128(value: u128) -> Self {
        StorageAddress(Felt::from_u128(value))
    }

    /// Underlying felt
    pub fn as_felt(&self) -> Felt {
        self.0
    }
}

impl TryFrom<Felt> for StorageAddress {
    type Error = StorageAddressError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        if value >= Self::BOUND {
            return Err(StorageAddressError::OutOfRange(value.to_hex()));
        }
        Ok(StorageAddress(value))
    }
}

impl From<StorageAddress> for Felt {
    fn from(value: StorageAddress) -> Self {
        value.0
    }
}

impl fmt::Debug for StorageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageAddress({})", self.0.to_hex())
    }
}

impl fmt::Display for StorageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StorageAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let felt = <Felt as serde::Deserialize>::deserialize(deserializer)?;
        StorageAddress::try_from(felt).map_err(serde::de::Error::custom)
    }
}
