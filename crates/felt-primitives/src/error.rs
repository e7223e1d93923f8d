//! Common error types for primitives

use thiserror::Error;
use crate::contract_address::ContractAddressError;
use crate::felt::FeltError;
use crate::storage::StorageAddressError;
use crate::uint256::U256Error;

/// A violated invariant that unwinds through the panic channel.
///
/// Every kind carries a fixed short diagnostic, which is what ends up
/// encoded in the [`PanicPayload`](crate::panic::PanicPayload).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Result does not fit the integer width
    #[error("{op} Overflow")]
    Overflow {
        /// Operation tag, e.g. `u128_add`
        op: &'static str,
    },

    /// Subtraction below zero
    #[error("{op} Overflow")]
    Underflow {
        /// Operation tag, e.g. `u256_sub`
        op: &'static str,
    },

    /// Division or remainder by zero
    #[error("Division by 0")]
    DivisionByZero,

    /// `assert` with a false condition
    #[error("{0}")]
    Assertion(String),

    /// Escalated out-of-range array read
    #[error("Index out of bounds")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length at the time of the read
        len: usize,
    },
}

impl Fault {
    pub(crate) const fn overflow(op: &'static str) -> Self {
        Fault::Overflow { op }
    }

    pub(crate) const fn underflow(op: &'static str) -> Self {
        Fault::Underflow { op }
    }
}

/// Result type for checked operations
pub type FaultResult<T> = Result<T, Fault>;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Felt error
    #[error("felt error: {0}")]
    Felt(#[from] FeltError),

    /// U256 error
    #[error("u256 error: {0}")]
    U256(#[from] U256Error),

    /// Storage address error
    #[error("storage address error: {0}")]
    StorageAddress(#[from] StorageAddressError),

    /// Contract address error
    #[error("contract address error: {0}")]
    ContractAddress(#[from] ContractAddressError),

    /// Arithmetic or assertion fault
    #[error("fault: {0}")]
    Fault(#[from] Fault),
}
