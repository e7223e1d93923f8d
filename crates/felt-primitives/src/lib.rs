//! # felt-primitives
//!
//! Numeric and collection primitives for a constrained execution environment.
//!
//! This crate provides a prime-field scalar ([`Felt`]), checked fixed-width
//! unsigned integers ([`U128`], [`U256`]), an append-only [`Array`], and the
//! panic channel every violated invariant is raised on.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod array;
mod contract_address;
mod error;
mod felt;
pub mod panic;
mod storage;
mod uint128;
mod uint256;

pub use array::Array;
pub use contract_address::{ContractAddress, ContractAddressError};
pub use error::{Fault, FaultResult, PrimitiveError};
pub use felt::{Felt, FeltError, SHORT_STRING_MAX_LEN};
pub use panic::{assert, panic_with, PanicPayload};
pub use storage::{StorageAddress, StorageAddressError};
pub use uint128::U128;
pub use uint256::{U256, U256Error};
