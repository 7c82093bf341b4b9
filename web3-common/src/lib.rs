//! Common types for the Web3 request builder.
//!
//! This crate provides the small value types shared by the request
//! builder (`no_std`, allocation-free) and host tooling: account
//! addresses, transaction hashes, field-suppression flags for
//! transaction objects, and the denomination table used by the unit
//! converter.

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod types;

pub use error::Error;
pub use types::*;

/// JSON-RPC protocol version emitted in every request envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Block tag appended to calls that take one.
pub const BLOCK_TAG_LATEST: &str = "latest";
