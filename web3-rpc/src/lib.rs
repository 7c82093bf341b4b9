//! Allocation-free JSON-RPC request builder for Ethereum nodes.
//!
//! Requests are written into a caller-supplied buffer through a
//! [`Web3Context`]; nothing is allocated and every write is bounded by the
//! buffer size. The crate also converts 256-bit amounts between ether
//! denominations for display ([`units::convert`]).
//!
//! # Example
//!
//! ```
//! use web3_rpc::{Address, Web3Context};
//!
//! let mut buf = [0u8; 256];
//! let mut ctx = Web3Context::new(&mut buf);
//! ctx.set_request_id(1);
//! ctx.eth_get_balance(&Address([0x11; 20])).unwrap();
//! assert!(ctx.as_str().starts_with(r#"{"jsonrpc":"2.0","id":1,"method":"eth_getBalance""#));
//! ```
//!
//! # Concurrency
//!
//! A context holds the buffer by exclusive reference and every builder
//! resets it on entry, so one context serves one request at a time. Share
//! it across threads only behind a lock.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod context;
pub mod encode;
pub mod rpc;
pub mod tx;
pub mod uint256;
pub mod units;

pub use common::{Address, Error, EthUnit, TxFlags, TxHash};
pub use context::Web3Context;
pub use tx::Transaction;
pub use uint256::{Uint256, U256};
pub use units::convert;
