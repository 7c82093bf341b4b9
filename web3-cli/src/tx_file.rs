//! Transaction parameters loaded from a JSON file.
//!
//! The file uses the same field names as the JSON-RPC transaction object:
//!
//! ```json
//! {
//!   "to": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
//!   "gas": 60000,
//!   "gasPrice": 20000000000,
//!   "value": "0",
//!   "data": "0x70a08231..."
//! }
//! ```
//!
//! `value` accepts a decimal string or a `0x` hex string. Missing numeric
//! fields default to zero and a missing `data` means no payload.

use std::path::Path;

use common::Address;
use serde::Deserialize;
use web3::{Transaction, U256};

use crate::error::CliError;
use crate::{parse_address, parse_hex};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TxFile {
    to: String,
    #[serde(default)]
    gas: u64,
    #[serde(default)]
    gas_price: u64,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

/// Decoded transaction that owns its call data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTransaction {
    pub to: Address,
    pub gas_limit: u64,
    pub gas_price: u64,
    pub value: U256,
    pub data: Vec<u8>,
}

impl OwnedTransaction {
    /// Parses a transaction from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        let file: TxFile = serde_json::from_str(json)?;
        let value = match file.value.as_deref() {
            Some(v) => v
                .parse()
                .map_err(|e| format!("Invalid value '{}': {}", v, e))?,
            None => U256::ZERO,
        };
        let data = match file.data.as_deref() {
            Some(d) => parse_hex(d)?,
            None => Vec::new(),
        };
        Ok(Self {
            to: parse_address(&file.to)?,
            gas_limit: file.gas,
            gas_price: file.gas_price,
            value,
            data,
        })
    }

    /// Reads and parses a transaction file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path)?;
        log::debug!("web3_cli: loaded {} bytes from {}", json.len(), path.display());
        Self::from_json(&json)
    }

    /// Borrowed view passed to the request builder.
    pub fn as_transaction(&self) -> Transaction<'_> {
        Transaction {
            to: self.to,
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
            value: self.value,
            data: Some(self.data.as_slice()),
        }
    }
}
