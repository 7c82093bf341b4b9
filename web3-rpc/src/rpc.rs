//! JSON-RPC request builders.
//!
//! Every request has the shape
//! `{"jsonrpc":"2.0","id":<id>,"method":"<name>","params":[…]}` and is built
//! from scratch in the context buffer: the buffer is reset, the envelope
//! header is written with the current request id, then the method's
//! parameters, then the closing `]}`.
//!
//! If any step fails the context is reset before the error is returned, so
//! a truncated request can never be read back through
//! [`Web3Context::as_bytes`].

use common::{Address, Error, TxFlags, TxHash, JSONRPC_VERSION};

use crate::context::Web3Context;
use crate::tx::Transaction;

const JSONRPC_TERMINATOR: &str = "]}";

/// RPC method names.
pub mod method {
    pub const GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
    pub const BLOCK_NUMBER: &str = "eth_blockNumber";
    pub const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";
    pub const GET_BALANCE: &str = "eth_getBalance";
    pub const CALL: &str = "eth_call";
    pub const ESTIMATE_GAS: &str = "eth_estimateGas";
    pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
}

impl Web3Context<'_> {
    fn write_preamble(&mut self, method: &str) -> Result<(), Error> {
        let id = self.request_id();
        self.append(format_args!(
            "{{\"jsonrpc\":\"{}\",\"id\":{},\"method\":\"{}\",\"params\":[",
            JSONRPC_VERSION, id, method
        ))
    }

    fn write_request<F>(&mut self, method: &str, params: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.reset();
        self.write_preamble(method)?;
        params(self)?;
        self.append_str(JSONRPC_TERMINATOR)
    }

    fn build<F>(&mut self, method: &str, params: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        match self.write_request(method, params) {
            Ok(()) => {
                log::debug!(
                    "web3: built {} (id {}, {} bytes)",
                    method,
                    self.request_id(),
                    self.used()
                );
                Ok(())
            }
            Err(e) => {
                log::debug!(
                    "web3: {} does not fit in {} bytes: {}",
                    method,
                    self.capacity(),
                    e
                );
                self.reset();
                Err(e)
            }
        }
    }

    /// `eth_getTransactionCount`: `params: [<addr>, "latest"]`.
    pub fn eth_get_transaction_count(&mut self, addr: &Address) -> Result<(), Error> {
        self.build(method::GET_TRANSACTION_COUNT, |ctx| {
            ctx.write_address(addr)?;
            ctx.write_block_tag()
        })
    }

    /// `eth_blockNumber`: `params: []`.
    pub fn eth_block_number(&mut self) -> Result<(), Error> {
        self.build(method::BLOCK_NUMBER, |_| Ok(()))
    }

    /// `eth_sendRawTransaction`: `params: [<signed tx bytes>]`.
    pub fn eth_send_raw_transaction(&mut self, raw_tx: &[u8]) -> Result<(), Error> {
        self.build(method::SEND_RAW_TRANSACTION, |ctx| ctx.write_data(raw_tx))
    }

    /// `eth_getBalance`: `params: [<addr>, "latest"]`.
    pub fn eth_get_balance(&mut self, addr: &Address) -> Result<(), Error> {
        self.build(method::GET_BALANCE, |ctx| {
            ctx.write_address(addr)?;
            ctx.write_block_tag()
        })
    }

    /// `eth_call`: `params: [<tx object>, "latest"]`, with the fields
    /// selected by `flags`.
    pub fn eth_call(
        &mut self,
        from: &Address,
        tx: &Transaction<'_>,
        flags: TxFlags,
    ) -> Result<(), Error> {
        self.build(method::CALL, |ctx| ctx.write_tx_params(from, tx, flags))
    }

    /// `eth_estimateGas`: `params: [<tx object>, "latest"]` with every field
    /// the transaction has.
    pub fn eth_estimate_gas(&mut self, from: &Address, tx: &Transaction<'_>) -> Result<(), Error> {
        self.build(method::ESTIMATE_GAS, |ctx| {
            ctx.write_tx_params(from, tx, TxFlags::empty())
        })
    }

    /// `eth_getTransactionReceipt`: `params: [<tx hash>]`.
    pub fn eth_get_transaction_receipt(&mut self, tx_hash: &TxHash) -> Result<(), Error> {
        self.build(method::GET_TRANSACTION_RECEIPT, |ctx| {
            ctx.write_data(tx_hash.as_bytes())
        })
    }
}
