//! Transaction object serialization for `eth_call` / `eth_estimateGas`.

use common::{Address, Error, TxFlags, BLOCK_TAG_LATEST};

use crate::context::Web3Context;
use crate::uint256::U256;

/// Call or transaction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction<'a> {
    /// Recipient or contract address.
    pub to: Address,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: u64,
    /// Value transferred, in wei.
    pub value: U256,
    /// Call data. `None` and an empty slice both mean "no data".
    pub data: Option<&'a [u8]>,
}

impl<'a> Transaction<'a> {
    /// The call data, if present and non-empty.
    pub fn payload(&self) -> Option<&'a [u8]> {
        self.data.filter(|data| !data.is_empty())
    }
}

impl Web3Context<'_> {
    /// Appends a transaction object followed by the `"latest"` block tag.
    ///
    /// Output shape:
    /// `{"to":…[,"from":…][,"gas":…][,"gasPrice":…][,"value":…][,"data":…]},"latest"`
    ///
    /// Fields appear in that fixed order. `to` is always present; every other
    /// field is dropped when its flag in `flags` is set, and `data` is also
    /// dropped when the transaction carries no payload.
    pub fn write_tx_params(
        &mut self,
        from: &Address,
        tx: &Transaction<'_>,
        flags: TxFlags,
    ) -> Result<(), Error> {
        self.append_str("{\"to\":")?;
        self.write_address(&tx.to)?;
        if flags.includes_from() {
            self.append_str(",\"from\":")?;
            self.write_address(from)?;
        }
        if flags.includes_gas() {
            self.append_str(",\"gas\":")?;
            self.write_hex_u64(tx.gas_limit)?;
        }
        if flags.includes_gas_price() {
            self.append_str(",\"gasPrice\":")?;
            self.write_hex_u64(tx.gas_price)?;
        }
        if flags.includes_value() {
            self.append_str(",\"value\":")?;
            self.write_u256(&tx.value)?;
        }
        if let Some(data) = tx.payload().filter(|_| flags.includes_data()) {
            self.append_str(",\"data\":")?;
            self.write_data(data)?;
        }
        self.append_str("}")?;
        self.write_block_tag()
    }

    /// Appends `,"latest"`.
    pub(crate) fn write_block_tag(&mut self) -> Result<(), Error> {
        self.append(format_args!(",\"{}\"", BLOCK_TAG_LATEST))
    }
}
