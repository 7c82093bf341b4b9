//! Web3 request builder CLI.
//!
//! Builds a single JSON-RPC request (or converts an amount between ether
//! denominations) with the allocation-free builder and prints the result.
//! Nothing is sent over the network; pipe the output to `curl` or a
//! similar tool to talk to a node.
//!
//! # Usage
//!
//! ```bash
//! web3_cli balance --address 0xd8da6bf26964af9d7eed9e03e53415d37aa96045
//! web3_cli --id 7 call --from 0xd8da… --tx-file tx.json --no-gas --no-gas-price
//! web3_cli convert --amount 1500000000000000000 --from wei --to ether
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::{Address, EthUnit, TxFlags, TxHash};
use web3::{Web3Context, U256};

mod error;
mod tx_file;

use error::CliError;
use tx_file::OwnedTransaction;

/// Default request buffer size, in bytes.
const DEFAULT_BUFFER_SIZE: usize = 1024;

#[derive(Parser, Debug)]
#[command(
    name = "web3_cli",
    about = "Build Ethereum JSON-RPC requests in a fixed-size buffer"
)]
struct Args {
    /// Size of the request buffer in bytes (one byte is reserved for the NUL terminator)
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// JSON-RPC request id
    #[arg(long, default_value_t = 1)]
    id: u32,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// eth_blockNumber
    BlockNumber,
    /// eth_getBalance
    Balance {
        #[clap(long)]
        address: String,
    },
    /// eth_getTransactionCount
    Nonce {
        #[clap(long)]
        address: String,
    },
    /// eth_sendRawTransaction
    SendRaw {
        #[clap(long)]
        tx_hex: String,
    },
    /// eth_getTransactionReceipt
    Receipt {
        #[clap(long)]
        hash: String,
    },
    /// eth_call
    Call {
        #[clap(long)]
        from: String,
        /// JSON file with the transaction fields
        #[clap(long)]
        tx_file: PathBuf,
        #[clap(long)]
        no_from: bool,
        #[clap(long)]
        no_gas: bool,
        #[clap(long)]
        no_gas_price: bool,
        #[clap(long)]
        no_value: bool,
        #[clap(long)]
        no_data: bool,
    },
    /// eth_estimateGas
    EstimateGas {
        #[clap(long)]
        from: String,
        /// JSON file with the transaction fields
        #[clap(long)]
        tx_file: PathBuf,
    },
    /// Convert an amount between denominations (wei, gwei, ether, ...)
    Convert {
        /// Decimal or 0x-prefixed hex amount
        #[clap(long)]
        amount: String,
        #[clap(long)]
        from: String,
        #[clap(long)]
        to: String,
    },
}

pub(crate) fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| format!("Invalid hex: {}", e))
}

fn parse_hash(s: &str) -> Result<TxHash, String> {
    let bytes = parse_hex(s)?;
    TxHash::from_slice(&bytes).ok_or_else(|| "Hash must be 32 bytes".to_string())
}

pub(crate) fn parse_address(s: &str) -> Result<Address, String> {
    let bytes = parse_hex(s)?;
    Address::from_slice(&bytes).ok_or_else(|| "Address must be 20 bytes".to_string())
}

fn parse_unit(s: &str) -> Result<EthUnit, String> {
    s.parse().map_err(|_| format!("Unknown unit '{}'", s))
}

fn parse_amount(s: &str) -> Result<U256, String> {
    s.parse().map_err(|e| format!("Invalid amount '{}': {}", s, e))
}

fn call_flags(no_from: bool, no_gas: bool, no_gas_price: bool, no_value: bool, no_data: bool) -> TxFlags {
    let mut flags = TxFlags::empty();
    for (set, flag) in [
        (no_from, TxFlags::NO_FROM),
        (no_gas, TxFlags::NO_GAS),
        (no_gas_price, TxFlags::NO_GASPRICE),
        (no_value, TxFlags::NO_VALUE),
        (no_data, TxFlags::NO_DATA),
    ] {
        if set {
            flags |= flag;
        }
    }
    flags
}

fn build_request(ctx: &mut Web3Context<'_>, command: &CliCommand) -> Result<(), CliError> {
    match command {
        CliCommand::BlockNumber => ctx.eth_block_number()?,
        CliCommand::Balance { address } => ctx.eth_get_balance(&parse_address(address)?)?,
        CliCommand::Nonce { address } => {
            ctx.eth_get_transaction_count(&parse_address(address)?)?
        }
        CliCommand::SendRaw { tx_hex } => ctx.eth_send_raw_transaction(&parse_hex(tx_hex)?)?,
        CliCommand::Receipt { hash } => ctx.eth_get_transaction_receipt(&parse_hash(hash)?)?,
        CliCommand::Call {
            from,
            tx_file,
            no_from,
            no_gas,
            no_gas_price,
            no_value,
            no_data,
        } => {
            let tx = OwnedTransaction::load(tx_file)?;
            let flags = call_flags(*no_from, *no_gas, *no_gas_price, *no_value, *no_data);
            ctx.eth_call(&parse_address(from)?, &tx.as_transaction(), flags)?
        }
        CliCommand::EstimateGas { from, tx_file } => {
            let tx = OwnedTransaction::load(tx_file)?;
            ctx.eth_estimate_gas(&parse_address(from)?, &tx.as_transaction())?
        }
        CliCommand::Convert { .. } => {
            return Err(CliError::InvalidArgument(
                "convert does not build a request".to_string(),
            ))
        }
    }
    Ok(())
}

/// Runs one command and returns the text to print.
fn run(args: &Args) -> Result<String, CliError> {
    let mut buf = vec![0u8; args.buffer_size];

    if let CliCommand::Convert { amount, from, to } = &args.command {
        let amount = parse_amount(amount)?;
        let text = web3::convert(&amount, parse_unit(from)?, parse_unit(to)?, &mut buf)?;
        return Ok(text.to_string());
    }

    let mut ctx = Web3Context::new(&mut buf);
    ctx.set_request_id(args.id);
    build_request(&mut ctx, &args.command)?;

    log::debug!("web3_cli: {} of {} bytes used", ctx.used(), ctx.capacity());
    Ok(ctx.as_str().to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "debug")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let output = run(&args)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn args(cli: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("web3_cli").chain(cli.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"),
            Ok(Address(hex!("d8da6bf26964af9d7eed9e03e53415d37aa96045")))
        );
        assert!(parse_address("0xd8da").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn test_parse_hash() {
        let hash = parse_hash("88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b");
        assert_eq!(
            hash,
            Ok(TxHash(hex!("88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b")))
        );
    }

    #[test]
    fn test_call_flags() {
        assert_eq!(call_flags(false, false, false, false, false), TxFlags::empty());
        assert_eq!(
            call_flags(true, false, true, false, true),
            TxFlags::NO_FROM | TxFlags::NO_GASPRICE | TxFlags::NO_DATA
        );
    }

    #[test]
    fn test_run_balance() {
        let out = run(&args(&[
            "--id",
            "3",
            "balance",
            "--address",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
        ]))
        .unwrap();
        assert_eq!(
            out,
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"eth_getBalance\",\"params\":[\"0xd8da6bf26964af9d7eed9e03e53415d37aa96045\",\"latest\"]}"
        );
    }

    #[test]
    fn test_run_convert() {
        let out = run(&args(&[
            "convert",
            "--amount",
            "1500000000000000000",
            "--from",
            "wei",
            "--to",
            "ether",
        ]))
        .unwrap();
        assert_eq!(out, "1.5");
    }

    #[test]
    fn test_run_buffer_too_small() {
        let res = run(&args(&["--buffer-size", "16", "block-number"]));
        assert!(matches!(res, Err(CliError::Build(common::Error::BufferOverflow))));
    }
}
