//! Typed JSON value encoders.
//!
//! Each encoder appends one quoted JSON string to the context:
//! - [`Web3Context::write_hex_u64`]: `"0x<hex>"` quantity, no padding
//! - [`Web3Context::write_data`]: `"0x<hex of bytes>"` blob
//! - [`Web3Context::write_address`]: `"0x<40 hex chars>"`
//! - [`Web3Context::write_u256`]: `"0x<hex>"` 256-bit quantity

use common::{Address, Error, ADDRESS_LEN};

use crate::context::Web3Context;
use crate::uint256::Uint256;

/// Hex length of an encoded address.
pub const ADDRESS_HEX_LEN: usize = 2 * ADDRESS_LEN;

/// Writes `bytes` as lowercase hex at the start of `out`, without a NUL.
///
/// Returns the number of characters written (`2 * bytes.len()`).
pub fn bin_to_hex(bytes: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    let len = bytes.len() * 2;
    let dst = out.get_mut(..len).ok_or(Error::BufferOverflow)?;
    hex::encode_to_slice(bytes, dst).map_err(|_| Error::BufferOverflow)?;
    Ok(len)
}

impl Web3Context<'_> {
    /// Appends a `u64` as a JSON hex quantity, e.g. `"0x5208"`.
    pub fn write_hex_u64(&mut self, value: u64) -> Result<(), Error> {
        self.append(format_args!("\"0x{:x}\"", value))
    }

    /// Appends a byte blob as `"0x…"`.
    pub fn write_data(&mut self, bytes: &[u8]) -> Result<(), Error> {
        // the hex form is twice as long, reject obvious misfits early
        if bytes.len() >= self.remaining() {
            return Err(Error::BufferOverflow);
        }
        self.append_str("\"0x")?;
        let len = bin_to_hex(bytes, self.tail_mut())?;
        self.commit(len);
        self.append_str("\"")
    }

    /// Appends an address as `"0x…"` with exactly 40 hex characters.
    pub fn write_address(&mut self, addr: &Address) -> Result<(), Error> {
        self.append_str("\"0x")?;
        let len = bin_to_hex(addr.as_bytes(), self.tail_mut())?;
        if len != ADDRESS_HEX_LEN {
            self.discard(len);
            return Err(Error::BufferOverflow);
        }
        self.commit(len);
        self.append_str("\"")
    }

    /// Appends a 256-bit value as a JSON hex quantity, e.g. `"0xde0b6b3a7640000"`.
    pub fn write_u256<T: Uint256>(&mut self, value: &T) -> Result<(), Error> {
        self.append_str("\"0x")?;
        let len = value.write_radix(16, self.tail_mut())?;
        self.commit(len);
        self.append_str("\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uint256::U256;
    use hex_literal::hex;

    #[test]
    fn test_bin_to_hex() {
        let mut out = [0u8; 8];
        assert_eq!(bin_to_hex(&hex!("deadbeef"), &mut out), Ok(8));
        assert_eq!(&out, b"deadbeef");
        assert_eq!(bin_to_hex(&hex!("deadbeef00"), &mut out), Err(Error::BufferOverflow));
        assert_eq!(bin_to_hex(&[], &mut out), Ok(0));
    }

    #[test]
    fn test_write_hex_u64() {
        let mut buf = [0u8; 32];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_hex_u64(21000).unwrap();
        ctx.append_str(",").unwrap();
        ctx.write_hex_u64(0).unwrap();
        assert_eq!(ctx.as_str(), "\"0x5208\",\"0x0\"");
    }

    #[test]
    fn test_write_data() {
        let mut buf = [0u8; 32];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_data(&hex!("0102abff")).unwrap();
        assert_eq!(ctx.as_str(), "\"0x0102abff\"");
    }

    #[test]
    fn test_write_data_length() {
        let data = [0x5au8; 50];
        let mut buf = [0u8; 128];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_data(&data).unwrap();
        let out = ctx.as_str();
        assert_eq!(out.len() - "\"0x\"".len(), 2 * data.len());
    }

    #[test]
    fn test_write_data_overflow() {
        // "0x + 8 hex chars + " = 12 bytes, needs a 13-byte buffer
        let mut buf = [0u8; 12];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.write_data(&hex!("01020304")), Err(Error::BufferOverflow));

        let mut buf = [0u8; 13];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.write_data(&hex!("01020304")), Ok(()));
    }

    #[test]
    fn test_write_data_precheck() {
        let mut buf = [0u8; 4];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.write_data(&[0u8; 4]), Err(Error::BufferOverflow));
        assert_eq!(ctx.used(), 0);
    }

    #[test]
    fn test_write_address() {
        let addr = Address(hex!("d8da6bf26964af9d7eed9e03e53415d37aa96045"));
        let mut buf = [0u8; 64];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_address(&addr).unwrap();
        assert_eq!(
            ctx.as_str(),
            "\"0xd8da6bf26964af9d7eed9e03e53415d37aa96045\""
        );
        assert_eq!(ctx.used(), 44);
    }

    #[test]
    fn test_write_address_zero() {
        let mut buf = [0u8; 45];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_address(&Address::default()).unwrap();
        assert_eq!(ctx.used(), 44);

        let mut buf = [0u8; 44];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.write_address(&Address::default()), Err(Error::BufferOverflow));
    }

    #[test]
    fn test_write_u256() {
        let mut buf = [0u8; 80];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.write_u256(&U256::from_u64(1_000_000_000_000_000_000)).unwrap();
        assert_eq!(ctx.as_str(), "\"0xde0b6b3a7640000\"");

        ctx.reset();
        ctx.write_u256(&U256::ZERO).unwrap();
        assert_eq!(ctx.as_str(), "\"0x0\"");

        ctx.reset();
        ctx.write_u256(&U256::MAX).unwrap();
        assert_eq!(ctx.used(), 2 + 2 + 64);
    }
}
