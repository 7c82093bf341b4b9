//! Error type for the Web3 request builder.
//!
//! There is a single failure mode: the caller-supplied buffer is too
//! small for the output. It is not transient, so callers either enlarge
//! the buffer or give up on the request.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Error codes for the Web3 request builder.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Error {
    /// Buffer overflow or size limit exceeded.
    BufferOverflow = 0x15,
}

impl Error {
    /// Returns the error code as a u8.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferOverflow => write!(f, "Buffer overflow"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::BufferOverflow.code(), 0x15);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(std::format!("{}", Error::BufferOverflow), "Buffer overflow");
    }
}
