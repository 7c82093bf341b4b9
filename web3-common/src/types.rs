//! Core value types for the Web3 request builder.
//!
//! All types are fixed-size and `Copy`; nothing here allocates.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Transaction hash length in bytes.
pub const TX_HASH_LEN: usize = 32;

// =============================================================================
// Address / hash
// =============================================================================

/// Ethereum account or contract address (20 bytes).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Creates an address from a slice, or `None` if it is not 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Returns the raw address bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// Keccak256 transaction hash (32 bytes).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxHash(pub [u8; TX_HASH_LEN]);

impl TxHash {
    /// Creates a hash from a slice, or `None` if it is not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; TX_HASH_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Returns the raw hash bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; TX_HASH_LEN] {
        &self.0
    }
}

impl From<[u8; TX_HASH_LEN]> for TxHash {
    fn from(bytes: [u8; TX_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// Transaction field flags
// =============================================================================

/// Set of transaction fields to leave out of a serialized transaction object.
///
/// Some RPC methods reject fields that others require (`eth_call` against a
/// view function usually wants no `from`, no gas), so the caller picks which
/// optional fields to suppress. The `to` field is never suppressible.
///
/// Fields are always emitted in this order:
/// `to`, `from`, `gas`, `gasPrice`, `value`, `data`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct TxFlags(u8);

impl TxFlags {
    /// Omit the `from` field.
    pub const NO_FROM: TxFlags = TxFlags(0x01);
    /// Omit the `gas` field.
    pub const NO_GAS: TxFlags = TxFlags(0x02);
    /// Omit the `gasPrice` field.
    pub const NO_GASPRICE: TxFlags = TxFlags(0x04);
    /// Omit the `value` field.
    pub const NO_VALUE: TxFlags = TxFlags(0x08);
    /// Omit the `data` field even when a payload is present.
    pub const NO_DATA: TxFlags = TxFlags(0x10);

    const ALL: u8 = 0x1F;

    /// No field suppressed.
    pub const fn empty() -> Self {
        TxFlags(0)
    }

    /// Builds a flag set from raw bits. Unknown bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        TxFlags(bits & Self::ALL)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every flag in `other` is set in `self`.
    pub const fn contains(self, other: TxFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn includes_from(self) -> bool {
        !self.contains(Self::NO_FROM)
    }

    pub const fn includes_gas(self) -> bool {
        !self.contains(Self::NO_GAS)
    }

    pub const fn includes_gas_price(self) -> bool {
        !self.contains(Self::NO_GASPRICE)
    }

    pub const fn includes_value(self) -> bool {
        !self.contains(Self::NO_VALUE)
    }

    /// Whether `data` may be emitted. The serializer additionally requires a
    /// non-empty payload.
    pub const fn includes_data(self) -> bool {
        !self.contains(Self::NO_DATA)
    }
}

impl BitOr for TxFlags {
    type Output = TxFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        TxFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TxFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Denominations
// =============================================================================

/// Ether denominations. The discriminant is the power of ten relative to wei,
/// so the digit shift between two units is a plain subtraction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EthUnit {
    Wei = 0,
    Kwei = 3,
    Mwei = 6,
    Gwei = 9,
    Szabo = 12,
    Finney = 15,
    Ether = 18,
    Kether = 21,
    Mether = 24,
    Gether = 27,
    Tether = 30,
}

impl EthUnit {
    /// All units, smallest first.
    pub const ALL: [EthUnit; 11] = [
        EthUnit::Wei,
        EthUnit::Kwei,
        EthUnit::Mwei,
        EthUnit::Gwei,
        EthUnit::Szabo,
        EthUnit::Finney,
        EthUnit::Ether,
        EthUnit::Kether,
        EthUnit::Mether,
        EthUnit::Gether,
        EthUnit::Tether,
    ];

    /// Number of decimal digits between this unit and wei.
    #[inline]
    pub const fn decimals(self) -> u8 {
        self as u8
    }

    /// Lowercase canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            EthUnit::Wei => "wei",
            EthUnit::Kwei => "kwei",
            EthUnit::Mwei => "mwei",
            EthUnit::Gwei => "gwei",
            EthUnit::Szabo => "szabo",
            EthUnit::Finney => "finney",
            EthUnit::Ether => "ether",
            EthUnit::Kether => "kether",
            EthUnit::Mether => "mether",
            EthUnit::Gether => "gether",
            EthUnit::Tether => "tether",
        }
    }
}

impl fmt::Display for EthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown unit name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownUnit;

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown unit")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownUnit {}

impl FromStr for EthUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(unit) = EthUnit::ALL
            .iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(s))
        {
            return Ok(*unit);
        }

        const ALIASES: [(&str, EthUnit); 7] = [
            ("babbage", EthUnit::Kwei),
            ("lovelace", EthUnit::Mwei),
            ("shannon", EthUnit::Gwei),
            ("microether", EthUnit::Szabo),
            ("milliether", EthUnit::Finney),
            ("eth", EthUnit::Ether),
            ("grand", EthUnit::Kether),
        ];
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
            .map(|(_, unit)| *unit)
            .ok_or(UnknownUnit)
    }
}
