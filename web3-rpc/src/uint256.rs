//! 256-bit unsigned integer arithmetic.
//!
//! The request builder and the unit converter only need a handful of
//! operations on 256-bit values: construction from a `u64`, checked addition
//! and multiplication, division with remainder, comparison, and rendering in
//! a given radix into a caller buffer. These are described by the [`Uint256`]
//! trait so that a platform can plug in its own big-number backend (for
//! instance a hardware-accelerated one).
//!
//! [`U256`] is the portable implementation shipped with this crate. It is a
//! fixed-size value made of four little-endian `u64` limbs, never allocates,
//! and reports overflow instead of wrapping.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use common::Error;

/// Operations required from a 256-bit unsigned integer backend.
pub trait Uint256: Sized + Copy + PartialOrd {
    /// Creates a value from a `u64`.
    fn from_u64(value: u64) -> Self;

    /// Returns true if the value is zero.
    fn is_zero(&self) -> bool;

    /// Returns `self + other`, or `None` on overflow.
    fn checked_add(&self, other: &Self) -> Option<Self>;

    /// Returns `self * other`, or `None` on overflow.
    fn checked_mul(&self, other: &Self) -> Option<Self>;

    /// Returns `(self / divisor, self % divisor)`, or `None` if `divisor` is zero.
    fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)>;

    /// Writes the value in the given radix (lowercase digits, no prefix)
    /// followed by a NUL byte.
    ///
    /// Returns the number of digits written, not counting the NUL.
    /// Fails with [`Error::BufferOverflow`] if the digits and the NUL do not fit.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=16`.
    fn write_radix(&self, radix: u32, out: &mut [u8]) -> Result<usize, Error>;
}

/// Returns `10^exp`, or `None` if it does not fit.
pub fn pow10<T: Uint256>(exp: u32) -> Option<T> {
    let ten = T::from_u64(10);
    let mut result = T::from_u64(1);
    for _ in 0..exp {
        result = result.checked_mul(&ten)?;
    }
    Some(result)
}

const LIMBS: usize = 4;
const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// 256-bit unsigned integer stored as four little-endian `u64` limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256 {
    limbs: [u64; LIMBS],
}

impl U256 {
    pub const ZERO: U256 = U256 { limbs: [0; LIMBS] };
    pub const ONE: U256 = U256 {
        limbs: [1, 0, 0, 0],
    };
    pub const MAX: U256 = U256 {
        limbs: [u64::MAX; LIMBS],
    };

    /// Creates a `U256` from a `u64` value.
    pub const fn from_u64(value: u64) -> Self {
        Self {
            limbs: [value, 0, 0, 0],
        }
    }

    /// Creates a `U256` from a `u128` value.
    pub const fn from_u128(value: u128) -> Self {
        Self {
            limbs: [value as u64, (value >> 64) as u64, 0, 0],
        }
    }

    /// Creates a `U256` from a big-endian byte array.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[LIMBS - 1 - i] = u64::from_be_bytes(word);
        }
        Self { limbs }
    }

    /// Returns the value as a big-endian byte array.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&self.limbs[LIMBS - 1 - i].to_be_bytes());
        }
        bytes
    }

    /// Returns the value as a `u64` if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        if self.limbs[1..].iter().all(|&l| l == 0) {
            Some(self.limbs[0])
        } else {
            None
        }
    }

    /// Number of significant bits.
    pub fn bits(&self) -> u32 {
        for i in (0..LIMBS).rev() {
            if self.limbs[i] != 0 {
                return (i as u32) * 64 + (64 - self.limbs[i].leading_zeros());
            }
        }
        0
    }

    fn bit(&self, index: u32) -> bool {
        let limb = (index / 64) as usize;
        (self.limbs[limb] >> (index % 64)) & 1 == 1
    }

    fn set_bit(&mut self, index: u32) {
        let limb = (index / 64) as usize;
        self.limbs[limb] |= 1 << (index % 64);
    }

    /// Shifts left by one bit, returning the bit shifted out.
    fn shl1(&mut self) -> bool {
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut() {
            let next = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = next;
        }
        carry == 1
    }

    fn wrapping_sub(&self, other: &Self) -> Self {
        let mut limbs = [0u64; LIMBS];
        let mut borrow = false;
        for i in 0..LIMBS {
            let (d1, b1) = self.limbs[i].overflowing_sub(other.limbs[i]);
            let (d2, b2) = d1.overflowing_sub(borrow as u64);
            limbs[i] = d2;
            borrow = b1 || b2;
        }
        Self { limbs }
    }

    /// Divides by a small divisor, returning quotient and remainder.
    fn div_rem_u64(&self, divisor: u64) -> (Self, u64) {
        let mut quotient = [0u64; LIMBS];
        let mut rem = 0u128;
        for i in (0..LIMBS).rev() {
            let cur = (rem << 64) | self.limbs[i] as u128;
            quotient[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        (Self { limbs: quotient }, rem as u64)
    }

    /// Shift-subtract long division for divisors wider than 64 bits.
    fn div_rem_long(&self, divisor: &Self) -> (Self, Self) {
        let mut quotient = Self::ZERO;
        let mut rem = Self::ZERO;
        for i in (0..self.bits()).rev() {
            // `rem < divisor` holds here, so a bit shifted out means rem > divisor
            let overflow = rem.shl1();
            if self.bit(i) {
                rem.limbs[0] |= 1;
            }
            if overflow || rem >= *divisor {
                rem = rem.wrapping_sub(divisor);
                quotient.set_bit(i);
            }
        }
        (quotient, rem)
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..LIMBS).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Uint256 for U256 {
    fn from_u64(value: u64) -> Self {
        U256::from_u64(value)
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    fn checked_add(&self, other: &Self) -> Option<Self> {
        let mut limbs = [0u64; LIMBS];
        let mut carry = false;
        for i in 0..LIMBS {
            let (s1, c1) = self.limbs[i].overflowing_add(other.limbs[i]);
            let (s2, c2) = s1.overflowing_add(carry as u64);
            limbs[i] = s2;
            carry = c1 || c2;
        }
        if carry {
            None
        } else {
            Some(Self { limbs })
        }
    }

    fn checked_mul(&self, other: &Self) -> Option<Self> {
        let mut wide = [0u64; 2 * LIMBS];
        for i in 0..LIMBS {
            let mut carry = 0u128;
            for j in 0..LIMBS {
                let t = self.limbs[i] as u128 * other.limbs[j] as u128
                    + wide[i + j] as u128
                    + carry;
                wide[i + j] = t as u64;
                carry = t >> 64;
            }
            wide[i + LIMBS] = carry as u64;
        }
        if wide[LIMBS..].iter().any(|&l| l != 0) {
            return None;
        }
        let mut limbs = [0u64; LIMBS];
        limbs.copy_from_slice(&wide[..LIMBS]);
        Some(Self { limbs })
    }

    fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }
        if let Some(small) = divisor.as_u64() {
            let (q, r) = self.div_rem_u64(small);
            return Some((q, U256::from_u64(r)));
        }
        Some(self.div_rem_long(divisor))
    }

    fn write_radix(&self, radix: u32, out: &mut [u8]) -> Result<usize, Error> {
        assert!((2..=16).contains(&radix), "Unsupported radix");

        // 256 digits is the worst case (radix 2)
        let mut scratch = [0u8; 256];
        let mut len = 0;
        let mut value = *self;
        loop {
            let (q, digit) = value.div_rem_u64(radix as u64);
            scratch[len] = DIGITS[digit as usize];
            len += 1;
            value = q;
            if value.is_zero() {
                break;
            }
        }

        if len >= out.len() {
            return Err(Error::BufferOverflow);
        }
        for (dst, src) in out.iter_mut().zip(scratch[..len].iter().rev()) {
            *dst = *src;
        }
        out[len] = 0;
        Ok(len)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256::from_u64(value)
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        U256::from_u128(value)
    }
}

fn fmt_radix(value: &U256, radix: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut buf = [0u8; 80];
    let len = value.write_radix(radix, &mut buf).map_err(|_| fmt::Error)?;
    let digits = core::str::from_utf8(&buf[..len]).map_err(|_| fmt::Error)?;
    f.pad_integral(true, if radix == 16 { "0x" } else { "" }, digits)
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, 10, f)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, 16, f)
    }
}

/// Error returned when parsing a `U256` from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseU256Error {
    /// Empty input or a character outside the radix.
    InvalidDigit,
    /// The value does not fit in 256 bits.
    Overflow,
}

impl fmt::Display for ParseU256Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseU256Error::InvalidDigit => write!(f, "Invalid digit"),
            ParseU256Error::Overflow => write!(f, "Number too large"),
        }
    }
}

impl FromStr for U256 {
    type Err = ParseU256Error;

    /// Parses a decimal string, or a hex string with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        if digits.is_empty() {
            return Err(ParseU256Error::InvalidDigit);
        }

        let base = U256::from_u64(radix as u64);
        let mut value = U256::ZERO;
        for c in digits.chars() {
            let digit = c.to_digit(radix).ok_or(ParseU256Error::InvalidDigit)?;
            value = value
                .checked_mul(&base)
                .and_then(|v| v.checked_add(&U256::from_u64(digit as u64)))
                .ok_or(ParseU256Error::Overflow)?;
        }
        Ok(value)
    }
}
