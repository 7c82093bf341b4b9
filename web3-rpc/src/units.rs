//! Denomination conversion for display.
//!
//! [`convert`] rescales a 256-bit amount from one ether denomination to
//! another and renders it as fixed-point decimal text in a caller buffer.
//! Converting to a smaller unit multiplies by a power of ten and can never
//! produce a fraction. Converting to a larger unit divides; a non-zero
//! remainder is shown after a `.`, left-padded with zeros to the digit
//! shift, with trailing zeros dropped (`1500000000000000000` wei is `1.5`
//! ether).

use common::{Error, EthUnit};

use crate::uint256::{pow10, Uint256};

/// Converts `amount` expressed in `from` into `to` and writes it to `buf`.
///
/// The text is NUL-terminated in `buf`; the returned string borrows `buf`
/// and excludes the NUL.
///
/// Fails with [`Error::BufferOverflow`] if the text and its NUL do not fit
/// in `buf`, or if the rescaled amount does not fit in 256 bits. On failure
/// the content of `buf` is unspecified.
pub fn convert<'b, T: Uint256>(
    amount: &T,
    from: EthUnit,
    to: EthUnit,
    buf: &'b mut [u8],
) -> Result<&'b str, Error> {
    let len = if from >= to {
        let shift = from.decimals() - to.decimals();
        let scaled = pow10::<T>(shift as u32)
            .and_then(|power| amount.checked_mul(&power))
            .ok_or(Error::BufferOverflow)?;
        scaled.write_radix(10, buf)?
    } else {
        let shift = (to.decimals() - from.decimals()) as usize;
        let power = pow10::<T>(shift as u32).ok_or(Error::BufferOverflow)?;
        let (whole, frac) = amount.div_rem(&power).ok_or(Error::BufferOverflow)?;
        let len = whole.write_radix(10, buf)?;
        if frac.is_zero() {
            len
        } else {
            write_fraction(&frac, shift, buf, len)?
        }
    };

    // only ASCII digits and '.' were written
    core::str::from_utf8(&buf[..len]).map_err(|_| Error::BufferOverflow)
}

/// Appends `.` and the fraction `frac / 10^width` at `buf[len..]`, without
/// trailing zeros. Returns the new text length.
fn write_fraction<T: Uint256>(
    frac: &T,
    width: usize,
    buf: &mut [u8],
    len: usize,
) -> Result<usize, Error> {
    let ten = T::from_u64(10);
    let mut frac = *frac;
    let mut width = width;
    while let Some((q, r)) = frac.div_rem(&ten) {
        if !r.is_zero() {
            break;
        }
        frac = q;
        width -= 1;
    }

    let start = len + 1;
    // '.' plus the padded digits plus NUL
    if start + width >= buf.len() {
        return Err(Error::BufferOverflow);
    }
    buf[len] = b'.';

    let digits = frac.write_radix(10, &mut buf[start..])?;
    let pad = width - digits;
    if pad > 0 {
        buf.copy_within(start..start + digits, start + pad);
        buf[start..start + pad].fill(b'0');
        buf[start + width] = 0;
    }
    Ok(start + width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uint256::U256;

    fn conv(amount: u64, from: EthUnit, to: EthUnit) -> std::string::String {
        let mut buf = [0u8; 96];
        std::string::String::from(convert(&U256::from_u64(amount), from, to, &mut buf).unwrap())
    }

    #[test]
    fn test_wei_to_ether() {
        assert_eq!(conv(1_000_000_000_000_000_000, EthUnit::Wei, EthUnit::Ether), "1");
        assert_eq!(conv(1_500_000_000_000_000_000, EthUnit::Wei, EthUnit::Ether), "1.5");
    }

    #[test]
    fn test_ether_to_wei() {
        assert_eq!(conv(1, EthUnit::Ether, EthUnit::Wei), "1000000000000000000");
    }

    #[test]
    fn test_same_unit() {
        assert_eq!(conv(123, EthUnit::Wei, EthUnit::Wei), "123");
        assert_eq!(conv(0, EthUnit::Gwei, EthUnit::Gwei), "0");
    }

    #[test]
    fn test_fraction_padding() {
        assert_eq!(conv(1, EthUnit::Wei, EthUnit::Ether), "0.000000000000000001");
        assert_eq!(conv(1_050, EthUnit::Wei, EthUnit::Kwei), "1.05");
        assert_eq!(conv(21_000_000_001, EthUnit::Wei, EthUnit::Gwei), "21.000000001");
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        assert_eq!(conv(1_200, EthUnit::Wei, EthUnit::Kwei), "1.2");
        assert_eq!(conv(1_000_000_001_000, EthUnit::Wei, EthUnit::Ether), "0.000001000000001");
        assert_eq!(conv(10, EthUnit::Wei, EthUnit::Kwei), "0.01");
    }

    #[test]
    fn test_exact_fit() {
        let amount = U256::from_u64(1_050);
        // "1.05" + NUL
        let mut buf = [0xffu8; 5];
        assert_eq!(convert(&amount, EthUnit::Wei, EthUnit::Kwei, &mut buf), Ok("1.05"));
        assert_eq!(buf[4], 0);

        let mut buf = [0u8; 4];
        assert_eq!(
            convert(&amount, EthUnit::Wei, EthUnit::Kwei, &mut buf),
            Err(Error::BufferOverflow)
        );
    }

    #[test]
    fn test_padding_overflow() {
        // "0.000000001" needs 12 bytes
        let amount = U256::from_u64(1);
        let mut buf = [0u8; 11];
        assert_eq!(
            convert(&amount, EthUnit::Wei, EthUnit::Gwei, &mut buf),
            Err(Error::BufferOverflow)
        );
        let mut buf = [0u8; 12];
        assert_eq!(
            convert(&amount, EthUnit::Wei, EthUnit::Gwei, &mut buf),
            Ok("0.000000001")
        );
    }

    #[test]
    fn test_arithmetic_overflow() {
        let mut buf = [0u8; 128];
        assert_eq!(
            convert(&U256::MAX, EthUnit::Ether, EthUnit::Wei, &mut buf),
            Err(Error::BufferOverflow)
        );
    }
}
