use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

pub const TON_DECIMALS: u8 = 9;

lazy_static! {
    /// Attached to a classic mint to deploy the recipient's jetton wallet (0.05 TON).
    pub static ref DEFAULT_FORWARD_TON_AMOUNT: BigUint = BigUint::from(50_000_000u64);
    /// `total_ton_amount` of a Jetton 2.0 mint (0.1 TON).
    pub static ref V2_MINT_TON_AMOUNT: BigUint = BigUint::from(100_000_000u64);
    /// `forward_ton_amount` of the internal transfer inside a Jetton 2.0 mint (0.01 TON).
    pub static ref V2_FORWARD_TON_AMOUNT: BigUint = BigUint::from(10_000_000u64);
    /// Value attached to the message deploying a minter (0.2 TON).
    pub static ref DEFAULT_DEPLOY_AMOUNT: BigUint = BigUint::from(200_000_000u64);
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Invalid amount ({amount}): {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Too many fractional digits in {amount}: at most {decimals} allowed")]
    TooManyFractionalDigits { amount: String, decimals: u8 },
}

impl UnitsError {
    fn invalid(amount: &str, reason: &str) -> UnitsError {
        UnitsError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Converts a decimal string (e.g. `"1000000"` or `"0.05"`) into elementary units.
pub fn parse_units(amount: &str, decimals: u8) -> Result<BigUint, UnitsError> {
    let trimmed = amount.trim().replace('_', "");
    if trimmed.is_empty() {
        return Err(UnitsError::invalid(amount, "empty string"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::invalid(amount, "no digits"));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::invalid(amount, "only digits and one '.' are allowed"));
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyFractionalDigits {
            amount: amount.to_string(),
            decimals,
        });
    }

    let padded = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| UnitsError::invalid(amount, "not a number"))
}

pub fn to_nano(amount: &str) -> Result<BigUint, UnitsError> {
    parse_units(amount, TON_DECIMALS)
}

/// `amount * 10^decimals`, for whole token counts such as an initial supply.
pub fn whole_units(amount: u64, decimals: u8) -> BigUint {
    BigUint::from(amount) * BigUint::from(10u8).pow(decimals as u32)
}

/// Renders elementary units as a decimal string without trailing zeros.
pub fn format_units(amount: &BigUint, decimals: u8) -> String {
    let digits = amount.to_str_radix(10);
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_nano() {
        assert_eq!(to_nano("0.05").unwrap(), *DEFAULT_FORWARD_TON_AMOUNT);
        assert_eq!(to_nano("0.2").unwrap(), *DEFAULT_DEPLOY_AMOUNT);
        assert_eq!(to_nano("1").unwrap(), BigUint::from(1_000_000_000u64));
        assert_eq!(to_nano(".5").unwrap(), BigUint::from(500_000_000u64));
        assert_eq!(to_nano("0").unwrap(), BigUint::zero());
    }

    #[test]
    fn test_parse_units_with_decimals() {
        let expected = BigUint::from(1_000_000u64) * BigUint::from(1_000_000_000u64);
        assert_eq!(parse_units("1_000_000", 9).unwrap(), expected);
        assert_eq!(parse_units("1.5", 6).unwrap(), BigUint::from(1_500_000u64));
        assert_eq!(parse_units("42", 0).unwrap(), BigUint::from(42u8));
    }

    #[test]
    fn test_parse_units_rejects_garbage() {
        assert!(matches!(
            parse_units("", 9),
            Err(UnitsError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_units("-1", 9),
            Err(UnitsError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_units("1.2.3", 9),
            Err(UnitsError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_units(".", 9),
            Err(UnitsError::InvalidAmount { .. })
        ));
        assert_eq!(
            parse_units("0.0000000001", 9),
            Err(UnitsError::TooManyFractionalDigits {
                amount: "0.0000000001".to_string(),
                decimals: 9
            })
        );
    }

    #[test]
    fn test_whole_units() {
        assert_eq!(
            whole_units(1_000_000, 9),
            BigUint::from(1_000_000_000_000_000u64)
        );
        assert_eq!(whole_units(7, 0), BigUint::from(7u8));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(&DEFAULT_FORWARD_TON_AMOUNT, 9), "0.05");
        assert_eq!(format_units(&BigUint::from(1_000_000_000u64), 9), "1");
        assert_eq!(format_units(&BigUint::from(1_234_500u64), 6), "1.2345");
        assert_eq!(format_units(&BigUint::zero(), 9), "0");
        assert_eq!(format_units(&BigUint::from(42u8), 0), "42");
    }
}
