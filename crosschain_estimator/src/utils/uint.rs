use rust_decimal::Decimal;
use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Largest magnitude a `Decimal` mantissa can hold.
const DECIMAL_MANTISSA_BITS: usize = 96;

/// Parses a `0x`-prefixed (or bare) hex quantity into a `Decimal`.
///
/// Returns `None` for malformed input or values beyond the `Decimal` range.
pub fn hex_to_decimal(hex: &str) -> Option<Decimal> {
    let trimmed = hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || digits.len() > 64 {
        return None;
    }

    let value = U256::from_str_radix(digits, 16).ok()?;
    if value.bits() > DECIMAL_MANTISSA_BITS {
        return None;
    }

    let value = i128::try_from(value.as_u128()).ok()?;
    Some(Decimal::from_i128_with_scale(value, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_decimal() {
        assert_eq!(hex_to_decimal("0x1dcd6500"), Some(Decimal::from(500_000_000u64)));
        assert_eq!(hex_to_decimal("0X0A"), Some(Decimal::from(10u64)));
        assert_eq!(hex_to_decimal("ff"), Some(Decimal::from(255u64)));
    }

    #[test]
    fn test_hex_to_decimal_rejects_invalid() {
        assert_eq!(hex_to_decimal("0x"), None);
        assert_eq!(hex_to_decimal("0xzz"), None);
        // 2^255 does not fit a Decimal mantissa
        assert_eq!(
            hex_to_decimal("0x8000000000000000000000000000000000000000000000000000000000000000"),
            None
        );
    }
}
