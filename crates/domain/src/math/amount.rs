use crate::error::ValidationError;
use primitive_types::U256;

/// Converts a human decimal string into smallest units (`value * 10^decimals`).
///
/// Digits past `decimals` are truncated. Accepts `123`, `123.45`, `.5` and `5.`;
/// rejects signs, exponents and anything that is not a plain decimal numeral.
pub fn parse_units(value: &str, decimals: u8) -> Result<U256, ValidationError> {
    let invalid = || ValidationError::InvalidAmount(value.to_string());
    let trimmed = value.trim();
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let decimals = usize::from(decimals);
    let kept = &frac_part[..frac_part.len().min(decimals)];
    let padding = std::iter::repeat_n(b'0', decimals - kept.len());

    let ten = U256::from(10u8);
    let mut raw = U256::zero();
    for digit in int_part.bytes().chain(kept.bytes()).chain(padding) {
        raw = raw
            .checked_mul(ten)
            .and_then(|r| r.checked_add(U256::from(digit - b'0')))
            .ok_or_else(invalid)?;
    }
    Ok(raw)
}

/// Renders smallest units as a decimal string without trailing zeros.
pub fn format_units(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Nearest `f64` to `value`.
pub fn u256_to_f64(value: U256) -> f64 {
    if value.bits() <= 64 {
        return value.low_u64() as f64;
    }
    // Decimal parsing rounds to nearest, unlike shifting the high limbs.
    value.to_string().parse().unwrap_or(f64::INFINITY)
}

/// `floor(value)` as a `U256`, or `None` for negative, non-finite or oversized values.
pub fn u256_from_f64_floor(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let value = value.floor();
    if value < 18_446_744_073_709_551_616.0 {
        return Some(U256::from(value as u64));
    }

    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    if exponent + 53 > 256 {
        return None;
    }
    Some(U256::from(mantissa) << (exponent as usize))
}

/// Smallest units expressed in whole tokens, as `f64`.
pub fn to_human(raw: U256, decimals: u8) -> f64 {
    u256_to_f64(raw) / 10f64.powi(i32::from(decimals))
}
