use crate::error::ValidationError;
use crate::math::amount::u256_from_f64_floor;
use crate::math::price_tick::tick_to_price;
use crate::position::TickRange;
use primitive_types::U256;

/// 2^96, the Q64.96 fixed-point scale.
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);

/// 2^96 as `f64` (exactly representable).
pub const Q96_F64: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Width of the `uint160` sqrt price field.
pub const SQRT_PRICE_BITS: usize = 160;

/// Encodes `floor(sqrt(price) * 2^96)`.
///
/// The square root and scaling are done in `f64`; only the final value is
/// converted to an integer.
pub fn encode_sqrt_price_x96(price: f64) -> Result<U256, ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    let scaled = price.sqrt() * Q96_F64;
    let sqrt_price = u256_from_f64_floor(scaled).ok_or(ValidationError::SqrtPriceOverflow)?;
    if sqrt_price.bits() > SQRT_PRICE_BITS {
        return Err(ValidationError::SqrtPriceOverflow);
    }
    Ok(sqrt_price)
}

/// Q64.96 sqrt price at a tick.
pub fn sqrt_price_x96_at_tick(tick: i32) -> Result<U256, ValidationError> {
    encode_sqrt_price_x96(tick_to_price(tick))
}

/// Q64.96 sqrt prices at both ends of a range, lower first.
pub fn sqrt_prices_for_range(range: &TickRange) -> Result<(U256, U256), ValidationError> {
    let lower = sqrt_price_x96_at_tick(range.tick_lower)?;
    let upper = sqrt_price_x96_at_tick(range.tick_upper)?;
    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::price_tick::{MAX_TICK, MIN_TICK};

    #[test]
    fn test_q96() {
        assert_eq!(Q96, U256::one() << 96);
        assert_eq!(Q96_F64, 2f64.powi(96));
    }

    #[test]
    fn test_encode_unit_price() {
        assert_eq!(encode_sqrt_price_x96(1.0).unwrap(), Q96);
        assert_eq!(encode_sqrt_price_x96(4.0).unwrap(), Q96 * U256::from(2u8));
        assert_eq!(encode_sqrt_price_x96(0.25).unwrap(), Q96 / U256::from(2u8));
    }

    #[test]
    fn test_encode_at_ticks() {
        assert_eq!(
            sqrt_price_x96_at_tick(-3000).unwrap(),
            U256::from_dec_str("68192822843689018481675599872").unwrap()
        );
        assert_eq!(
            sqrt_price_x96_at_tick(3000).unwrap(),
            U256::from_dec_str("92049301871180761616552558592").unwrap()
        );
    }

    #[test]
    fn test_encode_rejects_non_positive() {
        assert!(matches!(
            encode_sqrt_price_x96(0.0),
            Err(ValidationError::InvalidPrice(_))
        ));
        assert!(matches!(
            encode_sqrt_price_x96(-4.0),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_global_bounds_fit_uint160() {
        let (lower, upper) = sqrt_prices_for_range(&TickRange::new(MIN_TICK, MAX_TICK)).unwrap();
        assert!(lower > U256::zero());
        assert!(upper.bits() <= SQRT_PRICE_BITS);
        assert!(lower < upper);
    }

    #[test]
    fn test_encode_rejects_oversized_price() {
        assert_eq!(
            encode_sqrt_price_x96(1e100),
            Err(ValidationError::SqrtPriceOverflow)
        );
    }
}
