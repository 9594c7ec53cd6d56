//! Floating-point tick and price conversions.
//!
//! Ticks are derived with `f64` logarithms, so a price sitting exactly on a
//! tick boundary may land one tick low. Callers depend on this behaviour;
//! keep the conversions behind these functions if the precision ever changes.

use crate::error::{RangeError, ValidationError};
use crate::fees::validate_tick_spacing;
use crate::position::TickRange;

/// Lowest tick this crate will place a position at.
///
/// Two ticks inside the protocol minimum of -887272.
pub const MIN_TICK: i32 = -887_270;

/// Highest tick this crate will place a position at.
pub const MAX_TICK: i32 = 887_270;

/// Price ratio between adjacent ticks.
pub const TICK_BASE: f64 = 1.0001;

/// Returns the price at a tick: `1.0001 ^ tick`.
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powf(f64::from(tick))
}

/// Returns `floor(ln(price) / ln(1.0001))`.
pub fn price_to_tick(price: f64) -> Result<i32, ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    let tick = (price.ln() / TICK_BASE.ln()).floor();
    Ok(tick as i32)
}

/// Rounds a tick down to a multiple of `tick_spacing`, toward negative infinity.
pub fn align_to_tick_spacing(tick: i32, tick_spacing: i32) -> Result<i32, ValidationError> {
    validate_tick_spacing(tick_spacing)?;
    Ok(tick.div_euclid(tick_spacing) * tick_spacing)
}

/// Fails with `TickOutOfRange` unless both ticks lie within `[MIN_TICK, MAX_TICK]`.
pub fn check_tick_bounds(tick_lower: i64, tick_upper: i64) -> Result<(), ValidationError> {
    if tick_lower < i64::from(MIN_TICK) || tick_upper > i64::from(MAX_TICK) {
        return Err(ValidationError::TickOutOfRange {
            tick_lower,
            tick_upper,
        });
    }
    Ok(())
}

/// Shrinks a base spread to a multiple of `tick_spacing`.
///
/// Spreads narrower than ten spacings are replaced by 300 spacings.
///
/// # Panics
///
/// Panics if `tick_spacing` is zero.
pub fn spread_for_tick_spacing(base_spread: i32, tick_spacing: i32) -> i32 {
    let spread = base_spread.div_euclid(tick_spacing) * tick_spacing;
    if spread < tick_spacing.saturating_mul(10) {
        tick_spacing.saturating_mul(300)
    } else {
        spread
    }
}

/// Where a price landed while placing a range around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlacement {
    /// Tick of the price.
    pub tick: i32,
    /// `tick` rounded down to the spacing.
    pub aligned: i32,
    pub range: TickRange,
}

/// Centres `aligned ± spread` on the price's aligned tick.
pub fn place_tick_range(
    price: f64,
    tick_spacing: i32,
    spread: i32,
) -> Result<TickPlacement, ValidationError> {
    validate_tick_spacing(tick_spacing)?;
    if spread < tick_spacing {
        return Err(RangeError::SpreadTooNarrow {
            spread,
            tick_spacing,
        }
        .into());
    }
    if spread % tick_spacing != 0 {
        return Err(RangeError::SpreadMisaligned {
            spread,
            tick_spacing,
        }
        .into());
    }

    let tick = price_to_tick(price)?;
    let aligned = align_to_tick_spacing(tick, tick_spacing)?;
    let tick_lower = i64::from(aligned) - i64::from(spread);
    let tick_upper = i64::from(aligned) + i64::from(spread);
    check_tick_bounds(tick_lower, tick_upper)?;

    // Bounds were checked against i32 constants above.
    Ok(TickPlacement {
        tick,
        aligned,
        range: TickRange::new(tick_lower as i32, tick_upper as i32),
    })
}

/// Computes the tick range `aligned(price) ± spread`.
pub fn compute_tick_range(
    price: f64,
    tick_spacing: i32,
    spread: i32,
) -> Result<TickRange, ValidationError> {
    place_tick_range(price, tick_spacing, spread).map(|placement| placement.range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tick_to_price() {
        assert_eq!(tick_to_price(0), 1.0);
        let p100 = tick_to_price(100);
        assert!((p100 - 1.010_049_66).abs() < 1e-6);
    }

    #[test]
    fn test_price_to_tick() {
        assert_eq!(price_to_tick(1.0).unwrap(), 0);
        assert_eq!(price_to_tick(1.010_05).unwrap(), 100);
        // Floors rather than rounds.
        assert_eq!(price_to_tick(1.000_199).unwrap(), 1);
        assert_eq!(price_to_tick(0.5).unwrap(), -6932);
    }

    #[test]
    fn test_price_to_tick_rejects_non_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                price_to_tick(bad),
                Err(ValidationError::InvalidPrice(_))
            ));
        }
    }

    #[test]
    fn test_align_rounds_toward_negative_infinity() {
        assert_eq!(align_to_tick_spacing(119, 60).unwrap(), 60);
        assert_eq!(align_to_tick_spacing(120, 60).unwrap(), 120);
        assert_eq!(align_to_tick_spacing(-1, 60).unwrap(), -60);
        assert_eq!(align_to_tick_spacing(-60, 60).unwrap(), -60);
        assert_eq!(align_to_tick_spacing(-61, 60).unwrap(), -120);
        assert!(align_to_tick_spacing(10, 0).is_err());
    }

    #[test]
    fn test_spread_policy() {
        assert_eq!(spread_for_tick_spacing(3000, 1), 3000);
        assert_eq!(spread_for_tick_spacing(3000, 10), 3000);
        assert_eq!(spread_for_tick_spacing(3000, 60), 3000);
        assert_eq!(spread_for_tick_spacing(3000, 200), 3000);
        // 3000 / 500 * 500 = 3000 < 5000, falls back to 300 spacings.
        assert_eq!(spread_for_tick_spacing(3000, 500), 150_000);
        assert_eq!(spread_for_tick_spacing(3000, 7), 2996);
    }

    #[test]
    fn test_compute_tick_range_preconditions() {
        assert_eq!(
            compute_tick_range(1.0, 60, 30),
            Err(ValidationError::InvalidRange(RangeError::SpreadTooNarrow {
                spread: 30,
                tick_spacing: 60
            }))
        );
        assert_eq!(
            compute_tick_range(1.0, 60, 90),
            Err(ValidationError::InvalidRange(RangeError::SpreadMisaligned {
                spread: 90,
                tick_spacing: 60
            }))
        );
        // Spread checks run before the price is looked at.
        assert!(matches!(
            compute_tick_range(-1.0, 60, 30),
            Err(ValidationError::InvalidRange(_))
        ));
        assert!(matches!(
            compute_tick_range(-1.0, 60, 60),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_compute_tick_range_centres_on_aligned_tick() {
        let placement = place_tick_range(tick_to_price(100), 60, 3000).unwrap();
        assert!(placement.tick == 99 || placement.tick == 100);
        assert_eq!(placement.aligned, 60);
        assert_eq!(placement.range, TickRange::new(-2940, 3060));

        let range = compute_tick_range(0.5, 60, 600).unwrap();
        // tick -6932 aligns down to -6960
        assert_eq!(range, TickRange::new(-7560, -6360));
    }

    #[test]
    fn test_tick_bounds_are_inclusive() {
        assert!(check_tick_bounds(i64::from(MIN_TICK), i64::from(MAX_TICK)).is_ok());
        assert!(matches!(
            check_tick_bounds(i64::from(MIN_TICK), i64::from(MAX_TICK) + 1),
            Err(ValidationError::TickOutOfRange { .. })
        ));
        assert!(matches!(
            check_tick_bounds(i64::from(MIN_TICK) - 1, 0),
            Err(ValidationError::TickOutOfRange { .. })
        ));
    }

    #[test]
    fn test_compute_tick_range_near_upper_bound() {
        let inside = compute_tick_range(tick_to_price(MAX_TICK - 100), 10, 10).unwrap();
        assert!(inside.tick_upper <= MAX_TICK);
        assert!(inside.tick_upper >= MAX_TICK - 100);

        assert!(matches!(
            compute_tick_range(tick_to_price(MAX_TICK + 5), 10, 10),
            Err(ValidationError::TickOutOfRange { .. })
        ));
        assert!(matches!(
            compute_tick_range(tick_to_price(MIN_TICK + 5), 10, 10),
            Err(ValidationError::TickOutOfRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_alignment(tick in -887_272i32..=887_272, spacing in 1i32..=16_384) {
            let aligned = align_to_tick_spacing(tick, spacing).unwrap();
            prop_assert_eq!(aligned % spacing, 0);
            prop_assert!(aligned <= tick);
            prop_assert!(tick - aligned < spacing);
        }

        #[test]
        fn prop_range_validity(
            tick in -800_000i32..800_000,
            spacing in prop::sample::select(vec![1i32, 10, 60, 200]),
            multiple in 1i32..100,
        ) {
            let spread = spacing * multiple;
            let range = compute_tick_range(tick_to_price(tick), spacing, spread).unwrap();
            prop_assert!(range.tick_lower < range.tick_upper);
            prop_assert!(range.is_aligned(spacing));
            prop_assert!(range.tick_lower >= MIN_TICK);
            prop_assert!(range.tick_upper <= MAX_TICK);
            prop_assert_eq!(range.width(), 2 * i64::from(spread));
        }

        #[test]
        fn prop_price_tick_round_trip(n in -400_000i32..400_000) {
            let tick = price_to_tick(tick_to_price(n)).unwrap();
            prop_assert!((tick - n).abs() <= 1, "tick {} vs {}", tick, n);
        }
    }
}
