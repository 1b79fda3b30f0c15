//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Round a f32 and clamp it to the u32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f32_to_u32(value: f32) -> u32 {
    round_f64_to_u32(f64::from(value))
}

/// Narrow a f64 to f32, saturating at the f32 range and mapping NaN to 0.
#[must_use]
pub fn clamp_f64_to_f32(value: f64) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let max = f64::from(f32::MAX);
    cast::<f64, f32>(value.clamp(-max, max)).unwrap_or(0.0)
}

/// Convert u32 to f32 while allowing precision loss in a single location.
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    cast::<u32, f32>(value).unwrap_or(0.0)
}

/// Saturating narrowing from usize to u16.
#[must_use]
pub fn clamp_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Format a cent amount as dollars, e.g. `1234` -> `$12.34`.
#[must_use]
pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f32_to_u32(1.6), 2);
        assert_eq!(round_f32_to_u32(-4.0), 0);
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn narrowing_saturates() {
        assert_eq!(clamp_usize_to_u16(70_000), u16::MAX);
        assert_eq!(clamp_usize_to_u16(12), 12);
    }

    #[test]
    fn cents_render_as_dollars() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(160_000), "$1600.00");
        assert_eq!(format_cents(1_205), "$12.05");
    }
}
