//! Unit conversion utilities.
//!
//! Positions and sizes are stored as EMUs (English Metric Units), the native
//! unit of PresentationML. Authoring APIs and the registry data use inches.

pub const EMUS_PER_INCH: i64 = 914_400;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Font size in points to the hundredths-of-a-point value used by `sz`.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_round_trip() {
        assert_eq!(inches_to_emu(1.0), 914_400);
        assert_eq!(inches_to_emu(13.333), 12_191_695);
        assert!((emu_to_inches(6_858_000) - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(pt_to_centipoints(10.5), 1050);
        assert_eq!(pt_to_centipoints(-3.0), 0);
    }
}
