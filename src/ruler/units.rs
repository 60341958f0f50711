//! Measurement units and DPI scaling

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Screen pixels between major ticks in pixel mode
pub const PIXEL_STEP: u32 = 100;

/// Highest DPI accepted from the command line
pub const MAX_DPI: u32 = 10_000;

/// Unit shown by the ruler, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    #[default]
    Inches,
    Centimeters,
    Pixels,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Inches, UnitKind::Centimeters, UnitKind::Pixels];

    /// Persisted ordinal
    pub fn index(self) -> usize {
        match self {
            UnitKind::Inches => 0,
            UnitKind::Centimeters => 1,
            UnitKind::Pixels => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The unit after this one, wrapping back to inches
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Short label drawn in the corner square
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Inches => "in",
            UnitKind::Centimeters => "cm",
            UnitKind::Pixels => "px",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown unit '{0}' (expected in, cm or px)")]
pub struct UnitParseError(pub String);

impl FromStr for UnitKind {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(UnitKind::Inches),
            "cm" | "centimeter" | "centimeters" => Ok(UnitKind::Centimeters),
            "px" | "pixel" | "pixels" => Ok(UnitKind::Pixels),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

/// Pixels between major ticks and the label value per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scale {
    /// Always at least 1
    pub pixels_per_unit: u32,
    pub multiplier: u32,
}

impl Scale {
    /// Distance between sub-ticks for `sub_ticks` divisions of a major unit
    pub fn sub_tick_spacing(&self, sub_ticks: u32) -> i32 {
        (f64::from(self.pixels_per_unit) / f64::from(sub_ticks.max(1))).round_ties_even() as i32
    }

    /// Number of major ticks covering `extent` pixels
    pub fn tick_count(&self, extent: i32) -> u32 {
        if extent <= 0 {
            return 0;
        }
        (extent as u32).div_ceil(self.pixels_per_unit)
    }
}

/// Convert the system DPI into a scale for `unit`
pub fn compute_scale(dpi: u32, unit: UnitKind) -> Scale {
    let (pixels_per_unit, multiplier) = match unit {
        UnitKind::Inches => (dpi, 1),
        UnitKind::Centimeters => ((f64::from(dpi) / CM_PER_INCH).round_ties_even() as u32, 1),
        UnitKind::Pixels => (PIXEL_STEP, PIXEL_STEP),
    };

    Scale {
        pixels_per_unit: pixels_per_unit.max(1),
        multiplier,
    }
}

/// Round to two decimals, ties to even
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_scale_is_dpi() {
        for dpi in [72, 96, 120, 144, 192, 288] {
            assert_eq!(
                compute_scale(dpi, UnitKind::Inches),
                Scale { pixels_per_unit: dpi, multiplier: 1 }
            );
        }
    }

    #[test]
    fn test_centimeters_scale() {
        for dpi in [72u32, 96, 120, 144, 192] {
            let expected = (f64::from(dpi) / 2.54).round() as u32;
            assert_eq!(
                compute_scale(dpi, UnitKind::Centimeters),
                Scale { pixels_per_unit: expected, multiplier: 1 }
            );
        }
        assert_eq!(compute_scale(96, UnitKind::Centimeters).pixels_per_unit, 38);
    }

    #[test]
    fn test_pixels_ignores_dpi() {
        for dpi in [1, 96, 300] {
            assert_eq!(
                compute_scale(dpi, UnitKind::Pixels),
                Scale { pixels_per_unit: 100, multiplier: 100 }
            );
        }
    }

    #[test]
    fn test_scale_is_never_zero() {
        assert_eq!(compute_scale(0, UnitKind::Inches).pixels_per_unit, 1);
        assert_eq!(compute_scale(1, UnitKind::Centimeters).pixels_per_unit, 1);
    }

    #[test]
    fn test_cycle_order() {
        assert_eq!(UnitKind::Inches.next(), UnitKind::Centimeters);
        assert_eq!(UnitKind::Centimeters.next(), UnitKind::Pixels);
        assert_eq!(UnitKind::Pixels.next(), UnitKind::Inches);
    }

    #[test]
    fn test_index_mapping() {
        for unit in UnitKind::ALL {
            assert_eq!(UnitKind::from_index(unit.index()), Some(unit));
        }
        assert_eq!(UnitKind::from_index(3), None);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("cm".parse::<UnitKind>(), Ok(UnitKind::Centimeters));
        assert_eq!("Inches".parse::<UnitKind>(), Ok(UnitKind::Inches));
        assert_eq!(" PX ".parse::<UnitKind>(), Ok(UnitKind::Pixels));
        assert!("mm".parse::<UnitKind>().is_err());
    }

    #[test]
    fn test_tick_count() {
        let scale = compute_scale(96, UnitKind::Inches);
        assert_eq!(scale.tick_count(800), 9);
        assert_eq!(scale.tick_count(1000), 11);
        assert_eq!(scale.tick_count(96), 1);
        assert_eq!(scale.tick_count(0), 0);
        assert_eq!(scale.tick_count(-5), 0);
    }

    #[test]
    fn test_sub_tick_spacing_ties_to_even() {
        let scale = Scale { pixels_per_unit: 25, multiplier: 1 };
        assert_eq!(scale.sub_tick_spacing(10), 2);
        let scale = Scale { pixels_per_unit: 38, multiplier: 1 };
        assert_eq!(scale.sub_tick_spacing(10), 4);
        let scale = Scale { pixels_per_unit: 96, multiplier: 1 };
        assert_eq!(scale.sub_tick_spacing(10), 10);
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(12.754_4), 12.75);
        assert_eq!(round_hundredths(3.0), 3.0);
    }
}
