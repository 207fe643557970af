//! Strongly-typed numeric primitives for markers.
//!
//! Design goals:
//! - Lengths always carry their unit, so a value read from a 1.8+ stream
//!   round-trips with the unit the user picked
//! - Geometry is computed in bp (PostScript points); conversions go through
//!   `Length::to_bp` / `Length::from_bp`
//! - Illegal numeric states (NaN, infinity) are rejected at the edges

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

// ============================================================================
// Length
// ============================================================================

/// Units a [`Length`] can be expressed in.
///
/// The discriminants are the unit ids used by the 1.8+ wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LengthUnit {
    /// TeX point, 1/72.27 in
    Pt = 0,
    /// Inch
    In = 1,
    /// Centimetre
    Cm = 2,
    /// PostScript (big) point, 1/72 in
    #[default]
    Bp = 3,
    /// Millimetre
    Mm = 4,
    /// Pica, 12 pt
    Pc = 5,
    /// Didot point, 1238/1157 pt
    Dd = 6,
    /// Cicero, 12 dd
    Cc = 7,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 8] = [
        LengthUnit::Pt,
        LengthUnit::In,
        LengthUnit::Cm,
        LengthUnit::Bp,
        LengthUnit::Mm,
        LengthUnit::Pc,
        LengthUnit::Dd,
        LengthUnit::Cc,
    ];

    /// Look up a unit by its wire id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Wire id of this unit.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// How many bp make one of this unit.
    pub fn bp_per_unit(self) -> f64 {
        const BP_PER_PT: f64 = 72.0 / 72.27;
        match self {
            LengthUnit::Pt => BP_PER_PT,
            LengthUnit::In => 72.0,
            LengthUnit::Cm => 72.0 / 2.54,
            LengthUnit::Bp => 1.0,
            LengthUnit::Mm => 72.0 / 25.4,
            LengthUnit::Pc => 12.0 * BP_PER_PT,
            LengthUnit::Dd => (1238.0 / 1157.0) * BP_PER_PT,
            LengthUnit::Cc => 12.0 * (1238.0 / 1157.0) * BP_PER_PT,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Pt => "pt",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::Bp => "bp",
            LengthUnit::Mm => "mm",
            LengthUnit::Pc => "pc",
            LengthUnit::Dd => "dd",
            LengthUnit::Cc => "cc",
        }
    }
}

/// A length with its unit.
///
/// Equality is structural: `1in` and `72bp` are different values even though
/// they describe the same distance. Use [`Length::to_bp`] to compare distances.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const ZERO: Length = Length { value: 0.0, unit: LengthUnit::Bp };

    /// Create a length in the given unit (const-friendly, unchecked).
    #[inline]
    pub const fn new(value: f64, unit: LengthUnit) -> Length {
        Length { value, unit }
    }

    /// Create a length in bp (const-friendly, unchecked).
    #[inline]
    pub const fn bp(value: f64) -> Length {
        Length { value, unit: LengthUnit::Bp }
    }

    /// Create a length with validation (rejects NaN/infinite)
    pub fn try_new(value: f64, unit: LengthUnit) -> Result<Length, NumericError> {
        Ok(Length { value: check_finite(value)?, unit })
    }

    /// Create a non-negative length with validation
    pub fn try_non_negative(value: f64, unit: LengthUnit) -> Result<Length, NumericError> {
        let value = check_finite(value)?;
        if value < 0.0 {
            return Err(NumericError::Negative);
        }
        Ok(Length { value, unit })
    }

    /// Create a length from a bp amount, expressed in `unit`.
    pub fn from_bp(bp: f64, unit: LengthUnit) -> Length {
        Length { value: bp / unit.bp_per_unit(), unit }
    }

    /// This length in bp.
    #[inline]
    pub fn to_bp(self) -> f64 {
        if self.unit == LengthUnit::Bp {
            self.value
        } else {
            self.value * self.unit.bp_per_unit()
        }
    }

    /// Re-express this length in another unit.
    pub fn in_unit(self, unit: LengthUnit) -> Length {
        if unit == self.unit {
            self
        } else {
            Length::from_bp(self.to_bp(), unit)
        }
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }
}

/// Sums are expressed in the left operand's unit.
impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length::from_bp(self.to_bp() + rhs.to_bp(), self.unit)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length::from_bp(self.to_bp() - rhs.to_bp(), self.unit)
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length { value: self.value * rhs, unit: self.unit }
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length { value: -self.value, unit: self.unit }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

// ============================================================================
// Angle
// ============================================================================

/// Units an [`Angle`] can be expressed in (1.8+ wire ids).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AngleUnit {
    #[default]
    Radian = 0,
    Degree = 1,
}

impl AngleUnit {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(AngleUnit::Radian),
            1 => Some(AngleUnit::Degree),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// An angle with its unit. Positive angles turn +x toward +y.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub const ZERO: Angle = Angle { value: 0.0, unit: AngleUnit::Radian };

    pub const fn radians(value: f64) -> Angle {
        Angle { value, unit: AngleUnit::Radian }
    }

    pub const fn degrees(value: f64) -> Angle {
        Angle { value, unit: AngleUnit::Degree }
    }

    pub fn try_new(value: f64, unit: AngleUnit) -> Result<Angle, NumericError> {
        Ok(Angle { value: check_finite(value)?, unit })
    }

    /// This angle in radians.
    pub fn to_radians(self) -> f64 {
        match self.unit {
            AngleUnit::Radian => self.value,
            AngleUnit::Degree => self.value.to_radians(),
        }
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AngleUnit::Radian => write!(f, "{}rad", self.value),
            AngleUnit::Degree => write!(f, "{}deg", self.value),
        }
    }
}

// ============================================================================
// Bounding box
// ============================================================================

/// Axis-aligned bounding box in bp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn empty() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include another box
    pub fn expand_box(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

impl Default for BBox {
    fn default() -> Self {
        BBox::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Length tests ====================

    #[test]
    fn length_try_new_rejects_nan() {
        assert_eq!(Length::try_new(f64::NAN, LengthUnit::Bp), Err(NumericError::NaN));
    }

    #[test]
    fn length_try_new_rejects_infinity() {
        assert_eq!(
            Length::try_new(f64::INFINITY, LengthUnit::Cm),
            Err(NumericError::Infinite)
        );
    }

    #[test]
    fn length_try_non_negative_rejects_negative() {
        assert_eq!(
            Length::try_non_negative(-1.0, LengthUnit::Bp),
            Err(NumericError::Negative)
        );
        assert!(Length::try_non_negative(0.0, LengthUnit::Bp).is_ok());
    }

    #[test]
    fn length_inch_is_72bp() {
        assert_eq!(Length::new(1.0, LengthUnit::In).to_bp(), 72.0);
        assert!((Length::new(72.27, LengthUnit::Pt).to_bp() - 72.0).abs() < 1e-12);
    }

    #[test]
    fn length_unit_ids_round_trip() {
        for unit in LengthUnit::ALL {
            assert_eq!(LengthUnit::from_id(unit.id()), Some(unit));
        }
        assert_eq!(LengthUnit::from_id(8), None);
    }

    #[test]
    fn length_arithmetic_keeps_left_unit() {
        let a = Length::new(1.0, LengthUnit::In);
        let b = Length::bp(36.0);
        let sum = a + b;
        assert_eq!(sum.unit, LengthUnit::In);
        assert!((sum.value - 1.5).abs() < 1e-12);
        assert_eq!((a - b).unit, LengthUnit::In);
        assert_eq!((a * 2.0).value, 2.0);
        assert_eq!((-a).value, -1.0);
    }

    #[test]
    fn length_in_unit_converts() {
        let cm = Length::new(2.54, LengthUnit::Cm).in_unit(LengthUnit::In);
        assert!((cm.value - 1.0).abs() < 1e-12);
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_degrees_to_radians() {
        let a = Angle::degrees(180.0);
        assert!((a.to_radians() - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(Angle::radians(0.5).to_radians(), 0.5);
    }

    #[test]
    fn angle_try_new_rejects_nan() {
        assert_eq!(Angle::try_new(f64::NAN, AngleUnit::Degree), Err(NumericError::NaN));
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        let bb = BBox::empty();
        assert!(bb.is_empty());
        assert_eq!(bb.width(), 0.0);
    }

    #[test]
    fn bbox_expand_point() {
        let mut bb = BBox::empty();
        bb.expand_point(DVec2::new(1.0, 2.0));
        bb.expand_point(DVec2::new(3.0, -4.0));
        assert!(!bb.is_empty());
        assert_eq!(bb.width(), 2.0);
        assert_eq!(bb.height(), 6.0);
        assert_eq!(bb.center(), DVec2::new(2.0, -1.0));
    }

    #[test]
    fn bbox_expand_box_ignores_empty() {
        let mut bb = BBox::empty();
        bb.expand_point(DVec2::ZERO);
        bb.expand_box(&BBox::empty());
        assert_eq!(bb.min, DVec2::ZERO);
        assert_eq!(bb.max, DVec2::ZERO);
    }
}
