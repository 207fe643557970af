//! The paint value a marker may carry as its fill.
//!
//! Only the parts the codec round-trips: flat colours in several models and
//! two-stop gradients whose stops are flat colours.

use std::fmt;

/// Compass direction a linear gradient runs toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GradientDirection {
    North = 0,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl GradientDirection {
    pub fn from_id(id: u8) -> Option<Self> {
        use GradientDirection::*;
        [North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest]
            .get(id as usize)
            .copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Where a radial gradient starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RadialCentre {
    Centre = 0,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl RadialCentre {
    pub fn from_id(id: u8) -> Option<Self> {
        use RadialCentre::*;
        [Centre, NorthEast, SouthEast, SouthWest, NorthWest].get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Paint models, without their components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintKind {
    Transparent,
    Rgb,
    Cmyk,
    Grey,
    Hsb,
    LinearGradient,
    RadialGradient,
}

impl PaintKind {
    /// Tag byte of the paint record.
    pub fn tag(self) -> u8 {
        match self {
            PaintKind::Transparent => b'T',
            PaintKind::Rgb => b'R',
            PaintKind::Cmyk => b'C',
            PaintKind::Grey => b'G',
            PaintKind::Hsb => b'H',
            PaintKind::LinearGradient => b'D',
            PaintKind::RadialGradient => b'A',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'T' => PaintKind::Transparent,
            b'R' => PaintKind::Rgb,
            b'C' => PaintKind::Cmyk,
            b'G' => PaintKind::Grey,
            b'H' => PaintKind::Hsb,
            b'D' => PaintKind::LinearGradient,
            b'A' => PaintKind::RadialGradient,
            _ => return None,
        })
    }

    pub fn is_gradient(self) -> bool {
        matches!(self, PaintKind::LinearGradient | PaintKind::RadialGradient)
    }
}

impl fmt::Display for PaintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaintKind::Transparent => "transparent",
            PaintKind::Rgb => "rgb",
            PaintKind::Cmyk => "cmyk",
            PaintKind::Grey => "grey",
            PaintKind::Hsb => "hsb",
            PaintKind::LinearGradient => "linear gradient",
            PaintKind::RadialGradient => "radial gradient",
        };
        f.write_str(name)
    }
}

/// A paint. Components are in 0..=1.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Transparent,
    Rgb { red: f64, green: f64, blue: f64, alpha: f64 },
    Cmyk { cyan: f64, magenta: f64, yellow: f64, key: f64, alpha: f64 },
    Grey { grey: f64, alpha: f64 },
    Hsb { hue: f64, saturation: f64, brightness: f64, alpha: f64 },
    LinearGradient { start: Box<Paint>, end: Box<Paint>, direction: GradientDirection },
    RadialGradient { start: Box<Paint>, end: Box<Paint>, centre: RadialCentre },
}

impl Default for Paint {
    fn default() -> Self {
        Paint::BLACK
    }
}

impl Paint {
    pub const BLACK: Paint = Paint::Rgb { red: 0.0, green: 0.0, blue: 0.0, alpha: 1.0 };

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Paint::Rgb { red, green, blue, alpha: 1.0 }
    }

    pub fn grey(grey: f64) -> Self {
        Paint::Grey { grey, alpha: 1.0 }
    }

    pub fn kind(&self) -> PaintKind {
        match self {
            Paint::Transparent => PaintKind::Transparent,
            Paint::Rgb { .. } => PaintKind::Rgb,
            Paint::Cmyk { .. } => PaintKind::Cmyk,
            Paint::Grey { .. } => PaintKind::Grey,
            Paint::Hsb { .. } => PaintKind::Hsb,
            Paint::LinearGradient { .. } => PaintKind::LinearGradient,
            Paint::RadialGradient { .. } => PaintKind::RadialGradient,
        }
    }

    /// Colour components in record order. Empty for transparent and
    /// gradients.
    pub fn components(&self) -> Vec<f64> {
        match *self {
            Paint::Rgb { red, green, blue, alpha } => vec![red, green, blue, alpha],
            Paint::Cmyk { cyan, magenta, yellow, key, alpha } => vec![cyan, magenta, yellow, key, alpha],
            Paint::Grey { grey, alpha } => vec![grey, alpha],
            Paint::Hsb { hue, saturation, brightness, alpha } => vec![hue, saturation, brightness, alpha],
            _ => Vec::new(),
        }
    }

    /// Flat colour of `kind` from components in record order.
    pub fn from_components(kind: PaintKind, c: &[f64]) -> Option<Self> {
        Some(match (kind, c) {
            (PaintKind::Transparent, []) => Paint::Transparent,
            (PaintKind::Rgb, &[red, green, blue, alpha]) => Paint::Rgb { red, green, blue, alpha },
            (PaintKind::Cmyk, &[cyan, magenta, yellow, key, alpha]) => {
                Paint::Cmyk { cyan, magenta, yellow, key, alpha }
            }
            (PaintKind::Grey, &[grey, alpha]) => Paint::Grey { grey, alpha },
            (PaintKind::Hsb, &[hue, saturation, brightness, alpha]) => {
                Paint::Hsb { hue, saturation, brightness, alpha }
            }
            _ => return None,
        })
    }

    /// Number of components a flat colour of `kind` carries.
    pub fn component_count(kind: PaintKind) -> usize {
        match kind {
            PaintKind::Rgb | PaintKind::Hsb => 4,
            PaintKind::Cmyk => 5,
            PaintKind::Grey => 2,
            PaintKind::Transparent | PaintKind::LinearGradient | PaintKind::RadialGradient => 0,
        }
    }
}
