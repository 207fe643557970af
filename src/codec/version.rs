//! Format versions and the record layout of each.
//!
//! Everything that differs between versions lives in [`VERSIONS`]. The
//! reader and writer walk a descriptor's `layout` and never compare version
//! numbers themselves, so a new version is a new row.

use std::fmt;

use crate::paint::PaintKind;

/// A historical format version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V1_6,
    V1_7,
    V1_8,
    V2_0,
    V2_1,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 11] = [
        FormatVersion::V1_0,
        FormatVersion::V1_1,
        FormatVersion::V1_2,
        FormatVersion::V1_3,
        FormatVersion::V1_4,
        FormatVersion::V1_5,
        FormatVersion::V1_6,
        FormatVersion::V1_7,
        FormatVersion::V1_8,
        FormatVersion::V2_0,
        FormatVersion::V2_1,
    ];

    pub const LATEST: FormatVersion = FormatVersion::V2_1;

    pub fn descriptor(self) -> &'static VersionDescriptor {
        // Rows are in declaration order.
        &VERSIONS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn from_label(label: &str) -> Option<Self> {
        VERSIONS.iter().find(|d| d.label == label).map(|d| d.version)
    }

    pub fn marker_ceiling(self) -> u8 {
        self.descriptor().marker_ceiling
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How lengths and angles are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberEncoding {
    /// Bare f64: lengths in bp, angles in radians
    Plain,
    /// f64 followed by a unit byte
    WithUnit,
}

/// One step of the record state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Size,
    HasWidth,
    /// Present only after a set `HasWidth`
    Width,
    Repeated,
    Reversed,
    AutoOrient,
    /// Present only when auto-orientation is off
    Angle,
    Fill,
    Overlay,
    /// Written from 1.4 on whether or not `Overlay` is set
    UserOffset,
    /// Present only after a set `UserOffset`
    Offset,
    UserRepeatOffset,
    /// Present only after a set `UserRepeatOffset`
    RepeatOffset,
    /// Ends the record; the composite follows as the next record
    Composite,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Kind => "marker kind",
            Field::Size => "size",
            Field::HasWidth => "width flag",
            Field::Width => "width",
            Field::Repeated => "repeat count",
            Field::Reversed => "reversed flag",
            Field::AutoOrient => "auto-orient flag",
            Field::Angle => "angle",
            Field::Fill => "fill paint",
            Field::Overlay => "overlay flag",
            Field::UserOffset => "user offset flag",
            Field::Offset => "offset",
            Field::UserRepeatOffset => "user repeat offset flag",
            Field::RepeatOffset => "repeat offset",
            Field::Composite => "composite",
        };
        f.write_str(name)
    }
}

/// Layout and limits of one format version.
#[derive(Debug)]
pub struct VersionDescriptor {
    pub version: FormatVersion,
    pub label: &'static str,
    /// Exclusive upper bound on marker codes
    pub marker_ceiling: u8,
    pub number_encoding: NumberEncoding,
    pub paint_kinds: &'static [PaintKind],
    pub layout: &'static [Field],
}

impl VersionDescriptor {
    pub fn all() -> &'static [VersionDescriptor] {
        &VERSIONS
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.layout.contains(&field)
    }

    pub fn supports_paint(&self, kind: PaintKind) -> bool {
        self.paint_kinds.contains(&kind)
    }
}

use Field::*;

const LAYOUT_BASE: &[Field] =
    &[Kind, Size, Repeated, Reversed, AutoOrient, Angle, Fill, Overlay, Composite];

const LAYOUT_OFFSETS: &[Field] = &[
    Kind, Size, Repeated, Reversed, AutoOrient, Angle, Fill, Overlay, UserOffset, Offset,
    UserRepeatOffset, RepeatOffset, Composite,
];

const LAYOUT_WIDTH: &[Field] = &[
    Kind, Size, HasWidth, Width, Repeated, Reversed, AutoOrient, Angle, Fill, Overlay, UserOffset,
    Offset, UserRepeatOffset, RepeatOffset, Composite,
];

const PAINT_EARLY: &[PaintKind] = &[
    PaintKind::Transparent,
    PaintKind::Rgb,
    PaintKind::Cmyk,
    PaintKind::LinearGradient,
];

const PAINT_ALL: &[PaintKind] = &[
    PaintKind::Transparent,
    PaintKind::Rgb,
    PaintKind::Cmyk,
    PaintKind::Grey,
    PaintKind::Hsb,
    PaintKind::LinearGradient,
    PaintKind::RadialGradient,
];

macro_rules! version {
    ($version:ident, $label:literal, $ceiling:literal, $numbers:ident, $paint:ident, $layout:ident) => {
        VersionDescriptor {
            version: FormatVersion::$version,
            label: $label,
            marker_ceiling: $ceiling,
            number_encoding: NumberEncoding::$numbers,
            paint_kinds: $paint,
            layout: $layout,
        }
    };
}

static VERSIONS: [VersionDescriptor; 11] = [
    version!(V1_0, "1.0", 8, Plain, PAINT_EARLY, LAYOUT_BASE),
    version!(V1_1, "1.1", 8, Plain, PAINT_EARLY, LAYOUT_BASE),
    version!(V1_2, "1.2", 8, Plain, PAINT_EARLY, LAYOUT_BASE),
    version!(V1_3, "1.3", 22, Plain, PAINT_ALL, LAYOUT_BASE),
    version!(V1_4, "1.4", 80, Plain, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V1_5, "1.5", 80, Plain, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V1_6, "1.6", 91, Plain, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V1_7, "1.7", 91, Plain, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V1_8, "1.8", 95, WithUnit, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V2_0, "2.0", 95, WithUnit, PAINT_ALL, LAYOUT_OFFSETS),
    version!(V2_1, "2.1", 95, WithUnit, PAINT_ALL, LAYOUT_WIDTH),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_match_their_version() {
        for v in FormatVersion::ALL {
            assert_eq!(v.descriptor().version, v);
            assert_eq!(FormatVersion::from_label(v.label()), Some(v));
        }
    }

    #[test]
    fn ceilings_never_drop() {
        let ceilings: Vec<u8> = FormatVersion::ALL.iter().map(|v| v.marker_ceiling()).collect();
        assert!(ceilings.windows(2).all(|w| w[0] <= w[1]));
        let mut distinct = ceilings.clone();
        distinct.dedup();
        assert_eq!(distinct, [8, 22, 80, 91, 95]);
    }

    #[test]
    fn field_gates() {
        assert!(!FormatVersion::V1_3.descriptor().has_field(Field::UserOffset));
        assert!(FormatVersion::V1_4.descriptor().has_field(Field::UserOffset));
        assert!(!FormatVersion::V2_0.descriptor().has_field(Field::Width));
        assert!(FormatVersion::V2_1.descriptor().has_field(Field::Width));
        assert_eq!(FormatVersion::V1_7.descriptor().number_encoding, NumberEncoding::Plain);
        assert_eq!(FormatVersion::V1_8.descriptor().number_encoding, NumberEncoding::WithUnit);
    }
}
