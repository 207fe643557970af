//! Marker kinds, their stable codes and what each one can do.
//!
//! The code of a kind is its position in the table and never changes: it is
//! what the codec writes. Newer format versions only ever raise the ceiling,
//! so the version a kind first appeared in follows from its code.

use std::fmt;

use crate::codec::version::{FormatVersion, VersionDescriptor};
use crate::path::Path;
use crate::shapes::{self, GeneratorFn, ShapeParams, arrows, compound, polygons, strokes};

/// Structural properties of a marker kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Reads `size`
    pub resizable: bool,
    /// Geometry depends on the pen width
    pub uses_line_width: bool,
    /// Reads the independent `width`
    pub supports_width: bool,
    /// Shape is its own mirror image about local X
    pub x_axis_symmetric: bool,
}

const R: u8 = 1;
const L: u8 = 2;
const W: u8 = 4;
const S: u8 = 8;

impl Capabilities {
    const fn flags(bits: u8) -> Self {
        Self {
            resizable: bits & R != 0,
            uses_line_width: bits & L != 0,
            supports_width: bits & W != 0,
            x_axis_symmetric: bits & S != 0,
        }
    }
}

/// Registry row of one kind.
pub struct MarkerEntry {
    pub kind: MarkerKind,
    pub name: &'static str,
    pub capabilities: Capabilities,
    pub generate: GeneratorFn,
}

macro_rules! markers {
    ($($code:literal => $variant:ident, $name:literal, $generate:path, $caps:expr;)*) => {
        /// Every marker kind, by stable code.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(u8)]
        pub enum MarkerKind {
            #[default]
            None = 0,
            $($variant = $code,)*
        }

        static ENTRIES: &[MarkerEntry] = &[
            MarkerEntry {
                kind: MarkerKind::None,
                name: "none",
                capabilities: Capabilities::flags(0),
                generate: shapes::none,
            },
            $(MarkerEntry {
                kind: MarkerKind::$variant,
                name: $name,
                capabilities: Capabilities::flags($caps),
                generate: $generate,
            },)*
        ];
    };
}

markers! {
    1 => Pointed, "pointed", arrows::pointed, L | S;
    2 => Triangle, "triangle", arrows::triangle, R | S;
    3 => Circle, "circle", polygons::circle, R | S;
    4 => Diamond, "diamond", polygons::diamond, R | S;
    5 => Square, "square", polygons::square, R | S;
    6 => Bar, "bar", strokes::bar, R | L | S;
    7 => Single, "single", strokes::single, R | L;
    8 => Round, "round", strokes::round, L | S;
    9 => Bracket, "bracket", strokes::bracket, R | L | S;
    10 => RoundBracket, "round-bracket", strokes::round_bracket, R | L | S;
    11 => Brace, "brace", strokes::brace, R | L | S;
    12 => TriangleCap, "triangle-cap", arrows::triangle_cap, R | L | S;
    13 => SquareCap, "square-cap", arrows::square_cap, L | S;
    14 => DotFilled, "dot-filled", polygons::dot_filled, R | S;
    15 => DotOpen, "dot-open", polygons::dot_open, R | L | S;
    16 => BoxFilled, "box-filled", polygons::box_filled, R | S;
    17 => BoxOpen, "box-open", polygons::box_open, R | L | S;
    18 => Cross, "cross", strokes::cross, R | L | S;
    19 => Plus, "plus", strokes::plus, R | L | S;
    20 => Star5Filled, "star5-filled", polygons::star5_filled, R | S;
    21 => Pointed60, "pointed60", arrows::pointed60, L | S;
    22 => Pointed45, "pointed45", arrows::pointed45, L | S;
    23 => Cusp, "cusp", strokes::cusp, L | S;
    24 => HookUp, "hook-up", strokes::hook_up, L;
    25 => HookDown, "hook-down", strokes::hook_down, L;
    26 => TriangleOpen, "triangle-open", polygons::triangle_open, R | L | S;
    27 => CircleOpen, "circle-open", polygons::circle_open, R | L | S;
    28 => DiamondOpen, "diamond-open", polygons::diamond_open, R | L | S;
    29 => SquareOpen, "square-open", polygons::square_open, R | L | S;
    30 => TriangleUpFilled, "triangle-up-filled", polygons::triangle_up_filled, R;
    31 => TriangleUpOpen, "triangle-up-open", polygons::triangle_up_open, R | L;
    32 => TriangleDownFilled, "triangle-down-filled", polygons::triangle_down_filled, R;
    33 => TriangleDownOpen, "triangle-down-open", polygons::triangle_down_open, R | L;
    34 => RhombusFilled, "rhombus-filled", polygons::rhombus_filled, R | S;
    35 => RhombusOpen, "rhombus-open", polygons::rhombus_open, R | L | S;
    36 => PentagonFilled, "pentagon-filled", polygons::pentagon_filled, R | S;
    37 => PentagonOpen, "pentagon-open", polygons::pentagon_open, R | L | S;
    38 => HexagonFilled, "hexagon-filled", polygons::hexagon_filled, R | S;
    39 => HexagonOpen, "hexagon-open", polygons::hexagon_open, R | L | S;
    40 => OctagonFilled, "octagon-filled", polygons::octagon_filled, R | S;
    41 => OctagonOpen, "octagon-open", polygons::octagon_open, R | L | S;
    42 => Star4Filled, "star4-filled", polygons::star4_filled, R | S;
    43 => Star4Open, "star4-open", polygons::star4_open, R | L | S;
    44 => Star5Open, "star5-open", polygons::star5_open, R | L | S;
    45 => Star6Filled, "star6-filled", polygons::star6_filled, R | S;
    46 => Star6Open, "star6-open", polygons::star6_open, R | L | S;
    47 => Asterisk, "asterisk", compound::asterisk, R | L | S;
    48 => Chevron, "chevron", strokes::chevron, R | L | S;
    49 => Tick, "tick", strokes::tick, R | L;
    50 => DoubleBar, "double-bar", strokes::double_bar, R | L | S;
    51 => HalfBarUp, "half-bar-up", strokes::half_bar_up, R | L;
    52 => HalfBarDown, "half-bar-down", strokes::half_bar_down, R | L;
    53 => SemicircleFilled, "semicircle-filled", polygons::semicircle_filled, R | S;
    54 => SemicircleOpen, "semicircle-open", polygons::semicircle_open, R | L | S;
    55 => Arc, "arc", strokes::arc, R | L | S;
    56 => Wave, "wave", strokes::wave, R | L;
    57 => Zigzag, "zigzag", strokes::zigzag, R | L;
    58 => Spike, "spike", polygons::spike, R | S;
    59 => Club, "club", compound::club, R | S;
    60 => Leaf, "leaf", compound::leaf, R | S;
    61 => Snowflake, "snowflake", compound::snowflake, R | L | S;
    62 => Flower, "flower", compound::flower, R | S;
    63 => Heart, "heart", compound::heart, R | S;
    64 => Spade, "spade", compound::spade, R | S;
    65 => Cog, "cog", compound::cog, R | S;
    66 => Sun, "sun", compound::sun, R | L | S;
    67 => Trefoil, "trefoil", compound::trefoil, R | S;
    68 => Quatrefoil, "quatrefoil", compound::quatrefoil, R | S;
    69 => Cinquefoil, "cinquefoil", compound::cinquefoil, R | S;
    70 => HalfPointedUp, "half-pointed-up", arrows::half_pointed_up, L;
    71 => HalfPointedDown, "half-pointed-down", arrows::half_pointed_down, L;
    72 => Stealth, "stealth", arrows::stealth, R | S;
    73 => Kite, "kite", arrows::kite, R | S;
    74 => Dart, "dart", arrows::dart, R | S;
    75 => EllipseFilled, "ellipse-filled", polygons::ellipse_filled, R | W | S;
    76 => EllipseOpen, "ellipse-open", polygons::ellipse_open, R | W | L | S;
    77 => RectangleFilled, "rectangle-filled", polygons::rectangle_filled, R | W | S;
    78 => RectangleOpen, "rectangle-open", polygons::rectangle_open, R | W | L | S;
    79 => Lens, "lens", polygons::lens, R | S;
    80 => CircleCrossed, "circle-crossed", compound::circle_crossed, R | L | S;
    81 => CirclePlus, "circle-plus", compound::circle_plus, R | L | S;
    82 => CircleDot, "circle-dot", compound::circle_dot, R | L | S;
    83 => BoxCrossed, "box-crossed", compound::box_crossed, R | L | S;
    84 => BoxPlus, "box-plus", compound::box_plus, R | L | S;
    85 => BoxDot, "box-dot", compound::box_dot, R | L | S;
    86 => Hexagram, "hexagram", compound::hexagram, R | S;
    87 => Octagram, "octagram", compound::octagram, R | S;
    88 => Crescent, "crescent", polygons::crescent, R | S;
    89 => Teardrop, "teardrop", polygons::teardrop, R | S;
    90 => Fletching, "fletching", strokes::fletching, R | L | S;
    91 => Crowsfoot, "crowsfoot", strokes::crowsfoot, R | L | S;
    92 => CrowsfootBar, "crowsfoot-bar", compound::crowsfoot_bar, R | L | S;
    93 => CrowsfootCircle, "crowsfoot-circle", compound::crowsfoot_circle, R | L | S;
    94 => DiamondWide, "diamond-wide", polygons::diamond_wide, R | W | S;
}

impl MarkerKind {
    /// Number of codes in use, including `None`.
    pub const COUNT: usize = 95;

    pub fn from_code(code: u8) -> Option<Self> {
        ENTRIES.get(code as usize).map(|e| e.kind)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Every visible kind in code order.
    pub fn all() -> impl Iterator<Item = MarkerKind> {
        ENTRIES.iter().skip(1).map(|e| e.kind)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ENTRIES.iter().find(|e| e.name == name).map(|e| e.kind)
    }

    pub fn entry(self) -> &'static MarkerEntry {
        // Table rows sit at their code.
        &ENTRIES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn capabilities(self) -> Capabilities {
        self.entry().capabilities
    }

    pub fn is_none(self) -> bool {
        self == MarkerKind::None
    }

    /// Basic shape for these parameters, before any placement.
    pub fn generate(self, params: &ShapeParams) -> Path {
        (self.entry().generate)(params)
    }

    /// Oldest format version able to carry this kind.
    pub fn introduced_in(self) -> FormatVersion {
        VersionDescriptor::all()
            .iter()
            .find(|d| self.code() < d.marker_ceiling)
            .map(|d| d.version)
            .unwrap_or(FormatVersion::LATEST)
    }

    pub fn is_available_in(self, version: FormatVersion) -> bool {
        self.code() < version.descriptor().marker_ceiling
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_sit_at_their_code() {
        assert_eq!(ENTRIES.len(), MarkerKind::COUNT);
        for (code, entry) in ENTRIES.iter().enumerate() {
            assert_eq!(entry.kind.code() as usize, code, "{}", entry.name);
        }
    }

    #[test]
    fn names_are_unique_and_resolve() {
        for kind in MarkerKind::all() {
            assert_eq!(MarkerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(MarkerKind::from_name("nope"), None);
    }

    #[test]
    fn codes_beyond_the_table_are_rejected() {
        assert_eq!(MarkerKind::from_code(94), Some(MarkerKind::DiamondWide));
        assert_eq!(MarkerKind::from_code(95), None);
        assert_eq!(MarkerKind::from_code(255), None);
    }

    #[test]
    fn introduction_follows_ceilings() {
        assert_eq!(MarkerKind::Single.introduced_in(), FormatVersion::V1_0);
        assert_eq!(MarkerKind::Round.introduced_in(), FormatVersion::V1_3);
        assert_eq!(MarkerKind::Pointed45.introduced_in(), FormatVersion::V1_4);
        assert_eq!(MarkerKind::CircleCrossed.introduced_in(), FormatVersion::V1_6);
        assert_eq!(MarkerKind::Crowsfoot.introduced_in(), FormatVersion::V1_8);
    }

    #[test]
    fn width_capable_kinds() {
        let with_width: Vec<_> = MarkerKind::all().filter(|k| k.capabilities().supports_width).collect();
        assert_eq!(
            with_width,
            [
                MarkerKind::EllipseFilled,
                MarkerKind::EllipseOpen,
                MarkerKind::RectangleFilled,
                MarkerKind::RectangleOpen,
                MarkerKind::DiamondWide,
            ]
        );
    }

    #[test]
    fn none_draws_nothing() {
        assert!(MarkerKind::None.generate(&ShapeParams::new(1.0, 5.0)).is_empty());
    }
}
