//! Marker configuration and the composite chain.
//!
//! A [`MarkerConfig`] owns its composite outright. A composite never looks
//! back at its parent; instead every mutation of a parent pushes a fresh
//! [`ParentLink`] snapshot down the chain and each level re-derives its
//! offsets from it. Derived offsets come from one pure function,
//! [`derive_offsets`].

use crate::errors::MarkerError;
use crate::log::trace;
use crate::paint::Paint;
use crate::path::Path;
use crate::registry::{Capabilities, MarkerKind};
use crate::shapes::ShapeParams;
use crate::shapes::defaults::{MARKER_SIZE, REPEAT_GAP};
use crate::types::{Angle, Length, NumericError};

/// Placement values a composite reads from its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParentLink {
    pub pen_width: Length,
    pub overlay: bool,
    pub offset: Length,
    pub repeat_offset: Length,
    /// Width of the parent's basic shape, in bp
    pub basic_width: f64,
    /// Width of the parent's primary path (reversal and repeats applied), in bp
    pub primary_width: f64,
}

/// Field values of one decoded record, already validated.
#[derive(Debug, Default)]
pub(crate) struct RecordFields {
    pub size: Length,
    pub width: Option<Length>,
    pub repeated: u8,
    pub reversed: bool,
    pub auto_orient: bool,
    pub angle: Angle,
    pub fill: Option<Paint>,
    pub overlay: bool,
    pub offset: Option<Length>,
    pub repeat_offset: Option<Length>,
}

/// Offsets a marker would have if the user had not overridden them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedOffsets {
    pub offset: Length,
    pub repeat_offset: Length,
}

/// Full configuration of the marker at one end of a path.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerConfig {
    kind: MarkerKind,
    pen_width: Length,
    size: Length,
    width: Option<Length>,
    repeated: u8,
    reversed: bool,
    auto_orient: bool,
    angle: Angle,
    fill: Option<Paint>,
    overlay: bool,
    offset: Length,
    user_offset: bool,
    repeat_offset: Length,
    user_repeat_offset: bool,
    composite: Option<Box<MarkerConfig>>,
    parent: Option<ParentLink>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self::none(Length::bp(1.0))
    }
}

fn numeric(field: &'static str) -> impl Fn(NumericError) -> MarkerError {
    move |source| MarkerError::Numeric { field, source }
}

fn check_length(field: &'static str, len: Length) -> Result<Length, MarkerError> {
    Length::try_new(len.value, len.unit).map_err(numeric(field))
}

fn check_non_negative(field: &'static str, len: Length) -> Result<Length, MarkerError> {
    Length::try_non_negative(len.value, len.unit).map_err(numeric(field))
}

impl MarkerConfig {
    /// The "no marker" configuration for a stroke of `pen_width`.
    pub fn none(pen_width: Length) -> Self {
        Self {
            kind: MarkerKind::None,
            pen_width,
            size: Length::bp(MARKER_SIZE),
            width: None,
            repeated: 1,
            reversed: false,
            auto_orient: true,
            angle: Angle::ZERO,
            fill: None,
            overlay: false,
            offset: Length::ZERO,
            user_offset: false,
            repeat_offset: Length::ZERO,
            user_repeat_offset: false,
            composite: None,
            parent: None,
        }
    }

    /// A marker of `kind` with default parameters.
    pub fn new(kind: MarkerKind, pen_width: Length) -> Self {
        let mut cfg = Self::none(pen_width);
        cfg.kind = kind;
        cfg.refresh();
        cfg
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn is_none(&self) -> bool {
        self.kind.is_none()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn pen_width(&self) -> Length {
        self.pen_width
    }

    pub fn size(&self) -> Length {
        self.size
    }

    pub fn width(&self) -> Option<Length> {
        self.width
    }

    pub fn repeated(&self) -> u8 {
        self.repeated
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn auto_orient(&self) -> bool {
        self.auto_orient
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn fill(&self) -> Option<&Paint> {
        self.fill.as_ref()
    }

    pub fn overlay(&self) -> bool {
        self.overlay
    }

    /// Effective offset along local X. A root or overlay composite is moved
    /// forward by it; a composite drawn after its parent sits this far
    /// behind the vertex.
    pub fn offset(&self) -> Length {
        self.offset
    }

    pub fn has_user_offset(&self) -> bool {
        self.user_offset
    }

    /// Effective distance between repeated copies.
    pub fn repeat_offset(&self) -> Length {
        self.repeat_offset
    }

    pub fn has_user_repeat_offset(&self) -> bool {
        self.user_repeat_offset
    }

    pub fn composite(&self) -> Option<&MarkerConfig> {
        self.composite.as_deref()
    }

    /// Edit the composite in place, returning `None` if there is none.
    ///
    /// Afterwards the parent's pen width and offsets are pushed down again,
    /// and a composite switched to kind none is dropped.
    pub fn update_composite<T>(&mut self, f: impl FnOnce(&mut MarkerConfig) -> T) -> Option<T> {
        let out = f(self.composite.as_deref_mut()?);
        if self.composite.as_deref().is_some_and(MarkerConfig::is_none) {
            self.composite = None;
        }
        self.refresh();
        Some(out)
    }

    pub fn parent_link(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    /// This marker followed by every composite below it.
    pub fn chain(&self) -> impl Iterator<Item = &MarkerConfig> {
        std::iter::successors(Some(self), |cfg| cfg.composite())
    }

    /// Fill to draw with: the override, or the paint of the line.
    pub fn resolve_fill(&self, line_paint: &Paint) -> Paint {
        self.fill.clone().unwrap_or_else(|| line_paint.clone())
    }

    // ------------------------------------------------------------------
    // Setters
    //
    // Setters on a marker of kind none are no-ops: its fields stay at their
    // defaults.
    // ------------------------------------------------------------------

    /// Switch kind. Switching to none resets every field and drops the
    /// composite.
    pub fn set_kind(&mut self, kind: MarkerKind) {
        if kind.is_none() {
            let parent = self.parent;
            *self = Self::none(self.pen_width);
            self.parent = parent;
            return;
        }
        self.kind = kind;
        self.refresh();
    }

    pub fn set_pen_width(&mut self, pen_width: Length) -> Result<(), MarkerError> {
        self.pen_width = check_non_negative("pen width", pen_width)?;
        self.refresh();
        Ok(())
    }

    pub fn set_size(&mut self, size: Length) -> Result<(), MarkerError> {
        let size = check_non_negative("size", size)?;
        if !self.is_none() {
            self.size = size;
            self.refresh();
        }
        Ok(())
    }

    /// Independent width. Stored for every kind, read only by kinds that
    /// support it.
    pub fn set_width(&mut self, width: Option<Length>) -> Result<(), MarkerError> {
        let width = width.map(|w| check_non_negative("width", w)).transpose()?;
        if !self.is_none() {
            self.width = width;
            self.refresh();
        }
        Ok(())
    }

    pub fn set_repeated(&mut self, repeated: u8) -> Result<(), MarkerError> {
        if repeated < 1 {
            return Err(MarkerError::InvalidRepeatCount { count: repeated });
        }
        if !self.is_none() {
            self.repeated = repeated;
            self.refresh();
        }
        Ok(())
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        if !self.is_none() {
            self.reversed = reversed;
            self.refresh();
        }
    }

    /// Turning auto-orientation on clears the fixed angle.
    pub fn set_auto_orient(&mut self, auto_orient: bool) {
        if !self.is_none() {
            self.auto_orient = auto_orient;
            if auto_orient {
                self.angle = Angle::ZERO;
            }
        }
    }

    /// Fix the orientation at `angle`. Turns auto-orientation off.
    pub fn set_angle(&mut self, angle: Angle) -> Result<(), MarkerError> {
        if !angle.is_finite() {
            return Err(MarkerError::Numeric {
                field: "angle",
                source: if angle.value.is_nan() { NumericError::NaN } else { NumericError::Infinite },
            });
        }
        if !self.is_none() {
            self.angle = angle;
            self.auto_orient = false;
        }
        Ok(())
    }

    /// Fill override. A transparent override means "use the line paint" and
    /// is stored as `None`.
    pub fn set_fill(&mut self, fill: Option<Paint>) {
        if !self.is_none() {
            self.fill = fill.filter(|p| *p != Paint::Transparent);
        }
    }

    pub fn set_overlay(&mut self, overlay: bool) {
        if !self.is_none() {
            self.overlay = overlay;
            self.refresh();
        }
    }

    /// `Some` freezes the offset at that value; `None` returns to the
    /// derived offset.
    pub fn set_offset(&mut self, offset: Option<Length>) -> Result<(), MarkerError> {
        let offset = offset.map(|o| check_length("offset", o)).transpose()?;
        if !self.is_none() {
            self.user_offset = offset.is_some();
            if let Some(offset) = offset {
                self.offset = offset;
            }
            self.refresh();
        }
        Ok(())
    }

    /// As [`set_offset`](Self::set_offset), for the repeat distance.
    pub fn set_repeat_offset(&mut self, repeat_offset: Option<Length>) -> Result<(), MarkerError> {
        let repeat_offset = repeat_offset.map(|o| check_length("repeat offset", o)).transpose()?;
        if !self.is_none() {
            self.user_repeat_offset = repeat_offset.is_some();
            if let Some(repeat_offset) = repeat_offset {
                self.repeat_offset = repeat_offset;
            }
            self.refresh();
        }
        Ok(())
    }

    /// Attach, replace or clear the composite. A composite of kind none
    /// clears the slot.
    pub fn set_composite(&mut self, composite: Option<MarkerConfig>) -> Result<(), MarkerError> {
        let composite = composite.filter(|c| !c.is_none());
        if composite.is_some() && self.is_none() {
            return Err(MarkerError::CompositeOnNone);
        }
        self.composite = composite.map(Box::new);
        self.refresh();
        Ok(())
    }

    /// Detach the composite, returning it as a standalone marker.
    pub fn take_composite(&mut self) -> Option<MarkerConfig> {
        let mut composite = *self.composite.take()?;
        composite.parent = None;
        composite.refresh();
        Some(composite)
    }

    /// Assemble a decoded chain, root first, deriving offsets once per level.
    pub(crate) fn from_records(pen_width: Length, records: Vec<(MarkerKind, RecordFields)>) -> Self {
        let mut chain: Option<MarkerConfig> = None;
        for (kind, record) in records.into_iter().rev() {
            let mut cfg = Self::from_record(kind, pen_width, record);
            if !cfg.is_none() {
                cfg.composite = chain.map(Box::new);
            }
            chain = Some(cfg);
        }
        let mut root = chain.unwrap_or_else(|| Self::none(pen_width));
        root.refresh();
        root
    }

    fn from_record(kind: MarkerKind, pen_width: Length, record: RecordFields) -> Self {
        let mut cfg = Self::none(pen_width);
        if kind.is_none() {
            return cfg;
        }
        cfg.kind = kind;
        cfg.size = record.size;
        cfg.width = record.width;
        cfg.repeated = record.repeated;
        cfg.reversed = record.reversed;
        cfg.auto_orient = record.auto_orient;
        cfg.angle = if record.auto_orient { Angle::ZERO } else { record.angle };
        cfg.fill = record.fill.filter(|p| *p != Paint::Transparent);
        cfg.overlay = record.overlay;
        cfg.user_offset = record.offset.is_some();
        cfg.offset = record.offset.unwrap_or(Length::ZERO);
        cfg.user_repeat_offset = record.repeat_offset.is_some();
        cfg.repeat_offset = record.repeat_offset.unwrap_or(Length::ZERO);
        cfg
    }

    // ------------------------------------------------------------------
    // Shapes
    // ------------------------------------------------------------------

    /// Generator parameters in bp. Width is passed only to kinds that read it.
    pub fn shape_params(&self) -> ShapeParams {
        let width = if self.capabilities().supports_width {
            self.width.map(Length::to_bp)
        } else {
            None
        };
        ShapeParams {
            pen_width: self.pen_width.to_bp(),
            size: self.size.to_bp(),
            width,
        }
    }

    /// Generator output, before reversal or repetition.
    pub fn basic_path(&self) -> Path {
        self.kind.generate(&self.shape_params())
    }

    /// The basic shape mirrored if reversed and repeated backward along X.
    pub fn primary_path(&self) -> Path {
        let basic = self.basic_path();
        primary_from_basic(&basic, self.reversed, self.repeated, self.repeat_offset.to_bp())
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// Re-derive non-frozen offsets down the whole chain, one level at a
    /// time.
    fn refresh(&mut self) {
        let mut level = Some(self);
        while let Some(cfg) = level {
            level = cfg.refresh_level();
        }
    }

    /// Re-derive this level's offsets and hand the composite a fresh
    /// snapshot. Returns the composite, which still has to be refreshed.
    fn refresh_level(&mut self) -> Option<&mut MarkerConfig> {
        if self.is_none() {
            return None;
        }
        let basic = self.basic_path();
        let derived = derive_offsets(self, &basic, self.parent.as_ref());
        if !self.user_offset {
            self.offset = derived.offset;
        }
        if !self.user_repeat_offset {
            self.repeat_offset = derived.repeat_offset;
        }
        trace!(kind = %self.kind, offset = %self.offset, repeat_offset = %self.repeat_offset, "derived offsets");

        if self.composite.is_none() {
            return None;
        }
        let primary =
            primary_from_basic(&basic, self.reversed, self.repeated, self.repeat_offset.to_bp());
        let link = ParentLink {
            pen_width: self.pen_width,
            overlay: self.overlay,
            offset: self.offset,
            repeat_offset: self.repeat_offset,
            basic_width: basic.bounding_box().width(),
            primary_width: primary.bounding_box().width(),
        };
        let composite = self.composite.as_deref_mut()?;
        composite.pen_width = link.pen_width;
        composite.parent = Some(link);
        Some(composite)
    }
}

fn primary_from_basic(basic: &Path, reversed: bool, repeated: u8, repeat_offset: f64) -> Path {
    let basic = if reversed { basic.reflected_y_axis() } else { basic.clone() };
    let mut primary = basic.clone();
    for i in 1..repeated {
        primary.extend(&basic.translated(glam::DVec2::new(-(i as f64) * repeat_offset, 0.0)));
    }
    primary
}

/// Offsets of `cfg` given its basic shape and, for a composite, its parent.
///
/// - root: zero, or for a reversed marker the shift that keeps the mirrored
///   shape's forward extent where the plain one was
/// - composite over its parent: the parent's offset
/// - composite after its parent: the distance behind the vertex that clears
///   the parent's repeats, less the parent's own forward shift
///
/// The repeat distance is always the basic width plus half a pen.
pub fn derive_offsets(cfg: &MarkerConfig, basic: &Path, parent: Option<&ParentLink>) -> DerivedOffsets {
    let unit = cfg.size.unit;
    let bb = basic.bounding_box();
    let pen = cfg.pen_width.to_bp();

    let repeat_offset = Length::from_bp(bb.width() + REPEAT_GAP * pen, unit);

    let offset_bp = match parent {
        Some(link) if link.overlay => link.offset.to_bp(),
        Some(link) => {
            link.primary_width - link.basic_width + link.repeat_offset.to_bp() - link.offset.to_bp()
        }
        None if cfg.reversed && !bb.is_empty() => bb.min.x + bb.max.x,
        None => 0.0,
    };

    DerivedOffsets {
        offset: Length::from_bp(offset_bp, unit),
        repeat_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LengthUnit;

    fn triangle() -> MarkerConfig {
        MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0))
    }

    // ========================================================================
    // Setters and invariants
    // ========================================================================

    #[test]
    fn repeat_count_zero_is_rejected() {
        let mut cfg = triangle();
        assert_eq!(cfg.set_repeated(0), Err(MarkerError::InvalidRepeatCount { count: 0 }));
        assert_eq!(cfg.repeated(), 1);
    }

    #[test]
    fn non_finite_size_is_rejected() {
        let mut cfg = triangle();
        let err = cfg.set_size(Length::bp(f64::NAN)).unwrap_err();
        assert!(matches!(err, MarkerError::Numeric { field: "size", source: NumericError::NaN }));
        assert_eq!(cfg.size(), Length::bp(MARKER_SIZE));
    }

    #[test]
    fn composite_on_none_is_rejected_without_mutation() {
        let mut none = MarkerConfig::default();
        let before = none.clone();
        assert_eq!(none.set_composite(Some(triangle())), Err(MarkerError::CompositeOnNone));
        assert_eq!(none, before);
    }

    #[test]
    fn none_composite_clears_the_slot() {
        let mut cfg = triangle();
        cfg.set_composite(Some(triangle())).unwrap();
        assert!(cfg.composite().is_some());
        cfg.set_composite(Some(MarkerConfig::default())).unwrap();
        assert!(cfg.composite().is_none());
    }

    #[test]
    fn switching_to_none_resets() {
        let mut cfg = triangle();
        cfg.set_repeated(3).unwrap();
        cfg.set_composite(Some(triangle())).unwrap();
        cfg.set_kind(MarkerKind::None);
        assert_eq!(cfg, MarkerConfig::none(Length::bp(1.0)));
    }

    #[test]
    fn width_is_only_passed_to_capable_kinds() {
        let mut tri = triangle();
        tri.set_width(Some(Length::bp(3.0))).unwrap();
        assert_eq!(tri.width(), Some(Length::bp(3.0)));
        assert_eq!(tri.shape_params().width, None);

        let mut ellipse = MarkerConfig::new(MarkerKind::EllipseFilled, Length::bp(1.0));
        ellipse.set_width(Some(Length::bp(3.0))).unwrap();
        assert_eq!(ellipse.shape_params().width, Some(3.0));
    }

    // ========================================================================
    // Derived offsets
    // ========================================================================

    #[test]
    fn root_offsets() {
        let cfg = triangle();
        assert_eq!(cfg.offset(), Length::ZERO);
        // Basic width 5 plus half a pen.
        assert_eq!(cfg.repeat_offset(), Length::bp(5.5));
    }

    #[test]
    fn reversed_marker_is_pulled_back_behind_the_vertex() {
        let mut cfg = triangle();
        cfg.set_reversed(true);
        assert_eq!(cfg.offset(), Length::bp(-5.0));
    }

    #[test]
    fn user_offset_is_frozen_until_cleared() {
        let mut cfg = triangle();
        cfg.set_offset(Some(Length::new(2.0, LengthUnit::Mm))).unwrap();
        cfg.set_reversed(true);
        assert_eq!(cfg.offset(), Length::new(2.0, LengthUnit::Mm));
        cfg.set_offset(None).unwrap();
        assert_eq!(cfg.offset(), Length::bp(-5.0));
    }

    #[test]
    fn composite_follows_parent_pen_width() {
        let mut cfg = triangle();
        cfg.set_composite(Some(MarkerConfig::new(MarkerKind::Bar, Length::bp(9.0)))).unwrap();
        assert_eq!(cfg.composite().map(|c| c.pen_width()), Some(Length::bp(1.0)));
        cfg.set_pen_width(Length::bp(2.0)).unwrap();
        assert_eq!(cfg.composite().map(|c| c.pen_width()), Some(Length::bp(2.0)));
    }

    #[test]
    fn composite_sits_past_parent_repeats() {
        let mut cfg = triangle();
        cfg.set_repeated(2).unwrap();
        cfg.set_composite(Some(triangle())).unwrap();
        // primary 10.5 wide, basic 5, repeat offset 5.5, parent offset 0
        let offset = cfg.composite().map(|c| c.offset().to_bp());
        assert!((offset.unwrap() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn composite_offset_takes_off_the_parent_offset() {
        let mut cfg = triangle();
        cfg.set_offset(Some(Length::bp(2.0))).unwrap();
        cfg.set_composite(Some(triangle())).unwrap();
        // 5 - 5 + 5.5 - 2
        assert_eq!(cfg.composite().map(|c| c.offset()), Some(Length::bp(3.5)));
        cfg.set_offset(Some(Length::bp(-2.0))).unwrap();
        assert_eq!(cfg.composite().map(|c| c.offset()), Some(Length::bp(7.5)));
    }

    #[test]
    fn overlay_composite_shares_parent_offset() {
        let mut cfg = triangle();
        cfg.set_composite(Some(triangle())).unwrap();
        cfg.set_overlay(true);
        cfg.set_reversed(true);
        let parent = cfg.offset();
        assert_eq!(cfg.composite().map(|c| c.offset()), Some(parent));
    }

    #[test]
    fn composite_user_offset_wins() {
        let mut child = triangle();
        child.set_offset(Some(Length::bp(1.25))).unwrap();
        let mut cfg = triangle();
        cfg.set_composite(Some(child)).unwrap();
        cfg.set_repeated(4).unwrap();
        assert_eq!(cfg.composite().map(|c| c.offset()), Some(Length::bp(1.25)));
    }

    #[test]
    fn composite_switched_to_none_is_dropped() {
        let mut cfg = triangle();
        cfg.set_composite(Some(triangle())).unwrap();
        assert_eq!(cfg.update_composite(|c| c.set_kind(MarkerKind::None)), Some(()));
        assert!(cfg.composite().is_none());
        assert_eq!(cfg, triangle());
    }

    #[test]
    fn composite_edits_keep_the_parent_pen() {
        let mut cfg = triangle();
        cfg.set_composite(Some(triangle())).unwrap();
        cfg.update_composite(|c| c.set_pen_width(Length::bp(4.0))).unwrap().unwrap();
        assert_eq!(cfg.composite().map(|c| c.pen_width()), Some(Length::bp(1.0)));

        cfg.update_composite(|c| c.set_repeated(3)).unwrap().unwrap();
        assert_eq!(cfg.composite().map(|c| c.repeated()), Some(3));
        assert_eq!(cfg.composite().map(|c| c.offset()), Some(Length::bp(5.5)));
    }

    #[test]
    fn update_without_composite_is_none() {
        let mut cfg = triangle();
        assert_eq!(cfg.update_composite(|c| c.kind()), None);
    }

    #[test]
    fn taken_composite_is_a_root_again() {
        let mut cfg = triangle();
        cfg.set_repeated(2).unwrap();
        cfg.set_composite(Some(triangle())).unwrap();
        let child = cfg.take_composite().unwrap();
        assert_eq!(child, triangle());
        assert!(cfg.composite().is_none());
    }

    #[test]
    fn chain_walks_every_level() {
        let mut mid = triangle();
        mid.set_composite(Some(MarkerConfig::new(MarkerKind::Bar, Length::bp(1.0)))).unwrap();
        let mut cfg = triangle();
        cfg.set_composite(Some(mid)).unwrap();
        let kinds: Vec<_> = cfg.chain().map(|c| c.kind()).collect();
        assert_eq!(kinds, [MarkerKind::Triangle, MarkerKind::Triangle, MarkerKind::Bar]);
    }

    #[test]
    fn fill_falls_back_to_line_paint() {
        let mut cfg = triangle();
        assert_eq!(cfg.resolve_fill(&Paint::grey(0.5)), Paint::grey(0.5));
        cfg.set_fill(Some(Paint::rgb(1.0, 0.0, 0.0)));
        assert_eq!(cfg.resolve_fill(&Paint::grey(0.5)), Paint::rgb(1.0, 0.0, 0.0));
        cfg.set_fill(Some(Paint::Transparent));
        assert_eq!(cfg.fill(), None);
    }

    #[test]
    fn fixed_angle_and_auto_orient_exclude_each_other() {
        let mut cfg = triangle();
        cfg.set_angle(Angle::degrees(30.0)).unwrap();
        assert!(!cfg.auto_orient());
        cfg.set_auto_orient(true);
        assert_eq!(cfg.angle(), Angle::ZERO);
    }
}
