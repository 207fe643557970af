//! Paint records: a tag byte followed by big-endian f64 components.
//! Gradients carry two flat-colour stops and a direction byte.

use std::io::{Read, Write};

use super::reader::RecordReader;
use super::version::Field;
use super::writer::RecordWriter;
use crate::errors::{EncodeError, FormatError, FormatErrorKind};
use crate::paint::{GradientDirection, Paint, PaintKind, RadialCentre};

pub(crate) fn read_paint<R: Read>(r: &mut RecordReader<'_, R>) -> Result<Paint, FormatError> {
    r.begin();
    read_paint_inner(r, true)
}

fn read_paint_inner<R: Read>(r: &mut RecordReader<'_, R>, allow_gradient: bool) -> Result<Paint, FormatError> {
    let field = Field::Fill;
    let tag = r.read_u8(field)?;
    let kind = PaintKind::from_tag(tag).ok_or_else(|| r.error(FormatErrorKind::UnknownPaintTag { tag }, field))?;
    if !r.desc.supports_paint(kind) {
        return Err(r.error(FormatErrorKind::PaintNotInVersion { kind }, field));
    }
    if kind.is_gradient() && !allow_gradient {
        return Err(r.error(FormatErrorKind::NestedGradient, field));
    }

    match kind {
        PaintKind::LinearGradient => {
            let start = Box::new(read_paint_inner(r, false)?);
            let end = Box::new(read_paint_inner(r, false)?);
            let id = r.read_u8(field)?;
            let direction = GradientDirection::from_id(id)
                .ok_or_else(|| r.error(FormatErrorKind::InvalidGradientDirection { id }, field))?;
            Ok(Paint::LinearGradient { start, end, direction })
        }
        PaintKind::RadialGradient => {
            let start = Box::new(read_paint_inner(r, false)?);
            let end = Box::new(read_paint_inner(r, false)?);
            let id = r.read_u8(field)?;
            let centre = RadialCentre::from_id(id)
                .ok_or_else(|| r.error(FormatErrorKind::InvalidGradientDirection { id }, field))?;
            Ok(Paint::RadialGradient { start, end, centre })
        }
        _ => {
            let mut components = Vec::with_capacity(Paint::component_count(kind));
            for _ in 0..Paint::component_count(kind) {
                components.push(r.read_f64(field)?);
            }
            Paint::from_components(kind, &components)
                .ok_or_else(|| r.error(FormatErrorKind::UnknownPaintTag { tag }, field))
        }
    }
}

pub(crate) fn write_paint<W: Write>(w: &mut RecordWriter<'_, W>, paint: &Paint) -> Result<(), EncodeError> {
    write_paint_inner(w, paint, true)
}

fn write_paint_inner<W: Write>(
    w: &mut RecordWriter<'_, W>,
    paint: &Paint,
    allow_gradient: bool,
) -> Result<(), EncodeError> {
    let field = Field::Fill;
    let kind = paint.kind();
    if !w.desc.supports_paint(kind) {
        return Err(EncodeError::PaintNotInVersion { kind, version: w.version });
    }
    if kind.is_gradient() && !allow_gradient {
        return Err(EncodeError::NestedGradient);
    }
    w.write_u8(field, kind.tag())?;
    match paint {
        Paint::LinearGradient { start, end, direction } => {
            write_paint_inner(w, start, false)?;
            write_paint_inner(w, end, false)?;
            w.write_u8(field, direction.id())
        }
        Paint::RadialGradient { start, end, centre } => {
            write_paint_inner(w, start, false)?;
            write_paint_inner(w, end, false)?;
            w.write_u8(field, centre.id())
        }
        flat => {
            for c in flat.components() {
                w.write_f64(field, c)?;
            }
            Ok(())
        }
    }
}
