//! Record reader.
//!
//! Walks the layout of the declared version field by field, tracking the
//! byte offset so every error points at where it happened.

use std::io::{self, Read};

use super::MAX_CHAIN_DEPTH;
use super::version::{Field, FormatVersion, NumberEncoding, VersionDescriptor};
use crate::errors::{FormatError, FormatErrorKind};
use crate::log::{debug, trace};
use crate::marker::{MarkerConfig, RecordFields};
use crate::registry::MarkerKind;
use crate::types::{Angle, AngleUnit, Length, LengthUnit};

pub(crate) struct RecordReader<'r, R: Read> {
    inner: &'r mut R,
    pub(crate) version: FormatVersion,
    pub(crate) desc: &'static VersionDescriptor,
    offset: u64,
    /// Offset at which the field being read started
    field_start: u64,
}

impl<'r, R: Read> RecordReader<'r, R> {
    pub(crate) fn new(inner: &'r mut R, version: FormatVersion) -> Self {
        Self {
            inner,
            version,
            desc: version.descriptor(),
            offset: 0,
            field_start: 0,
        }
    }

    pub(crate) fn error(&self, kind: FormatErrorKind, field: Field) -> FormatError {
        FormatError {
            kind,
            field,
            version: self.version,
            offset: self.field_start,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.field_start = self.offset;
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    fn read_exact<const N: usize>(&mut self, field: Field) -> Result<[u8; N], FormatError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| {
            let kind = if e.kind() == io::ErrorKind::UnexpectedEof {
                FormatErrorKind::UnexpectedEof
            } else {
                FormatErrorKind::Io { message: e.to_string() }
            };
            self.error(kind, field)
        })?;
        self.offset += N as u64;
        Ok(buf)
    }

    pub(crate) fn read_u8(&mut self, field: Field) -> Result<u8, FormatError> {
        Ok(self.read_exact::<1>(field)?[0])
    }

    fn read_bool(&mut self, field: Field) -> Result<bool, FormatError> {
        self.begin();
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(self.error(FormatErrorKind::InvalidBool { byte }, field)),
        }
    }

    /// Big-endian f64, rejecting NaN and infinities.
    pub(crate) fn read_f64(&mut self, field: Field) -> Result<f64, FormatError> {
        let value = f64::from_be_bytes(self.read_exact::<8>(field)?);
        if !value.is_finite() {
            return Err(self.error(FormatErrorKind::NonFinite, field));
        }
        Ok(value)
    }

    fn read_length(&mut self, field: Field) -> Result<Length, FormatError> {
        self.begin();
        let value = self.read_f64(field)?;
        let unit = match self.desc.number_encoding {
            NumberEncoding::Plain => LengthUnit::Bp,
            NumberEncoding::WithUnit => {
                let id = self.read_u8(field)?;
                LengthUnit::from_id(id)
                    .ok_or_else(|| self.error(FormatErrorKind::UnknownLengthUnit { id }, field))?
            }
        };
        trace!(%field, value, ?unit, "length");
        Ok(Length::new(value, unit))
    }

    fn read_non_negative(&mut self, field: Field) -> Result<Length, FormatError> {
        let len = self.read_length(field)?;
        if len.value < 0.0 {
            return Err(self.error(FormatErrorKind::NegativeLength, field));
        }
        Ok(len)
    }

    fn read_angle(&mut self, field: Field) -> Result<Angle, FormatError> {
        self.begin();
        let value = self.read_f64(field)?;
        let unit = match self.desc.number_encoding {
            NumberEncoding::Plain => AngleUnit::Radian,
            NumberEncoding::WithUnit => {
                let id = self.read_u8(field)?;
                AngleUnit::from_id(id)
                    .ok_or_else(|| self.error(FormatErrorKind::UnknownAngleUnit { id }, field))?
            }
        };
        Ok(Angle { value, unit })
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Read a record and its composites up to the terminating none record.
    pub(crate) fn read_chain(&mut self, pen_width: Length) -> Result<MarkerConfig, FormatError> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record(records.len())? {
            records.push(record);
        }
        Ok(MarkerConfig::from_records(pen_width, records))
    }

    /// Read the fields of one record, `depth` levels below the root.
    /// `None` is the kind byte ending the chain.
    fn read_record(&mut self, depth: usize) -> Result<Option<(MarkerKind, RecordFields)>, FormatError> {
        let _record_start = self.offset;
        let mut kind = MarkerKind::None;
        let mut record = RecordFields::default();
        let mut has_width = false;
        let mut user_offset = false;
        let mut user_repeat_offset = false;

        for &field in self.desc.layout {
            match field {
                Field::Kind => {
                    self.begin();
                    let code = self.read_u8(field)?;
                    let ceiling = self.desc.marker_ceiling;
                    let out_of_range = FormatErrorKind::MarkerOutOfRange { code, ceiling };
                    if code >= ceiling {
                        return Err(self.error(out_of_range, field));
                    }
                    kind = MarkerKind::from_code(code).ok_or_else(|| self.error(out_of_range, field))?;
                    if kind.is_none() {
                        trace!(offset = _record_start, "end of chain");
                        return Ok(None);
                    }
                    if depth >= MAX_CHAIN_DEPTH {
                        return Err(self.error(FormatErrorKind::ChainTooDeep { limit: MAX_CHAIN_DEPTH }, field));
                    }
                }
                Field::Size => record.size = self.read_non_negative(field)?,
                Field::HasWidth => has_width = self.read_bool(field)?,
                Field::Width => {
                    if has_width {
                        record.width = Some(self.read_non_negative(field)?);
                    }
                }
                Field::Repeated => {
                    self.begin();
                    let repeated = self.read_u8(field)?;
                    if repeated == 0 {
                        return Err(self.error(FormatErrorKind::InvalidRepeatCount, field));
                    }
                    record.repeated = repeated;
                }
                Field::Reversed => record.reversed = self.read_bool(field)?,
                Field::AutoOrient => record.auto_orient = self.read_bool(field)?,
                Field::Angle => {
                    if !record.auto_orient {
                        record.angle = self.read_angle(field)?;
                    }
                }
                Field::Fill => record.fill = Some(super::paint::read_paint(self)?),
                Field::Overlay => record.overlay = self.read_bool(field)?,
                Field::UserOffset => user_offset = self.read_bool(field)?,
                Field::Offset => {
                    if user_offset {
                        record.offset = Some(self.read_length(field)?);
                    }
                }
                Field::UserRepeatOffset => user_repeat_offset = self.read_bool(field)?,
                Field::RepeatOffset => {
                    if user_repeat_offset {
                        record.repeat_offset = Some(self.read_length(field)?);
                    }
                }
                // The composite is the next record of the chain.
                Field::Composite => break,
            }
        }

        debug!(version = %self.version, %kind, depth, offset = _record_start, "decoded marker record");
        Ok(Some((kind, record)))
    }
}
