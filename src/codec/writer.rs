//! Record writer, the inverse of the reader for one target version.

use std::io::Write;

use super::MAX_CHAIN_DEPTH;
use super::version::{Field, FormatVersion, NumberEncoding, VersionDescriptor};
use crate::errors::EncodeError;
use crate::log::{debug, warn};
use crate::marker::MarkerConfig;
use crate::paint::Paint;
use crate::types::{Angle, Length};

pub(crate) struct RecordWriter<'w, W: Write> {
    inner: &'w mut W,
    pub(crate) version: FormatVersion,
    pub(crate) desc: &'static VersionDescriptor,
}

impl<'w, W: Write> RecordWriter<'w, W> {
    pub(crate) fn new(inner: &'w mut W, version: FormatVersion) -> Self {
        Self { inner, version, desc: version.descriptor() }
    }

    fn write_bytes(&mut self, field: Field, bytes: &[u8]) -> Result<(), EncodeError> {
        self.inner
            .write_all(bytes)
            .map_err(|source| EncodeError::Io { field, source })
    }

    pub(crate) fn write_u8(&mut self, field: Field, value: u8) -> Result<(), EncodeError> {
        self.write_bytes(field, &[value])
    }

    fn write_bool(&mut self, field: Field, value: bool) -> Result<(), EncodeError> {
        self.write_u8(field, value as u8)
    }

    pub(crate) fn write_f64(&mut self, field: Field, value: f64) -> Result<(), EncodeError> {
        self.write_bytes(field, &value.to_be_bytes())
    }

    /// Plain versions store bp, so other units are converted.
    fn write_length(&mut self, field: Field, len: Length) -> Result<(), EncodeError> {
        match self.desc.number_encoding {
            NumberEncoding::Plain => self.write_f64(field, len.to_bp()),
            NumberEncoding::WithUnit => {
                self.write_f64(field, len.value)?;
                self.write_u8(field, len.unit.id())
            }
        }
    }

    fn write_angle(&mut self, field: Field, angle: Angle) -> Result<(), EncodeError> {
        match self.desc.number_encoding {
            NumberEncoding::Plain => self.write_f64(field, angle.to_radians()),
            NumberEncoding::WithUnit => {
                self.write_f64(field, angle.value)?;
                self.write_u8(field, angle.unit.id())
            }
        }
    }

    /// Write `cfg` and its composite chain, terminated by a none record.
    pub(crate) fn write_chain(&mut self, cfg: &MarkerConfig) -> Result<(), EncodeError> {
        let levels = || cfg.chain().take_while(|level| !level.is_none());
        if levels().count() > MAX_CHAIN_DEPTH {
            return Err(EncodeError::ChainTooDeep { limit: MAX_CHAIN_DEPTH });
        }
        for level in levels() {
            self.write_record(level)?;
        }
        self.write_u8(Field::Kind, 0)
    }

    /// Write the fields of one record; its composite follows as the next
    /// record.
    fn write_record(&mut self, cfg: &MarkerConfig) -> Result<(), EncodeError> {
        let kind = cfg.kind();
        let ceiling = self.desc.marker_ceiling;
        if kind.code() >= ceiling {
            return Err(EncodeError::MarkerNotInVersion {
                kind,
                code: kind.code(),
                ceiling,
                version: self.version,
            });
        }
        self.warn_dropped(cfg);

        for &field in self.desc.layout {
            match field {
                Field::Kind => self.write_u8(field, kind.code())?,
                Field::Size => self.write_length(field, cfg.size())?,
                Field::HasWidth => self.write_bool(field, cfg.width().is_some())?,
                Field::Width => {
                    if let Some(width) = cfg.width() {
                        self.write_length(field, width)?;
                    }
                }
                Field::Repeated => self.write_u8(field, cfg.repeated())?,
                Field::Reversed => self.write_bool(field, cfg.is_reversed())?,
                Field::AutoOrient => self.write_bool(field, cfg.auto_orient())?,
                Field::Angle => {
                    if !cfg.auto_orient() {
                        self.write_angle(field, cfg.angle())?;
                    }
                }
                Field::Fill => super::paint::write_paint(self, cfg.fill().unwrap_or(&Paint::Transparent))?,
                Field::Overlay => self.write_bool(field, cfg.overlay())?,
                Field::UserOffset => self.write_bool(field, cfg.has_user_offset())?,
                Field::Offset => {
                    if cfg.has_user_offset() {
                        self.write_length(field, cfg.offset())?;
                    }
                }
                Field::UserRepeatOffset => self.write_bool(field, cfg.has_user_repeat_offset())?,
                Field::RepeatOffset => {
                    if cfg.has_user_repeat_offset() {
                        self.write_length(field, cfg.repeat_offset())?;
                    }
                }
                Field::Composite => break,
            }
        }
        debug!(version = %self.version, %kind, "encoded marker record");
        Ok(())
    }

    /// Values the target version has no slot for are dropped.
    fn warn_dropped(&self, cfg: &MarkerConfig) {
        if cfg.width().is_some() && !self.desc.has_field(Field::Width) {
            warn!(version = %self.version, kind = %cfg.kind(), "width dropped: no slot in this version");
        }
        if (cfg.has_user_offset() || cfg.has_user_repeat_offset()) && !self.desc.has_field(Field::UserOffset) {
            warn!(version = %self.version, kind = %cfg.kind(), "user offsets dropped: no slot in this version");
        }
    }
}
