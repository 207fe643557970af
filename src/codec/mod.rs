//! Versioned binary codec for marker configurations.
//!
//! A record is the marker kind byte followed by the fields its version's
//! layout lists (see [`version`]); the composite is a nested record and a
//! kind byte of 0 ends the chain. Numbers are big-endian.
//!
//! The pen width is not part of a record. It belongs to the stroke that owns
//! the marker and is passed in through [`ReadOptions`].

pub mod version;

mod paint;
mod reader;
mod writer;

use std::io::{Read, Write};

use crate::errors::{EncodeError, FormatError};
use crate::marker::MarkerConfig;
use crate::shapes::defaults::PEN_WIDTH;
use crate::types::Length;

pub use version::{Field, FormatVersion, NumberEncoding, VersionDescriptor};

use reader::RecordReader;
use writer::RecordWriter;

/// Most markers a chain may hold, root included. Deeper chains are refused
/// both ways.
pub const MAX_CHAIN_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadOptions {
    /// Pen width of the stroke the decoded marker belongs to
    pub pen_width: Length,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { pen_width: Length::bp(PEN_WIDTH) }
    }
}

/// Decode one marker record (and its composite chain) written in `version`.
pub fn read_marker<R: Read>(reader: &mut R, version: FormatVersion) -> Result<MarkerConfig, FormatError> {
    read_marker_with(reader, version, &ReadOptions::default())
}

pub fn read_marker_with<R: Read>(
    reader: &mut R,
    version: FormatVersion,
    options: &ReadOptions,
) -> Result<MarkerConfig, FormatError> {
    RecordReader::new(reader, version).read_chain(options.pen_width)
}

/// Encode `cfg` and its composite chain in `version`'s layout.
///
/// Fails if a kind or paint of the chain does not exist in `version`, or if
/// the chain is longer than [`MAX_CHAIN_DEPTH`].
/// Values the version has no slot for (the width before 2.1, user offsets
/// before 1.4) are dropped; lengths and angles are converted to bp and
/// radians for versions without unit bytes.
pub fn write_marker<W: Write>(
    writer: &mut W,
    version: FormatVersion,
    cfg: &MarkerConfig,
) -> Result<(), EncodeError> {
    RecordWriter::new(writer, version).write_chain(cfg)
}

/// [`read_marker_with`] over a byte slice.
pub fn decode(bytes: &[u8], version: FormatVersion, options: &ReadOptions) -> Result<MarkerConfig, FormatError> {
    let mut input = bytes;
    read_marker_with(&mut input, version, options)
}

/// [`write_marker`] into a fresh buffer.
pub fn encode(version: FormatVersion, cfg: &MarkerConfig) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    write_marker(&mut out, version, cfg)?;
    Ok(out)
}
