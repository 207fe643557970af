//! Error types with diagnostics using miette
//!
//! Codec errors carry the field being processed, the declared version and
//! the byte offset, which is enough to reproduce the failure.

use miette::Diagnostic;
use thiserror::Error;

use crate::codec::version::{Field, FormatVersion};
use crate::paint::PaintKind;
use crate::registry::MarkerKind;
use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building or mutating a marker configuration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum MarkerError {
    #[error("repeat count must be at least 1, got {count}")]
    #[diagnostic(code(endcap::marker::invalid_repeat_count))]
    InvalidRepeatCount { count: u8 },

    #[error("cannot attach a composite to a marker of kind none")]
    #[diagnostic(
        code(endcap::marker::composite_on_none),
        help("set a visible marker kind before attaching a composite")
    )]
    CompositeOnNone,

    #[error("invalid {field}")]
    #[diagnostic(code(endcap::marker::numeric))]
    Numeric {
        field: &'static str,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// Decode Errors
// ============================================================================

/// What went wrong while decoding a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatErrorKind {
    #[error("marker code {code} is out of range (ceiling {ceiling})")]
    MarkerOutOfRange { code: u8, ceiling: u8 },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid boolean byte {byte:#04x}")]
    InvalidBool { byte: u8 },

    #[error("repeat count of 0")]
    InvalidRepeatCount,

    #[error("unknown length unit {id}")]
    UnknownLengthUnit { id: u8 },

    #[error("unknown angle unit {id}")]
    UnknownAngleUnit { id: u8 },

    #[error("unknown paint tag {tag:#04x}")]
    UnknownPaintTag { tag: u8 },

    #[error("{kind} paint does not exist in this version")]
    PaintNotInVersion { kind: PaintKind },

    #[error("gradient stop is itself a gradient")]
    NestedGradient,

    #[error("invalid gradient direction {id}")]
    InvalidGradientDirection { id: u8 },

    #[error("non-finite number")]
    NonFinite,

    #[error("negative length")]
    NegativeLength,

    #[error("composite chain deeper than {limit} markers")]
    ChainTooDeep { limit: usize },

    #[error("i/o error: {message}")]
    Io { message: String },
}

/// A record could not be decoded
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("malformed marker record ({version}): {kind} while reading {field} at byte {offset}")]
#[diagnostic(
    code(endcap::codec::format),
    help("the record is terminal; substitute a marker of kind none or abort the file")
)]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub field: Field,
    pub version: FormatVersion,
    pub offset: u64,
}

// ============================================================================
// Encode Errors
// ============================================================================

/// A configuration could not be written for a target version
#[derive(Error, Diagnostic, Debug)]
pub enum EncodeError {
    #[error("marker {kind} (code {code}) does not exist in version {version}")]
    #[diagnostic(
        code(endcap::codec::marker_not_in_version),
        help("write a newer version or pick a marker below code {ceiling}")
    )]
    MarkerNotInVersion {
        kind: MarkerKind,
        code: u8,
        ceiling: u8,
        version: FormatVersion,
    },

    #[error("{kind} paint cannot be written in version {version}")]
    #[diagnostic(code(endcap::codec::paint_not_in_version))]
    PaintNotInVersion { kind: PaintKind, version: FormatVersion },

    #[error("gradient stop is itself a gradient")]
    #[diagnostic(code(endcap::codec::nested_gradient))]
    NestedGradient,

    #[error("composite chain deeper than {limit} markers")]
    #[diagnostic(code(endcap::codec::chain_too_deep))]
    ChainTooDeep { limit: usize },

    #[error("i/o error while writing {field}")]
    #[diagnostic(code(endcap::codec::io))]
    Io {
        field: Field,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_message() {
        let err = FormatError {
            kind: FormatErrorKind::MarkerOutOfRange { code: 22, ceiling: 22 },
            field: Field::Kind,
            version: FormatVersion::V1_3,
            offset: 0,
        };
        insta::assert_snapshot!(err.to_string(), @"malformed marker record (1.3): marker code 22 is out of range (ceiling 22) while reading marker kind at byte 0");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("endcap::codec::format".to_string())
        );
    }

    #[test]
    fn marker_error_keeps_numeric_source() {
        let err = MarkerError::Numeric { field: "size", source: NumericError::NaN };
        assert_eq!(err.to_string(), "invalid size");
        assert!(std::error::Error::source(&err).is_some());
    }
}
