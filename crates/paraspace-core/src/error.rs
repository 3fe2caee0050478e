use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Which side of the transformation an offset is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateSpace {
    /// Offsets into the untransformed source text.
    Original,
    /// Offsets into the displayed text, markers and spaces included.
    Transformed,
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSpace::Original => f.write_str("original"),
            CoordinateSpace::Transformed => f.write_str("transformed"),
        }
    }
}

#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum ParaSpaceError {
    /// The queried offset does not fall inside any paragraph.
    ///
    /// This is a caller bug. Offsets are never clamped, since a silently
    /// wrong caret position is worse than a loud failure.
    #[error("offset {offset} is out of range for {space} text of length {len}")]
    #[diagnostic(
        code(paraspace::offset_out_of_range),
        help("valid {space} offsets are 0..={len}")
    )]
    OffsetOutOfRange {
        offset: usize,
        len: usize,
        space: CoordinateSpace,
    },

    #[error("invalid paragraph spacing: {0}")]
    #[diagnostic(
        code(paraspace::config::spacing),
        help("use a positive size such as `10sp` or `1.5em`")
    )]
    InvalidSpacing(String),

    #[error("invalid marker character {0:?}")]
    #[diagnostic(
        code(paraspace::config::marker),
        help("the marker must not be the paragraph separator `\\n`")
    )]
    InvalidMarker(char),
}

pub type Result<T, E = ParaSpaceError> = std::result::Result<T, E>;
