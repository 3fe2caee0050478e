//! paraspace-core: paragraph spacing for flat text buffers.
//!
//! This crate provides:
//! - `paragraph_format` - renders each `\n` as a space plus a large marker char
//! - `map_original_to_transformed` / `map_transformed_to_original` - caret
//!   offset translation between the source and the displayed text
//! - `ParaSpace` - a reusable transformation returning text, styles and an
//!   index-backed `OffsetMapping` in one call
//!
//! Everything here is pure and stateless. Rendering the styled text is the
//! host's job.

pub mod config;
pub mod error;
pub mod format;
pub mod offset_map;
pub mod paragraph;
pub mod style;
pub mod types;

pub use config::{DEFAULT_MARKER, ParaSpaceConfig};
pub use error::{CoordinateSpace, ParaSpaceError, Result};
pub use format::{
    FormattedText, ParaSpace, TransformedText, paragraph_format, paragraph_format_with,
};
pub use offset_map::{
    OffsetMapping, ParagraphMapping, map_original_to_transformed, map_transformed_to_original,
};
pub use paragraph::{
    PARAGRAPH_SEPARATOR, Paragraph, ParagraphIndex, paragraph_count, split_paragraphs,
};
pub use style::{Spacing, StyleSpan, StyleTag};
pub use types::{Affinity, CursorState, Selection};
