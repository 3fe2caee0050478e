//! Offset mapping between original and transformed text.
//!
//! Each paragraph boundary in the original text is one `\n`. In the
//! transformed text that boundary is a literal space followed by a marker
//! char. The space takes the newline's slot, so the two coordinate spaces
//! differ by exactly one char per boundary crossed: the marker.
//!
//! Source: `Alpha\nBeta`
//! Shown:  `Alpha ·Beta` (`·` is the marker)
//!
//! | original | 0 | .. | 5 (`\n`) | 6 (`B`) | .. | 10 |
//! |----------|---|----|----------|---------|----|----|
//! | shown    | 0 | .. | 5 (` `)  | 7 (`B`) | .. | 11 |
//!
//! Offsets are end-inclusive within a paragraph: an offset at a paragraph's
//! end resolves to that paragraph, i.e. just before its marker.

use crate::error::{CoordinateSpace, ParaSpaceError, Result};
use crate::paragraph::{ParagraphIndex, split_paragraphs};

/// Translates caret offsets between original and transformed text.
pub trait OffsetMapping {
    fn original_to_transformed(&self, offset: usize) -> Result<usize>;

    fn transformed_to_original(&self, offset: usize) -> Result<usize>;
}

impl<T: OffsetMapping + ?Sized> OffsetMapping for &T {
    fn original_to_transformed(&self, offset: usize) -> Result<usize> {
        (**self).original_to_transformed(offset)
    }

    fn transformed_to_original(&self, offset: usize) -> Result<usize> {
        (**self).transformed_to_original(offset)
    }
}

/// Map an original-space offset into transformed space.
///
/// Linear in the number of paragraphs; the text is re-split on every call.
/// Use [`ParagraphMapping`] when issuing many queries against the same text.
pub fn map_original_to_transformed(text: &str, offset: usize) -> Result<usize> {
    let paragraphs = split_paragraphs(text);
    let last = paragraphs.len() - 1;
    let mut count = 0;
    let mut added = 0;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if offset <= count + paragraph.char_len() {
            tracing::trace!(offset, paragraph = i, added, "original -> transformed");
            return Ok(offset + added);
        }

        count += paragraph.char_len();
        if i < last {
            // the consumed newline, and the marker that stands in for it
            count += 1;
            added += 1;
        }
    }

    Err(ParaSpaceError::OffsetOutOfRange {
        offset,
        len: count,
        space: CoordinateSpace::Original,
    })
}

/// Map a transformed-space offset back into original space.
pub fn map_transformed_to_original(text: &str, offset: usize) -> Result<usize> {
    let paragraphs = split_paragraphs(text);
    let last = paragraphs.len() - 1;
    let mut count = 0;
    let mut added = 0;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if offset <= count + paragraph.char_len() + added {
            tracing::trace!(offset, paragraph = i, added, "transformed -> original");
            return Ok(offset - added);
        }

        count += paragraph.char_len();
        if i < last {
            count += 1;
            added += 1;
        }
    }

    Err(ParaSpaceError::OffsetOutOfRange {
        offset,
        len: count + added,
        space: CoordinateSpace::Transformed,
    })
}

/// Index-backed mapping for one text, built once and queried many times.
///
/// Answers are identical to [`map_original_to_transformed`] and
/// [`map_transformed_to_original`], in logarithmic time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphMapping {
    index: ParagraphIndex,
}

impl ParagraphMapping {
    pub fn new(text: &str) -> Self {
        Self {
            index: ParagraphIndex::new(text),
        }
    }

    pub fn from_index(index: ParagraphIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &ParagraphIndex {
        &self.index
    }

    /// Largest valid original offset.
    pub fn original_len(&self) -> usize {
        self.index.original_len()
    }

    /// Largest valid transformed offset.
    pub fn transformed_len(&self) -> usize {
        self.index.transformed_len()
    }
}

impl OffsetMapping for ParagraphMapping {
    fn original_to_transformed(&self, offset: usize) -> Result<usize> {
        // Paragraph i has i markers before it.
        self.index
            .paragraph_at_original(offset)
            .map(|added| offset + added)
            .ok_or(ParaSpaceError::OffsetOutOfRange {
                offset,
                len: self.original_len(),
                space: CoordinateSpace::Original,
            })
    }

    fn transformed_to_original(&self, offset: usize) -> Result<usize> {
        self.index
            .paragraph_at_transformed(offset)
            .map(|added| offset - added)
            .ok_or(ParaSpaceError::OffsetOutOfRange {
                offset,
                len: self.transformed_len(),
                space: CoordinateSpace::Transformed,
            })
    }
}
