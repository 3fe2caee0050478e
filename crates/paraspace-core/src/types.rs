//! Caret and selection types, translatable between coordinate spaces.
//!
//! Hosts track carets against the displayed text; edits apply to the
//! original. These types carry the translation for both ends at once.

use std::ops::Range;

use crate::error::Result;
use crate::offset_map::OffsetMapping;

/// Cursor state including position and affinity.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    /// Character offset in text (NOT byte offset!)
    pub offset: usize,

    /// Prefer left/right when at boundary (for vertical cursor movement)
    pub affinity: Affinity,
}

impl CursorState {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: Affinity::Before,
        }
    }

    pub fn with_affinity(offset: usize, affinity: Affinity) -> Self {
        Self { offset, affinity }
    }

    /// Treat `offset` as original-space and move it into transformed space.
    pub fn to_transformed(self, mapping: &impl OffsetMapping) -> Result<Self> {
        Ok(Self {
            offset: mapping.original_to_transformed(self.offset)?,
            ..self
        })
    }

    /// Treat `offset` as transformed-space and move it into original space.
    pub fn to_original(self, mapping: &impl OffsetMapping) -> Result<Self> {
        Ok(Self {
            offset: mapping.transformed_to_original(self.offset)?,
            ..self
        })
    }
}

/// Cursor affinity at a boundary.
///
/// `Before` sticks to the end of the previous paragraph, `After` to the
/// start of the next one.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Affinity {
    #[default]
    Before,
    After,
}

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `start()` and `end()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Check if the selection is backwards (head before anchor).
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Map both ends from original into transformed space.
    ///
    /// Direction is preserved since both mappings are monotonic.
    pub fn to_transformed(self, mapping: &impl OffsetMapping) -> Result<Self> {
        Ok(Self {
            anchor: mapping.original_to_transformed(self.anchor)?,
            head: mapping.original_to_transformed(self.head)?,
        })
    }

    /// Map both ends from transformed back into original space.
    ///
    /// A selection that only covers a space and a marker collapses.
    pub fn to_original(self, mapping: &impl OffsetMapping) -> Result<Self> {
        Ok(Self {
            anchor: mapping.transformed_to_original(self.anchor)?,
            head: mapping.transformed_to_original(self.head)?,
        })
    }
}
