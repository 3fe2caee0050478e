//! Paragraph segmentation shared by the formatter and the offset mappers.
//!
//! A paragraph is a maximal run of text between `\n` separators. The
//! separators are consumed: they belong to no paragraph. Both directions of
//! the offset mapping are derived from the same segmentation, so everything
//! that needs paragraph boundaries goes through [`split_paragraphs`] or a
//! [`ParagraphIndex`] built from it.

use std::ops::Range;

/// The paragraph separator.
pub const PARAGRAPH_SEPARATOR: char = '\n';

/// One paragraph of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    /// Position in the paragraph list (0-based).
    pub index: usize,

    /// Paragraph content, separator excluded.
    pub text: &'a str,

    /// Char range in the original text.
    pub char_range: Range<usize>,

    /// Byte range in the original text.
    pub byte_range: Range<usize>,
}

impl Paragraph<'_> {
    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.char_range.len()
    }

    /// Length in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `text` on `\n`, keeping empty paragraphs.
///
/// Always returns at least one paragraph: `""` yields `[""]`, `"\n"` yields
/// `["", ""]`. Joining the paragraph texts with `\n` gives back `text`.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph<'_>> {
    let mut paragraphs = Vec::new();
    let mut char_pos = 0;
    let mut byte_pos = 0;

    for (index, part) in text.split(PARAGRAPH_SEPARATOR).enumerate() {
        let char_len = part.chars().count();
        paragraphs.push(Paragraph {
            index,
            text: part,
            char_range: char_pos..char_pos + char_len,
            byte_range: byte_pos..byte_pos + part.len(),
        });
        // Skip over the separator. Past the last paragraph this overshoots,
        // but nothing reads the positions afterwards.
        char_pos += char_len + 1;
        byte_pos += part.len() + PARAGRAPH_SEPARATOR.len_utf8();
    }

    paragraphs
}

/// Number of paragraphs in `text`. Never zero.
pub fn paragraph_count(text: &str) -> usize {
    text.matches(PARAGRAPH_SEPARATOR).count() + 1
}

/// Prefix sums over paragraph lengths, for logarithmic offset lookups.
///
/// Built once per transformation and shared by both mapping directions.
/// Paragraph `i` occupies `start..=end` in original space and the same range
/// shifted by `i` (the markers inserted before it) in transformed space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphIndex {
    starts: Vec<usize>,
    /// Original-space end of each paragraph.
    ends: Vec<usize>,
    /// Transformed-space end of each paragraph.
    transformed_ends: Vec<usize>,
}

impl ParagraphIndex {
    pub fn new(text: &str) -> Self {
        Self::from_paragraphs(&split_paragraphs(text))
    }

    pub fn from_paragraphs(paragraphs: &[Paragraph<'_>]) -> Self {
        let mut index = Self {
            starts: Vec::with_capacity(paragraphs.len()),
            ends: Vec::with_capacity(paragraphs.len()),
            transformed_ends: Vec::with_capacity(paragraphs.len()),
        };
        for (markers_before, paragraph) in paragraphs.iter().enumerate() {
            index.starts.push(paragraph.char_range.start);
            index.ends.push(paragraph.char_range.end);
            index
                .transformed_ends
                .push(paragraph.char_range.end + markers_before);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Length of the original text in chars.
    pub fn original_len(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Upper bound of the offset-mapped transformed space.
    pub fn transformed_len(&self) -> usize {
        self.transformed_ends.last().copied().unwrap_or(0)
    }

    /// Char range of paragraph `index` in original space.
    pub fn char_range(&self, index: usize) -> Option<Range<usize>> {
        Some(*self.starts.get(index)?..self.ends[index])
    }

    /// Index of the first paragraph whose original span contains `offset`.
    /// At a boundary the earlier paragraph wins.
    pub fn paragraph_at_original(&self, offset: usize) -> Option<usize> {
        let idx = self.ends.partition_point(|&end| end < offset);
        (idx < self.len()).then_some(idx)
    }

    /// Index of the first paragraph whose transformed span contains `offset`.
    pub fn paragraph_at_transformed(&self, offset: usize) -> Option<usize> {
        let idx = self.transformed_ends.partition_point(|&end| end < offset);
        (idx < self.len()).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(paragraphs: &[Paragraph<'a>]) -> Vec<&'a str> {
        paragraphs.iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_split_empty() {
        let paragraphs = split_paragraphs("");
        assert_eq!(texts(&paragraphs), vec![""]);
        assert_eq!(paragraphs[0].char_range, 0..0);
    }

    #[test]
    fn test_split_preserves_empty_paragraphs() {
        assert_eq!(texts(&split_paragraphs("\n")), vec!["", ""]);
        assert_eq!(texts(&split_paragraphs("a\n\nb")), vec!["a", "", "b"]);
        assert_eq!(texts(&split_paragraphs("\na\n")), vec!["", "a", ""]);
    }

    #[test]
    fn test_split_is_lossless() {
        for text in ["", "plain", "a\nb", "\n\n", "x\n\ny\nz\n", "héllo\nwörld"] {
            let joined = texts(&split_paragraphs(text)).join("\n");
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_split_ranges() {
        let paragraphs = split_paragraphs("Alpha\nBeta");
        assert_eq!(paragraphs[0].char_range, 0..5);
        assert_eq!(paragraphs[1].char_range, 6..10);
        assert_eq!(paragraphs[1].byte_range, 6..10);
    }

    #[test]
    fn test_split_ranges_multibyte() {
        // 'é' is two bytes but one char
        let paragraphs = split_paragraphs("é\nb");
        assert_eq!(paragraphs[0].char_range, 0..1);
        assert_eq!(paragraphs[0].byte_range, 0..2);
        assert_eq!(paragraphs[1].char_range, 2..3);
        assert_eq!(paragraphs[1].byte_range, 3..4);
        assert_eq!(&"é\nb"[paragraphs[1].byte_range.clone()], "b");
    }

    #[test]
    fn test_paragraph_count() {
        assert_eq!(paragraph_count(""), 1);
        assert_eq!(paragraph_count("a"), 1);
        assert_eq!(paragraph_count("a\nb\nc"), 3);
        assert_eq!(paragraph_count("\n\n"), 3);
    }

    #[test]
    fn test_index_lengths() {
        let index = ParagraphIndex::new("A\nB\nC");
        assert_eq!(index.len(), 3);
        assert_eq!(index.original_len(), 5);
        assert_eq!(index.transformed_len(), 7);
        assert_eq!(index.char_range(2), Some(4..5));
        assert_eq!(index.char_range(3), None);
    }

    #[test]
    fn test_index_boundary_prefers_earlier_paragraph() {
        let index = ParagraphIndex::new("Alpha\nBeta");
        assert_eq!(index.paragraph_at_original(0), Some(0));
        assert_eq!(index.paragraph_at_original(5), Some(0));
        assert_eq!(index.paragraph_at_original(6), Some(1));
        assert_eq!(index.paragraph_at_original(10), Some(1));
        assert_eq!(index.paragraph_at_original(11), None);

        assert_eq!(index.paragraph_at_transformed(5), Some(0));
        assert_eq!(index.paragraph_at_transformed(6), Some(1));
        assert_eq!(index.paragraph_at_transformed(11), Some(1));
        assert_eq!(index.paragraph_at_transformed(12), None);
    }

    #[test]
    fn test_index_empty_paragraphs() {
        let index = ParagraphIndex::new("\n\n");
        assert_eq!(index.len(), 3);
        assert_eq!(index.paragraph_at_original(0), Some(0));
        assert_eq!(index.paragraph_at_original(1), Some(1));
        assert_eq!(index.paragraph_at_original(2), Some(2));
        assert_eq!(index.paragraph_at_transformed(2), Some(1));
        assert_eq!(index.paragraph_at_transformed(4), Some(2));
    }
}
