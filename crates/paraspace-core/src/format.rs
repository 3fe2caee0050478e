//! The paragraph-spacing transformation.
//!
//! Every paragraph but the last is followed by a space and a marker char.
//! The marker is styled at a large size so its line box opens a vertical gap
//! between paragraphs; the text itself is untouched.

use crate::config::ParaSpaceConfig;
use crate::error::Result;
use crate::offset_map::{OffsetMapping, ParagraphMapping};
use crate::paragraph::{ParagraphIndex, split_paragraphs};
use crate::style::{Spacing, StyleSpan};

/// Displayed text plus the styles a renderer should apply to it.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FormattedText {
    pub text: String,

    /// Sorted by start. One paragraph span per paragraph, one marker span per
    /// marker.
    pub spans: Vec<StyleSpan>,
}

impl FormattedText {
    /// Length of `text` in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn marker_spans(&self) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(|span| span.is_marker())
    }

    pub fn paragraph_spans(&self) -> impl Iterator<Item = &StyleSpan> {
        self.spans.iter().filter(|span| !span.is_marker())
    }
}

/// Format `text` with the default marker and the given spacing.
pub fn paragraph_format(text: &str, spacing: Spacing) -> FormattedText {
    paragraph_format_with(text, &ParaSpaceConfig::new(spacing))
}

/// Format `text` using `config`'s marker and spacing.
///
/// `config` must pass [`ParaSpaceConfig::validate`]. A `'\n'` marker would
/// add paragraph breaks the offset mapping knows nothing about;
/// [`ParaSpace::with_config`] checks this once up front.
pub fn paragraph_format_with(text: &str, config: &ParaSpaceConfig) -> FormattedText {
    debug_assert!(
        config.validate().is_ok(),
        "paragraph_format_with called with an invalid config: {config:?}"
    );
    if text.contains(config.marker) {
        tracing::warn!(
            marker = ?config.marker,
            "input already contains the paragraph marker; offset mapping will be wrong"
        );
    }

    let paragraphs = split_paragraphs(text);
    let last = paragraphs.len() - 1;
    let mut out = String::with_capacity(text.len() + last * (1 + config.marker.len_utf8()));
    let mut spans = Vec::with_capacity(paragraphs.len() * 2);
    let mut pos = 0;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        let start = pos;
        out.push_str(paragraph.text);
        pos += paragraph.char_len();

        if i < last {
            out.push(' ');
            pos += 1;
        }
        spans.push(StyleSpan::paragraph(start..pos));

        if i < last {
            out.push(config.marker);
            spans.push(StyleSpan::marker(pos, config.spacing));
            pos += 1;
        }
    }

    tracing::debug!(
        paragraphs = paragraphs.len(),
        original_chars = text.chars().count(),
        transformed_chars = pos,
        "formatted paragraphs"
    );

    FormattedText { text: out, spans }
}

/// Formatted text paired with the mapping back to its source.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedText {
    pub formatted: FormattedText,
    pub mapping: ParagraphMapping,
}

impl TransformedText {
    pub fn text(&self) -> &str {
        &self.formatted.text
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.formatted.spans
    }
}

impl OffsetMapping for TransformedText {
    fn original_to_transformed(&self, offset: usize) -> Result<usize> {
        self.mapping.original_to_transformed(offset)
    }

    fn transformed_to_original(&self, offset: usize) -> Result<usize> {
        self.mapping.transformed_to_original(offset)
    }
}

/// A reusable paragraph-spacing transformation.
///
/// Hosts keep one of these and call [`ParaSpace::filter`] with the current
/// buffer contents each time they redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParaSpace {
    config: ParaSpaceConfig,
}

impl ParaSpace {
    pub fn new(spacing: Spacing) -> Self {
        Self {
            config: ParaSpaceConfig::new(spacing),
        }
    }

    /// Validates `config` up front so `filter` cannot fail.
    pub fn with_config(config: ParaSpaceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParaSpaceConfig {
        &self.config
    }

    pub fn filter(&self, text: &str) -> TransformedText {
        let formatted = paragraph_format_with(text, &self.config);
        let mapping = ParagraphMapping::from_index(ParagraphIndex::new(text));
        TransformedText { formatted, mapping }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleTag;

    /// Snapshot-friendly view of the formatter output.
    #[derive(Debug, serde::Serialize)]
    struct FormatOutput {
        text: String,
        spans: Vec<SpanEntry>,
    }

    #[derive(Debug, serde::Serialize)]
    struct SpanEntry {
        range: String,
        tag: String,
    }

    /// Format with a visible marker so snapshots stay readable.
    fn format_visible(text: &str) -> FormatOutput {
        let config = ParaSpaceConfig::default()
            .with_marker('¶')
            .with_spacing(Spacing::Sp(24.0));
        let formatted = paragraph_format_with(text, &config);
        FormatOutput {
            text: formatted.text,
            spans: formatted
                .spans
                .iter()
                .map(|span| SpanEntry {
                    range: format!("{}..{}", span.range.start, span.range.end),
                    tag: match span.tag {
                        StyleTag::Paragraph => "paragraph".to_string(),
                        StyleTag::Marker { size } => format!("marker {size}"),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_two_paragraphs_snapshot() {
        insta::assert_yaml_snapshot!("two_paragraphs", format_visible("Alpha\nBeta"));
    }

    #[test]
    fn test_empty_middle_paragraph_snapshot() {
        insta::assert_yaml_snapshot!("empty_middle_paragraph", format_visible("A\n\nB"));
    }

    #[test]
    fn test_single_paragraph_unchanged() {
        let formatted = paragraph_format("just one paragraph", Spacing::default());
        assert_eq!(formatted.text, "just one paragraph");
        assert_eq!(formatted.spans, vec![StyleSpan::paragraph(0..18)]);
    }

    #[test]
    fn test_empty_input() {
        let formatted = paragraph_format("", Spacing::default());
        assert_eq!(formatted.text, "");
        assert_eq!(formatted.spans, vec![StyleSpan::paragraph(0..0)]);
        assert_eq!(formatted.marker_spans().count(), 0);
    }

    #[test]
    fn test_default_marker_is_nul() {
        let formatted = paragraph_format("a\nb", Spacing::Sp(10.0));
        assert_eq!(formatted.text, "a \0b");
        assert_eq!(
            formatted.spans,
            vec![
                StyleSpan::paragraph(0..2),
                StyleSpan::marker(2, Spacing::Sp(10.0)),
                StyleSpan::paragraph(3..4),
            ]
        );
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_paragraph() {
        let formatted = paragraph_format("a\n", Spacing::default());
        assert_eq!(formatted.text, "a \0");
        assert_eq!(formatted.spans.last(), Some(&StyleSpan::paragraph(3..3)));
    }

    #[test]
    fn test_length_relation() {
        for text in ["", "x", "A\nB\nC", "\n\n\n", "héllo\nwörld\n"] {
            let formatted = paragraph_format(text, Spacing::default());
            let paragraphs = split_paragraphs(text);
            let content: usize = paragraphs.iter().map(|p| p.char_len()).sum();
            let expected = content + 2 * (paragraphs.len() - 1);
            assert_eq!(formatted.text.chars().count(), expected, "{text:?}");
            assert_eq!(formatted.char_len(), expected, "{text:?}");
        }
        assert_eq!(paragraph_format("A\nB\nC", Spacing::default()).text.chars().count(), 7);
    }

    #[test]
    fn test_markers_sit_at_mapped_positions() {
        let text = "one\ntwo\n\nfour";
        let formatted = paragraph_format(text, Spacing::default());
        let chars: Vec<char> = formatted.text.chars().collect();
        for span in formatted.marker_spans() {
            assert_eq!(chars[span.range.start], '\0');
            assert_eq!(chars[span.range.start - 1], ' ');
        }
        assert_eq!(formatted.marker_spans().count(), 3);
        assert_eq!(formatted.paragraph_spans().count(), 4);
    }

    #[test]
    fn test_filter_carries_mapping() {
        let transformed = ParaSpace::new(Spacing::Em(2.0)).filter("Alpha\nBeta");
        assert_eq!(transformed.text(), "Alpha \0Beta");
        assert_eq!(transformed.original_to_transformed(6), Ok(7));
        assert_eq!(transformed.transformed_to_original(6), Ok(5));
        assert_eq!(
            transformed.mapping.transformed_len(),
            transformed.text().chars().count()
        );
    }

    #[test]
    fn test_with_config_validates() {
        let config = ParaSpaceConfig::default().with_marker('\n');
        assert!(ParaSpace::with_config(config).is_err());

        let config = ParaSpaceConfig::default().with_marker('\u{2063}');
        let para_space = ParaSpace::with_config(config).unwrap();
        assert_eq!(para_space.filter("a\nb").text(), "a \u{2063}b");
    }

    #[test]
    fn test_char_len_reads_text_not_spans() {
        let formatted = FormattedText {
            text: "héllo".to_string(),
            spans: vec![],
        };
        assert_eq!(formatted.char_len(), 5);

        let formatted = paragraph_format("é\nb", Spacing::default());
        assert_eq!(formatted.char_len(), 4);
        assert_eq!(formatted.char_len(), formatted.spans.last().unwrap().range.end);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid config")]
    fn test_newline_marker_rejected_in_debug() {
        let config = ParaSpaceConfig::default().with_marker('\n');
        paragraph_format_with("a\nb", &config);
    }

    #[test]
    fn test_marker_in_input_still_formats() {
        // out of contract, but must not panic
        let formatted = paragraph_format("a\0b\nc", Spacing::default());
        assert_eq!(formatted.text, "a\0b \0c");
    }
}
