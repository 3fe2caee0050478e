//! Renderer-neutral style annotations.
//!
//! The formatter does not produce toolkit style objects. It emits tagged
//! char ranges and each host translates the tags into its own primitives
//! (a paragraph block, a font-size override, a CSS class, ...).

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParaSpaceError;

/// Size of the gap rendered between paragraphs.
///
/// This is the font size applied to the marker character, so the marker's
/// line height becomes the visible paragraph spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Scale-independent pixels.
    Sp(f32),
    /// Relative to the surrounding font size.
    Em(f32),
}

impl Spacing {
    pub fn value(&self) -> f32 {
        match self {
            Spacing::Sp(v) | Spacing::Em(v) => *v,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Spacing::Sp(_) => "sp",
            Spacing::Em(_) => "em",
        }
    }

    /// Finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let v = self.value();
        v.is_finite() && v > 0.0
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Sp(10.0)
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value(), self.unit())
    }
}

impl FromStr for Spacing {
    type Err = ParaSpaceError;

    /// Parses `12sp`, `1.5em` or a bare number (taken as sp).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (number, make): (&str, fn(f32) -> Spacing) = match s.strip_suffix("em") {
            Some(n) => (n, Spacing::Em),
            None => (s.strip_suffix("sp").unwrap_or(s), Spacing::Sp),
        };

        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| ParaSpaceError::InvalidSpacing(s.to_string()))?;
        let spacing = make(value);
        if !spacing.is_valid() {
            return Err(ParaSpaceError::InvalidSpacing(s.to_string()));
        }
        Ok(spacing)
    }
}

/// What a styled range represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StyleTag {
    /// A paragraph block: its content plus the trailing space, if any.
    Paragraph,
    /// A single marker char rendered at `size` to open the gap.
    Marker { size: Spacing },
}

/// A half-open char range in transformed space plus its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub tag: StyleTag,
}

impl StyleSpan {
    pub fn paragraph(range: Range<usize>) -> Self {
        Self {
            range,
            tag: StyleTag::Paragraph,
        }
    }

    pub fn marker(at: usize, size: Spacing) -> Self {
        Self {
            range: at..at + 1,
            tag: StyleTag::Marker { size },
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self.tag, StyleTag::Marker { .. })
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset)
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_default() {
        assert_eq!(Spacing::default(), Spacing::Sp(10.0));
        assert_eq!(Spacing::default().to_string(), "10sp");
    }

    #[test]
    fn test_spacing_parse() {
        assert_eq!("12sp".parse::<Spacing>().unwrap(), Spacing::Sp(12.0));
        assert_eq!("1.5em".parse::<Spacing>().unwrap(), Spacing::Em(1.5));
        assert_eq!(" 8 ".parse::<Spacing>().unwrap(), Spacing::Sp(8.0));
        assert_eq!("4 sp".parse::<Spacing>().unwrap(), Spacing::Sp(4.0));
    }

    #[test]
    fn test_spacing_parse_rejects_garbage() {
        for input in ["", "sp", "big", "-3sp", "0em", "NaN", "infsp"] {
            assert!(
                matches!(input.parse::<Spacing>(), Err(ParaSpaceError::InvalidSpacing(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_spacing_display_roundtrip() {
        for spacing in [Spacing::Sp(10.0), Spacing::Em(1.25)] {
            assert_eq!(spacing.to_string().parse::<Spacing>().unwrap(), spacing);
        }
    }

    #[test]
    fn test_marker_span() {
        let span = StyleSpan::marker(5, Spacing::Sp(20.0));
        assert_eq!(span.range, 5..6);
        assert!(span.is_marker());
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn test_paragraph_span_can_be_empty() {
        let span = StyleSpan::paragraph(3..3);
        assert!(span.is_empty());
        assert!(!span.is_marker());
    }
}
