//! Formatter configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ParaSpaceError, Result};
use crate::paragraph::PARAGRAPH_SEPARATOR;
use crate::style::Spacing;

/// Default marker: NUL, which never appears in typed text.
pub const DEFAULT_MARKER: char = '\u{0000}';

/// Settings for [`crate::ParaSpace`] and [`crate::paragraph_format_with`].
///
/// Text that already contains `marker` is outside the mapping contract: the
/// formatter logs a warning and the offsets it maps are unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParaSpaceConfig {
    pub marker: char,
    pub spacing: Spacing,
}

impl Default for ParaSpaceConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            spacing: Spacing::default(),
        }
    }
}

impl ParaSpaceConfig {
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker == PARAGRAPH_SEPARATOR {
            return Err(ParaSpaceError::InvalidMarker(self.marker));
        }
        if !self.spacing.is_valid() {
            return Err(ParaSpaceError::InvalidSpacing(self.spacing.to_string()));
        }
        Ok(())
    }
}
