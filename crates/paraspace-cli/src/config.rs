//! KDL config file loading.
//!
//! ```kdl
//! spacing "12sp"
//! marker 0x2063
//! ```
//!
//! Both nodes are optional. `marker` takes a code point, or a one-char string.

use std::path::Path;

use kdl::{KdlDocument, KdlValue};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use paraspace_core::{ParaSpaceConfig, Spacing};

pub fn load_config(path: &Path) -> Result<ParaSpaceConfig> {
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<ParaSpaceConfig> {
    let doc: KdlDocument = content
        .parse()
        .into_diagnostic()
        .wrap_err("invalid KDL in config")?;
    let mut config = ParaSpaceConfig::default();

    if let Some(value) = first_arg(&doc, "spacing") {
        config.spacing = parse_spacing_value(value)?;
    }
    if let Some(value) = first_arg(&doc, "marker") {
        config.marker = parse_marker_value(value)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a `--marker` flag: hex code point (`2063`, `0x2063`, `U+2063`).
pub fn parse_marker_flag(s: &str) -> Result<char> {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("U+"))
        .or_else(|| s.strip_prefix("u+"))
        .unwrap_or(s);
    let code = u32::from_str_radix(hex, 16)
        .into_diagnostic()
        .wrap_err_with(|| format!("marker {s:?} is not a hex code point"))?;
    char::from_u32(code).ok_or_else(|| miette!("U+{code:04X} is not a valid char"))
}

fn first_arg<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
    doc.get(name)?.entries().first().map(|entry| entry.value())
}

fn parse_spacing_value(value: &KdlValue) -> Result<Spacing> {
    if let Some(s) = value.as_string() {
        return Ok(s.parse()?);
    }
    if let Some(n) = value.as_f64() {
        return Ok(n.to_string().parse()?);
    }
    if let Some(n) = value.as_i64() {
        return Ok(n.to_string().parse()?);
    }
    Err(miette!("spacing must be a string like \"10sp\" or a number"))
}

fn parse_marker_value(value: &KdlValue) -> Result<char> {
    if let Some(code) = value.as_i64() {
        return u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| miette!("marker {code} is not a valid code point"));
    }
    if let Some(s) = value.as_string() {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(c);
        }
        return parse_marker_flag(s);
    }
    Err(miette!("marker must be a code point or a single character"))
}
