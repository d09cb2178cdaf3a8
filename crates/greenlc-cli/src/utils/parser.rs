use greenlc::core::gradient::volume::SegmentConvention;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid key-value pair '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid segment convention '{0}'. Expected 'leading' or 'trailing'.")]
    InvalidConvention(String),

    #[error("Component '{component}' cannot be empty in '{value}'.")]
    EmptyComponent {
        component: &'static str,
        value: String,
    },
}

/// Splits `KEY=VALUE` at the first `=`. Both sides are trimmed and must be non-empty.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(pair.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            value: pair.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            value: pair.to_string(),
        });
    }
    Ok((key, value))
}

/// Parses a compare entry: `LABEL=PATH`, or a bare `PATH` labelled by its file stem.
///
/// Only the first `=` separates the label. An empty label falls back to the file stem.
pub fn parse_labeled_path(entry: &str) -> Result<(String, PathBuf), ParseError> {
    let (label, path) = match entry.split_once('=') {
        Some((label, path)) => (label.trim(), path.trim()),
        None => ("", entry.trim()),
    };
    if path.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "path",
            value: entry.to_string(),
        });
    }
    if !label.is_empty() {
        return Ok((label.to_string(), PathBuf::from(path)));
    }
    let path = Path::new(path);
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::EmptyComponent {
            component: "path",
            value: entry.to_string(),
        })?;
    Ok((label, path.to_path_buf()))
}

pub fn parse_convention(value: &str) -> Result<SegmentConvention, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "leading" => Ok(SegmentConvention::Leading),
        "trailing" => Ok(SegmentConvention::Trailing),
        _ => Err(ParseError::InvalidConvention(value.to_string())),
    }
}
