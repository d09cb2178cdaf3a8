use crate::core::models::input::ScoringInput;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unsupported document format for '{path}' (expected .json, .csv or .toml)")]
    UnsupportedFormat { path: String },
}

pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub(crate) fn read_to_string(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: display(path),
        source: e,
    })
}

/// Reads a JSON document of type `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let file = File::open(path).map_err(|e| DocumentError::Io {
        path: display(path),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| DocumentError::Json {
        path: display(path),
        source: e,
    })
}

/// Writes `value` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DocumentError> {
    let io_err = |e| DocumentError::Io {
        path: display(path),
        source: e,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| DocumentError::Json {
        path: display(path),
        source: e,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    debug!("Wrote JSON document to '{}'.", path.display());
    Ok(())
}

impl ScoringInput {
    /// Reads a scoring input document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let input: Self = read_json(path)?;
        debug!(
            "Loaded input '{}': {} factor rows, {} gradient steps.",
            path.display(),
            input.reagent_factors.len(),
            input.gradient.steps.len()
        );
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_reads_input_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("method.json");
        fs::write(
            &path,
            r#"{"methodConfiguration": {"sampleCount": 2}, "weightingScheme": "Equal"}"#,
        )
        .unwrap();

        let input = ScoringInput::load(&path).unwrap();
        assert_eq!(input.method_configuration.sample_count, Some(2));
        assert_eq!(input.weighting_scheme, "Equal");
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ScoringInput::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(DocumentError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let result = ScoringInput::load(&path);
        assert!(matches!(result, Err(DocumentError::Json { .. })));
    }

    #[test]
    fn write_json_then_read_json_preserves_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let input = ScoringInput::default();
        write_json(&path, &input).unwrap();
        let back: ScoringInput = read_json(&path).unwrap();
        assert_eq!(back, input);
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }
}
