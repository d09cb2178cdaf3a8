use super::document::{DocumentError, display, read_json, read_to_string};
use crate::core::models::derive::ReagentProfile;
use crate::core::models::factor::{FactorTable, ReagentFactor};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
struct TomlFactorFile {
    #[serde(default)]
    reagents: Vec<ReagentFactor>,
}

#[derive(Deserialize)]
struct TomlProfileFile {
    #[serde(default)]
    profiles: Vec<ReagentProfile>,
}

impl FactorTable {
    /// Loads a reagent factor table, choosing the format from the file extension.
    ///
    /// - `.csv`: one row per reagent with camelCase headers; an empty `regeneration` cell
    ///   means the value is absent.
    /// - `.toml`: an array of `[[reagents]]` tables.
    /// - `.json`: an array of reagent objects.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let reagents = match extension.as_deref() {
            Some("csv") => Self::load_csv(path)?,
            Some("toml") => Self::load_toml(path)?,
            Some("json") => read_json::<Vec<ReagentFactor>>(path)?,
            _ => {
                return Err(DocumentError::UnsupportedFormat {
                    path: display(path),
                });
            }
        };

        let table = Self::from_reagents(reagents);
        info!(
            "Loaded {} reagent factors from '{}'.",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Loads reagent data-sheet profiles and derives one factor row from each.
    ///
    /// - `.toml`: an array of `[[profiles]]` tables.
    /// - `.json`: an array of profile objects.
    pub fn load_profiles(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let profiles = match extension.as_deref() {
            Some("toml") => {
                let content = read_to_string(path)?;
                let file: TomlProfileFile =
                    toml::from_str(&content).map_err(|e| DocumentError::Toml {
                        path: display(path),
                        source: e,
                    })?;
                file.profiles
            }
            Some("json") => read_json::<Vec<ReagentProfile>>(path)?,
            _ => {
                return Err(DocumentError::UnsupportedFormat {
                    path: display(path),
                });
            }
        };

        let table = Self::from_reagents(profiles.iter().map(ReagentFactor::from));
        info!(
            "Derived {} reagent factors from profiles in '{}'.",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    fn load_csv(path: &Path) -> Result<Vec<ReagentFactor>, DocumentError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DocumentError::Csv {
                path: display(path),
                source: e,
            })?;

        let mut reagents = Vec::new();
        for result in reader.deserialize::<ReagentFactor>() {
            let record = result.map_err(|e| DocumentError::Csv {
                path: display(path),
                source: e,
            })?;
            reagents.push(record);
        }
        Ok(reagents)
    }

    fn load_toml(path: &Path) -> Result<Vec<ReagentFactor>, DocumentError> {
        let content = read_to_string(path)?;
        let file: TomlFactorFile = toml::from_str(&content).map_err(|e| DocumentError::Toml {
            path: display(path),
            source: e,
        })?;
        Ok(file.reagents)
    }
}
