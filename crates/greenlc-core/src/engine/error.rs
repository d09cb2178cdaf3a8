use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::DocumentError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Document error: {source}")]
    Document {
        #[from]
        source: DocumentError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
