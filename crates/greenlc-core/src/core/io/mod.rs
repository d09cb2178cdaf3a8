//! Reading and writing the engine's documents.
//!
//! Input documents and reports are JSON. Reagent factor tables may additionally be CSV or TOML,
//! selected by file extension. All failures surface as [`DocumentError`], carrying the path that
//! could not be read or written.

pub mod document;
pub mod factors;

pub use document::{DocumentError, read_json, write_json};
