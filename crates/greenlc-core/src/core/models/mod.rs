//! # Core Models Module
//!
//! The data structures exchanged between the scoring engine and the application around it.
//!
//! ## Overview
//!
//! All models are plain serde records whose field names follow the project document format
//! (camelCase). Every field that an editor may leave empty has a default, so a partially
//! filled-in document still deserializes and still scores.
//!
//! ## Key Components
//!
//! - [`factor`] - Reagent factor rows and the name-indexed [`factor::FactorTable`]
//! - [`builtin`] - The predefined reagent table shipped with the engine
//! - [`derive`] - Sub-factor values derived from a reagent's data-sheet properties
//! - [`method`] - Method configuration: sample count, pretreatment reagents, mobile phases, power
//! - [`gradient`] - Gradient steps and the ordered gradient program
//! - [`input`] - The complete scoring input document
//!
//! ## Usage
//!
//! ```ignore
//! use greenlc::core::models::input::ScoringInput;
//!
//! let input: ScoringInput = serde_json::from_str(&document)?;
//! let table = input.factor_table();
//! ```

pub mod builtin;
pub mod derive;
pub mod factor;
pub mod gradient;
pub mod input;
pub mod method;
