//! # Core Module
//!
//! The stateless foundation of the scoring engine.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Reagent factors, method configuration, gradient programs,
//!   and the input document that bundles them
//! - **Gradient Numerics** ([`gradient`]) - Elution curve shapes, segment integration, and
//!   per-channel volume accumulation
//! - **Scoring Primitives** ([`scoring`]) - The sub-factor normalization law, score records,
//!   weighting scheme catalogs, and the per-reagent contribution calculator
//! - **Document I/O** ([`io`]) - Reading input documents and factor tables (JSON, CSV, TOML)
//!   and writing JSON reports
//!
//! Nothing in this module keeps state between calls; every function takes an explicit
//! snapshot of its inputs and returns a fresh value.

pub mod gradient;
pub mod io;
pub mod models;
pub mod scoring;
