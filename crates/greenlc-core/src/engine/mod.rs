//! # Engine Module
//!
//! The scoring pipeline that sits between the stateless primitives in [`crate::core`] and the
//! public entry points in [`crate::workflows`].
//!
//! ## Overview
//!
//! An evaluation runs in three stages. The [`stage`] aggregator scores every reagent
//! occurrence of the sample preparation and instrument analysis stages. The [`combine`] step
//! merges the two stage totals with a named final scheme into a [`result::ScoreResult`]. Finally,
//! [`compare`] ranks several results against each other.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Normalization laws, integration settings, and weighting schemes
//! - **Stage Aggregation** ([`stage`]) - Per-stage sums, skipped occurrences, Power inputs
//! - **Weighted Combination** ([`combine`]) - Final per-factor values and the scalar total score
//! - **Result Documents** ([`result`]) - The score-result document and the detailed report
//! - **Comparison** ([`compare`]) - Best performer per factor and ascending ranking
//! - **Progress Monitoring** ([`progress`]) - Phase events for interactive front ends
//! - **Error Handling** ([`error`]) - The workflow-level error type
//!
//! None of the pipeline stages can fail. Incomplete input produces zero-valued scores and a
//! list of skipped occurrences rather than an error.

pub mod combine;
pub mod compare;
pub mod config;
pub mod error;
pub mod progress;
pub mod result;
pub mod stage;
