//! # Workflows Module
//!
//! The top-level entry points of the scoring engine.
//!
//! ## Overview
//!
//! Each workflow takes an explicit, immutable input snapshot and returns a fresh output value.
//! Nothing is cached between calls and no input is mutated, so concurrent callers may invoke a
//! workflow freely and keep whichever result they consider current.
//!
//! - **Evaluation** ([`evaluate`]) - One method: gradient integration, stage aggregation, and
//!   weighted combination into a [`ScoreReport`](crate::engine::result::ScoreReport)
//! - **Comparison** ([`compare`]) - Several labelled results: per-factor series, best performer
//!   per factor, and an ascending ranking with a recommendation

pub mod compare;
pub mod evaluate;
