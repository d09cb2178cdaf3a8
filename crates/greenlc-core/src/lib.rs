//! # GreenLC Core Library
//!
//! A deterministic green-chemistry scoring engine for liquid-chromatography methods. Given a
//! method configuration (sample pretreatment plus a gradient elution program) and a reagent
//! factor table, the library computes per-reagent masses, normalized sub-factor scores,
//! stage totals, and a final weighted score.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout, so that every numeric step can be
//! tested on its own and the whole pipeline stays a pure function of its inputs.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MethodConfiguration`,
//!   `GradientProgram`, `FactorTable`), the gradient numerics (`curve`, `volume`), the
//!   normalization law and weighting catalogs (`scoring`), and document I/O.
//!
//! - **[`engine`]: The Logic Core.** Configuration, progress reporting, and the pipeline
//!   stages: stage aggregation, weighted combination, and multi-method comparison.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together. `evaluate::run`
//!   turns one input document into a `ScoreReport`; `compare::run` ranks several results.
//!
//! The engine holds no mutable shared state. Re-running it on the same input yields
//! bit-identical output, and partially filled-in inputs always produce a well-formed,
//! possibly zero-valued, result.

pub mod core;
pub mod engine;
pub mod workflows;
