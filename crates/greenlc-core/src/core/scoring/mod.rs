//! Scoring primitives shared by both stages.
//!
//! - [`normalization`] - the logarithmic law mapping `mass × factor` onto `[0, 100]`
//! - [`term`] - fixed-shape records for the nine sub-factors and six primary factors
//! - [`weights`] - the named weighting-scheme catalogs
//! - [`contribution`] - per-occurrence mass and normalized scores

pub mod contribution;
pub mod normalization;
pub mod term;
pub mod weights;
