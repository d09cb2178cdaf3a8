//! Gradient numerics: curve shapes, per-segment integration, and channel volume accumulation.
//!
//! [`curve`] holds the eleven interpolation shapes and the single trapezoid routine they share.
//! [`volume`] walks a [`GradientProgram`](crate::core::models::gradient::GradientProgram)
//! segment by segment and turns integrated percentage areas into millilitres per channel.

pub mod curve;
pub mod volume;
