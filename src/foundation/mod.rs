//! Shared primitives: geometry/color types, error taxonomy, randomness.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
