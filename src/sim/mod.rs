//! Particle simulation: physics step, frame clock seam, and the engine
//! lifecycle state machine.

pub(crate) mod clock;
pub(crate) mod engine;
pub(crate) mod particle;
