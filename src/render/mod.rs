//! Trail rendering: the surface seam the engine draws through, plus the CPU
//! implementation.

pub(crate) mod cpu;
pub(crate) mod surface;
