//! Rasterizer/sampler: turns a text string and a viewport into target points.
//!
//! Leaf component: depends only on the shaping/raster crates, never on the
//! particle engine's state.

pub(crate) mod sampler;
pub(crate) mod typeset;
