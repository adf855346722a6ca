//! Glyphswarm is a real-time particle text animation engine.
//!
//! It assembles a block of text out of thousands of independently-simulated
//! points: target glyph shapes are rasterized and sampled into a target point
//! cloud, a particle spawns at a random position for each target, and a
//! spring-damper physics step runs every frame until the particles visually
//! "paint" the text, after which they keep jittering while the trail slowly
//! fades.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize/sample**: text + viewport -> target points ([`GlyphTargets`])
//! 2. **Spawn**: one particle per target, random position/color/radius
//! 3. **Tick**: fade trail -> spring-damper step -> draw dots -> re-arm
//! 4. **Readback** (optional): premultiplied RGBA8 frames for offline output
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded cooperative scheduling**: exactly one tick is ever in
//!   flight; the engine re-arms only after finishing the current tick.
//! - **Deterministic core**: rasterization and sampling are pure; all
//!   randomness flows through an injectable [`RandomSource`].
//! - **Alpha-only trail erasure**: the fade step never paints an opaque fill,
//!   so the host background stays visible through the trail.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod raster;
mod render;
mod sim;

pub use foundation::core::{PALETTE, Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{SwarmError, SwarmResult};
pub use foundation::math::{RandomSource, Xorshift32};
pub use raster::sampler::{AlphaMap, SampleGrid, sample_targets};
pub use raster::typeset::{GlyphTargets, TextRasterizer, font_size_for};
pub use render::cpu::CpuSurface;
pub use render::surface::{Dot, FrameRGBA, TrailSurface};
pub use sim::clock::{FrameScheduler, ManualScheduler, TickHandle};
pub use sim::engine::{EngineConfig, EngineState, ParticleEngine, TargetSource};
pub use sim::particle::{
    Particle, PhysicsParams, RADIUS_RANGE, retarget_particles, spawn_particles,
};
