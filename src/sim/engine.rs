use crate::{
    foundation::core::{Point, Viewport},
    foundation::error::SwarmResult,
    foundation::math::RandomSource,
    raster::sampler::SampleGrid,
    render::surface::{Dot, TrailSurface},
    sim::clock::{FrameScheduler, TickHandle},
    sim::particle::{PhysicsParams, Particle, retarget_particles, spawn_particles},
};

/// Source of target points for the current viewport.
///
/// The production implementation is [`crate::GlyphTargets`], which rasterizes a
/// fixed text string; tests substitute fixed point sets.
pub trait TargetSource {
    /// Produce the target point set for `viewport` at the given grid.
    ///
    /// Must be deterministic for identical inputs and must return an empty set
    /// (not an error) for degenerate viewports.
    fn targets(&mut self, viewport: Viewport, grid: SampleGrid) -> SwarmResult<Vec<Point>>;
}

/// Animation loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No active frame loop; entered on teardown and before the first tick.
    Idle,
    /// One frame callback is armed at all times; each tick re-arms itself.
    Running,
}

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Spring-damper integration constants.
    pub physics: PhysicsParams,
    /// Sampling grid for the rasterizer pass.
    pub grid: SampleGrid,
    /// Per-tick trail fade amount in `[0, 1]`; the fraction of remaining alpha
    /// erased before the new dots are drawn.
    pub fade: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            grid: SampleGrid::default(),
            fade: 0.1,
        }
    }
}

/// The particle engine: owns the particle set and the drawing surface, and
/// advances both on a host-driven cooperative frame loop.
///
/// Lifecycle: [`mount`](Self::mount) arms a single deferred callback (the
/// mount-delay timer); the first delivered [`tick`](Self::tick) builds the
/// target set and transitions `Idle -> Running`; [`teardown`](Self::teardown)
/// cancels the pending callback, detaches resize handling, and returns to
/// `Idle`. All operations are silent no-ops when no surface could be acquired,
/// so the surrounding page renders without the decorative effect.
pub struct ParticleEngine<T, S, R>
where
    T: TargetSource,
    S: TrailSurface,
    R: RandomSource,
{
    config: EngineConfig,
    source: T,
    surface: Option<S>,
    rng: R,
    state: EngineState,
    particles: Vec<Particle>,
    pending: Option<TickHandle>,
    mounted: bool,
}

impl<T, S, R> ParticleEngine<T, S, R>
where
    T: TargetSource,
    S: TrailSurface,
    R: RandomSource,
{
    /// Construct an engine in `Idle`. Pass `None` for the surface when the host
    /// could not acquire a drawing context; the engine then never starts.
    pub fn new(config: EngineConfig, source: T, surface: Option<S>, rng: R) -> Self {
        Self {
            config,
            source,
            surface,
            rng,
            state: EngineState::Idle,
            particles: Vec::new(),
            pending: None,
            mounted: false,
        }
    }

    /// Current loop state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Read-only view of the live particle set.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Handle of the armed frame callback, if any.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Borrow the owned surface, when one was acquired.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Attach to the host: arms the deferred first callback so layout can
    /// settle before the first visible particle motion. No-op without a
    /// surface, and when already mounted.
    pub fn mount(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.surface.is_none() {
            tracing::debug!("no drawing surface; engine stays idle");
            return;
        }
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.pending = Some(scheduler.request_tick());
        tracing::debug!("engine mounted, first tick deferred");
    }

    /// Run one tick: on the first delivery, build the particle set and enter
    /// `Running`; then fade the trail, step every particle, draw the dots, and
    /// re-arm exactly one callback.
    ///
    /// `handle` is the delivered callback. Deliveries that do not match the
    /// armed handle (stale after teardown, or a host calling out of band) are
    /// ignored without consuming the armed callback.
    pub fn tick(
        &mut self,
        handle: TickHandle,
        scheduler: &mut dyn FrameScheduler,
    ) -> SwarmResult<()> {
        if !self.mounted || self.pending != Some(handle) {
            return Ok(());
        }
        self.pending = None;
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        if self.state == EngineState::Idle {
            let viewport = surface.viewport();
            let targets = self.source.targets(viewport, self.config.grid)?;
            self.particles = spawn_particles(&targets, viewport, &mut self.rng);
            self.state = EngineState::Running;
            tracing::debug!(particles = self.particles.len(), "engine running");
        }

        surface.fade(self.config.fade);

        let mut dots = Vec::with_capacity(self.particles.len());
        for particle in &mut self.particles {
            particle.step(&self.config.physics, &mut self.rng);
            dots.push(Dot {
                center: particle.pos,
                radius: particle.radius,
                color: particle.color,
            });
        }
        surface.draw_dots(&dots)?;

        self.pending = Some(scheduler.request_tick());
        Ok(())
    }

    /// Handle a host resize: resize the surface, recompute targets, and
    /// reassign them while leaving particle positions and velocities untouched.
    /// Ignored after teardown (the listener is deregistered).
    pub fn resize(&mut self, viewport: Viewport) -> SwarmResult<()> {
        if !self.mounted {
            return Ok(());
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        surface.resize(viewport)?;
        if self.state == EngineState::Running {
            let targets = self.source.targets(viewport, self.config.grid)?;
            retarget_particles(&mut self.particles, &targets, viewport, &mut self.rng);
            tracing::debug!(
                ?viewport,
                particles = self.particles.len(),
                "targets reassigned after resize"
            );
        }
        Ok(())
    }

    /// Detach from the host: cancel the pending callback, then stop listening
    /// for resizes, in that order. Idempotent; a second call is a no-op.
    pub fn teardown(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_tick(handle);
        }
        self.mounted = false;
        self.state = EngineState::Idle;
        self.particles.clear();
        tracing::debug!("engine torn down");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/engine.rs"]
mod tests;
