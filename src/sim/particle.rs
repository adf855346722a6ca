use crate::foundation::{
    core::{PALETTE, Point, Rgba8, Vec2, Viewport},
    math::RandomSource,
};

/// Spring-damper integration constants applied every tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicsParams {
    /// Spring constant: attraction force per unit of distance to target.
    pub spring_k: f64,
    /// Velocity multiplier applied unconditionally every tick; must be < 1 for
    /// the system to settle.
    pub damping: f64,
    /// Per-axis magnitude of the uniform positional jitter added after
    /// integration. Zero disables jitter (used by deterministic tests).
    pub jitter: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            spring_k: 0.05,
            damping: 0.9,
            jitter: 0.25,
        }
    }
}

/// Inclusive-exclusive range particle radii are drawn from at spawn time.
pub const RADIUS_RANGE: (f64, f64) = (1.5, 4.0);

/// One simulated point of the swarm.
///
/// `target`, `color` and `radius` are fixed at spawn; `pos` and `vel` are
/// mutated every tick by [`Particle::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Current position.
    pub pos: Point,
    /// Destination sampled from the rasterizer pass; 1:1 with one sampled point.
    pub target: Point,
    /// Current velocity.
    pub vel: Vec2,
    /// Palette color assigned at spawn.
    pub color: Rgba8,
    /// Dot radius assigned at spawn.
    pub radius: f64,
}

impl Particle {
    /// Advance one tick: spring attraction toward `target`, damping, position
    /// integration, then organic jitter.
    ///
    /// The zero-distance case is guarded so a particle sitting exactly on its
    /// target gains no velocity from the spring term.
    pub fn step(&mut self, params: &PhysicsParams, rng: &mut dyn RandomSource) {
        let d = self.target - self.pos;
        let distance = d.hypot();

        if distance > 0.0 {
            let force = distance * params.spring_k;
            self.vel += (d / distance) * force;
        }

        self.vel *= params.damping;
        self.pos += self.vel;

        if params.jitter > 0.0 {
            self.pos.x += rng.symmetric(params.jitter);
            self.pos.y += rng.symmetric(params.jitter);
        }
    }

    /// Distance from the current position to the target.
    pub fn distance_to_target(&self) -> f64 {
        (self.target - self.pos).hypot()
    }
}

fn spawn_one(target: Point, bounds: Viewport, rng: &mut dyn RandomSource) -> Particle {
    let pos = Point::new(
        rng.in_range(0.0, f64::from(bounds.width)),
        rng.in_range(0.0, f64::from(bounds.height)),
    );
    let color_index = ((rng.next_f32() * PALETTE.len() as f32) as usize).min(PALETTE.len() - 1);
    Particle {
        pos,
        target,
        vel: Vec2::ZERO,
        color: PALETTE[color_index],
        radius: rng.in_range(RADIUS_RANGE.0, RADIUS_RANGE.1),
    }
}

/// Spawn one particle per target point, at a uniformly random position across
/// `bounds`, with zero velocity and a random palette color and radius.
pub fn spawn_particles(
    targets: &[Point],
    bounds: Viewport,
    rng: &mut dyn RandomSource,
) -> Vec<Particle> {
    targets
        .iter()
        .map(|&target| spawn_one(target, bounds, rng))
        .collect()
}

/// Reassign targets after a resize.
///
/// Existing particles keep their position and velocity and only receive the new
/// target, so motion continues smoothly instead of snapping. Count mismatches
/// are the expected steady state: extra particles are dropped, missing ones are
/// spawned fresh at random positions.
pub fn retarget_particles(
    particles: &mut Vec<Particle>,
    targets: &[Point],
    bounds: Viewport,
    rng: &mut dyn RandomSource,
) {
    let shared = particles.len().min(targets.len());
    for (particle, &target) in particles.iter_mut().zip(targets) {
        particle.target = target;
    }
    particles.truncate(targets.len());
    for &target in &targets[shared..] {
        particles.push(spawn_one(target, bounds, rng));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/particle.rs"]
mod tests;
