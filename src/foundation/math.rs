/// Injectable source of uniform randomness.
///
/// All randomness in the engine (spawn positions, palette picks, per-tick jitter)
/// flows through this trait so deterministic tests can seed or disable it.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`.
    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * f64::from(self.next_f32())
    }

    /// Uniform sample in `[-magnitude, magnitude)`, symmetric around zero.
    fn symmetric(&mut self, magnitude: f64) -> f64 {
        (f64::from(self.next_f32()) - 0.5) * 2.0 * magnitude
    }
}

/// Seeded xorshift32 generator.
///
/// Not cryptographic; picked for speed and for byte-stable sequences across
/// platforms, which the deterministic tests rely on.
#[derive(Clone, Copy, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Construct from a seed. Zero seeds are remapped since xorshift has a
    /// fixed point at zero.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }
}

impl RandomSource for Xorshift32 {
    fn next_f32(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state >> 8) as f32 * (1.0 / 16_777_216.0)
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}
