use crate::{
    foundation::core::Point,
    foundation::error::{SwarmError, SwarmResult},
};

/// Alpha-channel readback of one rasterization pass.
///
/// Transient: produced by [`crate::TextRasterizer::rasterize_centered`], scanned
/// once by [`sample_targets`], then dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major alpha bytes, one per pixel.
    pub alpha: Vec<u8>,
}

impl AlphaMap {
    /// Construct a map, validating that `alpha` covers `width * height` pixels.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> SwarmResult<Self> {
        let expected = (width as usize).saturating_mul(height as usize);
        if alpha.len() != expected {
            return Err(SwarmError::raster(format!(
                "alpha map byte len {} does not match {width}x{height}",
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Zero-sized map; sampling it yields no points.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            alpha: Vec::new(),
        }
    }
}

/// Fixed-stride sampling grid over an [`AlphaMap`].
///
/// A coarser stride yields fewer, larger-looking particles and a cheaper
/// simulation; the stride is the primary lever bounding per-tick cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SampleGrid {
    /// Grid step in pixels along both axes.
    pub stride: u32,
    /// Exclusive alpha visibility threshold; cells at or below it are skipped.
    pub threshold: u8,
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            stride: 4,
            threshold: 128,
        }
    }
}

impl SampleGrid {
    /// Construct a grid with a validated non-zero stride.
    pub fn new(stride: u32, threshold: u8) -> SwarmResult<Self> {
        if stride == 0 {
            return Err(SwarmError::validation("sample stride must be > 0"));
        }
        Ok(Self { stride, threshold })
    }
}

/// Scan `map` on the grid and emit a target point for every sampled cell whose
/// alpha exceeds the visibility threshold.
///
/// Scan order is row-major (y outer, x inner), so for identical inputs the
/// output sequence is identical; there is no hidden randomness here.
pub fn sample_targets(map: &AlphaMap, grid: SampleGrid) -> Vec<Point> {
    let stride = grid.stride.max(1) as usize;
    let (w, h) = (map.width as usize, map.height as usize);

    let mut out = Vec::new();
    for y in (0..h).step_by(stride) {
        for x in (0..w).step_by(stride) {
            if map.alpha[y * w + x] > grid.threshold {
                out.push(Point::new(x as f64, y as f64));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sampler.rs"]
mod tests;
