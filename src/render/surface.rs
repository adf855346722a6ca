use crate::foundation::{
    core::{Point, Rgba8, Viewport},
    error::SwarmResult,
};

/// One filled circular dot to draw for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Center position.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color.
    pub color: Rgba8,
}

/// A rendered frame in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long, premultiplied alpha.
    pub data: Vec<u8>,
}

/// Drawing surface owned exclusively by the particle engine while running.
///
/// The trail contract: [`fade`](Self::fade) only ever reduces the alpha of
/// already-drawn content (destination-out style), never paints an opaque fill,
/// so whatever the host renders underneath stays visible through the fading
/// trail. Drawing then composites with normal premultiplied source-over.
pub trait TrailSurface {
    /// Current surface size.
    fn viewport(&self) -> Viewport;

    /// Resize the surface, discarding previously drawn trail content.
    fn resize(&mut self, viewport: Viewport) -> SwarmResult<()>;

    /// Fade existing content toward full transparency by `amount` in `[0, 1]`.
    fn fade(&mut self, amount: f32);

    /// Draw the tick's dots over the faded trail.
    fn draw_dots(&mut self, dots: &[Dot]) -> SwarmResult<()>;

    /// Read the current trail contents back as premultiplied RGBA8.
    fn readback_rgba8(&self) -> FrameRGBA;
}
