use vello_cpu::kurbo::Shape;

use crate::{
    foundation::core::Viewport,
    foundation::error::{SwarmError, SwarmResult},
    foundation::math::mul_div255_u8,
    render::surface::{Dot, FrameRGBA, TrailSurface},
};

/// CPU trail surface backed by a persistent `vello_cpu` pixmap.
///
/// Dots are rasterized into a scratch pixmap and premul-over composited onto
/// the retained trail; `vello_cpu` always renders into a fresh buffer, so
/// accumulation has to happen in the composite step. The fade step multiplies
/// every premultiplied channel of the trail, which is exactly alpha-only
/// (destination-out) erasure.
pub struct CpuSurface {
    trail: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuSurface {
    /// Acquire a surface for `viewport`.
    ///
    /// Returns `None` for zero-area viewports and for dimensions beyond the
    /// `u16` raster limit; per the engine's failure semantics this is a
    /// recoverable "no drawing context" condition, not an error.
    pub fn new(viewport: Viewport) -> Option<Self> {
        let (w, h) = checked_dims(viewport)?;
        Some(Self {
            trail: vello_cpu::Pixmap::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            ctx: None,
        })
    }

    fn with_ctx_mut<Out>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> SwarmResult<Out>,
    ) -> SwarmResult<Out> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl TrailSurface for CpuSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(u32::from(self.trail.width()), u32::from(self.trail.height()))
    }

    fn resize(&mut self, viewport: Viewport) -> SwarmResult<()> {
        let (w, h) = checked_dims(viewport).ok_or_else(|| {
            SwarmError::render(format!(
                "cannot resize surface to {}x{}",
                viewport.width, viewport.height
            ))
        })?;
        if (w, h) != (self.trail.width(), self.trail.height()) {
            self.trail = vello_cpu::Pixmap::new(w, h);
            self.scratch = vello_cpu::Pixmap::new(w, h);
            self.ctx = None;
        }
        Ok(())
    }

    fn fade(&mut self, amount: f32) {
        let keep = (1.0 - amount.clamp(0.0, 1.0)) * 255.0;
        let keep = keep.round() as u16;
        if keep >= 255 {
            return;
        }
        if keep == 0 {
            self.trail.data_as_u8_slice_mut().fill(0);
            return;
        }
        for byte in self.trail.data_as_u8_slice_mut() {
            *byte = mul_div255_u8(u16::from(*byte), keep);
        }
    }

    fn draw_dots(&mut self, dots: &[Dot]) -> SwarmResult<()> {
        if dots.is_empty() {
            return Ok(());
        }
        let (w, h) = (self.trail.width(), self.trail.height());
        self.with_ctx_mut(w, h, |this, ctx| {
            for dot in dots {
                let [r, g, b, a] = [dot.color.r, dot.color.g, dot.color.b, dot.color.a];
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                let circle =
                    vello_cpu::kurbo::Circle::new((dot.center.x, dot.center.y), dot.radius);
                ctx.fill_path(&circle.to_path(0.1));
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut this.scratch);
            Ok(())
        })?;

        premul_over_in_place(
            self.trail.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        )
    }

    fn readback_rgba8(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.trail.width()),
            height: u32::from(self.trail.height()),
            data: self.trail.data_as_u8_slice().to_vec(),
        }
    }
}

fn checked_dims(viewport: Viewport) -> Option<(u16, u16)> {
    if viewport.is_empty() {
        return None;
    }
    let w: u16 = viewport.width.try_into().ok()?;
    let h: u16 = viewport.height.try_into().ok()?;
    Some((w, h))
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> SwarmResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(SwarmError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = s[3].saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = s[c].saturating_add(dc);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
