use crate::{
    foundation::core::{Point, Viewport},
    foundation::error::{SwarmError, SwarmResult},
    raster::sampler::{AlphaMap, SampleGrid, sample_targets},
    sim::engine::TargetSource,
};

/// Viewport width below which the narrow (mobile) font scaling applies.
pub const NARROW_VIEWPORT_PX: f32 = 640.0;

/// Vertical lift applied to the text block so it sits slightly above center.
const VERTICAL_LIFT_PX: f64 = 50.0;

/// Responsive font-size policy.
///
/// Narrow viewports scale at `width / 15` capped at 60 px; wide viewports at
/// `width / 12` capped at 100 px, so the text never overflows the surface.
pub fn font_size_for(viewport_width: u32) -> f32 {
    let w = viewport_width as f32;
    if w < NARROW_VIEWPORT_PX {
        (w / 15.0).min(60.0)
    } else {
        (w / 12.0).min(100.0)
    }
}

/// Marker brush for sample-pass layouts. The sample buffer is only ever read
/// back through its alpha channel, so glyphs carry no per-run color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SampleBrush;

/// Stateful text rasterizer: shapes a string with Parley and renders the glyph
/// fill into a transient pixel buffer for alpha sampling.
///
/// The buffer is scratch space only. The visible output of the engine is painted
/// exclusively by particles, never by the rasterized glyphs themselves.
pub struct TextRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<SampleBrush>,
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer {
    /// Construct a rasterizer with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Render `text` centered on a `viewport`-sized buffer and read back the
    /// alpha channel.
    ///
    /// Font size follows [`font_size_for`]. Zero-area viewports and empty text
    /// produce an empty map, not an error; dimensions beyond the CPU raster
    /// limit do error, since no meaningful sample set exists at that point.
    #[tracing::instrument(skip(self, font_bytes))]
    pub fn rasterize_centered(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        viewport: Viewport,
    ) -> SwarmResult<AlphaMap> {
        if viewport.is_empty() || text.is_empty() {
            return Ok(AlphaMap::empty());
        }
        let w: u16 = viewport
            .width
            .try_into()
            .map_err(|_| SwarmError::raster("viewport width exceeds u16 raster limit"))?;
        let h: u16 = viewport
            .height
            .try_into()
            .map_err(|_| SwarmError::raster("viewport height exceeds u16 raster limit"))?;

        let size_px = font_size_for(viewport.width);
        let layout = self.layout_plain(text, font_bytes, size_px)?;

        let tx = (f64::from(viewport.width) - f64::from(layout.width())) / 2.0;
        let ty = (f64::from(viewport.height) - f64::from(layout.height())) / 2.0 - VERTICAL_LIFT_PX;

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes.to_vec()), 0);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((tx, ty)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let alpha = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        AlphaMap::new(viewport.width, viewport.height, alpha)
    }

    /// Shape and lay out a single line of bold text from raw font bytes.
    fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
    ) -> SwarmResult<parley::Layout<SampleBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SwarmError::validation("font size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SwarmError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SwarmError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<SampleBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Production [`TargetSource`]: rasterizes a fixed text string and samples the
/// illuminated pixels into target points.
pub struct GlyphTargets {
    text: String,
    font_bytes: Vec<u8>,
    rasterizer: TextRasterizer,
}

impl GlyphTargets {
    /// Build a target source for `text` rendered with the given font bytes.
    pub fn new(text: impl Into<String>, font_bytes: Vec<u8>) -> Self {
        Self {
            text: text.into(),
            font_bytes,
            rasterizer: TextRasterizer::new(),
        }
    }

    /// The text this source rasterizes.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TargetSource for GlyphTargets {
    fn targets(&mut self, viewport: Viewport, grid: SampleGrid) -> SwarmResult<Vec<Point>> {
        let map = self
            .rasterizer
            .rasterize_centered(&self.text, &self.font_bytes, viewport)?;
        Ok(sample_targets(&map, grid))
    }
}
