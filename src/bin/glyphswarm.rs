use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use glyphswarm::{
    CpuSurface, EngineConfig, FrameRGBA, GlyphTargets, ManualScheduler, ParticleEngine, Rgba8,
    TrailSurface as _, Viewport, Xorshift32,
};

#[derive(Parser, Debug)]
#[command(name = "glyphswarm", version)]
/// Offline driver: runs the particle text animation for a fixed number of
/// ticks and dumps PNG frames.
struct Cli {
    /// Text string the particles assemble.
    #[arg(long, default_value = "HAPPY BIRTHDAY")]
    text: String,

    /// Path to a TTF/OTF font file used for glyph rasterization.
    #[arg(long)]
    font: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u32,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    /// Dump one PNG every N ticks.
    #[arg(long, default_value_t = 5)]
    dump_every: u32,

    /// Seed for spawn positions, colors, and jitter.
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Sampling stride in pixels; overrides the config file's grid stride.
    #[arg(long)]
    stride: Option<u32>,

    /// Opaque background color the frames are composited over, as #rrggbb.
    #[arg(long, default_value = "#18181b")]
    background: String,

    /// Optional JSON file overriding the engine config (physics, grid, fade).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            serde_json::from_slice::<EngineConfig>(&bytes)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => EngineConfig::default(),
    };
    let config = match cli.stride {
        Some(stride) => EngineConfig {
            grid: glyphswarm::SampleGrid::new(stride, config.grid.threshold)
                .context("invalid --stride")?,
            ..config
        },
        None => config,
    };

    let background =
        Rgba8::from_hex(&cli.background).context("parse --background as #rrggbb")?;
    let font_bytes = std::fs::read(&cli.font)
        .with_context(|| format!("read font '{}'", cli.font.display()))?;
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("create output dir '{}'", cli.out.display()))?;

    let viewport = Viewport::new(cli.width, cli.height);
    let surface = CpuSurface::new(viewport);
    if surface.is_none() {
        eprintln!(
            "no drawing surface for {}x{}; nothing to render",
            cli.width, cli.height
        );
        return Ok(());
    }

    let source = GlyphTargets::new(cli.text.clone(), font_bytes);
    let mut engine = ParticleEngine::new(config, source, surface, Xorshift32::new(cli.seed));
    let mut scheduler = ManualScheduler::new();

    engine.mount(&mut scheduler);

    let mut dumped = 0u32;
    for tick in 0..cli.ticks {
        if let Some(handle) = scheduler.take_due() {
            engine.tick(handle, &mut scheduler)?;
        }
        if cli.dump_every > 0 && tick % cli.dump_every == 0 {
            if let Some(surface) = engine.surface() {
                let frame = surface.readback_rgba8();
                let path = cli.out.join(format!("frame_{tick:05}.png"));
                write_png_over_background(&frame, background, &path)?;
                dumped += 1;
            }
        }
    }

    let particle_count = engine.particles().len();
    engine.teardown(&mut scheduler);
    println!(
        "simulated {} ticks with {} particles, wrote {} frames to {}",
        cli.ticks,
        particle_count,
        dumped,
        cli.out.display()
    );
    Ok(())
}

/// Composite a premultiplied frame over an opaque background and save it as a
/// straight-alpha PNG. Keeping the composite here (not in the engine) mirrors
/// the runtime contract: the background belongs to the host, the engine only
/// ever owns a transparent trail layer.
fn write_png_over_background(
    frame: &FrameRGBA,
    background: Rgba8,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    let mut out = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        let inv = 255u16 - u16::from(px[3]);
        let over = |s: u8, b: u8| -> u8 {
            s.saturating_add((((u16::from(b) * inv) + 127) / 255) as u8)
        };
        out.push(over(px[0], background.r));
        out.push(over(px[1], background.g));
        out.push(over(px[2], background.b));
        out.push(255);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, out)
        .context("frame buffer size mismatch")?;
    img.save(path)
        .with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}
