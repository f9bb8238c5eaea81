//! Common utilities shared across CLI commands.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use hitomezashi::{
    Axis, AxisSequence, Canvas, Cloth, DrawCall, RecordingCanvas, Rng, Shape, SvgCanvas,
};

use super::frames::FrameSequence;
use super::raster::RasterCanvas;

/// Output format for a rendered cloth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG frames under `<out>/<name>/`.
    Png,
    /// SVG document on stdout.
    Svg,
    /// Start states and draw calls as JSON on stdout.
    Json,
}

/// Flags every rendering command accepts.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Base folder for PNG frames and GIFs
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Seed for randomized start states (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to render, each with freshly generated start states
    #[arg(long, default_value_t = 1)]
    pub frames: usize,

    /// Collate the PNG frames into an animated GIF
    #[arg(long)]
    pub gif: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u32,

    /// Also draw the cell fills under the stitches
    #[arg(long)]
    pub cells: bool,
}

impl OutputArgs {
    /// The seed to use, drawing a fresh one if none was given.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Draw a cloth: cells first (when asked), then stitches on top.
pub fn paint<C: Canvas + ?Sized>(cloth: &Cloth, canvas: &mut C, cells: bool) -> usize {
    let mut drawn = 0;
    if cells {
        drawn += cloth.draw_cells(canvas);
    }
    drawn + cloth.draw_stitches(canvas)
}

/// Render a cloth as an SVG document.
pub fn to_svg(cloth: &Cloth, cells: bool) -> String {
    let (width, height) = cloth.canvas_size();
    let mut canvas = SvgCanvas::new(width as f64, height as f64, cloth.background);
    paint(cloth, &mut canvas, cells);
    canvas.finish()
}

/// Render a cloth into a raster canvas sized to fit it.
pub fn to_raster(cloth: &Cloth, cells: bool) -> Result<RasterCanvas> {
    let (width, height) = cloth.canvas_size();
    let mut canvas = RasterCanvas::new(width, height, cloth.background)?;
    paint(cloth, &mut canvas, cells);
    Ok(canvas)
}

/// One block's start states in a JSON report.
#[derive(Debug, Serialize)]
pub struct BlockReport<'a> {
    pub name: &'a str,
    pub shape: Shape,
    pub grid: (usize, usize),
    pub sequences: &'a BTreeMap<Axis, AxisSequence>,
}

/// JSON dump of a rendered cloth.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub name: &'a str,
    pub seed: u64,
    pub canvas: (u32, u32),
    pub blocks: Vec<BlockReport<'a>>,
    pub calls: Vec<DrawCall>,
}

impl<'a> Report<'a> {
    pub fn new(cloth: &'a Cloth, seed: u64, cells: bool) -> Self {
        let mut canvas = RecordingCanvas::new();
        paint(cloth, &mut canvas, cells);

        Report {
            name: cloth.name(),
            seed,
            canvas: cloth.canvas_size(),
            blocks: cloth
                .blocks()
                .iter()
                .map(|block| BlockReport {
                    name: block.name(),
                    shape: block.shape(),
                    grid: block.grid(),
                    sequences: block.sequences(),
                })
                .collect(),
            calls: canvas.calls,
        }
    }
}

/// Build and emit a cloth according to `args`.
///
/// `build` is called once per frame with the same seeded source, so each
/// frame gets the next draws rather than a repeat of the first.
pub fn emit<F>(args: &OutputArgs, mut build: F) -> Result<()>
where
    F: FnMut(&mut Rng) -> Result<Cloth>,
{
    if args.frames == 0 {
        bail!("--frames must be at least 1");
    }

    let seed = args.resolve_seed();
    info!(seed, "seeded start states");
    let mut rng = Rng::new(seed);

    match args.format {
        OutputFormat::Svg => {
            let cloth = build(&mut rng)?;
            write_stdout(&to_svg(&cloth, args.cells))
        }
        OutputFormat::Json => {
            let cloth = build(&mut rng)?;
            let json = serde_json::to_string_pretty(&Report::new(&cloth, seed, args.cells))
                .context("Failed to serialize report")?;
            write_stdout(&json)
        }
        OutputFormat::Png => {
            let mut cloth = build(&mut rng)?;
            let mut frames = FrameSequence::create(&args.out, cloth.name())?;
            for n in 1..=args.frames {
                let path = frames.save_frame(to_raster(&cloth, args.cells)?.into_image()?)?;
                info!(path = %path.display(), "wrote frame");
                if n < args.frames {
                    cloth = build(&mut rng)?;
                }
            }

            if args.gif {
                let path = frames.make_gif(args.delay_ms)?;
                eprintln!("Wrote: {}", path.display());
            }
            eprintln!("Wrote {} frame(s) to {}", frames.len(), frames.dir().display());
            Ok(())
        }
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("Failed to write output")?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").context("Failed to write output")?;
    }
    Ok(())
}
