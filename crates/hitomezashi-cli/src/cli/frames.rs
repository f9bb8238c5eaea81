//! Numbered PNG snapshots and their collation into an animated GIF.
//!
//! Frames for a cloth named `name` land in `<base>/<name>/Frame 1.png`,
//! `Frame 2.png`, ... and the GIF next to them as `<name>_sequence.gif`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::debug;

#[derive(Debug)]
pub struct FrameSequence {
    name: String,
    dir: PathBuf,
    count: usize,
}

impl FrameSequence {
    /// Create (if needed) the frame folder `<base>/<name>`.
    pub fn create(base: &Path, name: &str) -> Result<Self> {
        let dir = base.join(name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create frame folder {}", dir.display()))?;
        Ok(Self { name: name.to_string(), dir, count: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames saved so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn frame_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("Frame {}.png", n))
    }

    /// Save the next frame. Returns where it was written.
    pub fn save_frame(&mut self, image: RgbaImage) -> Result<PathBuf> {
        self.count += 1;
        let path = self.frame_path(self.count);
        image
            .save(&path)
            .with_context(|| format!("Failed to write frame {}", path.display()))?;
        debug!(frame = self.count, path = %path.display(), "saved frame");
        Ok(path)
    }

    /// Collate every saved frame, in order, into a looping GIF.
    pub fn make_gif(&self, delay_ms: u32) -> Result<PathBuf> {
        if self.is_empty() {
            bail!("No frames saved for '{}'", self.name);
        }

        let path = self.dir.join(format!("{}_sequence.gif", self.name));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite).context("Failed to set GIF loop")?;

        for n in 1..=self.count {
            let frame_path = self.frame_path(n);
            let image = image::open(&frame_path)
                .with_context(|| format!("Failed to read frame {}", frame_path.display()))?
                .into_rgba8();
            let frame = Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
            encoder.encode_frame(frame).context("Failed to encode GIF frame")?;
        }

        debug!(frames = self.count, path = %path.display(), "wrote gif");
        Ok(path)
    }
}
