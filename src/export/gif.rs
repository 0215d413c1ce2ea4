use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::export::ffmpeg::ensure_parent_dir;
use crate::export::sink::{FrameSink, SinkConfig, check_frame, flatten_premul_over_bg};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::render::backend::FrameRGBA;

/// NeuQuant speed (1 = best quality, 30 = fastest).
const GIF_QUANTIZE_SPEED: i32 = 10;

/// Infinitely looping animated GIF.
///
/// Frames are flattened onto `background` and buffered; the file is encoded in `end`, with a
/// per-frame delay of `1000 / fps` ms.
pub struct GifSink<W: Write> {
    writer: Option<W>,
    background: [u8; 3],
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
}

impl GifSink<BufWriter<File>> {
    /// Sink writing to `path`, creating parent directories.
    pub fn create(path: &Path) -> StickframeResult<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| {
            StickframeError::encode(format!("create '{}': {e}", path.display()))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> GifSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            background: [255, 255, 255],
            cfg: None,
            frames: Vec::new(),
        }
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }
}

impl<W: Write> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> StickframeResult<()> {
        if cfg.fps == 0 {
            return Err(StickframeError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StickframeError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(StickframeError::validation(
                "gif sink width/height must fit in u16",
            ));
        }
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, _idx: usize, frame: &FrameRGBA) -> StickframeResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| StickframeError::encode("gif sink not started"))?;
        check_frame(&cfg, frame)?;

        let mut rgba = vec![0u8; frame.data.len()];
        if frame.premultiplied {
            flatten_premul_over_bg(&mut rgba, &frame.data, self.background)?;
        } else {
            rgba.copy_from_slice(&frame.data);
        }
        let image = RgbaImage::from_raw(cfg.width, cfg.height, rgba)
            .ok_or_else(|| StickframeError::encode("frame buffer does not match dimensions"))?;
        let delay = Delay::from_numer_denom_ms(1000, cfg.fps);
        self.frames.push(Frame::from_parts(image, 0, 0, delay));
        Ok(())
    }

    fn end(&mut self) -> StickframeResult<()> {
        if self.cfg.take().is_none() {
            return Err(StickframeError::encode("gif sink not started"));
        }
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| StickframeError::encode("gif sink is already finalized"))?;

        // Encode in memory so the trailer and the final flush report their I/O errors here.
        let count = self.frames.len();
        let mut encoded = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut encoded, GIF_QUANTIZE_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| StickframeError::encode(format!("gif repeat: {e}")))?;
            encoder
                .encode_frames(std::mem::take(&mut self.frames))
                .map_err(|e| StickframeError::encode(format!("gif encode: {e}")))?;
        }
        writer
            .write_all(&encoded)
            .map_err(|e| StickframeError::encode(format!("gif write: {e}")))?;
        writer
            .flush()
            .map_err(|e| StickframeError::encode(format!("gif flush: {e}")))?;
        tracing::info!(frames = count, "gif written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/gif.rs"]
mod tests;
