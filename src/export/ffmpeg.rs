use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::export::sink::{FrameSink, SinkConfig, check_frame, flatten_premul_over_bg};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::render::backend::FrameRGBA;

/// VP9 constant-quality level, 0 (best) to 63.
const VP9_CRF: u32 = 32;

/// Where and how [`WebmSink`] writes.
#[derive(Clone, Debug)]
pub struct WebmSinkOpts {
    pub out_path: PathBuf,
    /// Replace an existing file instead of failing.
    pub overwrite: bool,
    /// Color transparent canvas areas are flattened onto.
    pub bg_rgb: [u8; 3],
}

impl WebmSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgb: [255, 255, 255],
        }
    }
}

/// Encodes frames to VP9 WebM by piping opaque RGBA8 into the system `ffmpeg`.
pub struct WebmSink {
    opts: WebmSinkOpts,
    encoder: Option<EncoderProcess>,
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    next_idx: usize,
}

impl WebmSink {
    pub fn new(opts: WebmSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            scratch: Vec::new(),
            next_idx: 0,
        }
    }
}

impl FrameSink for WebmSink {
    fn begin(&mut self, cfg: SinkConfig) -> StickframeResult<()> {
        if cfg.fps == 0 || cfg.width == 0 || cfg.height == 0 {
            return Err(StickframeError::validation(
                "webm export needs a non-zero size and frame rate",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(StickframeError::validation(format!(
                "webm export needs even dimensions, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(StickframeError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(StickframeError::unavailable(
                "WebM export requires ffmpeg on PATH",
            ));
        }

        self.encoder = Some(EncoderProcess::spawn(encoder_args(&cfg, &self.opts))?);
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.next_idx = 0;
        tracing::debug!(path = %self.opts.out_path.display(), "ffmpeg started");
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> StickframeResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(StickframeError::encode("webm sink not started"));
        };
        if idx < self.next_idx {
            return Err(StickframeError::encode(format!(
                "webm frame {idx} arrived after frame {}",
                self.next_idx - 1
            )));
        }
        self.next_idx = idx + 1;
        check_frame(cfg, frame)?;

        if frame.premultiplied {
            flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgb)?;
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }
        encoder.write_frame(&self.scratch)
    }

    fn end(&mut self) -> StickframeResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| StickframeError::encode("webm sink not started"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::info!(path = %self.opts.out_path.display(), "webm written");
        Ok(())
    }
}

/// Command line for raw RGBA8 on stdin to VP9 in a WebM container.
fn encoder_args(cfg: &SinkConfig, opts: &WebmSinkOpts) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = cfg.fps.to_string();
    let crf = VP9_CRF.to_string();
    let overwrite = if opts.overwrite { "-y" } else { "-n" };

    let mut args: Vec<OsString> = [
        overwrite,
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        size.as_str(),
        "-r",
        rate.as_str(),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libvpx-vp9",
        "-pix_fmt",
        "yuv420p",
        "-b:v",
        "0",
        "-crf",
        crf.as_str(),
        "-f",
        "webm",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(opts.out_path.clone().into_os_string());
    args
}

/// A running `ffmpeg` with its stdin pipe and a thread collecting its stderr.
struct EncoderProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl EncoderProcess {
    fn spawn(args: Vec<OsString>) -> StickframeResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StickframeError::unavailable(format!("cannot start ffmpeg: {e}")))?;

        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut log = Vec::new();
                pipe.read_to_end(&mut log)?;
                Ok(log)
            })
        });
        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            return Err(StickframeError::encode("ffmpeg stdin was not captured"));
        };
        Ok(Self {
            child,
            stdin: Some(stdin),
            stderr,
        })
    }

    fn write_frame(&mut self, rgba: &[u8]) -> StickframeResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| StickframeError::encode("ffmpeg input already closed"))?;
        stdin
            .write_all(rgba)
            .map_err(|e| StickframeError::encode(format!("writing frame to ffmpeg: {e}")))
    }

    /// Close the input and wait for ffmpeg; a failed run carries its stderr.
    fn finish(mut self) -> StickframeResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| StickframeError::encode(format!("waiting for ffmpeg: {e}")))?;
        let log = self
            .stderr
            .take()
            .and_then(|handle| handle.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        if status.success() {
            return Ok(());
        }
        Err(StickframeError::encode(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> StickframeResult<()> {
    use anyhow::Context as _;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/export/ffmpeg.rs"]
mod tests;
