use crate::foundation::core::{BezPath, Canvas, Rgba8};

/// One rendered frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels. Frames already in straight alpha are cloned as is.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Backend-neutral drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Reset the whole target; `None` clears to transparent.
    Clear { color: Option<Rgba8> },
    /// Stroke an open or closed path with round caps and joins.
    StrokePath {
        path: BezPath,
        color: Rgba8,
        width: f64,
        /// `[on, off]` dash lengths in px.
        dash: Option<[f64; 2]>,
    },
}

/// Anything [`render_frame`](crate::render::commands::render_frame) can draw into.
pub trait RenderTarget {
    /// Pixel size of the target, used for full-canvas overlays.
    fn size(&self) -> Canvas;

    fn draw(&mut self, command: DrawCommand);
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
