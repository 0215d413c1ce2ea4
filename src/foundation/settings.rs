use std::ops::RangeInclusive;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::model::animation::{DEFAULT_BRUSH_WIDTH, DEFAULT_FRAME_RATE};

/// Smallest grid spacing in px; the grid overlay draws nothing below it.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Highest frame rate the playback scheduler can step at.
const MAX_FRAME_RATE: u32 = 1_000_000_000;

/// Editor configuration.
///
/// Defaults mirror the stock editor; [`EditorSettings::from_env`] lets hosts and the CLI
/// override the canvas and timing without code changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Drawing surface size; also the export frame size.
    pub canvas: Canvas,
    /// Frame rate of new animations.
    pub frame_rate: u32,
    /// Brush width of new animations.
    pub brush_width: f64,
    /// Allowed frame rates (slider range).
    pub frame_rate_range: RangeInclusive<u32>,
    /// Allowed brush widths (slider range).
    pub brush_width_range: RangeInclusive<f64>,
    /// Initial pen color.
    pub color: String,
    /// Pointer distance (px) under which a selected stroke counts as grabbed.
    pub hit_tolerance: f64,
    /// Eraser radius as a multiple of the brush width.
    pub eraser_multiplier: f64,
    /// Offset (px, both axes) applied to pasted strokes.
    pub paste_offset: f64,
    /// Spacing of the grid overlay in px.
    pub grid_spacing: f64,
    /// Show the neighbor frames while editing.
    pub onion_skin: bool,
    /// Show the grid overlay while editing.
    pub show_grid: bool,
    /// Length of the recent-colors palette.
    pub recent_colors_capacity: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800,
                height: 600,
            },
            frame_rate: DEFAULT_FRAME_RATE,
            brush_width: DEFAULT_BRUSH_WIDTH,
            frame_rate_range: 1..=60,
            brush_width_range: 1.0..=20.0,
            color: "#000000".to_string(),
            hit_tolerance: 10.0,
            eraser_multiplier: 3.0,
            paste_offset: 20.0,
            grid_spacing: 20.0,
            onion_skin: true,
            show_grid: true,
            recent_colors_capacity: 8,
        }
    }
}

impl EditorSettings {
    /// Defaults with `STICKFRAME_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Unparseable or non-positive values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn positive<T: std::str::FromStr + PartialOrd + Default>(v: Option<String>) -> Option<T> {
            v.and_then(|s| s.trim().parse::<T>().ok())
                .filter(|n| *n > T::default())
        }

        if let Some(w) = positive::<u32>(lookup("STICKFRAME_CANVAS_WIDTH")) {
            self.canvas.width = w;
        }
        if let Some(h) = positive::<u32>(lookup("STICKFRAME_CANVAS_HEIGHT")) {
            self.canvas.height = h;
        }
        if let Some(fps) = positive::<u32>(lookup("STICKFRAME_FPS")) {
            self.frame_rate = self.clamp_frame_rate(fps);
        }
        if let Some(w) = positive::<f64>(lookup("STICKFRAME_BRUSH_WIDTH")) {
            self.brush_width = self.clamp_brush_width(w);
        }
        self
    }

    /// Clamp into `frame_rate_range`. An inverted range yields its end instead of panicking.
    pub fn clamp_frame_rate(&self, fps: u32) -> u32 {
        fps.max(*self.frame_rate_range.start())
            .min(*self.frame_rate_range.end())
    }

    /// Clamp into `brush_width_range`. An inverted range yields its end instead of panicking.
    pub fn clamp_brush_width(&self, width: f64) -> f64 {
        width
            .max(*self.brush_width_range.start())
            .min(*self.brush_width_range.end())
    }

    /// Reject settings the editor cannot run with.
    pub fn validate(&self) -> StickframeResult<()> {
        let (fps_lo, fps_hi) = (*self.frame_rate_range.start(), *self.frame_rate_range.end());
        if fps_lo == 0 || fps_lo > fps_hi || fps_hi > MAX_FRAME_RATE {
            return Err(StickframeError::validation(format!(
                "frame_rate_range must lie within 1..={MAX_FRAME_RATE} with start <= end"
            )));
        }
        let (brush_lo, brush_hi) = (
            *self.brush_width_range.start(),
            *self.brush_width_range.end(),
        );
        if !(brush_lo.is_finite() && brush_hi.is_finite() && brush_lo > 0.0 && brush_lo <= brush_hi)
        {
            return Err(StickframeError::validation(
                "brush_width_range must be finite and positive with start <= end",
            ));
        }
        if !self.grid_spacing.is_finite() || self.grid_spacing < MIN_GRID_SPACING {
            return Err(StickframeError::validation(format!(
                "grid_spacing must be at least {MIN_GRID_SPACING}px"
            )));
        }
        for (name, value) in [
            ("hit_tolerance", self.hit_tolerance),
            ("eraser_multiplier", self.eraser_multiplier),
            ("paste_offset", self.paste_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StickframeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Eraser radius for a given brush width.
    pub fn eraser_radius(&self, brush_width: f64) -> f64 {
        brush_width * self.eraser_multiplier
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
