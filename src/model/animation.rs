use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::model::stroke::{Frame, Stroke};

/// Frame rate of a freshly created animation.
pub const DEFAULT_FRAME_RATE: u32 = 12;
/// Brush width of a freshly created animation.
pub const DEFAULT_BRUSH_WIDTH: f64 = 3.0;

/// The frame/stroke store.
///
/// Invariants:
/// - `frames` is never empty
/// - `current_frame < frames.len()`
/// - `frame_rate > 0`, `default_brush_width` finite and `> 0`
///
/// Every mutation takes explicit indices. An out-of-range frame or stroke index makes the call a
/// no-op reported through the `bool` return value, never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Vec<Frame>,
    frame_rate: u32,
    default_brush_width: f64,
    current_frame: usize,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            frames: vec![Frame::default()],
            frame_rate: DEFAULT_FRAME_RATE,
            default_brush_width: DEFAULT_BRUSH_WIDTH,
            current_frame: 0,
        }
    }
}

impl Animation {
    /// One empty frame at the default frame rate and brush width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing frames; the cursor starts at frame 0.
    pub fn from_parts(
        frames: Vec<Frame>,
        frame_rate: u32,
        default_brush_width: f64,
    ) -> StickframeResult<Self> {
        if frames.is_empty() {
            return Err(StickframeError::validation(
                "animation must contain at least one frame",
            ));
        }
        if frame_rate == 0 {
            return Err(StickframeError::validation("frame rate must be > 0"));
        }
        if !default_brush_width.is_finite() || default_brush_width <= 0.0 {
            return Err(StickframeError::validation(
                "brush width must be finite and > 0",
            ));
        }
        Ok(Self {
            frames,
            frame_rate,
            default_brush_width,
            current_frame: 0,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn default_brush_width(&self) -> f64 {
        self.default_brush_width
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn current_frame(&self) -> &Frame {
        // `current_frame` is kept in range by every mutation.
        &self.frames[self.current_frame]
    }

    /// Frames before and after the cursor, as shown by onion skinning.
    pub fn neighbors(&self) -> (Option<&Frame>, Option<&Frame>) {
        let prev = self
            .current_frame
            .checked_sub(1)
            .and_then(|i| self.frames.get(i));
        let next = self.frames.get(self.current_frame + 1);
        (prev, next)
    }

    /// Move the cursor. Out-of-range indices are ignored.
    pub fn go_to_frame(&mut self, index: usize) -> bool {
        if index >= self.frames.len() {
            tracing::debug!(index, "go_to_frame ignored: index out of range");
            return false;
        }
        self.current_frame = index;
        true
    }

    /// Zero is ignored.
    pub fn set_frame_rate(&mut self, frame_rate: u32) -> bool {
        if frame_rate == 0 {
            return false;
        }
        self.frame_rate = frame_rate;
        true
    }

    /// Non-finite or non-positive widths are ignored.
    pub fn set_default_brush_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        self.default_brush_width = width;
        true
    }

    /// Append a stroke built from `path` if it has more than one vertex.
    pub fn commit_stroke(
        &mut self,
        frame_index: usize,
        path: Vec<Point>,
        color: &str,
        width: f64,
    ) -> bool {
        if path.len() < 2 {
            tracing::debug!(len = path.len(), "commit_stroke discarded short path");
            return false;
        }
        let Some(frame) = self.frames.get_mut(frame_index) else {
            tracing::debug!(frame_index, "commit_stroke ignored: frame out of range");
            return false;
        };
        frame.strokes.push(Stroke::new(path, color, width));
        true
    }

    /// Append already-built strokes (paste, templates). Returns how many were added.
    pub fn append_strokes(
        &mut self,
        frame_index: usize,
        strokes: impl IntoIterator<Item = Stroke>,
    ) -> usize {
        let Some(frame) = self.frames.get_mut(frame_index) else {
            tracing::debug!(frame_index, "append_strokes ignored: frame out of range");
            return 0;
        };
        let before = frame.strokes.len();
        frame.strokes.extend(strokes);
        frame.strokes.len() - before
    }

    /// Remove every stroke with a vertex strictly within `radius` of `point`.
    ///
    /// Returns the number of strokes removed.
    pub fn erase_near(&mut self, frame_index: usize, point: Point, radius: f64) -> usize {
        let Some(frame) = self.frames.get_mut(frame_index) else {
            tracing::debug!(frame_index, "erase_near ignored: frame out of range");
            return 0;
        };
        let before = frame.strokes.len();
        frame
            .strokes
            .retain(|s| !crate::foundation::geometry::point_near_stroke(point, s, radius));
        before - frame.strokes.len()
    }

    /// Insert an empty frame right after `after_index` and move the cursor onto it.
    pub fn insert_frame(&mut self, after_index: usize) -> bool {
        if after_index >= self.frames.len() {
            tracing::debug!(after_index, "insert_frame ignored: index out of range");
            return false;
        }
        self.frames.insert(after_index + 1, Frame::default());
        self.current_frame = after_index + 1;
        true
    }

    /// Insert a deep copy of frame `index` right after it and move the cursor onto the copy.
    pub fn duplicate_frame(&mut self, index: usize) -> bool {
        let Some(frame) = self.frames.get(index).cloned() else {
            tracing::debug!(index, "duplicate_frame ignored: index out of range");
            return false;
        };
        self.frames.insert(index + 1, frame);
        self.current_frame = index + 1;
        true
    }

    /// Remove frame `index` unless it is the only frame left.
    pub fn delete_frame(&mut self, index: usize) -> bool {
        if index >= self.frames.len() {
            tracing::debug!(index, "delete_frame ignored: index out of range");
            return false;
        }
        if self.frames.len() == 1 {
            tracing::debug!("delete_frame refused: last remaining frame");
            return false;
        }
        self.frames.remove(index);
        self.current_frame = index.min(self.frames.len() - 1);
        true
    }

    /// Drop every stroke of frame `index`.
    pub fn clear_frame(&mut self, index: usize) -> bool {
        let Some(frame) = self.frames.get_mut(index) else {
            tracing::debug!(index, "clear_frame ignored: index out of range");
            return false;
        };
        frame.strokes.clear();
        true
    }

    /// Shift the named strokes of a frame by `(dx, dy)`. Unknown stroke indices are skipped.
    pub fn translate_strokes(
        &mut self,
        frame_index: usize,
        stroke_indices: &[usize],
        dx: f64,
        dy: f64,
    ) -> bool {
        let Some(frame) = self.frames.get_mut(frame_index) else {
            tracing::debug!(frame_index, "translate_strokes ignored: frame out of range");
            return false;
        };
        let delta = Vec2::new(dx, dy);
        let mut moved = false;
        for &i in stroke_indices {
            if let Some(stroke) = frame.strokes.get_mut(i) {
                stroke.translate(delta);
                moved = true;
            }
        }
        moved
    }

    /// Remove the named strokes, highest index first so earlier removals don't shift later ones.
    ///
    /// Returns the number of strokes removed.
    pub fn delete_strokes(&mut self, frame_index: usize, stroke_indices: &[usize]) -> usize {
        let Some(frame) = self.frames.get_mut(frame_index) else {
            tracing::debug!(frame_index, "delete_strokes ignored: frame out of range");
            return 0;
        };
        let mut sorted = stroke_indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        let mut removed = 0;
        for i in sorted {
            if i < frame.strokes.len() {
                frame.strokes.remove(i);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/animation.rs"]
mod tests;
