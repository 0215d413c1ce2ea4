use std::collections::BTreeSet;

use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::geometry::{bounding_rect_contains, normalized_rect, point_near_stroke};
use crate::model::animation::Animation;

/// What the select tool is doing between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SelectMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A marquee is being dragged out.
    Selecting { start: Point, end: Point },
    /// Selected strokes follow the pointer; `anchor` is the last applied position.
    Dragging { anchor: Point },
}

/// Selected stroke indices of one frame plus the marquee/drag state machine.
///
/// Indices are only meaningful for the frame recorded at selection time; callers clear the
/// engine whenever that frame's ordering changes or the cursor leaves it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionEngine {
    members: BTreeSet<usize>,
    frame: usize,
    mode: SelectMode,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    /// Selected stroke indices in ascending order.
    pub fn members(&self) -> Vec<usize> {
        self.members.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Frame the members refer to.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Pending marquee rectangle while selecting.
    pub fn marquee(&self) -> Option<Rect> {
        match self.mode {
            SelectMode::Selecting { start, end } => Some(normalized_rect(start, end)),
            _ => None,
        }
    }

    /// `true` if `p` is within `tolerance` of a vertex of any selected stroke.
    pub fn hits_selection(&self, anim: &Animation, p: Point, tolerance: f64) -> bool {
        if self.members.is_empty() {
            return false;
        }
        let frame = anim.current_frame();
        self.members
            .iter()
            .filter_map(|&i| frame.strokes.get(i))
            .any(|s| point_near_stroke(p, s, tolerance))
    }

    /// Start a marquee at `p`, dropping the current members.
    pub fn begin_select(&mut self, p: Point) {
        self.members.clear();
        self.mode = SelectMode::Selecting { start: p, end: p };
    }

    pub fn extend_select(&mut self, p: Point) {
        if let SelectMode::Selecting { end, .. } = &mut self.mode {
            *end = p;
        }
    }

    /// Select every stroke of the current frame with a vertex inside the marquee.
    ///
    /// Returns the number of selected strokes.
    pub fn commit_select(&mut self, anim: &Animation) -> usize {
        let SelectMode::Selecting { start, end } = self.mode else {
            return self.members.len();
        };
        let rect = normalized_rect(start, end);
        let (min, max) = (Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1));
        self.frame = anim.current_frame_index();
        self.members = anim
            .current_frame()
            .strokes
            .iter()
            .enumerate()
            .filter(|(_, s)| bounding_rect_contains(min, max, s))
            .map(|(i, _)| i)
            .collect();
        self.mode = SelectMode::Idle;
        self.members.len()
    }

    pub fn begin_drag(&mut self, p: Point) {
        self.mode = SelectMode::Dragging { anchor: p };
    }

    /// Move the selected strokes by the pointer delta since the previous call.
    ///
    /// Returns the applied delta, if any.
    pub fn extend_drag(&mut self, anim: &mut Animation, p: Point) -> Option<Vec2> {
        let SelectMode::Dragging { anchor } = &mut self.mode else {
            return None;
        };
        let delta = p - *anchor;
        *anchor = p;
        if self.members.is_empty() {
            return None;
        }
        let members: Vec<usize> = self.members.iter().copied().collect();
        anim.translate_strokes(anim.current_frame_index(), &members, delta.x, delta.y)
            .then_some(delta)
    }

    /// End a drag; membership is kept.
    pub fn commit_drag(&mut self) {
        if matches!(self.mode, SelectMode::Dragging { .. }) {
            self.mode = SelectMode::Idle;
        }
    }

    /// Remove the selected strokes from the current frame and clear the selection.
    ///
    /// Returns the number of strokes removed.
    pub fn delete_selected(&mut self, anim: &mut Animation) -> usize {
        if self.members.is_empty() {
            return 0;
        }
        let members = self.members();
        let removed = anim.delete_strokes(anim.current_frame_index(), &members);
        self.clear();
        removed
    }

    /// Forget members and any pending marquee or drag.
    pub fn clear(&mut self) {
        self.members.clear();
        self.mode = SelectMode::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editing/selection.rs"]
mod tests;
