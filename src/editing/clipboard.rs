use crate::foundation::core::Vec2;
use crate::model::animation::Animation;
use crate::model::stroke::Stroke;

/// Deep copies of strokes, independent of the frame they came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clipboard {
    strokes: Vec<Stroke>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Replace the contents with copies of `indices` from the current frame.
    ///
    /// An empty index list leaves the clipboard untouched. Returns the number of copied strokes.
    pub fn copy_from(&mut self, anim: &Animation, indices: &[usize]) -> usize {
        if indices.is_empty() {
            return 0;
        }
        let frame = anim.current_frame();
        self.strokes = indices
            .iter()
            .filter_map(|&i| frame.strokes.get(i).cloned())
            .collect();
        self.strokes.len()
    }

    /// Append copies shifted by `offset` to the current frame. Returns the number pasted.
    pub fn paste_into(&self, anim: &mut Animation, offset: Vec2) -> usize {
        if self.strokes.is_empty() {
            return 0;
        }
        let pasted = self.strokes.iter().map(|s| s.translated(offset));
        anim.append_strokes(anim.current_frame_index(), pasted)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editing/clipboard.rs"]
mod tests;
