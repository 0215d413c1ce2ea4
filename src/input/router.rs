use crate::foundation::core::Point;

/// Active editing tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tool {
    #[default]
    Draw,
    Erase,
    Select,
}

/// Pointer input already normalized to canvas-local coordinates (origin top-left).
///
/// Mouse and touch hosts both translate into this form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Pointer left the canvas or the touch was cancelled.
    Cancel,
}

/// The single editing action a pointer event resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    BeginStroke(Point),
    ExtendStroke(Point),
    /// Full in-progress path, ready to be stored.
    CommitStroke(Vec<Point>),
    EraseAt(Point),
    BeginSelect(Point),
    ExtendSelect(Point),
    CommitSelect,
    BeginDrag(Point),
    ExtendDrag(Point),
    CommitDrag,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Gesture {
    #[default]
    None,
    Stroke(Vec<Point>),
    Erase,
    Select,
    Drag,
}

/// Turns raw pointer sequences into [`Intent`]s.
///
/// A gesture's kind is fixed at pointer-down and followed until the matching up/cancel, even if
/// the tool changes in between. Only one gesture runs at a time.
#[derive(Clone, Debug, Default)]
pub struct InputRouter {
    gesture: Gesture,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::None
    }

    /// Vertices of the stroke being drawn, if any.
    pub fn in_progress_path(&self) -> Option<&[Point]> {
        match &self.gesture {
            Gesture::Stroke(path) => Some(path),
            _ => None,
        }
    }

    /// Drop any gesture without producing an intent.
    pub fn reset(&mut self) {
        self.gesture = Gesture::None;
    }

    /// Classify one event.
    ///
    /// `hits_selection` is asked only for a select-tool pointer-down and decides between
    /// dragging the current selection and starting a new marquee.
    pub fn route(
        &mut self,
        event: PointerEvent,
        tool: Tool,
        hits_selection: impl FnOnce(Point) -> bool,
    ) -> Option<Intent> {
        match event {
            PointerEvent::Down(p) => {
                if self.is_active() {
                    tracing::debug!("pointer-down ignored: gesture already active");
                    return None;
                }
                let (gesture, intent) = match tool {
                    Tool::Draw => (Gesture::Stroke(vec![p]), Intent::BeginStroke(p)),
                    Tool::Erase => (Gesture::Erase, Intent::EraseAt(p)),
                    Tool::Select if hits_selection(p) => (Gesture::Drag, Intent::BeginDrag(p)),
                    Tool::Select => (Gesture::Select, Intent::BeginSelect(p)),
                };
                self.gesture = gesture;
                Some(intent)
            }
            PointerEvent::Move(p) => match &mut self.gesture {
                Gesture::None => None,
                Gesture::Stroke(path) => {
                    path.push(p);
                    Some(Intent::ExtendStroke(p))
                }
                Gesture::Erase => Some(Intent::EraseAt(p)),
                Gesture::Select => Some(Intent::ExtendSelect(p)),
                Gesture::Drag => Some(Intent::ExtendDrag(p)),
            },
            PointerEvent::Up(_) | PointerEvent::Cancel => {
                match std::mem::take(&mut self.gesture) {
                    Gesture::None | Gesture::Erase => None,
                    Gesture::Stroke(path) => Some(Intent::CommitStroke(path)),
                    Gesture::Select => Some(Intent::CommitSelect),
                    Gesture::Drag => Some(Intent::CommitDrag),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/router.rs"]
mod tests;
