use std::fmt;
use std::time::Duration;

use crate::input::router::{PointerEvent, Tool};

/// Everything a host can ask the editor to do.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    Pointer(PointerEvent),
    SetTool(Tool),
    /// CSS color; also recorded in the recent-colors palette.
    SetColor(String),
    /// Clamped to the configured brush range.
    SetBrushWidth(f64),
    /// Clamped to the configured frame-rate range.
    SetFrameRate(u32),
    ToggleOnionSkin,
    ToggleGrid,
    GoToFrame(usize),
    /// Insert an empty frame after the current one.
    AddFrame,
    DuplicateFrame,
    DeleteFrame,
    ClearFrame,
    Copy,
    Paste,
    DeleteSelection,
    ClearSelection,
    InsertStickFigure,
    TogglePlay,
    /// Stop playback and rewind to frame 0.
    Stop,
    /// Time elapsed since the previous tick.
    Tick(Duration),
    Save {
        name: String,
    },
    /// Replace the animation with saved entry `i`.
    Load(usize),
    DeleteSaved(usize),
    /// Replace the animation with an exported JSON document.
    Import(String),
}

/// User-facing message attached to an [`Outcome`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    /// The request broke an editor rule and was ignored.
    Refused(String),
    /// An external operation (storage, import) failed; the animation is unchanged.
    Failed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(m) => write!(f, "{m}"),
            Notice::Refused(m) => write!(f, "refused: {m}"),
            Notice::Failed(m) => write!(f, "failed: {m}"),
        }
    }
}

/// Result of one dispatched event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether anything visible changed and the view should be redrawn.
    pub changed: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed(changed: bool) -> Self {
        Self {
            changed,
            notice: None,
        }
    }

    pub fn info(changed: bool, msg: impl Into<String>) -> Self {
        Self {
            changed,
            notice: Some(Notice::Info(msg.into())),
        }
    }

    pub fn refused(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            notice: Some(Notice::Refused(msg.into())),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            notice: Some(Notice::Failed(msg.into())),
        }
    }

    pub fn is_refused(&self) -> bool {
        matches!(self.notice, Some(Notice::Refused(_)))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.notice, Some(Notice::Failed(_)))
    }
}
