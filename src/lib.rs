//! stickframe is the core of a frame-by-frame stick-figure animation editor.
//!
//! The editor state lives in an [`AnimationSession`] that consumes [`EditorEvent`]s:
//!
//! - Draw, erase and select strokes with pointer events routed to one editing intent each
//! - Manage the frame timeline and play it back on a fixed period
//! - Render a frame with onion skin and grid overlays into any [`RenderTarget`]
//! - Save to a local key-value store, exchange JSON documents, export GIF or WebM
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod editing;
pub(crate) mod input;
pub(crate) mod model;
pub(crate) mod playback;
pub(crate) mod schema;

/// Frame sinks and the export pipeline.
pub mod export;
/// Local storage of the saved library and recent colors.
pub mod persistence;
/// Drawing commands and raster targets.
pub mod render;
/// The event-driven editing session.
pub mod session;

pub use crate::foundation::color::{DEFAULT_RECENT_COLORS, RecentColors, parse_css_color};
pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{StickframeError, StickframeResult};
pub use crate::foundation::geometry::{
    bounding_rect_contains, distance, normalized_rect, point_near_stroke,
};
pub use crate::foundation::settings::{EditorSettings, MIN_GRID_SPACING};

pub use crate::editing::clipboard::Clipboard;
pub use crate::editing::selection::{SelectMode, SelectionEngine};
pub use crate::input::router::{InputRouter, Intent, PointerEvent, Tool};
pub use crate::model::animation::{Animation, DEFAULT_BRUSH_WIDTH, DEFAULT_FRAME_RATE};
pub use crate::model::stroke::{Frame, Stroke};
pub use crate::model::template::stick_figure;
pub use crate::playback::scheduler::{PlaybackScheduler, PlaybackState};
pub use crate::schema::document::{
    AnimationDocument, DEFAULT_DOCUMENT_NAME, DOCUMENT_VERSION, export_json, import_json,
};
pub use crate::schema::validate::{SchemaError, SchemaErrors, SchemaPathElem};

pub use crate::export::ffmpeg::{WebmSink, WebmSinkOpts, is_ffmpeg_on_path};
pub use crate::export::gif::GifSink;
pub use crate::export::pipeline::{encode_gif, export_animation, render_still};
pub use crate::export::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::persistence::adapter::{
    ANIMATIONS_KEY, Persistence, RECENT_COLORS_KEY, SavedAnimation, StorePersistence,
};
pub use crate::persistence::store::{FileStore, KeyValueStore, MemoryStore};
pub use crate::render::backend::{DrawCommand, FrameRGBA, RenderTarget};
pub use crate::render::commands::{
    CommandList, FrameOverlays, GridOverlay, SelectionOverlay, render_frame,
};
pub use crate::render::cpu::CpuSurface;
pub use crate::session::editor::AnimationSession;
pub use crate::session::events::{EditorEvent, Notice, Outcome};
