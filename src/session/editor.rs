use chrono::Utc;

use crate::editing::clipboard::Clipboard;
use crate::editing::selection::SelectionEngine;
use crate::export::pipeline::export_animation;
use crate::export::sink::FrameSink;
use crate::foundation::color::{RecentColors, parse_css_color};
use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::foundation::settings::EditorSettings;
use crate::input::router::{InputRouter, Intent, PointerEvent, Tool};
use crate::model::animation::Animation;
use crate::model::stroke::{Frame, Stroke};
use crate::model::template::stick_figure;
use crate::persistence::adapter::{Persistence, SavedAnimation};
use crate::playback::scheduler::{PlaybackScheduler, PlaybackState};
use crate::render::backend::RenderTarget;
use crate::render::commands::{FrameOverlays, GridOverlay, SelectionOverlay, render_frame};
use crate::schema::document::{DEFAULT_DOCUMENT_NAME, export_json, import_json};
use crate::session::events::{EditorEvent, Outcome};

/// All editing state of one open animation.
///
/// Every change goes through [`AnimationSession::dispatch`], which runs to completion before the
/// next event. Durable state (saved library, recent colors) is written through `P`.
pub struct AnimationSession<P: Persistence> {
    settings: EditorSettings,
    animation: Animation,
    tool: Tool,
    color: String,
    onion_skin: bool,
    show_grid: bool,
    router: InputRouter,
    selection: SelectionEngine,
    clipboard: Clipboard,
    playback: PlaybackScheduler,
    recent_colors: RecentColors,
    saved: Vec<SavedAnimation>,
    persistence: P,
    /// A tool switch arrived mid-gesture; the selection is cleared once the gesture ends.
    clear_selection_on_release: bool,
}

impl<P: Persistence> AnimationSession<P> {
    /// Fresh one-frame animation; the saved library and palette are read from `persistence`.
    pub fn new(settings: EditorSettings, persistence: P) -> StickframeResult<Self> {
        settings.validate()?;
        parse_css_color(&settings.color)?;
        let animation = Animation::from_parts(
            vec![Frame::default()],
            settings.frame_rate,
            settings.brush_width,
        )?;
        let playback = PlaybackScheduler::new(settings.frame_rate)?;
        let capacity = settings.recent_colors_capacity;
        let recent_colors = match persistence.load_recent_colors() {
            Some(stored) => RecentColors::from_stored(stored, capacity),
            None => RecentColors::new(capacity),
        };
        let saved = persistence.load_animations();
        tracing::debug!(saved = saved.len(), "session opened");

        Ok(Self {
            color: settings.color.clone(),
            onion_skin: settings.onion_skin,
            show_grid: settings.show_grid,
            settings,
            animation,
            tool: Tool::default(),
            router: InputRouter::new(),
            selection: SelectionEngine::new(),
            clipboard: Clipboard::new(),
            playback,
            recent_colors,
            saved,
            persistence,
            clear_selection_on_release: false,
        })
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn brush_width(&self) -> f64 {
        self.animation.default_brush_width()
    }

    pub fn frame_rate(&self) -> u32 {
        self.animation.frame_rate()
    }

    pub fn onion_skin(&self) -> bool {
        self.onion_skin
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn recent_colors(&self) -> &[String] {
        self.recent_colors.as_slice()
    }

    pub fn saved_animations(&self) -> &[SavedAnimation] {
        &self.saved
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Vertices of the stroke being drawn, if any.
    pub fn in_progress_path(&self) -> Option<&[Point]> {
        self.router.in_progress_path()
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::Pointer(ev) => self.on_pointer(ev),
            EditorEvent::SetTool(tool) => {
                self.tool = tool;
                if self.router.is_active() {
                    self.clear_selection_on_release = true;
                } else {
                    self.selection.clear();
                }
                Outcome::changed(true)
            }
            EditorEvent::SetColor(color) => self.set_color(color),
            EditorEvent::SetBrushWidth(width) => {
                if !width.is_finite() {
                    return Outcome::refused("brush width must be a finite number");
                }
                let width = self.settings.clamp_brush_width(width);
                Outcome::changed(self.animation.set_default_brush_width(width))
            }
            EditorEvent::SetFrameRate(fps) => self.set_frame_rate(fps),
            EditorEvent::ToggleOnionSkin => {
                self.onion_skin = !self.onion_skin;
                Outcome::changed(true)
            }
            EditorEvent::ToggleGrid => {
                self.show_grid = !self.show_grid;
                Outcome::changed(true)
            }
            EditorEvent::GoToFrame(index) => {
                let before = self.animation.current_frame_index();
                let moved = self.animation.go_to_frame(index);
                self.after_cursor_move(before);
                Outcome::changed(moved)
            }
            EditorEvent::AddFrame => {
                let before = self.animation.current_frame_index();
                let ok = self.animation.insert_frame(before);
                self.after_cursor_move(before);
                Outcome::changed(ok)
            }
            EditorEvent::DuplicateFrame => {
                let before = self.animation.current_frame_index();
                let ok = self.animation.duplicate_frame(before);
                self.after_cursor_move(before);
                Outcome::changed(ok)
            }
            EditorEvent::DeleteFrame => {
                if self.animation.frame_count() <= 1 {
                    return Outcome::refused("an animation keeps at least one frame");
                }
                let ok = self
                    .animation
                    .delete_frame(self.animation.current_frame_index());
                self.selection.clear();
                Outcome::changed(ok)
            }
            EditorEvent::ClearFrame => {
                let ok = self
                    .animation
                    .clear_frame(self.animation.current_frame_index());
                self.selection.clear();
                Outcome::changed(ok)
            }
            EditorEvent::Copy => {
                let copied = self
                    .clipboard
                    .copy_from(&self.animation, &self.selection.members());
                tracing::debug!(copied, "copy");
                Outcome::unchanged()
            }
            EditorEvent::Paste => {
                let offset = Vec2::new(self.settings.paste_offset, self.settings.paste_offset);
                let pasted = self.clipboard.paste_into(&mut self.animation, offset);
                Outcome::changed(pasted > 0)
            }
            EditorEvent::DeleteSelection => {
                let removed = self.selection.delete_selected(&mut self.animation);
                Outcome::changed(removed > 0)
            }
            EditorEvent::ClearSelection => {
                let had = !self.selection.is_empty() || self.selection.marquee().is_some();
                self.selection.clear();
                Outcome::changed(had)
            }
            EditorEvent::InsertStickFigure => {
                let strokes = stick_figure(
                    self.settings.canvas.center(),
                    &self.color,
                    self.brush_width(),
                );
                let added = self
                    .animation
                    .append_strokes(self.animation.current_frame_index(), strokes);
                Outcome::changed(added > 0)
            }
            EditorEvent::TogglePlay => {
                let before = self.playback.state();
                let after = self.playback.toggle(self.animation.frame_count());
                Outcome::changed(before != after)
            }
            EditorEvent::Stop => {
                self.playback.stop();
                let before = self.animation.current_frame_index();
                self.animation.go_to_frame(0);
                self.after_cursor_move(before);
                Outcome::changed(before != 0)
            }
            EditorEvent::Tick(elapsed) => {
                let before = self.animation.current_frame_index();
                let next = self
                    .playback
                    .advance(elapsed, before, self.animation.frame_count());
                if next == before {
                    return Outcome::unchanged();
                }
                self.animation.go_to_frame(next);
                self.after_cursor_move(before);
                Outcome::changed(true)
            }
            EditorEvent::Save { name } => self.save(name),
            EditorEvent::Load(index) => self.load(index),
            EditorEvent::DeleteSaved(index) => self.delete_saved(index),
            EditorEvent::Import(json) => self.import(&json),
        }
    }

    /// Draw the current frame with the editor overlays: grid, onion skin, marquee, highlights
    /// and the stroke being drawn.
    pub fn render_view(&self, target: &mut dyn RenderTarget) {
        let members = self.selection.members();
        let (prev, next) = if self.onion_skin {
            self.animation.neighbors()
        } else {
            (None, None)
        };
        let overlays = FrameOverlays {
            background: Some(Rgba8::WHITE),
            grid: self.show_grid.then_some(GridOverlay {
                spacing: self.settings.grid_spacing,
            }),
            onion_prev: prev,
            onion_next: next,
            selection: Some(SelectionOverlay {
                marquee: self.selection.marquee(),
                highlighted: &members,
            }),
        };

        match self.router.in_progress_path() {
            Some(path) if path.len() > 1 => {
                let mut frame = self.animation.current_frame().clone();
                frame.strokes.push(Stroke::new(
                    path.to_vec(),
                    self.color.as_str(),
                    self.brush_width(),
                ));
                render_frame(target, &frame, &overlays);
            }
            _ => render_frame(target, self.animation.current_frame(), &overlays),
        }
    }

    /// Exported JSON document of the current animation.
    pub fn export_json(&self, name: Option<&str>) -> StickframeResult<String> {
        export_json(&self.animation, name.unwrap_or(DEFAULT_DOCUMENT_NAME))
    }

    /// Render every frame at canvas size into `sink`.
    pub fn export(&self, sink: &mut dyn FrameSink) -> StickframeResult<()> {
        export_animation(&self.animation, self.settings.canvas, sink)
    }

    fn on_pointer(&mut self, ev: PointerEvent) -> Outcome {
        let tolerance = self.settings.hit_tolerance;
        let intent = self.router.route(ev, self.tool, |p| {
            self.selection.hits_selection(&self.animation, p, tolerance)
        });
        let mut outcome = match intent {
            Some(intent) => self.apply_intent(intent),
            None => Outcome::unchanged(),
        };
        if self.clear_selection_on_release && !self.router.is_active() {
            self.clear_selection_on_release = false;
            self.selection.clear();
            outcome.changed = true;
        }
        outcome
    }

    fn apply_intent(&mut self, intent: Intent) -> Outcome {

        let current = self.animation.current_frame_index();
        match intent {
            Intent::BeginStroke(_) | Intent::ExtendStroke(_) => Outcome::changed(true),
            Intent::CommitStroke(path) => {
                let width = self.brush_width();
                self.animation
                    .commit_stroke(current, path, &self.color, width);
                Outcome::changed(true)
            }
            Intent::EraseAt(p) => {
                let radius = self.settings.eraser_radius(self.brush_width());
                let removed = self.animation.erase_near(current, p, radius);
                if removed > 0 {
                    self.selection.clear();
                }
                Outcome::changed(removed > 0)
            }
            Intent::BeginSelect(p) => {
                self.selection.begin_select(p);
                Outcome::changed(true)
            }
            Intent::ExtendSelect(p) => {
                self.selection.extend_select(p);
                Outcome::changed(true)
            }
            Intent::CommitSelect => {
                self.selection.commit_select(&self.animation);
                Outcome::changed(true)
            }
            Intent::BeginDrag(p) => {
                self.selection.begin_drag(p);
                Outcome::unchanged()
            }
            Intent::ExtendDrag(p) => {
                let moved = self.selection.extend_drag(&mut self.animation, p);
                Outcome::changed(moved.is_some())
            }
            Intent::CommitDrag => {
                self.selection.commit_drag();
                Outcome::unchanged()
            }
        }
    }

    fn set_color(&mut self, color: String) -> Outcome {
        if let Err(e) = parse_css_color(&color) {
            return Outcome::refused(e.to_string());
        }
        self.color = color;
        if !self.recent_colors.record(&self.color) {
            return Outcome::changed(true);
        }
        match self
            .persistence
            .save_recent_colors(self.recent_colors.as_slice())
        {
            Ok(()) => Outcome::changed(true),
            Err(e) => {
                tracing::warn!(error = %e, "recent colors not persisted");
                Outcome {
                    changed: true,
                    ..Outcome::failed(e.to_string())
                }
            }
        }
    }

    fn set_frame_rate(&mut self, fps: u32) -> Outcome {
        let fps = self.settings.clamp_frame_rate(fps);
        if let Err(e) = self.playback.set_frame_rate(fps) {
            return Outcome::refused(e.to_string());
        }
        Outcome::changed(self.animation.set_frame_rate(fps))
    }

    fn save(&mut self, name: String) -> Outcome {
        if name.trim().is_empty() {
            return Outcome::refused("a name is required to save an animation");
        }
        self.saved
            .push(SavedAnimation::new(name.as_str(), &self.animation, Utc::now()));
        if let Err(e) = self.persistence.save_animations(&self.saved) {
            self.saved.pop();
            tracing::warn!(error = %e, "save failed");
            return Outcome::failed(e.to_string());
        }
        tracing::info!(name = %name, "animation saved");
        Outcome::info(false, format!("saved \"{name}\""))
    }

    fn load(&mut self, index: usize) -> Outcome {
        let Some(entry) = self.saved.get(index) else {
            return Outcome::refused(format!("no saved animation at index {index}"));
        };
        let name = entry.name.clone();
        match entry.to_animation() {
            Ok(anim) => self.replace_animation(anim, format!("loaded \"{name}\"")),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }

    fn delete_saved(&mut self, index: usize) -> Outcome {
        if index >= self.saved.len() {
            return Outcome::refused(format!("no saved animation at index {index}"));
        }
        let removed = self.saved.remove(index);
        if let Err(e) = self.persistence.save_animations(&self.saved) {
            self.saved.insert(index, removed);
            tracing::warn!(error = %e, "delete of saved animation not persisted");
            return Outcome::failed(e.to_string());
        }
        Outcome::info(false, format!("deleted \"{}\"", removed.name))
    }

    fn import(&mut self, json: &str) -> Outcome {
        let anim = import_json(json)
            .map_err(StickframeError::from)
            .and_then(|doc| doc.into_animation());
        match anim {
            Ok(anim) => self.replace_animation(anim, "animation imported"),
            Err(e) => {
                tracing::warn!(error = %e, "import rejected");
                Outcome::failed(e.to_string())
            }
        }
    }

    fn replace_animation(&mut self, mut anim: Animation, msg: impl Into<String>) -> Outcome {
        let fps = self.settings.clamp_frame_rate(anim.frame_rate());
        let brush = self.settings.clamp_brush_width(anim.default_brush_width());
        if fps != anim.frame_rate() || brush != anim.default_brush_width() {
            tracing::debug!(fps, brush, "loaded settings clamped to editor ranges");
        }
        anim.set_frame_rate(fps);
        anim.set_default_brush_width(brush);
        if let Err(e) = self.playback.set_frame_rate(fps) {
            return Outcome::failed(e.to_string());
        }
        self.playback.stop();
        self.animation = anim;
        self.selection.clear();
        self.router.reset();
        self.clear_selection_on_release = false;
        Outcome::info(true, msg)
    }

    fn after_cursor_move(&mut self, before: usize) {
        if self.animation.current_frame_index() != before {
            self.selection.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
