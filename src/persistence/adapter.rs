use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::foundation::color::parse_css_color;
use crate::foundation::error::StickframeResult;
use crate::model::animation::{Animation, DEFAULT_BRUSH_WIDTH, DEFAULT_FRAME_RATE};
use crate::model::stroke::Frame;
use crate::persistence::store::KeyValueStore;
use crate::schema::validate::validate_saved_entry;

pub const ANIMATIONS_KEY: &str = "stickman-animations";
pub const RECENT_COLORS_KEY: &str = "stickman-recent-colors";

/// Entry of the saved-animation library.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnimation {
    pub name: String,
    pub frames: Vec<Frame>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub fps: u32,
    #[serde(default)]
    pub brush_size: f64,
}

impl SavedAnimation {
    pub fn new(name: impl Into<String>, anim: &Animation, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            frames: anim.frames().to_vec(),
            date,
            fps: anim.frame_rate(),
            brush_size: anim.default_brush_width(),
        }
    }

    /// Store positioned on frame 0; zero settings fall back to the defaults.
    pub fn to_animation(&self) -> StickframeResult<Animation> {
        let fps = if self.fps > 0 {
            self.fps
        } else {
            DEFAULT_FRAME_RATE
        };
        let brush = if self.brush_size > 0.0 {
            self.brush_size
        } else {
            DEFAULT_BRUSH_WIDTH
        };
        Animation::from_parts(self.frames.clone(), fps, brush)
    }
}

/// Load/save of the editor's durable state.
///
/// Loads never fail: missing or corrupt data reads as "nothing stored".
pub trait Persistence {
    fn load_animations(&self) -> Vec<SavedAnimation>;

    fn save_animations(&mut self, animations: &[SavedAnimation]) -> StickframeResult<()>;

    /// `None` when no palette was stored yet.
    fn load_recent_colors(&self) -> Option<Vec<String>>;

    fn save_recent_colors(&mut self, colors: &[String]) -> StickframeResult<()>;
}

/// [`Persistence`] as JSON values in a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct StorePersistence<S> {
    store: S,
}

impl<S: KeyValueStore> StorePersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_json(&self, key: &str) -> Option<Value> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored data unreadable, treating as empty");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored data corrupt, treating as empty");
                None
            }
        }
    }
}

impl<S: KeyValueStore> Persistence for StorePersistence<S> {
    fn load_animations(&self) -> Vec<SavedAnimation> {
        let Some(value) = self.read_json(ANIMATIONS_KEY) else {
            return Vec::new();
        };
        let Value::Array(entries) = value else {
            tracing::warn!(key = ANIMATIONS_KEY, "stored data is not a list, treating as empty");
            return Vec::new();
        };

        let mut out = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            if let Err(e) = validate_saved_entry(&entry) {
                tracing::warn!(index = i, error = %e, "skipping invalid saved animation");
                continue;
            }
            match serde_json::from_value::<SavedAnimation>(entry) {
                Ok(saved) => out.push(saved),
                Err(e) => {
                    tracing::warn!(index = i, error = %e, "skipping invalid saved animation")
                }
            }
        }
        out
    }

    fn save_animations(&mut self, animations: &[SavedAnimation]) -> StickframeResult<()> {
        let json = serde_json::to_string(animations)?;
        self.store.set(ANIMATIONS_KEY, &json)?;
        tracing::info!(count = animations.len(), "saved animation library");
        Ok(())
    }

    fn load_recent_colors(&self) -> Option<Vec<String>> {
        let value = self.read_json(RECENT_COLORS_KEY)?;
        let colors: Vec<String> = match serde_json::from_value(value) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(key = RECENT_COLORS_KEY, error = %e, "stored colors corrupt, treating as empty");
                return None;
            }
        };
        let before = colors.len();
        let colors: Vec<String> = colors
            .into_iter()
            .filter(|c| parse_css_color(c).is_ok())
            .collect();
        if colors.len() != before {
            tracing::warn!(dropped = before - colors.len(), "dropped unparseable stored colors");
        }
        Some(colors)
    }

    fn save_recent_colors(&mut self, colors: &[String]) -> StickframeResult<()> {
        let json = serde_json::to_string(colors)?;
        self.store.set(RECENT_COLORS_KEY, &json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persistence/adapter.rs"]
mod tests;
