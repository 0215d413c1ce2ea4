use chrono::{DateTime, Utc};

use crate::foundation::error::StickframeResult;
use crate::model::animation::{Animation, DEFAULT_BRUSH_WIDTH, DEFAULT_FRAME_RATE};
use crate::model::stroke::Frame;
use crate::schema::validate::{SchemaErrors, validate_document};

/// Version written by [`export_json`].
pub const DOCUMENT_VERSION: u32 = 1;

/// Name used when an animation is exported without one.
pub const DEFAULT_DOCUMENT_NAME: &str = "stickman-animation";

/// Exported animation file.
///
/// ```json
/// {"version": 1, "name": "...", "frames": [[stroke, ...], ...], "fps": 12, "brushSize": 3,
///  "exportDate": "2024-01-01T00:00:00Z"}
/// ```
///
/// Files written before versioning omit `version`; they are read as version 1.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub fps: Option<u32>,
    #[serde(default)]
    pub brush_size: Option<f64>,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

impl AnimationDocument {
    /// Snapshot of `anim` stamped with `date`.
    pub fn from_animation(anim: &Animation, name: &str, date: DateTime<Utc>) -> Self {
        Self {
            version: Some(DOCUMENT_VERSION),
            name: Some(name.to_string()),
            frames: anim.frames().to_vec(),
            fps: Some(anim.frame_rate()),
            brush_size: Some(anim.default_brush_width()),
            export_date: Some(date),
        }
    }

    /// Frame rate with missing or zero values replaced by the default.
    pub fn frame_rate(&self) -> u32 {
        self.fps.filter(|&f| f > 0).unwrap_or(DEFAULT_FRAME_RATE)
    }

    /// Brush width with missing or zero values replaced by the default.
    pub fn brush_width(&self) -> f64 {
        self.brush_size
            .filter(|&w| w > 0.0)
            .unwrap_or(DEFAULT_BRUSH_WIDTH)
    }

    /// Build a store positioned on frame 0.
    pub fn into_animation(self) -> StickframeResult<Animation> {
        let (fps, brush) = (self.frame_rate(), self.brush_width());
        Animation::from_parts(self.frames, fps, brush)
    }
}

/// Serialize `anim` as a pretty-printed version-1 document stamped with the current time.
pub fn export_json(anim: &Animation, name: &str) -> StickframeResult<String> {
    let doc = AnimationDocument::from_animation(anim, name, Utc::now());
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse and validate an exported document.
///
/// Malformed JSON and structural problems are both reported as [`SchemaErrors`].
#[tracing::instrument(skip(json), fields(bytes = json.len()))]
pub fn import_json(json: &str) -> Result<AnimationDocument, SchemaErrors> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| SchemaErrors::root(format!("invalid JSON: {e}")))?;
    validate_document(&value)?;
    let doc: AnimationDocument = serde_json::from_value(value)
        .map_err(|e| SchemaErrors::root(format!("invalid document: {e}")))?;
    tracing::debug!(frames = doc.frames.len(), "document imported");
    Ok(doc)
}

#[cfg(test)]
#[path = "../../tests/unit/schema/document.rs"]
mod tests;
