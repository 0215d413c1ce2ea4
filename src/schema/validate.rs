use std::fmt;

use serde_json::{Map, Value};

use crate::foundation::color::parse_css_color;
use crate::foundation::error::StickframeError;
use crate::schema::document::DOCUMENT_VERSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

/// One problem found in a document, anchored at a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub path: Vec<SchemaPathElem>,
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every problem found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaErrors {
    pub errors: Vec<SchemaError>,
}

impl SchemaErrors {
    /// A single document-level error (unparseable input, wrong root type).
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            errors: vec![SchemaError::at(&[], message)],
        }
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for StickframeError {
    fn from(e: SchemaErrors) -> Self {
        StickframeError::validation(e.to_string())
    }
}

/// Check an exported animation document before it is deserialized.
///
/// `version`, `name`, `fps`, `brushSize` and `exportDate` are optional; a zero `fps` or
/// `brushSize` means "use the default".
pub(crate) fn validate_document(value: &Value) -> Result<(), SchemaErrors> {
    let Some(obj) = value.as_object() else {
        return Err(SchemaErrors::root("document must be a JSON object"));
    };
    let mut errors = Vec::new();

    if let Some(v) = present(obj, "version") {
        match v.as_u64() {
            Some(n) if n == u64::from(DOCUMENT_VERSION) => {}
            _ => errors.push(SchemaError::at(
                &[SchemaPathElem::Field("version")],
                format!("version must be {DOCUMENT_VERSION}"),
            )),
        }
    }
    if let Some(v) = present(obj, "name")
        && !v.is_string()
    {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("name")],
            "must be a string",
        ));
    }
    validate_settings(obj, &mut errors);
    if let Some(v) = present(obj, "exportDate") {
        validate_timestamp(v, SchemaPathElem::Field("exportDate"), &mut errors);
    }
    validate_frames(obj.get("frames"), &mut errors);

    finish(errors)
}

/// Check one entry of the saved-animation list.
pub(crate) fn validate_saved_entry(value: &Value) -> Result<(), SchemaErrors> {
    let Some(obj) = value.as_object() else {
        return Err(SchemaErrors::root("saved animation must be a JSON object"));
    };
    let mut errors = Vec::new();

    match obj.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("name")],
            "must be a non-empty string",
        )),
    }
    match obj.get("date") {
        Some(v) => validate_timestamp(v, SchemaPathElem::Field("date"), &mut errors),
        None => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("date")],
            "is required",
        )),
    }
    validate_settings(obj, &mut errors);
    validate_frames(obj.get("frames"), &mut errors);

    finish(errors)
}

fn finish(errors: Vec<SchemaError>) -> Result<(), SchemaErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

/// Field value unless missing or `null`.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn validate_settings(obj: &Map<String, Value>, errors: &mut Vec<SchemaError>) {
    if let Some(v) = present(obj, "fps")
        && v.as_u64().is_none_or(|n| n > u64::from(u32::MAX))
    {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("fps")],
            "must be a non-negative integer",
        ));
    }
    if let Some(v) = present(obj, "brushSize")
        && v.as_f64().is_none_or(|w| !w.is_finite() || w < 0.0)
    {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("brushSize")],
            "must be a number >= 0",
        ));
    }
}

fn validate_timestamp(v: &Value, field: SchemaPathElem, errors: &mut Vec<SchemaError>) {
    let ok = v
        .as_str()
        .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok());
    if !ok {
        errors.push(SchemaError::at(&[field], "must be an RFC 3339 timestamp"));
    }
}

fn validate_frames(frames: Option<&Value>, errors: &mut Vec<SchemaError>) {
    let base = [SchemaPathElem::Field("frames")];
    let Some(frames) = frames.and_then(Value::as_array) else {
        errors.push(SchemaError::at(&base, "must be an array of frames"));
        return;
    };
    if frames.is_empty() {
        errors.push(SchemaError::at(&base, "must contain at least one frame"));
        return;
    }

    for (fi, frame) in frames.iter().enumerate() {
        let frame_path = [base[0].clone(), SchemaPathElem::Index(fi)];
        let Some(strokes) = frame.as_array() else {
            errors.push(SchemaError::at(&frame_path, "must be an array of strokes"));
            continue;
        };
        for (si, stroke) in strokes.iter().enumerate() {
            let stroke_path = [
                frame_path[0].clone(),
                frame_path[1].clone(),
                SchemaPathElem::Index(si),
            ];
            validate_stroke(stroke, &stroke_path, errors);
        }
    }
}

fn validate_stroke(stroke: &Value, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) {
    let Some(obj) = stroke.as_object() else {
        errors.push(SchemaError::at(path, "must be a stroke object"));
        return;
    };
    let field = |name: &'static str| [path, &[SchemaPathElem::Field(name)]].concat();

    match obj.get("path").and_then(Value::as_array) {
        None => errors.push(SchemaError::at(
            &field("path"),
            "must be an array of points",
        )),
        Some(points) => {
            for (pi, point) in points.iter().enumerate() {
                let finite = |k: &str| {
                    point
                        .get(k)
                        .and_then(Value::as_f64)
                        .is_some_and(f64::is_finite)
                };
                if !(finite("x") && finite("y")) {
                    errors.push(SchemaError::at(
                        &[field("path").as_slice(), &[SchemaPathElem::Index(pi)]].concat(),
                        "must be a point with finite x and y",
                    ));
                }
            }
        }
    }

    match obj.get("color").and_then(Value::as_str) {
        None => errors.push(SchemaError::at(&field("color"), "must be a string")),
        Some(c) => {
            if parse_css_color(c).is_err() {
                errors.push(SchemaError::at(
                    &field("color"),
                    format!("unsupported color {c:?}"),
                ));
            }
        }
    }

    match obj.get("brushSize").and_then(Value::as_f64) {
        Some(w) if w.is_finite() && w > 0.0 => {}
        _ => errors.push(SchemaError::at(&field("brushSize"), "must be > 0")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
