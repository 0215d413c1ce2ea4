use crate::foundation::core::{BezPath, Point, Vec2};

/// One continuous pen gesture.
///
/// Serialized as `{"path": [{"x", "y"}...], "color": "...", "brushSize": n}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Vertices in drawing order.
    pub path: Vec<Point>,
    /// CSS color string (`#rrggbb`, `rgba(...)`, ...).
    pub color: String,
    /// Line width in pixels.
    #[serde(rename = "brushSize")]
    pub width: f64,
}

impl Stroke {
    pub fn new(path: Vec<Point>, color: impl Into<String>, width: f64) -> Self {
        Self {
            path,
            color: color.into(),
            width,
        }
    }

    /// Shift every vertex by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.path {
            *p += delta;
        }
    }

    /// Copy of this stroke shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        let mut out = self.clone();
        out.translate(delta);
        out
    }

    /// Whether the stroke has enough vertices to paint a segment.
    pub fn is_drawable(&self) -> bool {
        self.path.len() > 1
    }

    /// Polyline as move-to followed by line-tos. `None` when not drawable.
    pub fn to_bez_path(&self) -> Option<BezPath> {
        let (first, rest) = self.path.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        Some(path)
    }
}

/// Ordered strokes of one animation frame; later strokes paint over earlier ones.
///
/// Serialized as a bare JSON array of strokes.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Frame {
    pub strokes: Vec<Stroke>,
}

impl Frame {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
