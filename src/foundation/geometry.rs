//! Hit-testing helpers shared by the eraser and the selection engine.
//!
//! All tests are vertex-only: a stroke is "near" a point when one of its recorded vertices is,
//! regardless of the segments between them. Long straight segments drawn with few vertices can
//! therefore be missed in their middle.

use crate::foundation::core::{Point, Rect};
use crate::model::stroke::Stroke;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// `true` if any vertex of `stroke` lies strictly closer than `tolerance` to `p`.
pub fn point_near_stroke(p: Point, stroke: &Stroke, tolerance: f64) -> bool {
    stroke.path.iter().any(|&v| distance(v, p) < tolerance)
}

/// `true` if any vertex of `stroke` lies inside the closed rectangle `[rect_min, rect_max]`.
pub fn bounding_rect_contains(rect_min: Point, rect_max: Point, stroke: &Stroke) -> bool {
    stroke.path.iter().any(|v| {
        v.x >= rect_min.x && v.x <= rect_max.x && v.y >= rect_min.y && v.y <= rect_max.y
    })
}

/// Axis-aligned rectangle spanned by two corners in any order.
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
