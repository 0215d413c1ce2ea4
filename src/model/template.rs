//! Ready-made figures that can be dropped onto a frame.

use crate::foundation::core::Point;
use crate::model::stroke::Stroke;

/// Six strokes forming a stick figure (head, body, arms, legs) around `center`.
///
/// The head is a closed 15px square; limbs are single segments.
pub fn stick_figure(center: Point, color: &str, width: f64) -> Vec<Stroke> {
    let (cx, cy) = (center.x, center.y);
    let p = |dx: f64, dy: f64| Point::new(cx + dx, cy + dy);

    let paths = [
        vec![p(0.0, -60.0), p(15.0, -60.0), p(15.0, -45.0), p(0.0, -45.0), p(0.0, -60.0)],
        vec![p(7.0, -45.0), p(7.0, 15.0)],
        vec![p(7.0, -30.0), p(-15.0, -15.0)],
        vec![p(7.0, -30.0), p(30.0, -15.0)],
        vec![p(7.0, 15.0), p(-15.0, 45.0)],
        vec![p(7.0, 15.0), p(30.0, 45.0)],
    ];

    paths
        .into_iter()
        .map(|path| Stroke::new(path, color, width))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/model/template.rs"]
mod tests;
