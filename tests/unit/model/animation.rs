use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn anim_with_stroke() -> Animation {
    let mut a = Animation::new();
    assert!(a.commit_stroke(0, vec![pt(0.0, 0.0), pt(10.0, 10.0)], "#000000", 3.0));
    a
}

#[test]
fn new_animation_has_one_empty_frame() {
    let a = Animation::new();
    assert_eq!(a.frame_count(), 1);
    assert!(a.current_frame().is_empty());
    assert_eq!(a.frame_rate(), 12);
    assert_eq!(a.default_brush_width(), 3.0);
}

#[test]
fn from_parts_rejects_broken_invariants() {
    assert!(Animation::from_parts(vec![], 12, 3.0).is_err());
    assert!(Animation::from_parts(vec![Frame::default()], 0, 3.0).is_err());
    assert!(Animation::from_parts(vec![Frame::default()], 12, 0.0).is_err());
    assert!(Animation::from_parts(vec![Frame::default()], 12, f64::NAN).is_err());
}

#[test]
fn single_point_commit_is_discarded() {
    let mut a = Animation::new();
    assert!(!a.commit_stroke(0, vec![pt(1.0, 1.0)], "#000000", 3.0));
    assert!(!a.commit_stroke(0, vec![], "#000000", 3.0));
    assert_eq!(a.current_frame().len(), 0);
}

#[test]
fn out_of_range_indices_are_noops() {
    let mut a = anim_with_stroke();
    let before = a.clone();
    assert!(!a.commit_stroke(5, vec![pt(0.0, 0.0), pt(1.0, 1.0)], "#000", 1.0));
    assert_eq!(a.erase_near(5, pt(0.0, 0.0), 100.0), 0);
    assert!(!a.insert_frame(5));
    assert!(!a.duplicate_frame(5));
    assert!(!a.delete_frame(5));
    assert!(!a.clear_frame(5));
    assert!(!a.translate_strokes(5, &[0], 1.0, 1.0));
    assert!(!a.translate_strokes(0, &[7], 1.0, 1.0));
    assert_eq!(a.delete_strokes(5, &[0]), 0);
    assert_eq!(a.delete_strokes(0, &[9]), 0);
    assert!(!a.go_to_frame(3));
    assert_eq!(a, before);
}

#[test]
fn commit_insert_delete_scenario() {
    let mut a = anim_with_stroke();
    assert_eq!(a.frame(0).unwrap().strokes[0].path.len(), 2);

    assert!(a.insert_frame(0));
    assert_eq!(a.frame_count(), 2);
    assert_eq!(a.current_frame_index(), 1);
    assert!(a.frame(1).unwrap().is_empty());

    assert!(a.delete_frame(1));
    assert_eq!(a.frame_count(), 1);
    assert_eq!(a.current_frame_index(), 0);
    assert_eq!(a.frame(0).unwrap().len(), 1);
}

#[test]
fn erase_removes_strokes_within_radius() {
    let mut a = anim_with_stroke();
    assert_eq!(a.erase_near(0, pt(5.0, 5.0), 15.0), 1);
    assert!(a.current_frame().is_empty());
}

#[test]
fn erase_keeps_strokes_outside_radius() {
    let mut a = anim_with_stroke();
    assert_eq!(a.erase_near(0, pt(100.0, 100.0), 9.0), 0);
    assert_eq!(a.current_frame().len(), 1);
}

#[test]
fn deleting_frames_never_empties_animation() {
    let mut a = Animation::new();
    for _ in 0..3 {
        a.insert_frame(a.current_frame_index());
    }
    for i in [3, 0, 0, 0, 0, 1, 0] {
        a.delete_frame(i);
        assert!(a.frame_count() >= 1);
        assert!(a.current_frame_index() < a.frame_count());
    }
    assert_eq!(a.frame_count(), 1);
    assert!(!a.delete_frame(0));
}

#[test]
fn delete_clamps_cursor_to_last_frame() {
    let mut a = Animation::new();
    a.insert_frame(0);
    a.insert_frame(1);
    assert_eq!(a.current_frame_index(), 2);
    assert!(a.delete_frame(2));
    assert_eq!(a.current_frame_index(), 1);
}

#[test]
fn duplicate_then_delete_restores_frames() {
    let mut a = anim_with_stroke();
    a.insert_frame(0);
    a.commit_stroke(1, vec![pt(3.0, 3.0), pt(4.0, 4.0)], "#FF0000", 2.0);
    let original = a.frames().to_vec();

    assert!(a.duplicate_frame(0));
    assert_eq!(a.current_frame_index(), 1);
    assert_eq!(a.frame(1), a.frame(0));
    assert!(a.delete_frame(1));
    assert_eq!(a.frames(), original.as_slice());
}

#[test]
fn duplicate_is_a_deep_copy() {
    let mut a = anim_with_stroke();
    a.duplicate_frame(0);
    a.translate_strokes(1, &[0], 5.0, 5.0);
    assert_eq!(a.frame(0).unwrap().strokes[0].path[0], pt(0.0, 0.0));
    assert_eq!(a.frame(1).unwrap().strokes[0].path[0], pt(5.0, 5.0));
}

#[test]
fn translate_round_trip_restores_points() {
    let mut a = anim_with_stroke();
    let before = a.clone();
    a.translate_strokes(0, &[0], 7.0, -3.0);
    assert_eq!(a.frame(0).unwrap().strokes[0].path[1], pt(17.0, 7.0));
    a.translate_strokes(0, &[0], -7.0, 3.0);
    assert_eq!(a, before);
}

#[test]
fn delete_strokes_handles_unsorted_and_duplicate_indices() {
    let mut a = Animation::new();
    for i in 0..5 {
        let x = f64::from(i);
        a.commit_stroke(0, vec![pt(x, 0.0), pt(x, 1.0)], "#000000", 1.0);
    }
    assert_eq!(a.delete_strokes(0, &[1, 3, 1, 0]), 3);
    let remaining: Vec<f64> = a.current_frame().strokes.iter().map(|s| s.path[0].x).collect();
    assert_eq!(remaining, vec![2.0, 4.0]);
}

#[test]
fn clear_frame_empties_strokes() {
    let mut a = anim_with_stroke();
    assert!(a.clear_frame(0));
    assert!(a.current_frame().is_empty());
}

#[test]
fn neighbors_follow_cursor() {
    let mut a = Animation::new();
    a.insert_frame(0);
    a.insert_frame(1);
    a.go_to_frame(1);
    let (prev, next) = a.neighbors();
    assert!(prev.is_some() && next.is_some());
    a.go_to_frame(0);
    assert!(a.neighbors().0.is_none());
    a.go_to_frame(2);
    assert!(a.neighbors().1.is_none());
}

#[test]
fn setters_ignore_invalid_values() {
    let mut a = Animation::new();
    assert!(!a.set_frame_rate(0));
    assert!(!a.set_default_brush_width(-1.0));
    assert!(a.set_frame_rate(24));
    assert!(a.set_default_brush_width(5.0));
    assert_eq!((a.frame_rate(), a.default_brush_width()), (24, 5.0));
}

#[test]
fn stroke_polyline_is_move_then_lines() {
    let s = Stroke::new(vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)], "#000", 1.0);
    let path = s.to_bez_path().unwrap();
    assert_eq!(path.elements().len(), 3);
    assert!(matches!(path.elements()[0], kurbo::PathEl::MoveTo(_)));
    assert!(Stroke::new(vec![pt(0.0, 0.0)], "#000", 1.0).to_bez_path().is_none());
}
