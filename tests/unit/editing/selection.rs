use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Three strokes: two near the origin, one far away.
fn anim() -> Animation {
    let mut a = Animation::new();
    a.commit_stroke(0, vec![pt(0.0, 0.0), pt(10.0, 10.0)], "#000000", 3.0);
    a.commit_stroke(0, vec![pt(20.0, 0.0), pt(30.0, 5.0)], "#000000", 3.0);
    a.commit_stroke(0, vec![pt(200.0, 200.0), pt(210.0, 210.0)], "#000000", 3.0);
    a
}

#[test]
fn marquee_selects_strokes_with_any_vertex_inside() {
    let a = anim();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(35.0, 12.0));
    sel.extend_select(pt(-1.0, -1.0));
    assert!(sel.marquee().is_some());
    assert_eq!(sel.commit_select(&a), 2);
    assert_eq!(sel.members(), vec![0, 1]);
    assert_eq!(sel.mode(), SelectMode::Idle);
    assert!(sel.marquee().is_none());
}

#[test]
fn empty_marquee_selects_nothing() {
    let a = anim();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(100.0, 100.0));
    assert_eq!(sel.commit_select(&a), 0);
    assert!(sel.is_empty());
}

#[test]
fn begin_select_drops_previous_members() {
    let a = anim();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(0.0, 0.0));
    sel.extend_select(pt(300.0, 300.0));
    sel.commit_select(&a);
    assert_eq!(sel.len(), 3);
    sel.begin_select(pt(500.0, 500.0));
    assert!(sel.is_empty());
}

#[test]
fn hit_test_only_considers_selected_strokes() {
    let a = anim();
    let mut sel = SelectionEngine::new();
    assert!(!sel.hits_selection(&a, pt(0.0, 0.0), 10.0));
    sel.begin_select(pt(190.0, 190.0));
    sel.extend_select(pt(220.0, 220.0));
    sel.commit_select(&a);
    assert!(sel.hits_selection(&a, pt(205.0, 205.0), 10.0));
    assert!(!sel.hits_selection(&a, pt(0.0, 0.0), 10.0));
}

#[test]
fn drag_applies_incremental_deltas() {
    let mut a = anim();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(-1.0, -1.0));
    sel.extend_select(pt(11.0, 11.0));
    sel.commit_select(&a);

    sel.begin_drag(pt(5.0, 5.0));
    assert_eq!(sel.extend_drag(&mut a, pt(8.0, 9.0)), Some(Vec2::new(3.0, 4.0)));
    assert_eq!(sel.extend_drag(&mut a, pt(10.0, 10.0)), Some(Vec2::new(2.0, 1.0)));
    sel.commit_drag();

    let s0 = &a.current_frame().strokes[0];
    assert_eq!(s0.path[0], pt(5.0, 5.0));
    // Unselected strokes stay put.
    assert_eq!(a.current_frame().strokes[1].path[0], pt(20.0, 0.0));
    assert_eq!(sel.members(), vec![0]);
    assert_eq!(sel.mode(), SelectMode::Idle);
}

#[test]
fn drag_out_and_back_restores_points() {
    let mut a = anim();
    let before = a.clone();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(-1.0, -1.0));
    sel.extend_select(pt(300.0, 300.0));
    sel.commit_select(&a);
    sel.begin_drag(pt(0.0, 0.0));
    sel.extend_drag(&mut a, pt(13.0, -7.0));
    sel.extend_drag(&mut a, pt(0.0, 0.0));
    assert_eq!(a, before);
}

#[test]
fn extend_drag_without_drag_is_ignored() {
    let mut a = anim();
    let mut sel = SelectionEngine::new();
    assert_eq!(sel.extend_drag(&mut a, pt(1.0, 1.0)), None);
}

#[test]
fn delete_selected_removes_members_and_clears() {
    let mut a = anim();
    let mut sel = SelectionEngine::new();
    sel.begin_select(pt(-1.0, -1.0));
    sel.extend_select(pt(35.0, 12.0));
    sel.commit_select(&a);
    assert_eq!(sel.delete_selected(&mut a), 2);
    assert!(sel.is_empty());
    assert_eq!(a.current_frame().len(), 1);
    assert_eq!(a.current_frame().strokes[0].path[0], pt(200.0, 200.0));
    assert_eq!(sel.delete_selected(&mut a), 0);
}
