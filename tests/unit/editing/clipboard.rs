use super::*;
use crate::foundation::core::Point;

fn anim() -> Animation {
    let mut a = Animation::new();
    a.commit_stroke(0, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)], "#000000", 3.0);
    a.commit_stroke(0, vec![Point::new(50.0, 50.0), Point::new(60.0, 60.0)], "#FF0000", 2.0);
    a
}

#[test]
fn copy_then_paste_adds_offset_copies() {
    let mut a = anim();
    let mut clip = Clipboard::new();
    assert_eq!(clip.copy_from(&a, &[1]), 1);
    assert_eq!(clip.paste_into(&mut a, Vec2::new(20.0, 20.0)), 1);

    let frame = a.current_frame();
    assert_eq!(frame.len(), 3);
    let pasted = &frame.strokes[2];
    assert_eq!(pasted.path, vec![Point::new(70.0, 70.0), Point::new(80.0, 80.0)]);
    assert_eq!(pasted.color, "#FF0000");
    assert_eq!(pasted.width, 2.0);
}

#[test]
fn clipboard_survives_source_changes() {
    let mut a = anim();
    let mut clip = Clipboard::new();
    clip.copy_from(&a, &[0, 1]);
    a.clear_frame(0);
    a.insert_frame(0);
    assert_eq!(clip.strokes().len(), 2);
    assert_eq!(clip.paste_into(&mut a, Vec2::ZERO), 2);
    assert_eq!(a.frame(1).unwrap().strokes[0].path[1], Point::new(10.0, 0.0));
}

#[test]
fn empty_copy_keeps_previous_contents() {
    let a = anim();
    let mut clip = Clipboard::new();
    clip.copy_from(&a, &[0]);
    assert_eq!(clip.copy_from(&a, &[]), 0);
    assert_eq!(clip.strokes().len(), 1);
}

#[test]
fn empty_paste_is_noop() {
    let mut a = anim();
    let before = a.clone();
    assert_eq!(Clipboard::new().paste_into(&mut a, Vec2::new(20.0, 20.0)), 0);
    assert_eq!(a, before);
}
