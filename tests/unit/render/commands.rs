use super::*;
use crate::foundation::core::Point;

fn stroke(points: &[(f64, f64)], color: &str, width: f64) -> Stroke {
    Stroke::new(
        points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color,
        width,
    )
}

fn canvas() -> Canvas {
    Canvas {
        width: 40,
        height: 40,
    }
}

fn stroke_colors(list: &CommandList) -> Vec<Rgba8> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokePath { color, .. } => Some(*color),
            DrawCommand::Clear { .. } => None,
        })
        .collect()
}

#[test]
fn bare_frame_clears_then_strokes() {
    let frame = Frame::new(vec![
        stroke(&[(0.0, 0.0), (10.0, 10.0)], "#ff0000", 4.0),
        stroke(&[(5.0, 5.0)], "#00ff00", 4.0),
    ]);
    let mut list = CommandList::new(canvas());
    render_frame(&mut list, &frame, &FrameOverlays::default());

    let cmds = list.into_commands();
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0], DrawCommand::Clear { color: None });
    let DrawCommand::StrokePath {
        path,
        color,
        width,
        dash,
    } = &cmds[1]
    else {
        panic!("expected stroke");
    };
    assert_eq!(*color, Rgba8::opaque(255, 0, 0));
    assert_eq!(*width, 4.0);
    assert_eq!(*dash, None);
    assert_eq!(path.elements().len(), 2);
}

#[test]
fn overlays_follow_fixed_order() {
    let prev = Frame::new(vec![stroke(&[(0.0, 0.0), (1.0, 1.0)], "#000000", 2.0)]);
    let next = Frame::new(vec![stroke(&[(0.0, 0.0), (2.0, 2.0)], "#000000", 2.0)]);
    let current = Frame::new(vec![stroke(&[(3.0, 3.0), (4.0, 4.0)], "#00ff00", 3.0)]);
    let highlighted = [0];
    let overlays = FrameOverlays {
        background: Some(Rgba8::WHITE),
        grid: None,
        onion_prev: Some(&prev),
        onion_next: Some(&next),
        selection: Some(SelectionOverlay {
            marquee: Some(Rect::new(1.0, 1.0, 5.0, 5.0)),
            highlighted: &highlighted,
        }),
    };
    let mut list = CommandList::new(canvas());
    render_frame(&mut list, &current, &overlays);

    assert_eq!(
        list.commands()[0],
        DrawCommand::Clear {
            color: Some(Rgba8::WHITE)
        }
    );
    assert_eq!(
        stroke_colors(&list),
        vec![
            ONION_PREV_COLOR,
            ONION_NEXT_COLOR,
            Rgba8::opaque(0, 255, 0),
            MARQUEE_COLOR,
            HIGHLIGHT_COLOR,
        ]
    );

    let DrawCommand::StrokePath { width, dash, .. } = &list.commands()[4] else {
        panic!("expected marquee");
    };
    assert_eq!(*width, 2.0);
    assert_eq!(*dash, Some([5.0, 5.0]));
    let DrawCommand::StrokePath { width, .. } = &list.commands()[5] else {
        panic!("expected highlight");
    };
    assert_eq!(*width, 5.0);
}

#[test]
fn grid_lines_cover_canvas_at_spacing() {
    let overlays = FrameOverlays {
        grid: Some(GridOverlay { spacing: 20.0 }),
        ..FrameOverlays::default()
    };
    let mut list = CommandList::new(Canvas {
        width: 60,
        height: 40,
    });
    render_frame(&mut list, &Frame::default(), &overlays);

    let colors = stroke_colors(&list);
    // x = 0, 20, 40 and y = 0, 20
    assert_eq!(colors.len(), 5);
    assert!(colors.iter().all(|c| *c == GRID_COLOR));
}

#[test]
fn highlight_ignores_stale_indices() {
    let frame = Frame::new(vec![stroke(&[(0.0, 0.0), (1.0, 1.0)], "#000", 1.0)]);
    let highlighted = [0, 7];
    let overlays = FrameOverlays {
        selection: Some(SelectionOverlay {
            marquee: None,
            highlighted: &highlighted,
        }),
        ..FrameOverlays::default()
    };
    let mut list = CommandList::new(canvas());
    render_frame(&mut list, &frame, &overlays);
    assert_eq!(stroke_colors(&list), vec![Rgba8::BLACK, HIGHLIGHT_COLOR]);
}

#[test]
fn unparseable_color_falls_back_to_black() {
    let frame = Frame::new(vec![stroke(&[(0.0, 0.0), (1.0, 1.0)], "chartreuse", 1.0)]);
    let mut list = CommandList::new(canvas());
    render_frame(&mut list, &frame, &FrameOverlays::export(Rgba8::WHITE));
    assert_eq!(stroke_colors(&list), vec![Rgba8::BLACK]);
}

#[test]
fn sub_pixel_grid_spacing_draws_nothing() {
    for spacing in [1e-300, 0.5, 0.0, f64::NAN] {
        let overlays = FrameOverlays {
            grid: Some(GridOverlay { spacing }),
            ..FrameOverlays::default()
        };
        let mut list = CommandList::new(canvas());
        render_frame(&mut list, &Frame::default(), &overlays);
        assert_eq!(list.commands().len(), 1, "spacing {spacing}");
    }
}
