use super::*;
use crate::model::stroke::{Frame, Stroke};
use crate::render::commands::{FrameOverlays, render_frame};

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn oversized_canvas_is_rejected() {
    let canvas = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(CpuSurface::new(canvas).is_err());
}

#[test]
fn white_background_fills_every_pixel() {
    let canvas = Canvas {
        width: 16,
        height: 8,
    };
    let mut surface = CpuSurface::new(canvas).unwrap();
    render_frame(
        &mut surface,
        &Frame::default(),
        &FrameOverlays::export(Rgba8::WHITE),
    );
    let out = surface.finish();
    assert_eq!((out.width, out.height), (16, 8));
    assert_eq!(out.data.len(), 16 * 8 * 4);
    assert!(out.premultiplied);
    assert!(out.data.iter().all(|&b| b == 255));
}

#[test]
fn black_stroke_darkens_only_its_row() {
    let canvas = Canvas {
        width: 32,
        height: 32,
    };
    let frame = Frame::new(vec![Stroke::new(
        vec![Point::new(2.0, 16.0), Point::new(30.0, 16.0)],
        "#000000",
        6.0,
    )]);
    let mut surface = CpuSurface::new(canvas).unwrap();
    render_frame(&mut surface, &frame, &FrameOverlays::export(Rgba8::WHITE));
    let out = surface.finish();

    let on = pixel(&out, 16, 16);
    assert!(on[0] < 32 && on[3] == 255, "stroke pixel {on:?}");
    assert_eq!(pixel(&out, 16, 2), [255, 255, 255, 255]);
}

#[test]
fn clear_discards_earlier_drawing() {
    let canvas = Canvas {
        width: 8,
        height: 8,
    };
    let mut surface = CpuSurface::new(canvas).unwrap();
    let mut path = BezPath::new();
    path.move_to((0.0, 4.0));
    path.line_to((8.0, 4.0));
    surface.draw(DrawCommand::StrokePath {
        path,
        color: Rgba8::BLACK,
        width: 8.0,
        dash: None,
    });
    surface.draw(DrawCommand::Clear { color: None });
    let out = surface.finish();
    assert!(out.data.iter().all(|&b| b == 0));
}
