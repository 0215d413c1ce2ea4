use super::*;
use crate::export::sink::InMemorySink;
use crate::foundation::core::Point;

fn canvas() -> Canvas {
    Canvas {
        width: 24,
        height: 16,
    }
}

fn two_frames() -> Animation {
    let mut anim = Animation::new();
    anim.commit_stroke(
        0,
        vec![Point::new(2.0, 8.0), Point::new(22.0, 8.0)],
        "#000000",
        4.0,
    );
    anim.insert_frame(0);
    anim.set_frame_rate(8);
    anim
}

#[test]
fn every_frame_reaches_the_sink_on_white() {
    let anim = two_frames();
    let mut sink = InMemorySink::new();
    export_animation(&anim, canvas(), &mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 24,
            height: 16,
            fps: 8
        })
    );
    assert_eq!(sink.frames.len(), 2);
    // The second frame is empty: pure white.
    assert!(sink.frames[1].1.data.iter().all(|&b| b == 255));
    // The first frame has dark pixels on the stroke row.
    let first = &sink.frames[0].1;
    let i = ((8 * first.width + 12) * 4) as usize;
    assert!(first.data[i] < 64);
}

#[test]
fn gif_bytes_are_produced() {
    let mut out = Vec::new();
    encode_gif(&two_frames(), canvas(), &mut out).unwrap();
    assert!(out.starts_with(b"GIF89a"));
}

#[test]
fn still_out_of_range_is_an_error() {
    let anim = two_frames();
    assert!(render_still(&anim, 5, canvas(), &FrameOverlays::default()).is_err());
    let still = render_still(&anim, 0, canvas(), &FrameOverlays::default()).unwrap();
    assert_eq!((still.width, still.height), (24, 16));
}
