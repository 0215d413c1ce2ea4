use std::io::Write;

use crate::export::gif::GifSink;
use crate::export::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::model::animation::Animation;
use crate::render::backend::FrameRGBA;
use crate::render::commands::{FrameOverlays, render_frame};
use crate::render::cpu::CpuSurface;

/// Render every frame of `anim` on white, without overlays, and feed it to `sink`.
///
/// The sink sees `begin`, one `push_frame` per animation frame, then `end`.
#[tracing::instrument(skip(anim, sink), fields(frames = anim.frame_count(), fps = anim.frame_rate()))]
pub fn export_animation(
    anim: &Animation,
    canvas: Canvas,
    sink: &mut dyn FrameSink,
) -> StickframeResult<()> {
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: anim.frame_rate(),
    })?;

    let mut surface = CpuSurface::new(canvas)?;
    let overlays = FrameOverlays::export(Rgba8::WHITE);
    for (idx, frame) in anim.frames().iter().enumerate() {
        render_frame(&mut surface, frame, &overlays);
        let rgba = surface.finish();
        sink.push_frame(idx, &rgba)?;
    }

    sink.end()?;
    tracing::info!("export finished");
    Ok(())
}

/// Encode `anim` as a looping GIF into `writer`.
pub fn encode_gif<W: Write>(anim: &Animation, canvas: Canvas, writer: W) -> StickframeResult<()> {
    let mut sink = GifSink::new(writer);
    export_animation(anim, canvas, &mut sink)
}

/// Rasterize one frame with the given overlays.
pub fn render_still(
    anim: &Animation,
    index: usize,
    canvas: Canvas,
    overlays: &FrameOverlays<'_>,
) -> StickframeResult<FrameRGBA> {
    let frame = anim.frame(index).ok_or_else(|| {
        StickframeError::validation(format!(
            "frame {index} out of range (animation has {} frames)",
            anim.frame_count()
        ))
    })?;
    let mut surface = CpuSurface::new(canvas)?;
    render_frame(&mut surface, frame, overlays);
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
