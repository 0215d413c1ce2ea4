use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::{StickframeError, StickframeResult};
use crate::render::backend::{DrawCommand, FrameRGBA, RenderTarget};

/// Software raster target backed by `vello_cpu`.
///
/// Commands are recorded into a render context; [`CpuSurface::finish`] rasterizes them into
/// premultiplied RGBA8.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> StickframeResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| StickframeError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| StickframeError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(StickframeError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    /// Rasterize everything drawn since the last clear.
    pub fn finish(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl RenderTarget for CpuSurface {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear { color } => {
                self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
                if let Some(color) = color {
                    self.ctx.set_paint(paint(color));
                    self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(self.width),
                        f64::from(self.height),
                    ));
                }
            }
            DrawCommand::StrokePath {
                path,
                color,
                width,
                dash,
            } => {
                if !width.is_finite() || width <= 0.0 {
                    tracing::debug!(width, "stroke skipped: non-positive width");
                    return;
                }
                let mut stroke = vello_cpu::kurbo::Stroke::new(width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Round);
                if let Some(pattern) = dash {
                    stroke = stroke.with_dashes(0.0, pattern);
                }
                self.ctx.set_paint(paint(color));
                self.ctx.set_stroke(stroke);
                self.ctx.stroke_path(&bezpath_to_cpu(&path));
            }
        }
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
