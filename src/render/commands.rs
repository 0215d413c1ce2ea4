use kurbo::Shape;

use crate::foundation::color::parse_css_color;
use crate::foundation::core::{BezPath, Canvas, Rect, Rgba8};
use crate::foundation::settings::MIN_GRID_SPACING;
use crate::model::stroke::{Frame, Stroke};
use crate::render::backend::{DrawCommand, RenderTarget};

pub const GRID_COLOR: Rgba8 = Rgba8::new(0, 0, 0, 13);
pub const ONION_PREV_COLOR: Rgba8 = Rgba8::new(255, 0, 0, 77);
pub const ONION_NEXT_COLOR: Rgba8 = Rgba8::new(0, 0, 255, 77);
pub const MARQUEE_COLOR: Rgba8 = Rgba8::new(0, 123, 255, 204);
pub const HIGHLIGHT_COLOR: Rgba8 = Rgba8::new(0, 123, 255, 153);

const GRID_LINE_WIDTH: f64 = 1.0;
const MARQUEE_LINE_WIDTH: f64 = 2.0;
const MARQUEE_DASH: [f64; 2] = [5.0, 5.0];
const HIGHLIGHT_EXTRA_WIDTH: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOverlay {
    pub spacing: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionOverlay<'a> {
    /// Pending marquee, drawn dashed.
    pub marquee: Option<Rect>,
    /// Stroke indices of the drawn frame to highlight.
    pub highlighted: &'a [usize],
}

/// Everything drawn around the frame itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOverlays<'a> {
    /// Clear color; `None` leaves the target transparent.
    pub background: Option<Rgba8>,
    pub grid: Option<GridOverlay>,
    pub onion_prev: Option<&'a Frame>,
    pub onion_next: Option<&'a Frame>,
    pub selection: Option<SelectionOverlay<'a>>,
}

impl FrameOverlays<'_> {
    /// Plain frame on an opaque background, as used for export.
    pub fn export(background: Rgba8) -> Self {
        Self {
            background: Some(background),
            ..Self::default()
        }
    }
}

/// Target that only records what it is asked to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandList {
    canvas: Canvas,
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderTarget for CommandList {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Draw `frame` and its overlays into `target`.
///
/// Order: clear, grid, previous onion frame, next onion frame, frame strokes, marquee, selection
/// highlights. Strokes with fewer than two vertices produce nothing.
pub fn render_frame(target: &mut dyn RenderTarget, frame: &Frame, overlays: &FrameOverlays<'_>) {
    target.draw(DrawCommand::Clear {
        color: overlays.background,
    });

    if let Some(grid) = overlays.grid {
        draw_grid(target, grid);
    }
    if let Some(prev) = overlays.onion_prev {
        draw_strokes(target, &prev.strokes, Some(ONION_PREV_COLOR));
    }
    if let Some(next) = overlays.onion_next {
        draw_strokes(target, &next.strokes, Some(ONION_NEXT_COLOR));
    }
    draw_strokes(target, &frame.strokes, None);

    let Some(selection) = overlays.selection else {
        return;
    };
    if let Some(rect) = selection.marquee {
        target.draw(DrawCommand::StrokePath {
            path: rect.to_path(0.1),
            color: MARQUEE_COLOR,
            width: MARQUEE_LINE_WIDTH,
            dash: Some(MARQUEE_DASH),
        });
    }
    for stroke in selection
        .highlighted
        .iter()
        .filter_map(|&i| frame.strokes.get(i))
    {
        if let Some(path) = stroke.to_bez_path() {
            target.draw(DrawCommand::StrokePath {
                path,
                color: HIGHLIGHT_COLOR,
                width: stroke.width + HIGHLIGHT_EXTRA_WIDTH,
                dash: None,
            });
        }
    }
}

fn draw_grid(target: &mut dyn RenderTarget, grid: GridOverlay) {
    if !grid.spacing.is_finite() || grid.spacing < MIN_GRID_SPACING {
        tracing::debug!(spacing = grid.spacing, "grid skipped: spacing below 1px");
        return;
    }
    let canvas = target.size();
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));

    let mut line = |x0: f64, y0: f64, x1: f64, y1: f64| {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y1));
        target.draw(DrawCommand::StrokePath {
            path,
            color: GRID_COLOR,
            width: GRID_LINE_WIDTH,
            dash: None,
        });
    };

    let mut x = 0.0;
    while x < w {
        line(x, 0.0, x, h);
        x += grid.spacing;
    }
    let mut y = 0.0;
    while y < h {
        line(0.0, y, w, y);
        y += grid.spacing;
    }
}

fn draw_strokes(target: &mut dyn RenderTarget, strokes: &[Stroke], tint: Option<Rgba8>) {
    for stroke in strokes {
        let Some(path) = stroke.to_bez_path() else {
            continue;
        };
        let color = tint.unwrap_or_else(|| stroke_color(stroke));
        target.draw(DrawCommand::StrokePath {
            path,
            color,
            width: stroke.width,
            dash: None,
        });
    }
}

fn stroke_color(stroke: &Stroke) -> Rgba8 {
    match parse_css_color(&stroke.color) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(color = %stroke.color, error = %e, "unparseable stroke color, using black");
            Rgba8::BLACK
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/commands.rs"]
mod tests;
