//! PNG rendering of a [`Drawing`] with `tiny-skia`.
//!
//! The raster backend draws the grid, the plot frame and every polyline with
//! the same layout as the SVG backend. Text is not rasterised; legend entries
//! appear as colour swatches only.

use std::path::Path;

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};
use tracing::{debug, warn};

use crate::drawing::{grid_lines, grid_step, Color, Drawing, Style};
use crate::errors::RenderError;
use crate::geometry::Point;
use crate::svg::Layout;

/// Build a paint for a colour.
fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

/// Build a stroke for a style.
fn stroke(style: &Style) -> Stroke {
    let mut stroke = Stroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    if style.dashed {
        stroke.dash = StrokeDash::new(vec![10.0, 6.0], 0.0);
    }
    stroke
}

/// Stroke a pixel-space polyline onto the canvas.
fn stroke_pixels(canvas: &mut Pixmap, pixels: &[(f64, f64)], style: &Style) {
    let mut pb = PathBuilder::new();
    for (idx, &(x, y)) in pixels.iter().enumerate() {
        if idx == 0 {
            pb.move_to(x as f32, y as f32);
        } else {
            pb.line_to(x as f32, y as f32);
        }
    }
    // Fewer than two vertices produce no path.
    let Some(path) = pb.finish() else {
        warn!(vertices = pixels.len(), "skipping degenerate polyline");
        return;
    };
    canvas.stroke_path(
        &path,
        &paint(style.color),
        &stroke(style),
        Transform::identity(),
        None,
    );
}

/// Rasterise the drawing.
///
/// # Errors
///
/// Returns [`RenderError::Canvas`] for a zero-sized layout and
/// [`RenderError::EmptyDrawing`] when the drawing has no vertices.
///
/// # Examples
/// ```
/// use planform::{planform_drawing, render_png, Layout, Planform, WingParameters};
///
/// let wing = Planform::new(WingParameters::default()).unwrap();
/// let pixmap = render_png(&planform_drawing(&wing), &Layout::default()).unwrap();
/// assert_eq!(pixmap.width(), Layout::default().width);
/// ```
pub fn render_png(drawing: &Drawing, layout: &Layout) -> Result<Pixmap, RenderError> {
    let mut canvas = Pixmap::new(layout.width, layout.height).ok_or(RenderError::Canvas {
        width: layout.width,
        height: layout.height,
    })?;
    canvas.fill(tiny_skia::Color::WHITE);
    let viewport = layout.viewport(drawing)?;

    let (left, top) = (layout.margin_left, layout.margin_top);
    let (right, bottom) = (left + layout.plot_width(), top + layout.plot_height());
    let corner_min = viewport.to_planform((left, bottom));
    let corner_max = viewport.to_planform((right, top));
    let step = grid_step(
        (corner_max.x - corner_min.x).max(corner_max.y - corner_min.y),
        10,
    );
    let grid = Style::solid(Color::LIGHT_GREY, 1.0);
    for x in grid_lines(corner_min.x, corner_max.x, step) {
        let (px, _) = viewport.to_pixel(Point::new(x, 0.0));
        stroke_pixels(&mut canvas, &[(px, top), (px, bottom)], &grid);
    }
    for y in grid_lines(corner_min.y, corner_max.y, step) {
        let (_, py) = viewport.to_pixel(Point::new(0.0, y));
        stroke_pixels(&mut canvas, &[(left, py), (right, py)], &grid);
    }
    stroke_pixels(
        &mut canvas,
        &[
            (left, top),
            (right, top),
            (right, bottom),
            (left, bottom),
            (left, top),
        ],
        &Style::solid(Color::BLACK, 1.0),
    );

    for line in &drawing.polylines {
        let pixels: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|&p| viewport.to_pixel(p))
            .collect();
        stroke_pixels(&mut canvas, &pixels, &line.style);
    }

    let legend_x = right + 20.0;
    for (row, (_, style)) in drawing.legend().enumerate() {
        let y = top + layout.font_size * (1.0 + 1.4 * row as f64);
        stroke_pixels(
            &mut canvas,
            &[(legend_x, y), (legend_x + 2.0 * layout.font_size, y)],
            style,
        );
    }

    debug!(
        width = layout.width,
        height = layout.height,
        lines = drawing.polylines.len(),
        "rasterised drawing"
    );
    Ok(canvas)
}

/// Encode a rendered canvas as PNG and write it to `path`.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] when PNG encoding fails and
/// [`RenderError::Io`] when the file cannot be written.
pub fn write_png(canvas: &Pixmap, path: &Path) -> Result<(), RenderError> {
    let bytes = canvas
        .encode_png()
        .map_err(|error| RenderError::Encode(error.to_string()))?;
    std::fs::write(path, bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
