//! SVG rendering of a [`Drawing`].

use std::fmt::Write;

use crate::drawing::{grid_lines, grid_step, Color, Drawing, Style, Viewport};
use crate::errors::RenderError;
use crate::geometry::Point;

/// Page layout of a rendered figure, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Space left of the plot area for the vertical axis label and ticks.
    pub margin_left: f64,
    /// Space right of the plot area for the legend.
    pub margin_right: f64,
    /// Space above the plot area for the title.
    pub margin_top: f64,
    /// Space below the plot area for the horizontal axis label and ticks.
    pub margin_bottom: f64,
    /// Font size of titles and labels.
    pub font_size: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            margin_left: 110.0,
            margin_right: 260.0,
            margin_top: 70.0,
            margin_bottom: 90.0,
            font_size: 22.0,
        }
    }
}

impl Layout {
    /// Width of the plot area.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        f64::from(self.width) - self.margin_left - self.margin_right
    }

    /// Height of the plot area.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        f64::from(self.height) - self.margin_top - self.margin_bottom
    }

    /// Viewport fitting the drawing into the plot area with a 5% border.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyDrawing`] when the drawing has no vertices.
    pub fn viewport(&self, drawing: &Drawing) -> Result<Viewport, RenderError> {
        let bounds = drawing.bounds().ok_or(RenderError::EmptyDrawing)?;
        let border = 0.05 * bounds.width().max(bounds.height());
        Ok(Viewport::fit(
            bounds.padded(border),
            self.margin_left,
            self.margin_top,
            self.plot_width(),
            self.plot_height(),
        ))
    }
}

/// Escape the characters XML reserves in text content and attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Tick label with just enough decimals for the grid spacing.
fn tick_label(value: f64, step: f64) -> String {
    let decimals = (-step.log10() - 1.0e-9).ceil().max(0.0) as usize;
    // Avoid printing "-0".
    let value = if value.abs() < 0.5 * step { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Stroke attributes for a style.
fn stroke_attributes(style: &Style) -> String {
    let mut attributes = format!(
        r#"fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
        style.color.hex(),
        style.width
    );
    if style.dashed {
        attributes.push_str(r#" stroke-dasharray="10 6""#);
    }
    attributes
}

/// Format points as an SVG `points` attribute value.
fn points_attribute(viewport: &Viewport, points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| {
            let (x, y) = viewport.to_pixel(p);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the drawing as a standalone SVG document.
///
/// The document holds a grid with tick labels, every polyline, the title, the
/// axis labels and a legend of labelled lines.
///
/// # Errors
///
/// Returns [`RenderError::EmptyDrawing`] when the drawing has no vertices.
///
/// # Examples
/// ```
/// use planform::{planform_drawing, render_svg, Layout, Planform, WingParameters};
///
/// let wing = Planform::new(WingParameters::default()).unwrap();
/// let svg = render_svg(&planform_drawing(&wing), &Layout::default()).unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("Wing planform"));
/// ```
pub fn render_svg(drawing: &Drawing, layout: &Layout) -> Result<String, RenderError> {
    let viewport = layout.viewport(drawing)?;
    let mut out = String::new();
    let font = layout.font_size;
    let (left, top) = (layout.margin_left, layout.margin_top);
    let (right, bottom) = (left + layout.plot_width(), top + layout.plot_height());

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = layout.width,
        h = layout.height
    )
    .expect("writing to string cannot fail");
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)
        .expect("writing to string cannot fail");

    // Grid and ticks over the visible plot area.
    let corner_min = viewport.to_planform((left, bottom));
    let corner_max = viewport.to_planform((right, top));
    let step = grid_step(
        (corner_max.x - corner_min.x).max(corner_max.y - corner_min.y),
        10,
    );
    let grid = stroke_attributes(&Style::solid(Color::LIGHT_GREY, 1.0));
    for x in grid_lines(corner_min.x, corner_max.x, step) {
        let (px, _) = viewport.to_pixel(Point::new(x, 0.0));
        writeln!(
            out,
            r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}" {grid}/>"#
        )
        .expect("writing to string cannot fail");
        writeln!(
            out,
            r#"<text x="{px:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
            bottom + 0.9 * font,
            0.7 * font,
            tick_label(x, step)
        )
        .expect("writing to string cannot fail");
    }
    for y in grid_lines(corner_min.y, corner_max.y, step) {
        let (_, py) = viewport.to_pixel(Point::new(0.0, y));
        writeln!(
            out,
            r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}" {grid}/>"#
        )
        .expect("writing to string cannot fail");
        writeln!(
            out,
            r#"<text x="{:.2}" y="{py:.2}" font-size="{:.1}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
            left - 0.4 * font,
            0.7 * font,
            tick_label(y, step)
        )
        .expect("writing to string cannot fail");
    }
    writeln!(
        out,
        r#"<rect x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
        right - left,
        bottom - top
    )
    .expect("writing to string cannot fail");

    for line in &drawing.polylines {
        writeln!(
            out,
            r#"<polyline points="{}" {}/>"#,
            points_attribute(&viewport, &line.points),
            stroke_attributes(&line.style)
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-size="{font:.1}" text-anchor="middle">{}</text>"#,
        0.5 * (left + right),
        0.5 * top + 0.35 * font,
        escape(&drawing.title)
    )
    .expect("writing to string cannot fail");
    writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-size="{font:.1}" text-anchor="middle">{}</text>"#,
        0.5 * (left + right),
        f64::from(layout.height) - 0.5 * font,
        escape(&drawing.x_label)
    )
    .expect("writing to string cannot fail");
    let label_x = 0.8 * font;
    let label_y = 0.5 * (top + bottom);
    writeln!(
        out,
        r#"<text x="{label_x:.2}" y="{label_y:.2}" font-size="{font:.1}" text-anchor="middle" transform="rotate(-90 {label_x:.2} {label_y:.2})">{}</text>"#,
        escape(&drawing.y_label)
    )
    .expect("writing to string cannot fail");

    let legend_x = right + 20.0;
    for (row, (label, style)) in drawing.legend().enumerate() {
        let y = top + font * (1.0 + 1.4 * row as f64);
        writeln!(
            out,
            r#"<line x1="{legend_x:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" {}/>"#,
            legend_x + 2.0 * font,
            stroke_attributes(style)
        )
        .expect("writing to string cannot fail");
        writeln!(
            out,
            r#"<text x="{:.2}" y="{y:.2}" font-size="{:.1}" dominant-baseline="middle">{}</text>"#,
            legend_x + 2.5 * font,
            0.8 * font,
            escape(label)
        )
        .expect("writing to string cannot fail");
    }

    out.push_str("</svg>\n");
    Ok(out)
}
