//! Backend independent line drawing of a planform.
//!
//! A [`Drawing`] is a list of styled polylines in planform coordinates. The
//! [`svg`](crate::svg) and [`raster`](crate::raster) modules turn it into files.

use tracing::debug;

use crate::geometry::{Bounds, Point};
use crate::planform::{ControlSurfaceOutline, Planform};

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a colour from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Quarter-chord line.
    pub const TEAL: Color = Color::rgb(0x1f, 0x77, 0xb4);
    /// Root chord.
    pub const ORANGE: Color = Color::rgb(0xff, 0x7f, 0x0e);
    /// Tip chords.
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    /// Mean aerodynamic chord.
    pub const GREEN: Color = Color::rgb(0x2c, 0xa0, 0x2c);
    /// Leading and trailing edges.
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    /// Spars.
    pub const GREY: Color = Color::rgb(0x7f, 0x7f, 0x7f);
    /// Ailerons.
    pub const PURPLE: Color = Color::rgb(0x94, 0x67, 0xbd);
    /// Flaps.
    pub const BROWN: Color = Color::rgb(0x8c, 0x56, 0x4b);
    /// Grid lines.
    pub const LIGHT_GREY: Color = Color::rgb(0xd9, 0xd9, 0xd9);
    /// Text and axes.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Stroke appearance of a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Draw with a dash pattern.
    pub dashed: bool,
}

impl Style {
    /// Solid stroke.
    #[must_use]
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    /// Dashed stroke.
    #[must_use]
    pub const fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// Stroke width of the primary planform lines.
const LINE_WIDTH: f32 = 3.0;
/// Stroke width of spars and control surfaces.
const DETAIL_WIDTH: f32 = 2.0;

/// A connected sequence of line segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Legend entry, if the line should appear in the legend.
    pub label: Option<String>,
    /// Stroke appearance.
    pub style: Style,
    /// Vertices in planform coordinates.
    pub points: Vec<Point>,
}

/// A titled collection of polylines with axis labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing {
    /// Figure title.
    pub title: String,
    /// Label of the horizontal axis.
    pub x_label: String,
    /// Label of the vertical axis.
    pub y_label: String,
    /// Lines in drawing order.
    pub polylines: Vec<Polyline>,
}

impl Drawing {
    /// Create an empty drawing.
    #[must_use]
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            polylines: Vec::new(),
        }
    }

    /// Add a line, with an optional legend label.
    pub fn add_line<I>(&mut self, label: Option<&str>, style: Style, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.polylines.push(Polyline {
            label: label.map(str::to_owned),
            style,
            points: points.into_iter().collect(),
        });
    }

    /// Bounds of every vertex in the drawing.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(
            self.polylines
                .iter()
                .flat_map(|line| line.points.iter().copied()),
        )
    }

    /// Labelled lines, in drawing order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.polylines
            .iter()
            .filter_map(|line| line.label.as_deref().map(|label| (label, &line.style)))
    }
}

/// Mapping from planform coordinates to image pixels.
///
/// The scale is the same on both axes so angles in the image match the real
/// sweep angles. Pixel `y` grows downwards while planform `y` grows forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Pixels per metre.
    pub scale: f64,
    /// Planform point drawn at the centre of the plot area.
    pub center: Point,
    /// Pixel position of the centre of the plot area.
    pub pixel_center: (f64, f64),
}

impl Viewport {
    /// Fit `bounds` into the pixel rectangle `left..left+width` by `top..top+height`.
    #[must_use]
    pub fn fit(bounds: Bounds, left: f64, top: f64, width: f64, height: f64) -> Self {
        let scale_x = if bounds.width() > 0.0 {
            width / bounds.width()
        } else {
            f64::INFINITY
        };
        let scale_y = if bounds.height() > 0.0 {
            height / bounds.height()
        } else {
            f64::INFINITY
        };
        let scale = scale_x.min(scale_y);
        let scale = if scale.is_finite() { scale } else { 1.0 };
        Self {
            scale,
            center: Point::new(
                0.5 * (bounds.min.x + bounds.max.x),
                0.5 * (bounds.min.y + bounds.max.y),
            ),
            pixel_center: (left + 0.5 * width, top + 0.5 * height),
        }
    }

    /// Pixel position of a planform point.
    #[must_use]
    pub fn to_pixel(&self, point: Point) -> (f64, f64) {
        (
            self.pixel_center.0 + (point.x - self.center.x) * self.scale,
            self.pixel_center.1 - (point.y - self.center.y) * self.scale,
        )
    }

    /// Planform point shown at a pixel position.
    #[must_use]
    pub fn to_planform(&self, pixel: (f64, f64)) -> Point {
        Point::new(
            self.center.x + (pixel.0 - self.pixel_center.0) / self.scale,
            self.center.y - (pixel.1 - self.pixel_center.1) / self.scale,
        )
    }
}

/// Grid line spacing giving roughly `target` divisions over `extent`.
///
/// Spacings are 1, 2 or 5 times a power of ten.
#[must_use]
pub fn grid_step(extent: f64, target: usize) -> f64 {
    if !(extent.is_finite() && extent > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = extent / target as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Grid line positions covering `min..=max`.
#[must_use]
pub fn grid_lines(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Add the outline of a control surface on both semispans.
fn add_control_surface(
    drawing: &mut Drawing,
    label: &str,
    style: Style,
    outline: &ControlSurfaceOutline,
) {
    let closed = || outline.corners.iter().chain(outline.corners.first()).copied();
    drawing.add_line(Some(label), style, closed());
    drawing.add_line(None, style, closed().map(Point::mirrored));
}

/// Build the planform drawing: quarter-chord line, root chord, tip chords, MAC,
/// leading and trailing edges, and spars and control surfaces when configured.
///
/// The quarter-chord line and the MAC are drawn on the left semispan, the rest
/// on both.
///
/// # Examples
/// ```
/// use planform::{planform_drawing, Planform, WingParameters};
///
/// let wing = Planform::new(WingParameters::default()).unwrap();
/// let drawing = planform_drawing(&wing);
/// let labels: Vec<&str> = drawing.legend().map(|(label, _)| label).collect();
/// assert_eq!(labels, ["Quarter Chord line", "Root chord", "Tip chord", "MAC"]);
/// ```
#[must_use]
pub fn planform_drawing(wing: &Planform) -> Drawing {
    let mut drawing = Drawing::new("Wing planform", "Spanwise position", "Longitudinal position");
    let [root_le, tip_le, tip_te, root_te] = wing.outline();

    drawing.add_line(
        Some("Quarter Chord line"),
        Style::solid(Color::TEAL, LINE_WIDTH),
        [wing.root.point_at(0.25), wing.tip.point_at(0.25).mirrored()],
    );
    drawing.add_line(
        Some("Root chord"),
        Style::solid(Color::ORANGE, LINE_WIDTH),
        [root_le, root_te],
    );
    drawing.add_line(
        Some("Tip chord"),
        Style::solid(Color::RED, LINE_WIDTH),
        [tip_le.mirrored(), tip_te.mirrored()],
    );
    drawing.add_line(None, Style::solid(Color::RED, LINE_WIDTH), [tip_le, tip_te]);
    drawing.add_line(
        Some("MAC"),
        Style::solid(Color::GREEN, LINE_WIDTH),
        [
            wing.mac_line.point_at(1.0).mirrored(),
            wing.mac_line.point_at(0.0).mirrored(),
        ],
    );
    drawing.add_line(
        None,
        Style::solid(Color::BLUE, LINE_WIDTH),
        [tip_le.mirrored(), root_le, tip_le],
    );
    drawing.add_line(
        None,
        Style::solid(Color::BLUE, LINE_WIDTH),
        [tip_te.mirrored(), root_te, tip_te],
    );

    if let Some(spars) = &wing.spars {
        for (label, [root, tip]) in [("Front spar", spars.front), ("Aft spar", spars.aft)] {
            drawing.add_line(
                Some(label),
                Style::dashed(Color::GREY, DETAIL_WIDTH),
                [tip.mirrored(), root, tip],
            );
        }
    }
    if let Some(aileron) = &wing.aileron {
        add_control_surface(
            &mut drawing,
            "Aileron",
            Style::solid(Color::PURPLE, DETAIL_WIDTH),
            aileron,
        );
    }
    if let Some(flap) = &wing.flap {
        add_control_surface(
            &mut drawing,
            "Flap",
            Style::solid(Color::BROWN, DETAIL_WIDTH),
            flap,
        );
    }

    debug!(lines = drawing.polylines.len(), "built planform drawing");
    drawing
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;
    use crate::parameters::{ControlSurface, SparLayout, WingParameters};

    fn full_wing() -> Planform {
        let parameters = WingParameters::default()
            .with_spars(SparLayout::new(0.15, 0.6))
            .with_aileron(ControlSurface::new(0.75, 0.95, 0.3))
            .with_flap(ControlSurface::new(0.1, 0.7, 0.25));
        Planform::new(parameters).expect("valid wing")
    }

    #[test]
    fn drawing_spans_both_tips() {
        let wing = full_wing();
        let bounds = planform_drawing(&wing).bounds().expect("non-empty drawing");
        assert_relative_eq!(bounds.min.x, -wing.semispan(), epsilon = 1.0e-12);
        assert_relative_eq!(bounds.max.x, wing.semispan(), epsilon = 1.0e-12);
        assert_relative_eq!(bounds.max.y, wing.root.leading_edge(), epsilon = 1.0e-12);
    }

    #[test]
    fn configured_parts_appear_in_the_legend() {
        let drawing = planform_drawing(&full_wing());
        let labels: Vec<&str> = drawing.legend().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            [
                "Quarter Chord line",
                "Root chord",
                "Tip chord",
                "MAC",
                "Front spar",
                "Aft spar",
                "Aileron",
                "Flap"
            ]
        );
    }

    #[test]
    fn control_surfaces_are_closed_and_mirrored() {
        let drawing = planform_drawing(&full_wing());
        let aileron: Vec<&Polyline> = drawing
            .polylines
            .iter()
            .filter(|line| line.style.color == Color::PURPLE)
            .collect();
        assert_eq!(aileron.len(), 2);
        assert_eq!(aileron[0].points.len(), 5);
        assert_eq!(aileron[0].points.first(), aileron[0].points.last());
        assert_eq!(aileron[1].points[0], aileron[0].points[0].mirrored());
    }

    #[test]
    fn viewport_keeps_equal_scale_and_flips_vertical_axis() {
        let bounds = Bounds::enclosing([point(-10.0, -2.0), point(10.0, 2.0)]).expect("bounds");
        let viewport = Viewport::fit(bounds, 0.0, 0.0, 200.0, 200.0);
        assert_relative_eq!(viewport.scale, 10.0);
        assert_eq!(viewport.to_pixel(point(0.0, 0.0)), (100.0, 100.0));
        assert_eq!(viewport.to_pixel(point(10.0, 2.0)), (200.0, 80.0));
        let back = viewport.to_planform((200.0, 80.0));
        assert_relative_eq!(back.x, 10.0);
        assert_relative_eq!(back.y, 2.0);
    }

    #[test]
    fn grid_steps_are_round_numbers() {
        assert_relative_eq!(grid_step(24.5, 10), 5.0);
        assert_relative_eq!(grid_step(7.0, 10), 1.0);
        assert_relative_eq!(grid_step(0.3, 5), 0.1);
        assert_eq!(grid_lines(-3.0, 7.5, 5.0), vec![0.0, 5.0]);
        assert_eq!(grid_lines(-5.0, 5.0, 5.0), vec![-5.0, 0.0, 5.0]);
    }

    #[test]
    fn hex_colours_are_lowercase() {
        assert_eq!(Color::ORANGE.hex(), "#ff7f0e");
    }
}
