#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod drawing;
mod errors;
mod geometry;
mod parameters;
mod planform;
pub mod quadrature;
pub mod raster;
pub mod report;
pub mod svg;

pub use drawing::{planform_drawing, Color, Drawing, Polyline, Style, Viewport};
pub use errors::{ConfigError, ParameterError, PlanformError, QuadratureError, RenderError};
pub use geometry::{point, Bounds, Point};
pub use parameters::{
    ControlSurface, SparLayout, TaperRule, WingParameters, REFERENCE_AREA,
    REFERENCE_ASPECT_RATIO, REFERENCE_SWEEP_DEG,
};
pub use planform::{ChordLine, ControlSurfaceOutline, Planform, SparLines, SweepAngles};
pub use raster::{render_png, write_png};
pub use report::{render_summary, summary_json, Summary};
pub use svg::{render_svg, Layout};
