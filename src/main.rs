use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use planform::config::load_parameters;
use planform::{
    planform_drawing, render_png, render_summary, render_svg, summary_json, write_png, Layout,
    Planform, TaperRule, WingParameters,
};

/// Size a trapezoidal wing and draw its planform.
#[derive(Debug, Parser)]
#[command(name = "planform", version)]
#[command(about = "Compute MAC, sweep angles and control surface layout of a tapered wing")]
struct Cli {
    /// JSON file with wing parameters; missing fields use the reference wing
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Aspect ratio, overriding the configuration
    #[arg(long)]
    aspect_ratio: Option<f64>,
    /// Reference area in m^2, overriding the configuration
    #[arg(long)]
    area: Option<f64>,
    /// Quarter-chord sweep in degrees, overriding the configuration
    #[arg(long, allow_negative_numbers = true)]
    sweep: Option<f64>,
    /// Taper ratio, overriding the sweep correlation
    #[arg(long)]
    taper: Option<f64>,
    /// Write the planform drawing as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Write the planform drawing as PNG
    #[arg(long)]
    png: Option<PathBuf>,
    /// Write the derived quantities as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    /// Merge the configuration file, if any, with the command line overrides.
    fn parameters(&self) -> Result<WingParameters> {
        let mut parameters = match &self.config {
            Some(path) => load_parameters(path)?,
            None => WingParameters::default(),
        };
        if let Some(aspect_ratio) = self.aspect_ratio {
            parameters.aspect_ratio = aspect_ratio;
        }
        if let Some(area) = self.area {
            parameters.area = area;
        }
        if let Some(sweep) = self.sweep {
            parameters.quarter_chord_sweep_deg = sweep;
        }
        if let Some(taper) = self.taper {
            parameters.taper = TaperRule::Explicit(taper);
        }
        Ok(parameters)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Collect the design inputs: aspect ratio, area and quarter-chord sweep,
    // plus the optional spar and control surface layout.
    let parameters = cli.parameters()?;

    // Derive the trapezoid, integrate chord^2 over the semispan for the mean
    // aerodynamic chord and locate it. See
    // https://en.wikipedia.org/wiki/Chord_(aeronautics)#Mean_aerodynamic_chord
    let wing = Planform::new(parameters).context("failed to size the wing")?;

    // Print the summary for the CLI user.
    print!("{}", render_summary(&wing));

    if let Some(path) = &cli.json {
        fs::write(path, summary_json(&wing)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    // Draw the planform only when an image was requested.
    if cli.svg.is_some() || cli.png.is_some() {
        let drawing = planform_drawing(&wing);
        let layout = Layout::default();
        if let Some(path) = &cli.svg {
            fs::write(path, render_svg(&drawing, &layout)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        if let Some(path) = &cli.png {
            write_png(&render_png(&drawing, &layout)?, path)?;
        }
    }

    Ok(())
}
