use planform::{
    planform_drawing, render_summary, render_svg, ControlSurface, Layout, Planform, SparLayout,
    WingParameters,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A regional jet sized wing with a two-spar box and trailing edge devices
    let parameters = WingParameters::new(9.0, 66.6, 26.3)
        .with_spars(SparLayout::new(0.15, 0.6))
        .with_aileron(ControlSurface::new(0.75, 0.95, 0.3))
        .with_flap(ControlSurface::new(0.1, 0.7, 0.35));

    // Size the wing and print the summary
    let wing = Planform::new(parameters)?;
    print!("{}", render_summary(&wing));

    // Draw it
    let svg = render_svg(&planform_drawing(&wing), &Layout::default())?;
    std::fs::write("control_surfaces.svg", svg)?;
    println!("Drawing written to control_surfaces.svg");

    Ok(())
}
