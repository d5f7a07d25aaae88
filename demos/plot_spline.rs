extern crate plotters;
use plotters::prelude::*;

use bezier_editor::{Continuity, CubicBezierCurve, EditorConfig, Vector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EditorConfig::default();
    let mut spline = config.new_spline();

    // three segments that start out disconnected
    spline.add_curve(config.default_curve());
    spline.add_curve(CubicBezierCurve::with_color(
        [
            Vector::new(0.8, 0.7, 0.0),
            Vector::new(0.9, 0.2, 0.0),
            Vector::new(0.2, -0.5, 0.0),
            Vector::new(-0.5, -0.6, 0.0),
        ],
        Vector::new(0.0, 0.6, 0.0),
    ));
    spline.add_curve(CubicBezierCurve::with_color(
        [
            Vector::new(-0.4, -0.7, 0.0),
            Vector::new(-0.9, -0.1, 0.0),
            Vector::new(-0.2, 0.3, 0.0),
            Vector::new(0.1, 0.0, 0.0),
        ],
        Vector::new(0.0, 0.0, 1.0),
    ));
    spline.enforce(Continuity::C1);

    let bounds = spline.bounding_box().ok_or("empty spline")?;
    let (xmin, xmax) = bounds[0];
    let (ymin, ymax) = bounds[1];

    let root = BitMapBackend::new("spline_c1.png", (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("C1 continuous cubic Bezier spline", ("sans-serif", 21).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d((xmin - 0.5)..(xmax + 0.5), (ymin - 0.5)..(ymax + 0.5))?;

    chart.configure_mesh().draw()?;

    // the sampled spline, colored per curve
    let n = spline.samples_per_curve();
    for (points, colors) in spline
        .sampled_points()
        .chunks(n)
        .zip(spline.sampled_colors().chunks(n))
    {
        let c = colors[0];
        let style = RGBColor((c.x * 255.0) as u8, (c.y * 255.0) as u8, (c.z * 255.0) as u8);
        chart.draw_series(LineSeries::new(points.iter().map(|p| (p.x, p.y)), &style))?;
    }

    // control polygons
    for curve in spline.curves() {
        let polygon: Vec<(f64, f64)> = curve.control_points().iter().map(|p| (p.x, p.y)).collect();
        chart.draw_series(LineSeries::new(polygon.clone(), &BLACK.mix(0.3)))?;
        chart.draw_series(PointSeries::of_element(
            polygon,
            4,
            &BLACK,
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style.filled()),
        ))?;
    }

    // the two animation markers a quarter lap in
    let mut animator = config.animator();
    animator.advance(std::time::Duration::from_millis(2500));
    if let Some(markers) = animator.markers(&spline) {
        for m in markers {
            chart.draw_series(std::iter::once(Circle::new(
                (m.position.x, m.position.y),
                6,
                MAGENTA.filled(),
            )))?;
            chart.draw_series(LineSeries::new(
                vec![(m.position.x, m.position.y), (m.tangent_tip.x, m.tangent_tip.y)],
                &MAGENTA,
            ))?;
        }
    }

    root.present()?;
    Ok(())
}
