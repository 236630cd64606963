use crate::numeric::degree_to_radian;
use ld19_data::{Frame, Measurement, Point};

/// Converts a polar measurement into a Cartesian point.
pub fn project(measurement: &Measurement) -> Point {
    let angle_radian = degree_to_radian(measurement.angle_degree);
    let d = measurement.distance_mm as f64;
    Point {
        x_mm: d * f64::cos(angle_radian),
        y_mm: d * f64::sin(angle_radian),
        intensity: measurement.intensity,
    }
}

pub fn project_frame(frame: &Frame) -> impl Iterator<Item = Point> + '_ {
    frame.measurements.iter().map(project)
}
