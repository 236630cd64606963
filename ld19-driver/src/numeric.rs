use crate::constants::{NOMINAL_STEP_DEGREE, N_SLOTS};

/// Little-endian `u16` from two consecutive bytes.
pub(crate) fn to_u16(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) + (low as u16)
}

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Angle in degrees from a value scaled by 100.
pub(crate) fn to_angle(centidegree: u16) -> f64 {
    (centidegree as f64) / 100.
}

pub(crate) fn normalize_degree(degree: f64) -> f64 {
    let wrapped = degree.rem_euclid(360.);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360. {
        0.
    } else {
        wrapped
    }
}

/// Angle of every slot, interpolated linearly from `start` to `end` degrees.
///
/// When `end` is smaller than `start` the sweep crossed 0°, so a full turn is
/// added to the span. Without an end angle the nominal per-slot step is used.
pub(crate) fn slot_angles(start: f64, end: Option<f64>) -> [f64; N_SLOTS] {
    let step = match end {
        Some(end) => {
            let angle_shift = if start <= end { 0f64 } else { 360. };
            (end - start + angle_shift) / ((N_SLOTS - 1) as f64)
        }
        None => NOMINAL_STEP_DEGREE,
    };
    let mut angles = [0f64; N_SLOTS];
    for (i, angle) in angles.iter_mut().enumerate() {
        *angle = normalize_degree(start + (i as f64) * step);
    }
    angles
}
