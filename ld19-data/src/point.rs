#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cartesian point in the sensor frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate in millimeters.
    pub x_mm: f64,
    /// Y coordinate in millimeters.
    pub y_mm: f64,
    /// Return strength of the laser pulse.
    pub intensity: u8,
}
