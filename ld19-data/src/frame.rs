#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Leading fields of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameHeader {
    pub version_length: u8,
    /// Rotation speed in RPM.
    pub rotation_speed: u16,
    /// Angle of the first slot in hundredths of a degree.
    pub start_angle: u16,
}

/// Trailing fields of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameTrailer {
    /// Angle of the last slot in hundredths of a degree.
    pub end_angle: u16,
    /// Sensor clock in milliseconds. Wraps at `u16::MAX`.
    pub timestamp: u16,
    pub checksum: u8,
}

/// One valid range sample with the absolute angle assigned to its slot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Absolute angle in degrees, within `[0, 360)`.
    pub angle_degree: f64,
    /// Distance to an object in mm. Never zero.
    pub distance_mm: u16,
    /// Return strength of the laser pulse.
    pub intensity: u8,
}

/// Struct to hold one decoded frame of lidar data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub header: FrameHeader,
    pub trailer: FrameTrailer,
    /// Valid samples in slot order. Slots without a return are omitted.
    pub measurements: Vec<Measurement>,
}

impl FrameHeader {
    /// Start angle in degrees.
    pub fn start_angle_degree(&self) -> f64 {
        f64::from(self.start_angle) / 100.
    }
}

impl FrameTrailer {
    /// End angle in degrees.
    pub fn end_angle_degree(&self) -> f64 {
        f64::from(self.end_angle) / 100.
    }
}
