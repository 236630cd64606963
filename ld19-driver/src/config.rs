use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_CAPACITY, DEFAULT_READ_TIMEOUT_MS, FRAME_MARKER,
};
use crate::error::{Ld19Error, Result};
use std::time::Duration;

/// How slot angles are derived from a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AngleMode {
    /// Linear interpolation between the start and end angle of the frame.
    #[default]
    Interpolated,
    /// Fixed 0.83 degree step from the start angle. Drifts at high rotation
    /// speed; only meant for streams whose end angle cannot be trusted.
    NominalStep,
}

/// Parameters of the decoding pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Number of points kept in the point buffer.
    pub capacity: usize,
    /// Upper bound of a single blocking read.
    pub read_timeout: Duration,
    pub baud_rate: u32,
    /// First byte of every frame.
    pub marker: u8,
    pub angle_mode: AngleMode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            capacity: DEFAULT_CAPACITY,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            baud_rate: DEFAULT_BAUD_RATE,
            marker: FRAME_MARKER,
            angle_mode: AngleMode::default(),
        }
    }
}

impl DriverConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Ld19Error::InvalidConfig(
                "capacity must be at least one point".into(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(Ld19Error::InvalidConfig(
                "read timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}
