pub mod frame;
pub mod point;

pub use frame::{Frame, FrameHeader, FrameTrailer, Measurement};
pub use point::Point;
