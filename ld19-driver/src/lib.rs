mod buffer;
mod config;
mod constants;
mod driver_threads;
mod error;
mod numeric;
mod packet;
mod projector;
mod reader;
mod serial;
mod sync;
#[cfg(test)]
mod time;

use crate::driver_threads::Pipeline;
use crossbeam_channel::bounded;
use std::sync::Arc;

pub use crate::buffer::PointBuffer;
pub use crate::config::{AngleMode, DriverConfig};
pub use crate::driver_threads::{join, DriverStats, DriverThread, StatsSnapshot};
pub use crate::error::{Ld19Error, Result};
pub use crate::packet::{calc_checksum, decode_frame, encode_frame, RawFrame};
pub use crate::projector::{project, project_frame};
pub use crate::reader::ByteReader;
pub use crate::serial::SerialReader;
pub use crate::sync::FrameSynchronizer;
pub use ld19_data::{Frame, FrameHeader, FrameTrailer, Measurement, Point};

/// Function to launch the LD19 driver.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `config` - Pipeline parameters
///
/// Returns the thread handle and the buffer it fills.
pub fn run_driver(
    port_name: &str,
    config: DriverConfig,
) -> Result<(DriverThread, Arc<PointBuffer>)> {
    config.validate()?;
    let reader = SerialReader::open(port_name, config.baud_rate, config.read_timeout)?;
    spawn_pipeline(reader, config)
}

/// Runs the pipeline on its own thread over any byte source.
///
/// The thread owns `reader` and drops it when the pipeline stops.
pub fn spawn_pipeline<R: ByteReader + 'static>(
    reader: R,
    config: DriverConfig,
) -> Result<(DriverThread, Arc<PointBuffer>)> {
    config.validate()?;
    let buffer = Arc::new(PointBuffer::new(config.capacity));
    let stats = Arc::new(DriverStats::default());
    let pipeline = Pipeline {
        marker: config.marker,
        angle_mode: config.angle_mode,
        buffer: Arc::clone(&buffer),
        stats: Arc::clone(&stats),
    };

    let (terminator_tx, terminator_rx) = bounded(10);
    let pipeline_thread = Some(
        std::thread::Builder::new()
            .name("ld19-pipeline".into())
            .spawn(move || pipeline.run(reader, terminator_rx))?,
    );
    log::info!("Started pipeline with capacity {}", config.capacity);

    let driver_thread = DriverThread {
        terminator_tx,
        pipeline_thread,
        stats,
    };
    Ok((driver_thread, buffer))
}
