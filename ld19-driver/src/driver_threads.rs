use crate::buffer::PointBuffer;
use crate::config::AngleMode;
use crate::error::{Ld19Error, Result};
use crate::packet::decode_frame;
use crate::projector::project_frame;
use crate::reader::ByteReader;
use crate::sync::FrameSynchronizer;
use crossbeam_channel::{Receiver, Sender};
use crossbeam_utils::atomic::AtomicCell;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Counters updated by the pipeline thread.
#[derive(Default)]
pub struct DriverStats {
    frames: AtomicCell<u64>,
    points: AtomicCell<u64>,
    checksum_errors: AtomicCell<u64>,
    misaligned: AtomicCell<u64>,
    timeouts: AtomicCell<u64>,
}

/// Plain copy of [`DriverStats`] at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Frames that passed validation.
    pub frames: u64,
    /// Points pushed into the buffer.
    pub points: u64,
    pub checksum_errors: u64,
    /// Candidates dropped for a bad marker, length or a short read.
    pub misaligned: u64,
    pub timeouts: u64,
}

impl DriverStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames: self.frames.load(),
            points: self.points.load(),
            checksum_errors: self.checksum_errors.load(),
            misaligned: self.misaligned.load(),
            timeouts: self.timeouts.load(),
        }
    }

    fn bump(counter: &AtomicCell<u64>, n: u64) {
        counter.fetch_add(n);
    }
}

/// Struct that owns the pipeline thread.
/// The thread is stopped and joined when this is dropped.
pub struct DriverThread {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) pipeline_thread: Option<JoinHandle<Result<()>>>,
    pub(crate) stats: Arc<DriverStats>,
}

impl DriverThread {
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Whether the pipeline has stopped on its own, e.g. after the transport closed.
    pub fn is_finished(&self) -> bool {
        self.pipeline_thread
            .as_ref()
            .map_or(true, |thread| thread.is_finished())
    }

    /// Stops the pipeline and returns the error that ended it, if any.
    pub fn stop(mut self) -> Result<()> {
        join(&mut self)
    }
}

pub(crate) struct Pipeline {
    pub(crate) marker: u8,
    pub(crate) angle_mode: AngleMode,
    pub(crate) buffer: Arc<PointBuffer>,
    pub(crate) stats: Arc<DriverStats>,
}

impl Pipeline {
    /// Reads, decodes and stores frames until terminated or the transport closes.
    /// The reader is dropped, releasing the transport, when this returns.
    /// A closed transport is a normal end; any other fatal error is returned.
    pub(crate) fn run<R: ByteReader>(
        &self,
        reader: R,
        terminator_rx: Receiver<bool>,
    ) -> Result<()> {
        let mut sync = FrameSynchronizer::new(reader, self.marker);
        while !do_terminate(&terminator_rx) {
            match self.step(&mut sync) {
                Ok(()) => {}
                Err(Ld19Error::TransportClosed) => {
                    log::info!("Transport closed, stopping the pipeline");
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => self.record_drop(&e),
                Err(e) => {
                    log::warn!("Stopping the pipeline: {e}");
                    return Err(e);
                }
            }
        }
        log::debug!("Pipeline terminated");
        Ok(())
    }

    fn step<R: ByteReader>(&self, sync: &mut FrameSynchronizer<R>) -> Result<()> {
        let raw = sync.next_frame()?;
        let frame = decode_frame(&raw, self.marker, self.angle_mode)?;
        log::trace!(
            "Frame at {} ms: {} RPM, {} valid samples",
            frame.trailer.timestamp,
            frame.header.rotation_speed,
            frame.measurements.len()
        );
        self.buffer.extend(project_frame(&frame));
        DriverStats::bump(&self.stats.frames, 1);
        DriverStats::bump(&self.stats.points, frame.measurements.len() as u64);
        Ok(())
    }

    fn record_drop(&self, error: &Ld19Error) {
        match error {
            Ld19Error::TransportTimeout => {
                DriverStats::bump(&self.stats.timeouts, 1);
                return;
            }
            Ld19Error::ChecksumMismatch { .. } => {
                DriverStats::bump(&self.stats.checksum_errors, 1)
            }
            _ => DriverStats::bump(&self.stats.misaligned, 1),
        }
        log::debug!("Dropped frame: {error}");
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join the pipeline thread.
/// Returns the error that stopped the pipeline. Later calls return `Ok(())`.
/// This function is automatically called when `driver_thread` is dropped.
pub fn join(driver_thread: &mut DriverThread) -> Result<()> {
    // The receiver is gone if the pipeline already stopped on its own.
    let _ = driver_thread.terminator_tx.send(true);

    match driver_thread.pipeline_thread.take() {
        Some(thread) => thread.join().unwrap_or(Err(Ld19Error::PipelinePanicked)),
        None => Ok(()),
    }
}

impl Drop for DriverThread {
    fn drop(&mut self) {
        if let Err(e) = join(self) {
            log::error!("Pipeline stopped with an error: {e}");
        }
    }
}
