use crate::constants::FRAME_SIZE;
use crate::error::{Ld19Error, Result};
use crate::packet::RawFrame;
use crate::reader::ByteReader;

/// Finds frame boundaries in a byte stream.
///
/// Bytes are consumed one at a time until one equals the marker, then the
/// remaining bytes of the frame are read as a block. A candidate that does
/// not complete before a read times out is dropped, and hunting restarts at
/// the next incoming byte. The hunt gives up after a frame's worth of bytes
/// without a marker so callers regain control on a noisy line.
pub struct FrameSynchronizer<R: ByteReader> {
    reader: R,
    marker: u8,
}

impl<R: ByteReader> FrameSynchronizer<R> {
    pub fn new(reader: R, marker: u8) -> Self {
        FrameSynchronizer { reader, marker }
    }

    /// Returns the next candidate frame.
    ///
    /// Fails with `TransportTimeout` when no marker arrived within one read,
    /// `MarkerNotFound` after `FRAME_SIZE` bytes without a marker,
    /// `FrameMisaligned` when a candidate was cut short and `TransportClosed`
    /// at the end of the stream. Only the last one is fatal.
    pub fn next_frame(&mut self) -> Result<RawFrame> {
        let mut byte = [0u8; 1];
        let mut skipped = 0;
        loop {
            if self.reader.read(&mut byte)? == 0 {
                return Err(Ld19Error::TransportTimeout);
            }
            if byte[0] == self.marker {
                break;
            }
            skipped += 1;
            if skipped >= FRAME_SIZE {
                return Err(Ld19Error::MarkerNotFound { skipped });
            }
        }

        let mut raw = [0u8; FRAME_SIZE];
        raw[0] = self.marker;
        let mut received = 1;
        while received < FRAME_SIZE {
            let n = self.reader.read(&mut raw[received..])?;
            if n == 0 {
                return Err(Ld19Error::FrameMisaligned { received });
            }
            received += n;
        }
        Ok(raw)
    }
}
