use std::io;

pub type Result<T> = std::result::Result<T, Ld19Error>;

#[derive(Debug, thiserror::Error)]
pub enum Ld19Error {
    /// No byte arrived within the read timeout.
    #[error("Timed out waiting for data")]
    TransportTimeout,

    /// A marker was found but the rest of the frame did not arrive.
    #[error("Frame must be 47 bytes. Only {received} bytes arrived before a timeout.")]
    FrameMisaligned { received: usize },

    /// No marker showed up among this many consecutive bytes.
    #[error("No frame marker in the last {skipped} bytes.")]
    MarkerNotFound { skipped: usize },

    #[error("Frame must start with {expected:#04X}. Observed = {found:#04X}.")]
    InvalidMarker { expected: u8, found: u8 },

    #[error("Frame must be 47 bytes. Actually {0} bytes.")]
    InvalidLength(usize),

    #[error("Checksum mismatched. Calculated = {calculated:02X}, expected = {expected:02X}.")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    #[error("Transport closed")]
    TransportClosed,

    #[error("Failed to open \"{port}\": {source}")]
    OpenPort {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Failed to read from \"{port}\": {source}")]
    ReadPort {
        port: String,
        #[source]
        source: io::Error,
    },

    #[error("Pipeline thread panicked")]
    PipelinePanicked,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    SerialError(#[from] serialport::Error),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl Ld19Error {
    /// Whether the pipeline can drop the current frame and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Ld19Error::TransportTimeout
                | Ld19Error::FrameMisaligned { .. }
                | Ld19Error::MarkerNotFound { .. }
                | Ld19Error::InvalidMarker { .. }
                | Ld19Error::InvalidLength(_)
                | Ld19Error::ChecksumMismatch { .. }
        )
    }
}
