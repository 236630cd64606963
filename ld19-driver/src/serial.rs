use crate::error::{Ld19Error, Result};
use crate::reader::ByteReader;
use serialport::SerialPort;
use std::io::{self, ErrorKind, Read};
use std::time::Duration;

/// Byte reader over a serial port. The port is closed when this is dropped.
pub struct SerialReader {
    port: Box<dyn SerialPort>,
    port_name: String,
}

impl SerialReader {
    /// Opens `port_name` (e.g. `/dev/ttyUSB0`) at `baud_rate`.
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| Ld19Error::OpenPort {
                port: port_name.to_string(),
                source,
            })?;
        log::info!("Opened serial port {} at {} baud", port_name, baud_rate);
        Ok(SerialReader {
            port,
            port_name: port_name.to_string(),
        })
    }

    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        let port_name = port.name().unwrap_or_else(|| "<unnamed port>".to_string());
        SerialReader { port, port_name }
    }

    /// Name of the port, used to tag read errors.
    pub fn name(&self) -> &str {
        &self.port_name
    }
}

/// Timeouts read as zero bytes, a vanished device as a closed transport.
/// Anything else is reported with the port it came from.
fn classify_read_error(port_name: &str, e: io::Error) -> Result<usize> {
    match e.kind() {
        ErrorKind::TimedOut | ErrorKind::Interrupted => Ok(0),
        ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof | ErrorKind::NotConnected => {
            Err(Ld19Error::TransportClosed)
        }
        _ => Err(Ld19Error::ReadPort {
            port: port_name.to_string(),
            source: e,
        }),
    }
}

impl ByteReader for SerialReader {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        match self.port.read(buffer) {
            Ok(0) => Err(Ld19Error::TransportClosed),
            Ok(n) => Ok(n),
            Err(e) => classify_read_error(self.name(), e),
        }
    }
}
