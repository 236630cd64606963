use crate::error::Result;

/// Source of raw sensor bytes.
///
/// `read` blocks for at most the transport's timeout. `Ok(0)` means nothing
/// arrived in time and the caller may try again. End of stream is reported as
/// [`Ld19Error::TransportClosed`](crate::Ld19Error::TransportClosed).
pub trait ByteReader: Send {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;
}

impl<R: ByteReader + ?Sized> ByteReader for Box<R> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        (**self).read(buffer)
    }
}
