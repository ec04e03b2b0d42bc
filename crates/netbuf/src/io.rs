//! `std::io` adapters.
//!
//! The buffer does no transport of its own. These impls let it sit on either
//! side of anything speaking `Read`/`Write`, with the caller owning the
//! source or sink.

use std::io::{self, BufRead, IoSliceMut, Read, Write};

use crate::ByteBuffer;

/// Size of the on-stack spill area used by [`ByteBuffer::read_from`].
pub const SPILL_SIZE: usize = 64 * 1024;

impl ByteBuffer {
    /// Performs one read from `src` into the buffer and returns the number of
    /// bytes read (`0` at end of stream).
    ///
    /// The read targets the writable region and, while that region is smaller
    /// than [`SPILL_SIZE`], a stack spill area as well, so a large arrival is
    /// taken in a single call without pre-growing every buffer. Whatever lands
    /// in the spill area is appended afterwards. `Interrupted` errors are
    /// retried, and a source claiming more bytes than it was offered yields
    /// `InvalidData` with the buffer unchanged.
    pub fn read_from<R: Read + ?Sized>(&mut self, src: &mut R) -> io::Result<usize> {
        let mut spill = [0u8; SPILL_SIZE];
        let writable = self.writable_bytes();
        let n = {
            let mut slices = [
                IoSliceMut::new(self.begin_write()),
                IoSliceMut::new(&mut spill),
            ];
            let count = if writable < SPILL_SIZE { 2 } else { 1 };
            let offered = if count == 2 { writable + SPILL_SIZE } else { writable };
            let n = loop {
                match src.read_vectored(&mut slices[..count]) {
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    result => break result?,
                }
            };
            if n > offered {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("source reported {n} bytes read into {offered} bytes of space"),
                ));
            }
            n
        };
        if n <= writable {
            self.has_written(n);
        } else {
            self.has_written(writable);
            self.append(&spill[..n - writable]);
        }
        log::trace!("read {} bytes from source ({} writable before)", n, writable);
        Ok(n)
    }
}

impl Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.readable_bytes());
        buf[..n].copy_from_slice(&self.peek()[..n]);
        self.retrieve(n);
        Ok(n)
    }
}

impl BufRead for ByteBuffer {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.peek())
    }

    fn consume(&mut self, amt: usize) {
        self.retrieve(amt);
    }
}
