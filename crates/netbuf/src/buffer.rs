//! Growable byte buffer with a reserved prepend margin.
//!
//! ```text
//! +-------------------+------------------+------------------+
//! | prependable bytes |  readable bytes  |  writable bytes  |
//! |                   |     (CONTENT)    |                  |
//! +-------------------+------------------+------------------+
//! |                   |                  |                  |
//! 0      <=         reader     <=      writer      <=    capacity
//! ```

use std::fmt;

use crate::config::BufferConfig;
use crate::int::FixedInt;
use crate::BufferError;

/// A contiguous byte buffer split into prependable, readable and writable
/// regions.
///
/// Producers fill the writable region (`append*`, or `begin_write` followed
/// by `has_written`), consumers inspect the readable region (`peek*`) and
/// consume it (`retrieve*`), and framers write headers into the prependable
/// region (`prepend*`) without moving the payload.
///
/// Precondition violations panic before anything is mutated. The `try_*`
/// methods report the same conditions as [`BufferError`] instead.
///
/// # Example
///
/// ```
/// use netbuf::ByteBuffer;
///
/// let mut buf = ByteBuffer::new();
/// buf.append(b"payload");
/// buf.prepend_int32_be(7);
/// assert_eq!(buf.read_int32_be(), 7);
/// assert_eq!(buf.retrieve_all_as_bytes(), b"payload");
/// ```
#[derive(Clone)]
pub struct ByteBuffer {
    storage: Vec<u8>,
    reader: usize,
    writer: usize,
    cheap_prepend: usize,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[track_caller]
fn expect_ok<T>(result: Result<T, BufferError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl ByteBuffer {
    /// Creates a buffer with 1024 writable and 8 prependable bytes.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates a buffer with `initial_size` writable bytes and the default
    /// prepend margin.
    pub fn with_capacity(initial_size: usize) -> Self {
        Self::with_config(BufferConfig::default().with_initial_size(initial_size))
    }

    /// Creates a buffer from `config`.
    ///
    /// # Panics
    ///
    /// Panics if the config is invalid; see [`BufferConfig::validate`].
    #[track_caller]
    pub fn with_config(config: BufferConfig) -> Self {
        expect_ok(Self::try_with_config(config))
    }

    pub fn try_with_config(config: BufferConfig) -> Result<Self, BufferError> {
        let len = config.storage_len()?;
        Ok(Self {
            storage: vec![0; len],
            reader: config.cheap_prepend,
            writer: config.cheap_prepend,
            cheap_prepend: config.cheap_prepend,
        })
    }

    #[inline]
    pub fn readable_bytes(&self) -> usize {
        self.writer - self.reader
    }

    #[inline]
    pub fn writable_bytes(&self) -> usize {
        self.storage.len() - self.writer
    }

    #[inline]
    pub fn prependable_bytes(&self) -> usize {
        self.reader
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reader == self.writer
    }

    /// Length of the storage backing all three regions.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes actually allocated, which may exceed [`capacity`](Self::capacity)
    /// after amortized growth.
    pub fn internal_capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The prepend margin restored whenever the buffer is drained.
    pub fn cheap_prepend(&self) -> usize {
        self.cheap_prepend
    }

    fn check_readable(&self, requested: usize) -> Result<(), BufferError> {
        let available = self.readable_bytes();
        if requested > available {
            return Err(BufferError::NotEnoughReadable {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn check_writable(&self, requested: usize) -> Result<(), BufferError> {
        let available = self.writable_bytes();
        if requested > available {
            return Err(BufferError::NotEnoughWritable {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn check_prependable(&self, requested: usize) -> Result<(), BufferError> {
        let available = self.prependable_bytes();
        if requested > available {
            return Err(BufferError::NotEnoughPrependable {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn check_marker(&self, marker: usize) -> Result<(), BufferError> {
        let readable = self.readable_bytes();
        if marker > readable {
            return Err(BufferError::MarkerOutOfRange { marker, readable });
        }
        Ok(())
    }

    // ---------------------------------------------------------------- read

    /// The readable region. Nothing is consumed.
    #[inline]
    pub fn peek(&self) -> &[u8] {
        &self.storage[self.reader..self.writer]
    }

    /// Leading `T::WIDTH` readable bytes in host byte order.
    pub fn try_peek_int<T: FixedInt>(&self) -> Result<T, BufferError> {
        self.check_readable(T::WIDTH)?;
        Ok(T::decode_ne(self.peek()))
    }

    /// Leading `T::WIDTH` readable bytes in network byte order.
    pub fn try_peek_int_be<T: FixedInt>(&self) -> Result<T, BufferError> {
        self.check_readable(T::WIDTH)?;
        Ok(T::decode_be(self.peek()))
    }

    #[track_caller]
    pub fn peek_int<T: FixedInt>(&self) -> T {
        expect_ok(self.try_peek_int())
    }

    #[track_caller]
    pub fn peek_int_be<T: FixedInt>(&self) -> T {
        expect_ok(self.try_peek_int_be())
    }

    #[track_caller]
    pub fn peek_int8(&self) -> i8 {
        self.peek_int()
    }

    #[track_caller]
    pub fn peek_int16(&self) -> i16 {
        self.peek_int()
    }

    #[track_caller]
    pub fn peek_int32(&self) -> i32 {
        self.peek_int()
    }

    #[track_caller]
    pub fn peek_int64(&self) -> i64 {
        self.peek_int()
    }

    #[track_caller]
    pub fn peek_int16_be(&self) -> i16 {
        self.peek_int_be()
    }

    #[track_caller]
    pub fn peek_int32_be(&self) -> i32 {
        self.peek_int_be()
    }

    #[track_caller]
    pub fn peek_int64_be(&self) -> i64 {
        self.peek_int_be()
    }

    // Caller has already checked `n <= readable_bytes()`.
    fn advance(&mut self, n: usize) {
        if n < self.readable_bytes() {
            self.reader += n;
        } else {
            self.retrieve_all();
        }
    }

    pub fn try_retrieve(&mut self, n: usize) -> Result<(), BufferError> {
        self.check_readable(n)?;
        self.advance(n);
        Ok(())
    }

    /// Consumes `n` readable bytes.
    ///
    /// Consuming everything moves both cursors back to the prepend margin,
    /// so a drained buffer starts over with its full prependable space.
    ///
    /// # Panics
    ///
    /// Panics if `n > readable_bytes()`; the cursors are left untouched.
    #[track_caller]
    pub fn retrieve(&mut self, n: usize) {
        expect_ok(self.try_retrieve(n))
    }

    pub fn retrieve_all(&mut self) {
        self.reader = self.cheap_prepend;
        self.writer = self.cheap_prepend;
    }

    /// Consumes bytes up to, not including, `marker`, an offset into
    /// [`peek`](Self::peek) such as the one returned by
    /// [`find_crlf`](Self::find_crlf).
    #[track_caller]
    pub fn retrieve_until(&mut self, marker: usize) {
        expect_ok(self.check_marker(marker));
        self.advance(marker);
    }

    #[track_caller]
    pub fn retrieve_int8(&mut self) {
        self.retrieve(std::mem::size_of::<i8>())
    }

    #[track_caller]
    pub fn retrieve_int16(&mut self) {
        self.retrieve(std::mem::size_of::<i16>())
    }

    #[track_caller]
    pub fn retrieve_int32(&mut self) {
        self.retrieve(std::mem::size_of::<i32>())
    }

    #[track_caller]
    pub fn retrieve_int64(&mut self) {
        self.retrieve(std::mem::size_of::<i64>())
    }

    /// Peeks a host-order integer and consumes it.
    #[track_caller]
    pub fn read_int<T: FixedInt>(&mut self) -> T {
        let value = self.peek_int::<T>();
        self.advance(T::WIDTH);
        value
    }

    /// Peeks a network-order integer and consumes it.
    #[track_caller]
    pub fn read_int_be<T: FixedInt>(&mut self) -> T {
        let value = self.peek_int_be::<T>();
        self.advance(T::WIDTH);
        value
    }

    #[track_caller]
    pub fn read_int8(&mut self) -> i8 {
        self.read_int()
    }

    #[track_caller]
    pub fn read_int16(&mut self) -> i16 {
        self.read_int()
    }

    #[track_caller]
    pub fn read_int32(&mut self) -> i32 {
        self.read_int()
    }

    #[track_caller]
    pub fn read_int64(&mut self) -> i64 {
        self.read_int()
    }

    #[track_caller]
    pub fn read_int16_be(&mut self) -> i16 {
        self.read_int_be()
    }

    #[track_caller]
    pub fn read_int32_be(&mut self) -> i32 {
        self.read_int_be()
    }

    #[track_caller]
    pub fn read_int64_be(&mut self) -> i64 {
        self.read_int_be()
    }

    /// Copies out `n` readable bytes and consumes them.
    #[track_caller]
    pub fn retrieve_as_bytes(&mut self, n: usize) -> Vec<u8> {
        expect_ok(self.check_readable(n));
        let out = self.peek()[..n].to_vec();
        self.advance(n);
        out
    }

    pub fn retrieve_all_as_bytes(&mut self) -> Vec<u8> {
        self.retrieve_as_bytes(self.readable_bytes())
    }

    /// Copies out `n` readable bytes as a string and consumes them.
    ///
    /// Invalid UTF-8 is reported as [`BufferError::InvalidUtf8`] and consumes
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if `n > readable_bytes()`.
    #[track_caller]
    pub fn retrieve_as_string(&mut self, n: usize) -> Result<String, BufferError> {
        expect_ok(self.check_readable(n));
        let text = std::str::from_utf8(&self.peek()[..n])
            .map_err(|_| BufferError::InvalidUtf8)?
            .to_owned();
        self.advance(n);
        Ok(text)
    }

    pub fn retrieve_all_as_string(&mut self) -> Result<String, BufferError> {
        self.retrieve_as_string(self.readable_bytes())
    }

    /// Offset of the first `\r\n` in the readable region.
    pub fn find_crlf(&self) -> Option<usize> {
        self.find_crlf_from(0)
    }

    /// Offset of the first `\r\n` at or after `start`.
    #[track_caller]
    pub fn find_crlf_from(&self, start: usize) -> Option<usize> {
        expect_ok(self.check_marker(start));
        self.peek()[start..]
            .windows(2)
            .position(|pair| pair == b"\r\n")
            .map(|pos| start + pos)
    }

    /// Offset of the first `\n` in the readable region.
    pub fn find_eol(&self) -> Option<usize> {
        self.find_eol_from(0)
    }

    #[track_caller]
    pub fn find_eol_from(&self, start: usize) -> Option<usize> {
        expect_ok(self.check_marker(start));
        self.peek()[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|pos| start + pos)
    }

    // --------------------------------------------------------------- write

    /// Makes sure at least `n` bytes are writable, compacting or growing the
    /// storage if they are not.
    ///
    /// # Panics
    ///
    /// Panics if the grown storage length would overflow `usize`.
    #[track_caller]
    pub fn ensure_writable_bytes(&mut self, n: usize) {
        if self.writable_bytes() < n {
            self.make_space(n);
        }
        debug_assert!(self.writable_bytes() >= n);
    }

    /// Appends `data`, growing the buffer as needed.
    #[track_caller]
    pub fn append(&mut self, data: &[u8]) {
        self.ensure_writable_bytes(data.len());
        let end = self.writer + data.len();
        self.storage[self.writer..end].copy_from_slice(data);
        self.writer = end;
    }

    /// Appends `value` in host byte order.
    pub fn append_int<T: FixedInt>(&mut self, value: T) {
        self.append(value.encode_ne().as_ref());
    }

    /// Appends `value` in network byte order.
    pub fn append_int_be<T: FixedInt>(&mut self, value: T) {
        self.append(value.encode_be().as_ref());
    }

    pub fn append_int8(&mut self, value: i8) {
        self.append_int(value);
    }

    pub fn append_int16(&mut self, value: i16) {
        self.append_int(value);
    }

    pub fn append_int32(&mut self, value: i32) {
        self.append_int(value);
    }

    pub fn append_int64(&mut self, value: i64) {
        self.append_int(value);
    }

    pub fn append_int16_be(&mut self, value: i16) {
        self.append_int_be(value);
    }

    pub fn append_int32_be(&mut self, value: i32) {
        self.append_int_be(value);
    }

    pub fn append_int64_be(&mut self, value: i64) {
        self.append_int_be(value);
    }

    /// The writable region, for an external writer such as a socket read.
    /// Commit the filled prefix with [`has_written`](Self::has_written).
    #[inline]
    pub fn begin_write(&mut self) -> &mut [u8] {
        let writer = self.writer;
        &mut self.storage[writer..]
    }

    pub fn try_has_written(&mut self, n: usize) -> Result<(), BufferError> {
        self.check_writable(n)?;
        self.writer += n;
        Ok(())
    }

    /// Commits `n` bytes written through [`begin_write`](Self::begin_write).
    ///
    /// # Panics
    ///
    /// Panics if `n > writable_bytes()`.
    #[track_caller]
    pub fn has_written(&mut self, n: usize) {
        expect_ok(self.try_has_written(n))
    }

    pub fn try_unwrite(&mut self, n: usize) -> Result<(), BufferError> {
        self.check_readable(n)?;
        self.writer -= n;
        Ok(())
    }

    /// Drops the last `n` readable bytes, undoing a speculative write.
    #[track_caller]
    pub fn unwrite(&mut self, n: usize) {
        expect_ok(self.try_unwrite(n))
    }

    // ------------------------------------------------------------- prepend

    pub fn try_prepend(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.check_prependable(data.len())?;
        self.reader -= data.len();
        let reader = self.reader;
        self.storage[reader..reader + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Writes `data` directly in front of the readable region.
    ///
    /// The prependable region never grows; reserve enough of it through
    /// [`BufferConfig::cheap_prepend`].
    ///
    /// # Panics
    ///
    /// Panics if `data.len() > prependable_bytes()`.
    #[track_caller]
    pub fn prepend(&mut self, data: &[u8]) {
        expect_ok(self.try_prepend(data))
    }

    #[track_caller]
    pub fn prepend_int<T: FixedInt>(&mut self, value: T) {
        self.prepend(value.encode_ne().as_ref());
    }

    #[track_caller]
    pub fn prepend_int_be<T: FixedInt>(&mut self, value: T) {
        self.prepend(value.encode_be().as_ref());
    }

    #[track_caller]
    pub fn prepend_int8(&mut self, value: i8) {
        self.prepend_int(value);
    }

    #[track_caller]
    pub fn prepend_int16(&mut self, value: i16) {
        self.prepend_int(value);
    }

    #[track_caller]
    pub fn prepend_int32(&mut self, value: i32) {
        self.prepend_int(value);
    }

    #[track_caller]
    pub fn prepend_int16_be(&mut self, value: i16) {
        self.prepend_int_be(value);
    }

    #[track_caller]
    pub fn prepend_int32_be(&mut self, value: i32) {
        self.prepend_int_be(value);
    }

    // --------------------------------------------------------------- space

    #[track_caller]
    fn make_space(&mut self, len: usize) {
        let readable = self.readable_bytes();
        let slack = self.writable_bytes() + self.prependable_bytes();
        if slack < len.saturating_add(self.cheap_prepend) {
            let old = self.storage.len();
            let new_len = expect_ok(self.writer.checked_add(len).ok_or(
                BufferError::CapacityOverflow {
                    requested: len,
                    writer: self.writer,
                },
            ));
            self.storage.resize(new_len, 0);
            log::trace!(
                "grew buffer storage from {} to {} bytes ({} readable)",
                old,
                self.storage.len(),
                readable
            );
        } else {
            // Reached only when the reclaimable slack covers `len`, which
            // implies the reader has moved past the margin.
            debug_assert!(self.cheap_prepend < self.reader);
            self.storage.copy_within(self.reader..self.writer, self.cheap_prepend);
            self.reader = self.cheap_prepend;
            self.writer = self.reader + readable;
            log::trace!("compacted {} readable bytes to offset {}", readable, self.reader);
        }
    }

    /// Replaces the storage with one holding the readable bytes plus exactly
    /// `reserve` writable bytes, releasing capacity left over from growth.
    pub fn shrink_to_fit(&mut self, reserve: usize) {
        let config = BufferConfig::default()
            .with_initial_size(self.readable_bytes().saturating_add(reserve))
            .with_cheap_prepend(self.cheap_prepend);
        let mut other = Self::with_config(config);
        other.append(self.peek());
        log::debug!(
            "shrinking buffer storage from {} to {} bytes",
            self.storage.len(),
            other.storage.len()
        );
        self.swap(&mut other);
    }

    /// Exchanges the whole state of two buffers without copying bytes.
    pub fn swap(&mut self, other: &mut ByteBuffer) {
        std::mem::swap(self, other);
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.peek()
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteBuffer {{ prependable = {}; readable = {}; writable = {}; {:x?} }}",
            self.prependable_bytes(),
            self.readable_bytes(),
            self.writable_bytes(),
            self.peek()
        )
    }
}
