//! Growable byte buffer for network I/O.
//!
//! This crate provides [`ByteBuffer`], a single contiguous allocation split
//! into three regions by a read cursor and a write cursor:
//!
//! - **prependable** `[0, reader)` - reserved space in front of the data,
//!   used to insert headers such as length prefixes after the payload is
//!   written, without moving the payload
//! - **readable** `[reader, writer)` - the live content
//! - **writable** `[writer, capacity)` - free space for new data
//!
//! When the writable region runs short the buffer first tries to slide the
//! readable bytes back to the front (reclaiming space freed by earlier
//! retrieves) and only reallocates when that would not be enough.
//!
//! # Example
//!
//! ```
//! use netbuf::ByteBuffer;
//!
//! let mut buf = ByteBuffer::new();
//! buf.append(b"hello world");
//! assert_eq!(buf.readable_bytes(), 11);
//!
//! // Frame the payload with a length prefix.
//! buf.prepend_int32_be(11);
//! assert_eq!(buf.peek_int32_be(), 11);
//!
//! buf.retrieve_int32();
//! assert_eq!(buf.retrieve_all_as_string().unwrap(), "hello world");
//! ```

mod buffer;
mod config;
mod error;
mod int;
mod io;

pub use buffer::ByteBuffer;
pub use config::{BufferConfig, CHEAP_PREPEND, INITIAL_SIZE};
pub use error::BufferError;
pub use int::FixedInt;
pub use io::SPILL_SIZE;
