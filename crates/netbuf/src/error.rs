//! Error type for buffer operations.

/// Errors reported by the fallible (`try_*`) buffer operations.
///
/// The panicking operations use the same values for their panic messages, so
/// a failed precondition reads identically whichever entry point was used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Fewer readable bytes than the operation needs.
    #[error("not enough readable bytes: requested {requested}, available {available}")]
    NotEnoughReadable { requested: usize, available: usize },
    /// Commit larger than the writable region.
    #[error("not enough writable bytes: requested {requested}, available {available}")]
    NotEnoughWritable { requested: usize, available: usize },
    /// Prepend larger than the prependable region. The region never grows.
    #[error("not enough prependable bytes: requested {requested}, available {available}")]
    NotEnoughPrependable { requested: usize, available: usize },
    /// Growing the storage would overflow `usize`.
    #[error("buffer capacity overflow: writer at {writer}, requested {requested} more bytes")]
    CapacityOverflow { requested: usize, writer: usize },
    /// Marker lies past the end of the readable region.
    #[error("marker {marker} out of readable range 0..={readable}")]
    MarkerOutOfRange { marker: usize, readable: usize },
    /// Readable bytes are not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    #[error("invalid buffer config: {0}")]
    InvalidConfig(String),
}
