//! Construction-time buffer policy.

use serde::{Deserialize, Serialize};

use crate::BufferError;

/// Bytes reserved in front of the readable region at construction.
pub const CHEAP_PREPEND: usize = 8;

/// Writable bytes available at construction.
pub const INITIAL_SIZE: usize = 1024;

/// Sizing policy for a [`ByteBuffer`](crate::ByteBuffer).
///
/// Missing fields fall back to the defaults, so the struct can be embedded
/// in an application's config file:
///
/// ```
/// use netbuf::BufferConfig;
///
/// let config = BufferConfig::default().with_cheap_prepend(16);
/// assert_eq!(config.initial_size, 1024);
/// assert_eq!(config.cheap_prepend, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Writable bytes available right after construction.
    pub initial_size: usize,
    /// Prependable bytes reserved at construction and restored whenever
    /// the buffer is fully drained.
    pub cheap_prepend: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_size: INITIAL_SIZE,
            cheap_prepend: CHEAP_PREPEND,
        }
    }
}

impl BufferConfig {
    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    pub fn with_cheap_prepend(mut self, cheap_prepend: usize) -> Self {
        self.cheap_prepend = cheap_prepend;
        self
    }

    /// Total storage length a buffer built from this config starts with.
    pub fn storage_len(&self) -> Result<usize, BufferError> {
        self.cheap_prepend
            .checked_add(self.initial_size)
            .ok_or_else(|| {
                BufferError::InvalidConfig(format!(
                    "cheap_prepend ({}) + initial_size ({}) overflows usize",
                    self.cheap_prepend, self.initial_size
                ))
            })
    }

    pub fn validate(&self) -> Result<(), BufferError> {
        self.storage_len().map(|_| ())
    }
}
