//! Fixed-width integer encoding.
//!
//! The buffer never converts byte order implicitly. Host-order accessors copy
//! the in-memory representation; the `_be` accessors use network byte order.

mod sealed {
    pub trait Sealed {}
}

/// An integer that can be stored in a buffer as exactly [`WIDTH`](Self::WIDTH)
/// bytes.
pub trait FixedInt: sealed::Sealed + Copy {
    const WIDTH: usize;
    type Bytes: AsRef<[u8]>;

    fn encode_ne(self) -> Self::Bytes;
    fn encode_be(self) -> Self::Bytes;

    /// Decodes the leading `WIDTH` bytes. `bytes` must hold at least that many.
    fn decode_ne(bytes: &[u8]) -> Self;
    /// Big-endian twin of [`decode_ne`](Self::decode_ne).
    fn decode_be(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_int {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl FixedInt for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();
            type Bytes = [u8; std::mem::size_of::<$ty>()];

            #[inline]
            fn encode_ne(self) -> Self::Bytes {
                self.to_ne_bytes()
            }

            #[inline]
            fn encode_be(self) -> Self::Bytes {
                self.to_be_bytes()
            }

            #[inline]
            fn decode_ne(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..Self::WIDTH]);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn decode_be(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..Self::WIDTH]);
                <$ty>::from_be_bytes(raw)
            }
        }
    )*};
}

impl_fixed_int!(i8, u8, i16, u16, i32, u32, i64, u64);
