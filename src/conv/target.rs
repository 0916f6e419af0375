/// Append-only byte sink that canonical encodings are written into
///
/// `Target` plays the role of [`std::io::Write`] for [`Encode`](crate::Encode),
/// except that its `push_XXX` methods cannot fail. Each returns the number of
/// bytes it appended, which callers sum to report the encoded length.
///
/// Any failure during serialization originates in [`Encode`](crate::Encode)
/// itself (e.g. a tagged union with no active variant), never in the sink.
pub trait Target {
    /// Reserves room for at least `extra` more bytes, if the implementor has a
    /// notion of capacity.
    fn anticipate(&mut self, extra: usize);

    /// Returns an empty sink.
    fn create() -> Self;

    /// Appends one byte.
    ///
    /// The return value must be `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends every byte of a fixed-size array.
    ///
    /// Indistinguishable from `N` calls to `push_one`; the return value must be `N`.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends every byte of `buf`.
    ///
    /// The return value must be the total length of the slice.
    fn push_all(&mut self, buf: &[u8]) -> usize;

    /// Marks the end of a logical unit of `push_XXX` operations.
    ///
    /// This must not influence the contents of the buffer. The default is a no-op.
    #[inline(always)]
    fn resolve(&mut self) {}

    /// Calls [`Target::resolve`] and returns `0usize`, so that it can terminate
    /// a chain of byte-count additions.
    #[inline]
    fn resolve_zero(&mut self) -> usize {
        self.resolve();
        0
    }
}

/// Sink that discards its input, used to measure encoded lengths without
/// allocating.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
