//! The byte source the decoder reads from.
//!
//! The decoder never owns its input; it is handed anything that implements
//! [`ByteSource`] and only ever peeks, advances, or rewinds through a
//! checkpoint. How a source buffers, streams, or memory-maps its bytes is
//! entirely up to the caller — this crate's job stops at the trait.

/// A rewindable cursor over a byte stream.
///
/// Implementors need not be UTF-8 aware: `peek`/`advance` hand back raw
/// bytes, and the decoder itself is responsible for any interpretation
/// (this mirrors the spec's quoted-string reader, which is explicitly
/// byte-oriented rather than UTF-8-validating).
pub trait ByteSource {
    /// An opaque token that [`restore`](ByteSource::restore) can rewind to.
    /// Implementors are free to make this as cheap as a plain integer.
    type Checkpoint: Copy;

    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the next byte, or `None` at end of input.
    fn advance(&mut self) -> Option<u8>;

    /// Captures the current position so it can be returned to later.
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Rewinds to a position previously captured by [`checkpoint`](ByteSource::checkpoint).
    fn restore(&mut self, checkpoint: Self::Checkpoint);

    /// Rewinds all the way back to the start of the stream. Used by
    /// benchmarks and by callers that want to decode the same source
    /// more than once; the decoder itself never calls this.
    fn reset(&mut self);
}

/// A convenience [`ByteSource`] over an in-memory byte slice.
///
/// This is not "the" byte source required by the decoder's contract — any
/// type implementing [`ByteSource`] will do — but callers that have an
/// owned or borrowed buffer and nothing fancier in mind can reach for this
/// directly instead of writing their own cursor.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { bytes, index: 0 }
    }

    pub fn from_str(input: &'a str) -> Self {
        SliceSource::new(input.as_bytes())
    }

    /// The current byte offset into the underlying slice.
    pub fn position(&self) -> usize {
        self.index
    }

    /// The whole underlying slice, unaffected by how much has been read.
    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    type Checkpoint = usize;

    fn peek(&mut self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.index += 1;
        Some(byte)
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.index
    }

    fn restore(&mut self, checkpoint: Self::Checkpoint) {
        self.index = checkpoint;
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut source = SliceSource::from_str("ab");
        assert_eq!(source.peek(), Some(b'a'));
        assert_eq!(source.peek(), Some(b'a'));
        assert_eq!(source.advance(), Some(b'a'));
        assert_eq!(source.advance(), Some(b'b'));
        assert_eq!(source.advance(), None);
    }

    #[test]
    fn checkpoint_restores_position() {
        let mut source = SliceSource::from_str("abc");
        source.advance();
        let mark = source.checkpoint();
        source.advance();
        source.advance();
        assert_eq!(source.peek(), None);
        source.restore(mark);
        assert_eq!(source.peek(), Some(b'b'));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut source = SliceSource::from_str("xyz");
        source.advance();
        source.advance();
        source.reset();
        assert_eq!(source.peek(), Some(b'x'));
    }
}
