use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

use crate::CoreError;

/// Tokens per chunk when nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 200_000;

/// Validated, non-zero number of tokens per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    pub fn new(size: usize) -> Result<Self, CoreError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(CoreError::InvalidChunkSize(size))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        const DEFAULT: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CHUNK_SIZE) {
            Some(size) => size,
            None => panic!("default chunk size must be non-zero"),
        };
        Self(DEFAULT)
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = CoreError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous, non-empty sub-range `[start, start + len)` of a token buffer.
///
/// Descriptors are only minted by [`ChunkSplitter`], which guarantees that the
/// range lies inside the buffer it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChunkDescriptor {
    start: usize,
    len: usize,
}

impl ChunkDescriptor {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Descriptors from the splitter are never empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Display for ChunkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Lazily yields the chunk descriptors covering `[0, total)`.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    total: usize,
    size: usize,
    next_start: usize,
}

impl ChunkSplitter {
    pub fn new(total: usize, size: ChunkSize) -> Self {
        Self {
            total,
            size: size.get(),
            next_start: 0,
        }
    }

    /// Number of chunks a buffer of `total` tokens splits into.
    pub fn chunk_count(total: usize, size: ChunkSize) -> usize {
        total.div_ceil(size.get())
    }
}

impl Iterator for ChunkSplitter {
    type Item = ChunkDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_start >= self.total {
            return None;
        }
        let start = self.next_start;
        let len = self.size.min(self.total - start);
        self.next_start = start + len;
        Some(ChunkDescriptor { start, len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next_start.min(self.total)).div_ceil(self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkSplitter {}

impl std::iter::FusedIterator for ChunkSplitter {}

/// Collects every chunk descriptor for a buffer of `total` tokens.
pub fn split_chunks(total: usize, size: ChunkSize) -> Vec<ChunkDescriptor> {
    ChunkSplitter::new(total, size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> ChunkSize {
        ChunkSize::new(n).unwrap()
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert_eq!(ChunkSize::new(0), Err(CoreError::InvalidChunkSize(0)));
    }

    #[test]
    fn default_chunk_size_matches_constant() {
        assert_eq!(ChunkSize::default().get(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn last_chunk_holds_remainder() {
        let ranges: Vec<_> = split_chunks(7, size(3)).iter().map(|c| c.range()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn even_division_has_full_last_chunk() {
        let chunks = split_chunks(6, size(2));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 2);
        assert_eq!(chunks[2].end(), 6);
    }

    #[test]
    fn empty_buffer_yields_no_chunks() {
        assert!(split_chunks(0, size(4)).is_empty());
        assert_eq!(ChunkSplitter::chunk_count(0, size(4)), 0);
    }

    #[test]
    fn size_hint_tracks_remaining_chunks() {
        let mut splitter = ChunkSplitter::new(10, size(4));
        assert_eq!(splitter.len(), 3);
        splitter.next();
        assert_eq!(splitter.len(), 2);
        splitter.next();
        splitter.next();
        assert_eq!(splitter.len(), 0);
        assert_eq!(splitter.next(), None);
    }

    #[test]
    fn descriptor_displays_half_open_range() {
        let chunk = split_chunks(5, size(10))[0];
        assert_eq!(chunk.to_string(), "[0, 5)");
    }
}
