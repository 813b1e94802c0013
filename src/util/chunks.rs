//! Fixed-size chunked reading of a file of known length.
//!
//! Both sides of a content comparison are read with the same chunk size and
//! the same expected length, so corresponding chunks always cover the same
//! byte range. Peak memory is one chunk buffer per open file regardless of
//! file size. The underlying handle is closed when the reader is dropped,
//! whether iteration ran to the end or stopped early.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const CHUNK_SIZE: usize = 1024 * 1024;

pub struct ChunkedFile {
    file: File,
    remaining: u64,
    offset: u64,
    buffer: Vec<u8>,
}

impl ChunkedFile {
    /// Opens `path` for reading `len` bytes in chunks of at most `chunk_size`.
    ///
    /// `len` is the size observed before opening. If the file shrinks before
    /// it is fully read, [`next_chunk`](Self::next_chunk) fails with
    /// `UnexpectedEof`; bytes beyond `len` are never read.
    pub fn open(path: &Path, len: u64, chunk_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        let capacity = usize::try_from(len).map_or(chunk_size, |len| len.min(chunk_size));
        Ok(Self {
            file,
            remaining: len,
            offset: 0,
            buffer: vec![0; capacity.max(1)],
        })
    }

    /// Byte offset of the start of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the next chunk, or returns `None` once `len` bytes were read.
    pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let want = usize::try_from(self.remaining)
            .map_or(self.buffer.len(), |remaining| remaining.min(self.buffer.len()));
        let chunk = &mut self.buffer[..want];
        self.file.read_exact(chunk)?;

        self.remaining -= want as u64;
        self.offset += want as u64;
        Ok(Some(&self.buffer[..want]))
    }
}
