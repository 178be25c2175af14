use super::*;

use std::io::{ErrorKind, Read};

use crate::ScanError;

/// Reads chunks one at a time out of a PNG byte stream.
///
/// Only one chunk's data is held at a time. The buffer is reused from chunk
/// to chunk, so once a file has seen its biggest chunk there's no more
/// allocation.
///
/// Like [`PngRawChunkIter`], this doesn't stop on its own at `IEND`, and any
/// short read just ends the stream.
#[derive(Debug)]
pub struct PngChunkReader<R> {
  reader: R,
  data: Vec<u8>,
}
impl<R: Read> PngChunkReader<R> {
  /// Reads and checks the 8 byte PNG signature.
  ///
  /// ## Failure
  /// * [`ScanError::NotPng`] if the signature is wrong, or the stream is
  ///   shorter than a signature.
  /// * [`ScanError::Io`] if the reader gives any other error.
  pub fn new(mut reader: R) -> Result<Self, ScanError> {
    let mut signature = [0_u8; 8];
    match reader.read_exact(&mut signature) {
      Ok(()) => (),
      Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(ScanError::NotPng),
      Err(e) => return Err(ScanError::Io(e)),
    }
    if !is_png_header_correct(&signature) {
      return Err(ScanError::NotPng);
    }
    Ok(Self { reader, data: Vec::new() })
  }

  /// Gets the next chunk, or `None` once the stream can't give a whole chunk.
  pub fn next_chunk(&mut self) -> Option<PngRawChunk<'_>> {
    let header: PngChunkHeader = self.read_pod()?;
    let chunk_len = u64::from(header.length.to_u32());
    self.data.clear();
    // Note: pulling through `take` means a bogus 4GB length on a truncated
    // file doesn't try to allocate 4GB up front.
    match (&mut self.reader).take(chunk_len).read_to_end(&mut self.data) {
      Ok(n) if n as u64 == chunk_len => (),
      Ok(n) => {
        log::debug!(
          "{:?} chunk declares {chunk_len} bytes but the stream ended after {n}",
          header.chunk_ty
        );
        return None;
      }
      Err(e) => {
        log::debug!("read error inside a {:?} chunk: {e}", header.chunk_ty);
        return None;
      }
    }
    let declared_crc: U32BE = self.read_pod()?;
    Some(PngRawChunk {
      chunk_ty: header.chunk_ty,
      data: &self.data,
      declared_crc: declared_crc.to_u32(),
    })
  }

  /// Gives back the inner reader.
  #[inline]
  pub fn into_inner(self) -> R {
    self.reader
  }

  fn read_pod<T: Pod>(&mut self) -> Option<T> {
    let mut value = T::zeroed();
    match self.reader.read_exact(bytemuck::bytes_of_mut(&mut value)) {
      Ok(()) => Some(value),
      Err(e) => {
        if e.kind() != ErrorKind::UnexpectedEof {
          log::debug!("read error between chunks: {e}");
        }
        None
      }
    }
  }
}
