use super::*;

use crate::parser_helpers::try_pull_pod;

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) chunk_ty: PngChunkTy,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl<'b> PngRawChunk<'b> {
  /// The chunk's type tag.
  #[inline]
  #[must_use]
  pub const fn chunk_ty(&self) -> PngChunkTy {
    self.chunk_ty
  }
  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC stored in the file. This is never checked.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// The iterator stops as soon as there's not enough bytes left for a whole
/// chunk. It does *not* stop on its own at `IEND`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(pub(crate) &'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG header automatically.
  ///
  /// The header isn't checked, use [`is_png_header_correct`] for that.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (header, rest): (PngChunkHeader, &'b [u8]) = try_pull_pod(self.0)?;
    let chunk_len = header.length.to_u32() as usize;
    if rest.len() < chunk_len {
      // the declared length runs off the end, there's nothing more to get.
      self.0 = &[];
      return None;
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (declared_crc, rest): (U32BE, &'b [u8]) = match try_pull_pod(rest) {
      Some(pair) => pair,
      None => {
        self.0 = &[];
        return None;
      }
    };
    self.0 = rest;
    Some(PngRawChunk { chunk_ty: header.chunk_ty, data, declared_crc: declared_crc.to_u32() })
  }
}
