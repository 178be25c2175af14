use super::*;

use miniz_oxide::inflate::{
  core::{
    decompress,
    inflate_flags::{TINFL_FLAG_PARSE_ZLIB_HEADER, TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF},
    DecompressorOxide,
  },
  TINFLStatus,
};

use crate::{parser_helpers::try_split_at_null, TextChunkError};

/// The only compression method PNG defines: a zlib stream.
pub const COMPRESSION_METHOD_ZLIB: u8 = 0;

/// Compressed textual data
///
/// Spec: [zTXt](https://www.w3.org/TR/png/#11zTXt)
///
/// Chunk data.
/// * keyword (should be 1-79 bytes)
/// * null byte
/// * compression method (only defined for zlib compression)
/// * zlib compressed data stream
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct zTXt<'b> {
  keyword: &'b [u8],
  compressed: &'b [u8],
}
impl<'b> zTXt<'b> {
  /// The uncompressed keyword.
  #[inline]
  #[must_use]
  pub const fn keyword(&self) -> &'b [u8] {
    self.keyword
  }
  /// The zlib stream, including its 2 byte header and Adler-32 trailer.
  #[inline]
  #[must_use]
  pub const fn compressed(&self) -> &'b [u8] {
    self.compressed
  }

  /// Inflates the text into a new buffer.
  ///
  /// There's no limit on the output size: the buffer starts from a guess based
  /// on the compressed size and doubles each time the inflater runs out of
  /// room.
  ///
  /// ## Failure
  /// * The zlib header asks for a preset dictionary.
  /// * The stream is malformed, truncated, or fails its Adler-32 check.
  /// * The allocator refuses to grow the output.
  pub fn decompress_text(&self) -> Result<Vec<u8>, TextChunkError> {
    zlib_decompress_to_vec(self.compressed)
  }
}
impl<'b> TryFrom<&'b [u8]> for zTXt<'b> {
  type Error = TextChunkError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let (keyword, rest) = try_split_at_null(data).ok_or(TextChunkError::MissingNullSeparator)?;
    match rest {
      [] => Err(TextChunkError::MissingCompressionMethod),
      [COMPRESSION_METHOD_ZLIB, compressed @ ..] => Ok(Self { keyword, compressed }),
      [method, ..] => Err(TextChunkError::UnsupportedCompressionMethod(*method)),
    }
  }
}
impl Debug for zTXt<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("zTXt")
      .field("keyword", &String::from_utf8_lossy(self.keyword))
      .field("compressed", &(&self.compressed[..self.compressed.len().min(12)], self.compressed.len()))
      .finish()
  }
}

/// The FDICT bit of the zlib FLG byte.
const ZLIB_FLAG_PRESET_DICTIONARY: u8 = 1 << 5;

/// Smallest starting size for the output buffer.
const MIN_OUTPUT_GUESS: usize = 1024;

fn zlib_decompress_to_vec(compressed: &[u8]) -> Result<Vec<u8>, TextChunkError> {
  // miniz_oxide would just call this `Failed`, but it's worth telling apart.
  if let [_cmf, flg, ..] = compressed {
    if flg & ZLIB_FLAG_PRESET_DICTIONARY != 0 {
      return Err(TextChunkError::NeedsDictionary);
    }
  }

  // Without `TINFL_FLAG_HAS_MORE_INPUT` the inflater knows this slice is all
  // there is, so a truncated stream fails instead of asking for more input.
  let flags = TINFL_FLAG_PARSE_ZLIB_HEADER | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;
  // the decompressor state is about 10k, so it goes on the heap.
  let mut inflater = Box::<DecompressorOxide>::default();
  let mut out: Vec<u8> = Vec::new();
  grow_zeroed(&mut out, compressed.len().saturating_mul(4).max(MIN_OUTPUT_GUESS))?;
  let mut in_pos = 0_usize;
  let mut out_pos = 0_usize;
  loop {
    let (status, consumed, written) =
      decompress(&mut inflater, &compressed[in_pos..], &mut out, out_pos, flags);
    in_pos += consumed;
    out_pos += written;
    match status {
      TINFLStatus::Done => {
        out.truncate(out_pos);
        return Ok(out);
      }
      TINFLStatus::HasMoreOutput => {
        let new_len = out.len().checked_mul(2).ok_or(TextChunkError::Alloc)?;
        grow_zeroed(&mut out, new_len)?;
      }
      other => return Err(TextChunkError::Decompression(other)),
    }
  }
}

/// Resizes the vec up to `new_len`, reporting allocation failure instead of
/// aborting.
fn grow_zeroed(v: &mut Vec<u8>, new_len: usize) -> Result<(), TextChunkError> {
  v.try_reserve_exact(new_len.saturating_sub(v.len()))?;
  v.resize(new_len, 0);
  Ok(())
}
