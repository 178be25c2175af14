//! Module for walking PNG chunk streams and reading their text chunks.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! A PNG is an 8 byte signature followed by a series of chunks. Each chunk is:
//!
//! * 4 bytes of big-endian length
//! * 4 bytes of chunk type (ASCII letters)
//! * `length` bytes of chunk data
//! * 4 bytes of CRC32
//!
//! There's two ways to get the chunks:
//!
//! * [`PngRawChunkIter`] borrows from PNG bytes that are already in memory.
//! * [`PngChunkReader`] pulls chunks one at a time out of any [`Read`], which
//!   is what you want when going over a folder of multi-megabyte images that
//!   only have a few hundred bytes of text in them.
//!
//! [`Read`]: std::io::Read
//!
//! Either way, the text chunks are then turned into keyword/text pairs with
//! [`tEXt`] and [`zTXt`] (or just [`decode_text_chunk`](crate::decode_text_chunk)).
//!
//! ## Parsing Errors
//!
//! Quoting [section 13.2 of the PNG
//! spec](https://www.w3.org/TR/2003/REC-PNG-20031110/#13Decoders.Errors):
//!
//! > Errors that have little or no effect on the processing of the image may be
//! > ignored, while those that affect critical data shall be dealt with in a
//! > manner appropriate to the application.
//!
//! Since we only ever want the text out of a PNG, just about everything is
//! "little or no effect" for us:
//!
//! * CRC32 values are read but never checked.
//! * Chunk ordering rules are ignored.
//! * A chunk stream that runs out of bytes part way through a chunk just ends
//!   there. Whatever came before is still good.
//! * A text chunk that's malformed is skipped, and the next chunk is read as
//!   normal.

use core::fmt::{Debug, Write};

use bytemuck::{Pod, Zeroable};

use crate::int_endian::U32BE;

mod raw_chunk;
pub use raw_chunk::*;

mod chunk_reader;
pub use chunk_reader::*;

mod text;
pub use text::*;

mod ztxt;
pub use ztxt::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// The four byte type tag of a PNG chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkTy {
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Textual data
  pub const tEXt: Self = Self(*b"tEXt");
  /// Compressed textual data
  pub const zTXt: Self = Self(*b"zTXt");

  /// If this is one of the chunk types that we can pull text out of.
  #[inline]
  #[must_use]
  pub const fn is_text(self) -> bool {
    matches!(&self.0, b"tEXt" | b"zTXt")
  }
}
impl Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // chunk types *should* be ascii letters, but this is also safe for
    // whatever garbage bytes a broken file gives us.
    f.write_char('"')?;
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    f.write_char('"')?;
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkTy {
  #[inline]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// The length and type that start every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct PngChunkHeader {
  pub(crate) length: U32BE,
  pub(crate) chunk_ty: PngChunkTy,
}
