//! Turning a PNG's text chunks into one metadata document.

use std::{borrow::Cow, io::Read};

use crate::{
  png::{is_png_header_correct, tEXt, zTXt, PngChunkReader, PngChunkTy, PngRawChunkIter},
  ScanError, TextChunkError,
};

/// A keyword/text pair out of a `tEXt` or `zTXt` chunk.
///
/// Both halves are the raw bytes from the file. `tEXt` entries borrow from
/// the chunk data, `zTXt` entries own their decompressed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEntry<'b> {
  pub keyword: &'b [u8],
  pub text: Cow<'b, [u8]>,
}

/// Decodes the data of a text chunk into a [`TextEntry`].
///
/// * `tEXt`: the text is the bytes after the keyword's null, as is.
/// * `zTXt`: the bytes after the keyword's null must be compression method 0
///   followed by a zlib stream, which is inflated.
///
/// ## Failure
/// Every failure just means "no entry for this chunk", the error says why.
/// A `zTXt` that inflates to nothing is [`TextChunkError::EmptyText`]. A
/// `tEXt` with empty text is still a valid entry.
pub fn decode_text_chunk(chunk_ty: PngChunkTy, data: &[u8]) -> Result<TextEntry<'_>, TextChunkError> {
  match chunk_ty {
    PngChunkTy::tEXt => {
      let text_chunk = tEXt::try_from(data)?;
      Ok(TextEntry { keyword: text_chunk.keyword(), text: Cow::Borrowed(text_chunk.text()) })
    }
    PngChunkTy::zTXt => {
      let ztxt_chunk = zTXt::try_from(data)?;
      let text = ztxt_chunk.decompress_text()?;
      if text.is_empty() {
        return Err(TextChunkError::EmptyText);
      }
      Ok(TextEntry { keyword: ztxt_chunk.keyword(), text: Cow::Owned(text) })
    }
    _ => Err(TextChunkError::NotTextChunk),
  }
}

/// All the text entries of one PNG, rendered as `keyword: text` blocks with
/// a blank line between them.
///
/// The bytes are kept exactly as stored in the file, so writing them back out
/// never changes an encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MetadataDocument {
  bytes: Vec<u8>,
  entry_count: usize,
}
impl MetadataDocument {
  /// Separator placed between two entries.
  pub const ENTRY_SEPARATOR: &'static [u8] = b"\n\n";
  /// Separator placed between a keyword and its text.
  pub const KEYWORD_SEPARATOR: &'static [u8] = b": ";

  /// Makes an empty document.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { bytes: Vec::new(), entry_count: 0 }
  }

  /// Appends an entry, with a separator if it isn't the first.
  pub fn push_entry(&mut self, entry: &TextEntry<'_>) {
    if !self.bytes.is_empty() {
      self.bytes.extend_from_slice(Self::ENTRY_SEPARATOR);
    }
    self.bytes.extend_from_slice(entry.keyword);
    self.bytes.extend_from_slice(Self::KEYWORD_SEPARATOR);
    self.bytes.extend_from_slice(&entry.text);
    self.entry_count += 1;
  }

  /// Decodes a chunk and appends its entry (if it has one).
  ///
  /// Returns if an entry was added. Chunks that aren't text, and text chunks
  /// that fail to decode, are ignored.
  pub fn push_chunk(&mut self, chunk_ty: PngChunkTy, data: &[u8]) -> bool {
    if !chunk_ty.is_text() {
      return false;
    }
    match decode_text_chunk(chunk_ty, data) {
      Ok(entry) => {
        self.push_entry(&entry);
        true
      }
      Err(e) => {
        log::debug!("skipping {chunk_ty:?} chunk: {e}");
        false
      }
    }
  }

  /// If any entry was found.
  #[inline]
  #[must_use]
  pub const fn found(&self) -> bool {
    self.entry_count > 0
  }

  /// The number of entries in the document.
  #[inline]
  #[must_use]
  pub const fn entry_count(&self) -> usize {
    self.entry_count
  }

  /// The document bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// The document as text, replacing any invalid UTF-8.
  #[inline]
  #[must_use]
  pub fn to_string_lossy(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.bytes)
  }

  /// Takes the document bytes.
  #[inline]
  #[must_use]
  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }
}

/// Scans a PNG byte stream for its text metadata.
///
/// The stream is read once, front to back, and reading stops at `IEND` or at
/// the first chunk that can't be fully read. Entries found before a truncation
/// are kept.
///
/// ## Failure
/// * [`ScanError::NotPng`] if the stream doesn't start with the PNG signature.
/// * [`ScanError::Io`] if reading the signature fails for some other reason.
///
/// Nothing after the signature is an error.
pub fn scan<R: Read>(reader: R) -> Result<MetadataDocument, ScanError> {
  let mut chunks = PngChunkReader::new(reader)?;
  let mut doc = MetadataDocument::new();
  while let Some(raw_chunk) = chunks.next_chunk() {
    if raw_chunk.chunk_ty() == PngChunkTy::IEND {
      break;
    }
    doc.push_chunk(raw_chunk.chunk_ty(), raw_chunk.data());
  }
  Ok(doc)
}

/// Like [`scan`], but for PNG bytes that are already in memory.
pub fn scan_bytes(png: &[u8]) -> Result<MetadataDocument, ScanError> {
  if !is_png_header_correct(png) {
    return Err(ScanError::NotPng);
  }
  let mut doc = MetadataDocument::new();
  for raw_chunk in PngRawChunkIter::new(png) {
    if raw_chunk.chunk_ty() == PngChunkTy::IEND {
      break;
    }
    doc.push_chunk(raw_chunk.chunk_ty(), raw_chunk.data());
  }
  Ok(doc)
}
