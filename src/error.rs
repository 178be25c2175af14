use core::fmt;
use std::{collections::TryReserveError, io, path::PathBuf};

use miniz_oxide::inflate::TINFLStatus;

/// Why a single text chunk didn't produce an entry.
///
/// None of these stop a scan. The chunk is dropped and the next chunk is
/// read as normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChunkError {
  /// The chunk type isn't `tEXt` or `zTXt`.
  NotTextChunk,

  /// There's no null byte ending the keyword.
  MissingNullSeparator,

  /// A `zTXt` payload ended right after the keyword.
  MissingCompressionMethod,

  /// A `zTXt` compression method other than 0 (zlib).
  UnsupportedCompressionMethod(u8),

  /// The zlib header asks for a preset dictionary, which PNG never supplies.
  NeedsDictionary,

  /// The inflater stopped with a failure status.
  Decompression(TINFLStatus),

  /// The allocator couldn't give us enough space for the decompressed text.
  Alloc,

  /// A `zTXt` chunk decompressed to zero bytes.
  EmptyText,
}
impl From<TryReserveError> for TextChunkError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}
impl fmt::Display for TextChunkError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotTextChunk => write!(f, "not a text chunk"),
      Self::MissingNullSeparator => write!(f, "keyword has no null separator"),
      Self::MissingCompressionMethod => write!(f, "missing compression method"),
      Self::UnsupportedCompressionMethod(m) => write!(f, "unsupported compression method: {m}"),
      Self::NeedsDictionary => write!(f, "zlib stream needs a preset dictionary"),
      Self::Decompression(status) => write!(f, "decompression failed: {status:?}"),
      Self::Alloc => write!(f, "out of memory while decompressing"),
      Self::EmptyText => write!(f, "decompressed text is empty"),
    }
  }
}
impl std::error::Error for TextChunkError {}

/// Errors that stop a single file from being scanned at all.
#[derive(Debug)]
pub enum ScanError {
  /// The first 8 bytes aren't the PNG signature (or there aren't 8 bytes).
  NotPng,
  /// Reading the signature failed.
  Io(io::Error),
}
impl From<io::Error> for ScanError {
  #[inline]
  fn from(e: io::Error) -> Self {
    Self::Io(e)
  }
}
impl fmt::Display for ScanError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotPng => write!(f, "not a PNG file"),
      Self::Io(e) => write!(f, "I/O error: {e}"),
    }
  }
}
impl std::error::Error for ScanError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::NotPng => None,
    }
  }
}

/// Errors that stop a whole folder run before any file is looked at.
#[derive(Debug)]
pub enum ExtractError {
  /// The path doesn't exist or isn't a directory.
  InvalidFolder(PathBuf),
  /// Reading the folder itself failed.
  Io(io::Error),
}
impl From<io::Error> for ExtractError {
  #[inline]
  fn from(e: io::Error) -> Self {
    Self::Io(e)
  }
}
impl fmt::Display for ExtractError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidFolder(path) => {
        write!(f, "invalid or inaccessible folder path: {}", path.display())
      }
      Self::Io(e) => write!(f, "I/O error: {e}"),
    }
  }
}
impl std::error::Error for ExtractError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::InvalidFolder(_) => None,
    }
  }
}
