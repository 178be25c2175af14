use super::*;

use crate::{parser_helpers::try_split_at_null, TextChunkError};

/// Textual data
///
/// Spec: [tEXt](https://www.w3.org/TR/png/#11tEXt)
///
/// The data is a keyword, a null byte, and then the text. Both are *supposed*
/// to be Latin-1, but we hand the bytes back exactly as they were stored.
/// Plenty of programs write UTF-8 here anyway.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct tEXt<'b> {
  keyword: &'b [u8],
  text: &'b [u8],
}
impl<'b> tEXt<'b> {
  /// Normally the keyword length should be 1-79 bytes, but an empty keyword
  /// is still accepted.
  #[inline]
  #[must_use]
  pub const fn keyword(&self) -> &'b [u8] {
    self.keyword
  }
  /// Everything after the null byte.
  #[inline]
  #[must_use]
  pub const fn text(&self) -> &'b [u8] {
    self.text
  }
}
impl<'b> TryFrom<&'b [u8]> for tEXt<'b> {
  type Error = TextChunkError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let (keyword, text) = try_split_at_null(data).ok_or(TextChunkError::MissingNullSeparator)?;
    Ok(Self { keyword, text })
  }
}
impl Debug for tEXt<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("tEXt")
      .field("keyword", &String::from_utf8_lossy(self.keyword))
      .field("text", &(&self.text[..self.text.len().min(12)], self.text.len()))
      .finish()
  }
}
