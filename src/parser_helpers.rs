#![forbid(unsafe_code)]

//! Just has shorthands for pulling values off the front of byte slices.

use bytemuck::Pod;

/// Splits a [`Pod`] value off the front of the bytes.
///
/// Returns `None` if there aren't enough bytes.
#[inline]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Option<(T, &[u8])> {
  let size = core::mem::size_of::<T>();
  if bytes.len() >= size {
    let (head, tail) = bytes.split_at(size);
    Some((bytemuck::pod_read_unaligned(head), tail))
  } else {
    None
  }
}

/// Splits the bytes around the first null byte, dropping the null.
#[inline]
pub(crate) fn try_split_at_null(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let pos = bytes.iter().position(|&b| b == 0)?;
  Some((&bytes[..pos], &bytes[pos + 1..]))
}

#[test]
fn test_try_split_at_null() {
  assert_eq!(try_split_at_null(b"key\0val"), Some((&b"key"[..], &b"val"[..])));
  assert_eq!(try_split_at_null(b"\0"), Some((&b""[..], &b""[..])));
  assert_eq!(try_split_at_null(b"a\0b\0c"), Some((&b"a"[..], &b"b\0c"[..])));
  assert_eq!(try_split_at_null(b"no null"), None);
}

#[test]
fn test_try_pull_pod() {
  let (v, rest): ([u8; 2], &[u8]) = try_pull_pod(&[1, 2, 3]).unwrap();
  assert_eq!(v, [1, 2]);
  assert_eq!(rest, &[3]);
  assert!(try_pull_pod::<[u8; 4]>(&[1, 2, 3]).is_none());
}
