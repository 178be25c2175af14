use pngmeta::{
  png::{PngChunkReader, PngRawChunkIter, PNG_SIGNATURE},
  scan, scan_bytes,
};

#[test]
fn test_PngRawChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_scanners_no_panics_on_random_chunks() {
  // random data behind a correct signature gets all the way into the chunk
  // parsing, and sometimes even into a text decoder.
  for _ in 0..50 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend_from_slice(&super::rand_bytes(512));
    let a = scan_bytes(&v).unwrap();
    let b = scan(v.as_slice()).unwrap();
    assert_eq!(a, b);

    let mut reader = PngChunkReader::new(v.as_slice()).unwrap();
    while reader.next_chunk().is_some() {
      //
    }
  }
}

#[test]
fn test_scanners_no_panics_on_random_text_payloads() {
  for _ in 0..50 {
    let data = super::rand_bytes(200);
    let png = super::png_of(&[
      super::chunk(b"tEXt", &data),
      super::chunk(b"zTXt", &data),
      super::chunk(b"IEND", &[]),
    ]);
    let doc = scan_bytes(&png).unwrap();
    assert!(doc.entry_count() <= 2);
  }
}
