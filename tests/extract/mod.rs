use std::path::Path;

use miniz_oxide::deflate::compress_to_vec_zlib;
use pngmeta::{
  extract_file, extract_folder, Config, ExtractError, FileOutcome, ProgressReporter, ScanTotals,
};

use super::{chunk, png_of, ScratchDir};

/// Remembers every call it gets.
#[derive(Default)]
struct Recorder {
  files: Vec<(String, ScanTotals)>,
  finished: Option<ScanTotals>,
}
impl ProgressReporter for Recorder {
  fn file_done(&mut self, path: &Path, totals: ScanTotals) {
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    self.files.push((name, totals));
  }
  fn finished(&mut self, totals: ScanTotals) {
    assert!(self.finished.is_none(), "finished twice");
    self.finished = Some(totals);
  }
}

fn parameters_png() -> Vec<u8> {
  png_of(&[chunk(b"tEXt", b"parameters\0seed: 42"), chunk(b"IEND", &[])])
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
  std::fs::write(dir.join(name), bytes).unwrap();
}

fn config_for(dir: &ScratchDir) -> Config {
  Config { folder: dir.path().to_path_buf() }
}

#[test]
fn test_parameters_scenario() {
  let dir = ScratchDir::new();
  write(dir.path(), "image.png", &parameters_png());

  let mut rec = Recorder::default();
  let totals = extract_folder(&config_for(&dir), &mut rec).unwrap();

  assert_eq!(totals, ScanTotals { processed: 1, extracted: 1 });
  assert_eq!(std::fs::read(dir.path().join("image.txt")).unwrap(), b"parameters: seed: 42");
  assert_eq!(rec.files, vec![("image.png".to_string(), totals)]);
  assert_eq!(rec.finished, Some(totals));
}

#[test]
fn test_not_png_is_counted_but_skipped() {
  let dir = ScratchDir::new();
  write(dir.path(), "fake.png", b"this is not a PNG file, just some text");

  let mut rec = Recorder::default();
  let totals = extract_folder(&config_for(&dir), &mut rec).unwrap();

  assert_eq!(totals, ScanTotals { processed: 1, extracted: 0 });
  assert!(!dir.path().join("fake.txt").exists());
  assert_eq!(extract_file(&dir.path().join("fake.png")), FileOutcome::NotPng);
}

#[test]
fn test_mixed_folder() {
  let dir = ScratchDir::new();
  let ztxt = {
    let mut data = b"parameters\0\0".to_vec();
    data.extend_from_slice(&compress_to_vec_zlib(b"a cat, Steps: 30", 9));
    data
  };
  write(dir.path(), "a.png", &parameters_png());
  write(dir.path(), "b.PNG", &png_of(&[chunk(b"zTXt", &ztxt), chunk(b"IEND", &[])]));
  write(dir.path(), "c.png", &png_of(&[chunk(b"IDAT", &[1, 2, 3]), chunk(b"IEND", &[])]));
  write(dir.path(), "d.png", b"nope");
  // right bytes, wrong extension: never looked at
  write(dir.path(), "e.jpg", &parameters_png());
  // sub-folders aren't entered, even when they look like PNGs
  std::fs::create_dir(dir.path().join("sub.png")).unwrap();
  write(&dir.path().join("sub.png"), "f.png", &parameters_png());

  let mut rec = Recorder::default();
  let totals = extract_folder(&config_for(&dir), &mut rec).unwrap();

  assert_eq!(totals, ScanTotals { processed: 4, extracted: 2 });
  let names: Vec<&str> = rec.files.iter().map(|(n, _)| n.as_str()).collect();
  assert_eq!(names, ["a.png", "b.PNG", "c.png", "d.png"]);
  assert_eq!(rec.files[1].1, ScanTotals { processed: 2, extracted: 2 });
  assert_eq!(rec.files[3].1, ScanTotals { processed: 4, extracted: 2 });
  assert_eq!(std::fs::read(dir.path().join("b.txt")).unwrap(), b"parameters: a cat, Steps: 30");
  assert!(!dir.path().join("c.txt").exists());
  assert!(!dir.path().join("d.txt").exists());
  assert!(!dir.path().join("e.txt").exists());
  assert!(!dir.path().join("sub.png").join("f.txt").exists());
}

#[test]
fn test_existing_txt_is_overwritten() {
  let dir = ScratchDir::new();
  write(dir.path(), "image.png", &parameters_png());
  write(dir.path(), "image.txt", b"old contents that are longer than the new ones");

  assert_eq!(extract_file(&dir.path().join("image.png")), FileOutcome::Extracted);
  assert_eq!(std::fs::read(dir.path().join("image.txt")).unwrap(), b"parameters: seed: 42");
}

#[test]
fn test_write_failure_is_not_extracted() {
  let dir = ScratchDir::new();
  write(dir.path(), "image.png", &parameters_png());
  write(dir.path(), "later.png", &parameters_png());
  // a directory sitting where the .txt should go makes the write fail
  std::fs::create_dir(dir.path().join("image.txt")).unwrap();

  let mut rec = Recorder::default();
  let totals = extract_folder(&config_for(&dir), &mut rec).unwrap();
  assert_eq!(totals, ScanTotals { processed: 2, extracted: 1 });
  assert!(dir.path().join("later.txt").is_file());
}

#[test]
fn test_invalid_folder() {
  let dir = ScratchDir::new();
  let missing = dir.path().join("does-not-exist");
  let mut rec = Recorder::default();
  match extract_folder(&Config { folder: missing.clone() }, &mut rec) {
    Err(ExtractError::InvalidFolder(p)) => assert_eq!(p, missing),
    other => panic!("expected InvalidFolder, got {other:?}"),
  }
  assert!(rec.files.is_empty());
  assert!(rec.finished.is_none());

  // a file isn't a folder either
  write(dir.path(), "file.png", &parameters_png());
  let file_config = Config { folder: dir.path().join("file.png") };
  assert!(matches!(extract_folder(&file_config, &mut rec), Err(ExtractError::InvalidFolder(_))));
}

#[test]
fn test_config_from_quoted_input() {
  let dir = ScratchDir::new();
  write(dir.path(), "image.png", &parameters_png());
  let input = format!("\"{}\"\n", dir.path().join(".").display());
  let config = Config::from_user_input(&input).unwrap();
  assert_eq!(config.folder, dir.path());
  let totals = extract_folder(&config, &mut pngmeta::NoProgress).unwrap();
  assert_eq!(totals, ScanTotals { processed: 1, extracted: 1 });
}
