//! Running the scanner over a whole folder and writing out `.txt` files.

use std::{
  ffi::OsStr,
  fs::File,
  io::{BufReader, Write},
  path::{Component, Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{scan, ExtractError, ScanError};

/// Where to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Config {
  /// The folder holding the PNG files. Only the folder itself is searched,
  /// not any sub-folders.
  pub folder: PathBuf,
}
impl Config {
  /// Builds a config from a path the way a user would type or paste it.
  ///
  /// One pair of surrounding double quotes is removed (Windows Explorer's
  /// "Copy as path" adds them) and the path is lexically normalized.
  ///
  /// Returns `None` if there's no path left.
  #[must_use]
  pub fn from_user_input(input: &str) -> Option<Self> {
    let trimmed = strip_surrounding_quotes(input.trim_end_matches(&['\r', '\n'][..]));
    if trimmed.is_empty() {
      return None;
    }
    Some(Self { folder: normalize_lexically(Path::new(trimmed)) })
  }

  /// Like [`from_user_input`](Self::from_user_input), but for input that
  /// might not be UTF-8, such as a command line argument.
  #[must_use]
  pub fn from_os_input(input: &OsStr) -> Option<Self> {
    if let Some(s) = input.to_str() {
      return Self::from_user_input(s);
    }
    let trimmed = strip_surrounding_quotes_os(input);
    if trimmed.is_empty() {
      return None;
    }
    Some(Self { folder: normalize_lexically(Path::new(trimmed)) })
  }
}

/// Removes one pair of `"` from around the input, if both ends have one.
#[must_use]
pub fn strip_surrounding_quotes(input: &str) -> &str {
  match input.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
    Some(inner) => inner,
    None => input,
  }
}

#[cfg(unix)]
fn strip_surrounding_quotes_os(input: &OsStr) -> &OsStr {
  use std::os::unix::ffi::OsStrExt;
  match input.as_bytes() {
    [b'"', inner @ .., b'"'] => OsStr::from_bytes(inner),
    _ => input,
  }
}

// Non-unicode input elsewhere only comes from unpaired UTF-16 surrogates,
// which isn't something a pasted path ever has.
#[cfg(not(unix))]
fn strip_surrounding_quotes_os(input: &OsStr) -> &OsStr {
  input
}

/// Cleans up a path without touching the file system.
///
/// * `.` components are removed.
/// * `name/..` pairs are folded away.
/// * `..` directly after the root is dropped, since the root has no parent.
/// * Leading `..` on a relative path is kept.
///
/// An input that normalizes to nothing becomes `.`.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
  let mut out: Vec<Component<'_>> = Vec::new();
  for component in path.components() {
    match component {
      Component::CurDir => (),
      Component::ParentDir => match out.last() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => (),
        _ => out.push(component),
      },
      other => out.push(other),
    }
  }
  if out.is_empty() {
    return PathBuf::from(".");
  }
  out.iter().collect()
}

/// The sibling `.txt` path that metadata for `png_path` is written to.
#[inline]
#[must_use]
pub fn txt_path_for(png_path: &Path) -> PathBuf {
  png_path.with_extension("txt")
}

/// If the path has a `png` extension, ignoring case.
#[inline]
#[must_use]
pub fn has_png_extension(path: &Path) -> bool {
  path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
}

/// Counters for one run over a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScanTotals {
  /// Every `.png` file that was looked at, even ones that turned out to not
  /// be PNG data.
  pub processed: usize,
  /// Files that had metadata and got a `.txt` written.
  pub extracted: usize,
}

/// Gets told about progress during [`extract_folder`].
pub trait ProgressReporter {
  /// Called after each file, with the counters including that file.
  fn file_done(&mut self, path: &Path, totals: ScanTotals);
  /// Called once at the end of the run.
  fn finished(&mut self, totals: ScanTotals);
}

/// Ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;
impl ProgressReporter for NoProgress {
  #[inline]
  fn file_done(&mut self, _path: &Path, _totals: ScanTotals) {}
  #[inline]
  fn finished(&mut self, _totals: ScanTotals) {}
}

/// Prints a single updating progress line, then a summary line.
#[derive(Debug)]
pub struct ConsoleProgress<W> {
  out: W,
}
impl<W: Write> ConsoleProgress<W> {
  /// Reports to any writer.
  #[inline]
  pub const fn new(out: W) -> Self {
    Self { out }
  }
}
impl ConsoleProgress<std::io::Stdout> {
  /// Reports to standard output.
  #[inline]
  #[must_use]
  pub fn stdout() -> Self {
    Self::new(std::io::stdout())
  }
}
impl<W: Write> ProgressReporter for ConsoleProgress<W> {
  fn file_done(&mut self, _path: &Path, totals: ScanTotals) {
    // the console can go away under us, but that's no reason to stop working.
    let _ = write!(
      self.out,
      "\rProcessed: {} | Metadata found: {}",
      totals.processed, totals.extracted
    );
    let _ = self.out.flush();
  }
  fn finished(&mut self, totals: ScanTotals) {
    let _ = writeln!(
      self.out,
      "\n\nFinished! Scanned {} PNG files, extracted metadata from {}.",
      totals.processed, totals.extracted
    );
    let _ = self.out.flush();
  }
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOutcome {
  /// Metadata was found and written to the `.txt` file.
  Extracted,
  /// A PNG, but it had no text chunks that decoded.
  NoMetadata,
  /// The file didn't start with the PNG signature.
  NotPng,
  /// Reading the file or writing its `.txt` failed.
  Failed,
}

/// Scans one PNG file, writing its metadata next to it if there is any.
///
/// An existing `.txt` file is overwritten. Failures are logged, and never
/// returned, so that a batch can keep going.
pub fn extract_file(png_path: &Path) -> FileOutcome {
  let file = match File::open(png_path) {
    Ok(file) => file,
    Err(e) => {
      log::warn!("can't open {}: {e}", png_path.display());
      return FileOutcome::Failed;
    }
  };
  let doc = match scan(BufReader::new(file)) {
    Ok(doc) => doc,
    Err(ScanError::NotPng) => {
      log::debug!("{} is not a PNG, skipping", png_path.display());
      return FileOutcome::NotPng;
    }
    Err(e) => {
      log::warn!("can't read {}: {e}", png_path.display());
      return FileOutcome::Failed;
    }
  };
  if !doc.found() {
    log::debug!("{} has no text metadata", png_path.display());
    return FileOutcome::NoMetadata;
  }
  let txt_path = txt_path_for(png_path);
  match std::fs::write(&txt_path, doc.as_bytes()) {
    Ok(()) => {
      log::info!(
        "wrote {} entries from {} to {}",
        doc.entry_count(),
        png_path.display(),
        txt_path.display()
      );
      FileOutcome::Extracted
    }
    Err(e) => {
      log::warn!("can't write {}: {e}", txt_path.display());
      FileOutcome::Failed
    }
  }
}

/// Scans every `.png` file directly inside the folder.
///
/// Files are taken in file name order. Symlinks to files are followed,
/// sub-folders are not entered.
///
/// ## Failure
/// * [`ExtractError::InvalidFolder`] if the path isn't a directory.
/// * [`ExtractError::Io`] if the directory can't be listed.
///
/// Once files start being processed nothing else is an error, the run always
/// finishes and the totals are returned.
pub fn extract_folder(
  config: &Config, progress: &mut dyn ProgressReporter,
) -> Result<ScanTotals, ExtractError> {
  let folder = config.folder.as_path();
  if !folder.is_dir() {
    return Err(ExtractError::InvalidFolder(folder.to_path_buf()));
  }
  // walkdir would only report this as one error entry, check it up front.
  std::fs::read_dir(folder)?;

  let mut totals = ScanTotals::default();
  let entries = WalkDir::new(folder)
    .min_depth(1)
    .max_depth(1)
    .follow_links(true)
    .sort_by(|a, b| a.file_name().cmp(b.file_name()));
  for entry in entries {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        log::warn!("skipping folder entry: {e}");
        continue;
      }
    };
    if !entry.file_type().is_file() || !has_png_extension(entry.path()) {
      continue;
    }
    totals.processed += 1;
    if extract_file(entry.path()) == FileOutcome::Extracted {
      totals.extracted += 1;
    }
    progress.file_done(entry.path(), totals);
  }
  progress.finished(totals);
  log::info!(
    "scanned {} PNG files in {}, extracted metadata from {}",
    totals.processed,
    folder.display(),
    totals.extracted
  );
  Ok(totals)
}
