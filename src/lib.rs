//! A crate for recovering the text metadata stored in PNG files.
//!
//! Image generation tools (Stable Diffusion front ends and the like) save the
//! prompt, seed, sampler, and so on in `tEXt` and `zTXt` chunks of the PNGs
//! they write. This crate walks the chunk stream of a PNG, decodes those
//! chunks (inflating `zTXt` data as needed), and joins the results into a
//! single [`MetadataDocument`]. [`extract_folder`] does that for every PNG in
//! a folder, writing each document next to its image as a `.txt` file.
//!
//! ```no_run
//! let png = std::fs::read("image.png")?;
//! let doc = pngmeta::scan_bytes(&png)?;
//! if doc.found() {
//!   println!("{}", doc.to_string_lossy());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod int_endian;

mod parser_helpers;

mod error;
pub use error::*;

pub mod png;

mod metadata;
pub use metadata::*;

mod extract;
pub use extract::*;
