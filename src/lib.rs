//! A library for adding iTunes style metadata to untagged MPEG-4 audio files.
//!
//! The atom tree of a file is read once, keeping large payloads in the file. Metadata items are
//! added to the tree in memory, growing every ancestor and shifting the chunk offsets of the
//! media data. Writing renders the file to a temporary file which atomically replaces the
//! original.
//!
//! # Examples
//!
//! ## The easy way
//! ```no_run
//! let metadata = m4atag::Metadata {
//!     artist: "artist".to_owned(),
//!     album: "album".to_owned(),
//!     title: "title".to_owned(),
//!     year: 1999,
//!     track: 3,
//!     ..Default::default()
//! };
//!
//! metadata.write_to_path("music.m4a").unwrap();
//! ```
//!
//! ## The hard way
//! ```no_run
//! use m4atag::{ReadConfig, Tag, UnknownAtoms, WriteConfig};
//!
//! let cfg = ReadConfig { unknown_atoms: UnknownAtoms::PassThrough };
//! let mut tag = Tag::open_with("music.m4a", &cfg).unwrap();
//!
//! tag.add_artist("artist").unwrap();
//! tag.add_disc(1).unwrap();
//! tag.add_cover_art(&std::fs::read("cover.jpg").unwrap()).unwrap();
//!
//! let ilst = tag.find_atom("moov.udta.meta.ilst").unwrap();
//! println!("{} items", ilst.children().len());
//!
//! tag.write_with(&WriteConfig { copy_block_size: 1024 * 1024 }).unwrap();
//! ```
#![warn(missing_docs)]

pub use crate::atom::{Atom, AtomId, AtomTree, Fourcc, ImgFmt, State};
pub use crate::config::{ReadConfig, UnknownAtoms, WriteConfig};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::tag::{Metadata, Tag};

pub mod atom;

mod config;
mod error;
mod tag;
