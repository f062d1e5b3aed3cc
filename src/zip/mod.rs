//! ZIP archive reading.
//!
//! - [`structures`]: records of the ZIP format (EOCD, ZIP64 EOCD, directory entries)
//! - [`parser`]: Central Directory scanning over any [`ReadAt`](crate::io::ReadAt) source
//! - [`extractor`]: entry lookup by name and decompressing entry readers
//!
//! Supports STORED and DEFLATE entries, archive comments and ZIP64
//! directories. Encryption and multi-disk archives are not supported.

mod extractor;
mod parser;
mod structures;

pub use extractor::{EntryReader, LocatedEntry, ZipExtractor, locate_entry};
pub use parser::ZipParser;
pub use structures::*;
