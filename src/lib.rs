//! # eargv
//!
//! Exports the global variables of a TIBCO enterprise archive (EAR) as JSON.
//!
//! An EAR is a ZIP file whose top-level `TIBCO.xml` entry is the deployment
//! descriptor. The conversion runs in four steps:
//!
//! 1. [`zip::locate_entry`] finds `TIBCO.xml` in the Central Directory and
//!    opens a decompressing reader over it.
//! 2. [`materialize::materialize`] copies the entry into a private temporary file.
//! 3. [`DeploymentDescriptor::parse`] binds the XML to the descriptor schema.
//! 4. [`export::write`] writes the first `NameValuePairs` group as a JSON object.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), eargv::ConvertError> {
//!     let pairs = eargv::convert(Path::new("OrderService.ear"), Path::new("gv.json")).await?;
//!     println!("exported {pairs} global variables");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod io;
pub mod materialize;
pub mod zip;

pub use cli::Cli;
pub use convert::{DESCRIPTOR_ENTRY, convert, convert_in};
pub use descriptor::{DeploymentDescriptor, NameValuePair, NameValuePairGroup};
pub use error::ConvertError;
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ZipExtractor, ZipFileEntry};
