use flate2::CrcReader;
use flate2::read::DeflateDecoder;
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all files in the archive
    pub async fn list_files(&self) -> anyhow::Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    /// Open a decompressing reader over an entry's content.
    ///
    /// The compressed bytes are loaded up front, so the returned reader
    /// holds no reference to the archive.
    pub async fn open_entry(&self, entry: &ZipFileEntry) -> anyhow::Result<EntryReader> {
        if let CompressionMethod::Unknown(_) = entry.compression_method {
            anyhow::bail!(
                "Unsupported compression method {} for {} (only STORED and DEFLATE are supported)",
                entry.compression_method.as_u16(),
                entry.file_name
            );
        }

        let data_offset = self.parser.get_data_offset(entry).await?;
        let archive_size = self.parser.reader().size();
        if data_offset
            .checked_add(entry.compressed_size)
            .is_none_or(|end| end > archive_size)
        {
            anyhow::bail!(
                "Data of {} ({} bytes at offset {}) lies outside the archive",
                entry.file_name,
                entry.compressed_size,
                data_offset
            );
        }

        let mut data = vec![0u8; entry.compressed_size as usize];
        self.parser
            .reader()
            .read_exact_at(data_offset, &mut data)
            .await?;

        Ok(EntryReader::new(entry, data))
    }
}

/// Decompressed content of one archive entry.
///
/// Reaching end of stream checks the CRC-32 and length recorded in the
/// Central Directory; a mismatch surfaces as an [`io::ErrorKind::InvalidData`]
/// error from `read`.
pub struct EntryReader {
    inner: CrcReader<Box<dyn Read + Send>>,
    file_name: String,
    expected_crc: u32,
    expected_size: u64,
}

impl EntryReader {
    /// Wrap the raw (possibly compressed) bytes of `entry`.
    pub fn new(entry: &ZipFileEntry, data: Vec<u8>) -> Self {
        let source = Cursor::new(data);
        let inner: Box<dyn Read + Send> = match entry.compression_method {
            CompressionMethod::Deflate => Box::new(DeflateDecoder::new(source)),
            _ => Box::new(source),
        };

        Self {
            inner: CrcReader::new(inner),
            file_name: entry.file_name.clone(),
            expected_crc: entry.crc32,
            expected_size: entry.uncompressed_size,
        }
    }

    fn verify(&self) -> io::Result<()> {
        let crc = self.inner.crc();
        // The running count is 32 bits wide, so compare modulo 2^32
        if crc.amount() != self.expected_size as u32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{}: expected {} bytes, decompressed {}",
                    self.file_name,
                    self.expected_size,
                    crc.amount()
                ),
            ));
        }
        if crc.sum() != self.expected_crc {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{}: CRC-32 mismatch (expected {:08x}, got {:08x})",
                    self.file_name,
                    self.expected_crc,
                    crc.sum()
                ),
            ));
        }
        Ok(())
    }
}

impl Read for EntryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.verify()?;
        }
        Ok(n)
    }
}

/// An entry found by name, ready to be copied out.
pub struct LocatedEntry {
    pub entry: ZipFileEntry,
    pub reader: EntryReader,
}

/// Open `archive` and return a reader over the first entry named exactly `name`.
///
/// Names are compared as whole strings, so `config/TIBCO.xml` does not match
/// `TIBCO.xml`. The archive handle is released before this returns.
pub async fn locate_entry(archive: &Path, name: &str) -> Result<LocatedEntry> {
    let open_err = |source: anyhow::Error| ConvertError::ArchiveOpen {
        path: archive.to_path_buf(),
        source: source.into(),
    };

    let reader = Arc::new(LocalFileReader::open(archive).map_err(open_err)?);
    let extractor = ZipExtractor::new(reader);
    let entries = extractor.list_files().await.map_err(open_err)?;
    debug!(entries = entries.len(), archive = %archive.display(), "read central directory");

    let Some(entry) = entries.into_iter().find(|e| e.file_name == name) else {
        return Err(ConvertError::EntryNotFound {
            entry: name.to_string(),
            archive: archive.to_path_buf(),
        });
    };

    let reader = extractor
        .open_entry(&entry)
        .await
        .map_err(|source| ConvertError::Extract {
            entry: entry.file_name.clone(),
            source: source.into(),
        })?;

    Ok(LocatedEntry { entry, reader })
}
