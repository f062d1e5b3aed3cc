//! Copying an archive entry out to a private temporary file.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::zip::LocatedEntry;

/// Delete `path` if it exists. A missing file is not an error.
pub fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConvertError::io(path, e)),
    }
}

/// An extracted entry on disk. The file is deleted when this is dropped.
#[derive(Debug)]
pub struct MaterializedEntry {
    file: NamedTempFile,
}

impl MaterializedEntry {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A fresh read handle positioned at the start of the copy.
    pub fn reopen(&self) -> Result<File> {
        self.file.reopen().map_err(|e| ConvertError::io(self.path(), e))
    }

    /// Read the whole copy back, then delete it.
    pub fn consume(self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut handle = self.reopen()?;
            handle
                .read_to_end(&mut bytes)
                .map_err(|e| ConvertError::io(self.path(), e))?;
        }
        let path = self.path().to_path_buf();
        self.file.close().map_err(|e| ConvertError::io(path, e))?;
        Ok(bytes)
    }
}

/// Stream the located entry into a uniquely named file inside `dir`.
///
/// The copy gets the entry's permission bits (Unix only), with owner
/// read/write always set so it can be read back.
pub fn materialize(located: LocatedEntry, dir: &Path) -> Result<MaterializedEntry> {
    let LocatedEntry { entry, mut reader } = located;

    let mut builder = tempfile::Builder::new();
    builder.prefix("TIBCO.").suffix(".xml");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(entry.mode() | 0o600));
    }

    let file = builder
        .tempfile_in(dir)
        .map_err(|e| ConvertError::io(dir, e))?;

    let copied = {
        let mut out = BufWriter::new(file.as_file());
        let copied = io::copy(&mut reader, &mut out).map_err(|source| {
            if source.kind() == io::ErrorKind::InvalidData {
                ConvertError::Extract {
                    entry: entry.file_name.clone(),
                    source: source.into(),
                }
            } else {
                ConvertError::io(file.path(), source)
            }
        })?;
        out.flush().map_err(|e| ConvertError::io(file.path(), e))?;
        copied
    };

    debug!(
        entry = %entry.file_name,
        bytes = copied,
        path = %file.path().display(),
        "materialized archive entry"
    );

    Ok(MaterializedEntry { file })
}
