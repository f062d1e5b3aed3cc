use std::path::Path;

use tracing::info;

use crate::descriptor::DeploymentDescriptor;
use crate::error::Result;
use crate::materialize::{materialize, remove_stale};
use crate::{export, zip};

/// Archive entry holding the deployment descriptor.
pub const DESCRIPTOR_ENTRY: &str = "TIBCO.xml";

/// Export the global variables of the EAR at `ear` as JSON into `output`.
///
/// The descriptor is staged in the system temporary directory. Returns the
/// number of name/value pairs written.
pub async fn convert(ear: &Path, output: &Path) -> Result<usize> {
    convert_in(ear, output, &std::env::temp_dir()).await
}

/// Like [`convert`], staging the extracted descriptor inside `work_dir`.
pub async fn convert_in(ear: &Path, output: &Path, work_dir: &Path) -> Result<usize> {
    info!(
        "Extracting GV from EAR file {} to {}",
        ear.display(),
        output.display()
    );

    let located = zip::locate_entry(ear, DESCRIPTOR_ENTRY).await?;
    info!(
        size = located.entry.uncompressed_size,
        "Found {DESCRIPTOR_ENTRY} in EAR, extracting"
    );

    remove_stale(output)?;
    let staged = materialize(located, work_dir)?;
    let bytes = staged.consume()?;

    let descriptor = DeploymentDescriptor::parse(&bytes)?;
    let group = descriptor.global_variables()?;

    info!(group = %group.name, pairs = group.pairs.len(), "Exporting GVs as JSON");
    export::write(&group.pairs, output).await?;

    info!("Done");
    Ok(group.pairs.len())
}
