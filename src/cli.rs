use clap::Parser;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "eargv")]
#[command(version)]
#[command(about = "Export the global variables of a TIBCO EAR as JSON", long_about = None)]
#[command(after_help = "Example:\n  \
  eargv --ear OrderService.ear -o OrderService.json")]
pub struct Cli {
    /// Input EAR filename
    #[arg(long = "ear", value_name = "PATH")]
    pub ear: Option<String>,

    /// Output filename
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<String>,
}

impl Cli {
    /// Both paths, or `None` when either flag was left out or given empty.
    pub fn paths(&self) -> Option<(&Path, &Path)> {
        Some((non_empty(&self.ear)?, non_empty(&self.output)?))
    }
}

fn non_empty(path: &Option<String>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.is_empty()).map(Path::new)
}
