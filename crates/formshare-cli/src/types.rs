use std::path::PathBuf;

use formshare_model::DependencyManifest;

/// Result of the `share` command.
#[derive(Debug)]
pub struct ShareOutcome {
    pub shared_markup: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: DependencyManifest,
}
