//! Stages shared by the CLI commands: load, share, write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formshare_catalog::{MetadataCatalog, load_catalog, resolve_catalog_root};
use formshare_core::{ShareableForm, StandardPreprocessor};
use formshare_model::{FormDocument, FormMetadata, InclusionFlags, LookupService};
use tracing::{info, warn};

use crate::types::ShareOutcome;

pub const SHARED_MARKUP_SUFFIX: &str = "shared.xml";
pub const MANIFEST_SUFFIX: &str = "dependencies.json";

/// Read a form file. The file stem becomes the form name.
pub fn load_form(path: &Path) -> Result<FormDocument> {
    let markup =
        fs::read_to_string(path).with_context(|| format!("read form {}", path.display()))?;
    let mut metadata = FormMetadata::new();
    if let Some(stem) = form_stem(path) {
        metadata = metadata.with_name(stem);
    }
    info!(path = %path.display(), bytes = markup.len(), "loaded form");
    Ok(FormDocument::new(markup).with_metadata(metadata))
}

/// Load the catalog from `explicit` or the environment; empty when neither is set.
pub fn load_lookup(explicit: Option<PathBuf>) -> Result<MetadataCatalog> {
    let Some(root) = resolve_catalog_root(explicit) else {
        warn!("no catalog directory given; no dependency will resolve");
        return Ok(MetadataCatalog::default());
    };
    let catalog =
        load_catalog(&root).with_context(|| format!("load catalog {}", root.display()))?;
    info!(root = %root.display(), entries = catalog.total_len(), "loaded catalog");
    Ok(catalog)
}

pub fn build_shareable(
    form: &FormDocument,
    flags: InclusionFlags,
    lookup: &dyn LookupService,
) -> Result<ShareableForm> {
    ShareableForm::new(form, flags, lookup, &StandardPreprocessor).context("make form shareable")
}

/// Write `<stem>.shared.xml` and `<stem>.dependencies.json` into `output_dir`.
pub fn write_outputs(
    shareable: &ShareableForm,
    stem: &str,
    output_dir: &Path,
) -> Result<ShareOutcome> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let shared_markup = output_dir.join(format!("{stem}.{SHARED_MARKUP_SUFFIX}"));
    fs::write(&shared_markup, shareable.sanitized_markup())
        .with_context(|| format!("write {}", shared_markup.display()))?;

    let manifest = shareable.manifest();
    let manifest_path = output_dir.join(format!("{stem}.{MANIFEST_SUFFIX}"));
    let json = serde_json::to_string_pretty(&manifest).context("serialize manifest")?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("write {}", manifest_path.display()))?;

    info!(
        markup = %shared_markup.display(),
        manifest = %manifest_path.display(),
        "wrote shareable form"
    );
    Ok(ShareOutcome {
        shared_markup,
        manifest_path,
        manifest,
    })
}

/// Share the form at `form_path` end to end.
pub fn share_form(
    form_path: &Path,
    output_dir: Option<&Path>,
    flags: InclusionFlags,
    lookup: &dyn LookupService,
) -> Result<ShareOutcome> {
    let form = load_form(form_path)?;
    let shareable = build_shareable(&form, flags, lookup)?;
    let stem = form_stem(form_path).unwrap_or_else(|| "form".to_string());
    let output_dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| form_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    write_outputs(&shareable, &stem, &output_dir)
}

fn form_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}
