use anyhow::Result;
use tracing::{info, info_span};

use formshare_cli::pipeline::{build_shareable, load_form, load_lookup, share_form};
use formshare_cli::types::ShareOutcome;
use formshare_core::strip_local_attributes;
use formshare_model::DependencyManifest;

use crate::cli::{FormArgs, ShareArgs};

pub fn run_share(args: &ShareArgs) -> Result<ShareOutcome> {
    let span = info_span!("share", form = %args.form.form.display());
    let _guard = span.enter();
    let lookup = load_lookup(args.form.catalog.clone())?;
    let outcome = share_form(
        &args.form.form,
        args.output_dir.as_deref(),
        args.form.inclusion.flags(),
        &lookup,
    )?;
    info!(
        dependencies = outcome.manifest.dependencies.len(),
        "share finished"
    );
    Ok(outcome)
}

/// Stripping needs no lookups, so no catalog is loaded.
pub fn run_strip(args: &FormArgs) -> Result<String> {
    let form = load_form(&args.form)?;
    Ok(strip_local_attributes(&form.markup, args.inclusion.flags()))
}

pub fn run_scan(args: &FormArgs) -> Result<DependencyManifest> {
    let span = info_span!("scan", form = %args.form.display());
    let _guard = span.enter();
    let form = load_form(&args.form)?;
    let lookup = load_lookup(args.catalog.clone())?;
    let shareable = build_shareable(&form, args.inclusion.flags(), &lookup)?;
    info!(
        dependencies = shareable.dependencies().len(),
        "scan finished"
    );
    Ok(shareable.manifest())
}
