//! Shareable form builder.
//!
//! Turns a form definition into an exportable one: environment-local
//! attributes are stripped from the markup that will be shared, and every
//! metadata object the form depends on is collected from an expanded copy.
//!
//! # Call Order
//!
//! 1. Strip local attributes from the shared markup
//! 2. Copy the stripped markup
//! 3. Expand macros, then templates, on the copy
//! 4. Run the [`ScanPlan`] for the form's flags over the copy

use formshare_model::{
    DependencyManifest, DependencySet, FormDocument, FormMetadata, InclusionFlags, LookupService,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::preprocess::MarkupPreprocessor;
use crate::scanners::ScanPlan;
use crate::strip::strip_local_attributes;

/// A form prepared for export together with its dependencies.
///
/// The source document is never modified. Not meant to be recalculated
/// concurrently; take `&mut self` one pass at a time.
#[derive(Debug, Clone)]
pub struct ShareableForm {
    metadata: FormMetadata,
    markup: String,
    flags: InclusionFlags,
    dependencies: DependencySet,
}

impl ShareableForm {
    /// Strip `form` according to `flags` and compute its dependencies.
    ///
    /// Fails only when the markup cannot be expanded, in which case no
    /// shareable form is produced.
    pub fn new(
        form: &FormDocument,
        flags: InclusionFlags,
        lookup: &dyn LookupService,
        preprocessor: &dyn MarkupPreprocessor,
    ) -> Result<Self> {
        let mut shareable = Self {
            metadata: form.metadata.clone(),
            markup: strip_local_attributes(&form.markup, flags),
            flags,
            dependencies: DependencySet::new(),
        };
        shareable.calculate_dependencies(lookup, preprocessor)?;
        info!(
            form = shareable.metadata.name.as_deref().unwrap_or("<unnamed>"),
            dependencies = shareable.dependencies.len(),
            "form made shareable"
        );
        Ok(shareable)
    }

    /// Recompute dependencies from the current sanitized markup.
    ///
    /// On error the stored set is left empty.
    pub fn calculate_dependencies(
        &mut self,
        lookup: &dyn LookupService,
        preprocessor: &dyn MarkupPreprocessor,
    ) -> Result<()> {
        self.dependencies.clear();
        let expanded = preprocessor.expand(&self.markup)?;
        let plan = ScanPlan::for_flags(self.flags);
        debug!(scanners = ?plan.names(), "scanning expanded markup");
        self.dependencies = plan.run(&expanded, lookup);
        Ok(())
    }

    pub fn set_dependencies(&mut self, dependencies: DependencySet) {
        self.dependencies = dependencies;
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Markup with local attributes removed and macros left unexpanded.
    pub fn sanitized_markup(&self) -> &str {
        &self.markup
    }

    pub fn flags(&self) -> InclusionFlags {
        self.flags
    }

    pub fn metadata(&self) -> &FormMetadata {
        &self.metadata
    }

    pub fn manifest(&self) -> DependencyManifest {
        DependencyManifest::new(self.metadata.clone(), self.flags, &self.dependencies)
    }

    /// A plain form carrying the metadata and the sanitized markup.
    pub fn into_form(self) -> FormDocument {
        FormDocument {
            metadata: self.metadata,
            markup: self.markup,
        }
    }
}
