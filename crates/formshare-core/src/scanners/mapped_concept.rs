//! Concepts referenced through `SOURCE:CODE` mapping pairs.

use formshare_model::{DependencySet, LookupService};
use tracing::trace;

use super::DependencyScanner;
use crate::patterns::MAPPED_CONCEPT_PATTERNS;

/// Resolves mapping pairs found in the concept-id family of attributes.
///
/// Tokens without a colon are plain ids and are left alone. A pair that
/// resolves to nothing is skipped silently.
pub struct MappedConceptScanner;

impl DependencyScanner for MappedConceptScanner {
    fn name(&self) -> &'static str {
        "mapped-concept"
    }

    fn scan(&self, markup: &str, lookup: &dyn LookupService, dependencies: &mut DependencySet) {
        for pattern in MAPPED_CONCEPT_PATTERNS.iter() {
            for token in pattern.tokens(markup) {
                let Some((source, code)) = token.split_once(':') else {
                    continue;
                };
                let (source, code) = (source.trim(), code.trim());
                if let Some(concept) = lookup.find_concept_by_mapping(code, source) {
                    trace!(source, code, "resolved mapped concept");
                    dependencies.insert(concept);
                }
            }
        }
    }
}
