use formshare_model::{DependencySet, LookupService};

use super::DependencyScanner;
use crate::patterns::DRUG_NAME_PATTERN;

/// Resolves each entry of `drugNames` by name or id.
pub struct DrugNameScanner;

impl DependencyScanner for DrugNameScanner {
    fn name(&self) -> &'static str {
        "drug-name"
    }

    fn scan(&self, markup: &str, lookup: &dyn LookupService, dependencies: &mut DependencySet) {
        dependencies.extend(
            DRUG_NAME_PATTERN
                .tokens(markup)
                .filter_map(|token| lookup.find_drug_by_name_or_id(token)),
        );
    }
}
