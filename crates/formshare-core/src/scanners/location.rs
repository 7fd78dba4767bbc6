use formshare_model::{DependencySet, LookupService};

use super::DependencyScanner;
use crate::patterns::LOCATION_PATTERNS;

/// Resolves `default` and `order` entries of `<encounterLocation>`.
///
/// The attributes are only recognised inside that tag.
pub struct LocationScanner;

impl DependencyScanner for LocationScanner {
    fn name(&self) -> &'static str {
        "location"
    }

    fn scan(&self, markup: &str, lookup: &dyn LookupService, dependencies: &mut DependencySet) {
        for pattern in LOCATION_PATTERNS.iter() {
            dependencies.extend(
                pattern
                    .tokens(markup)
                    .filter_map(|token| lookup.find_location_by_identifier(token)),
            );
        }
    }
}
