use formshare_model::{DependencySet, LookupService};

use super::DependencyScanner;

/// Placeholder for provider dependencies. Adds nothing.
///
/// Exporting providers raises a policy question rather than a lookup one:
/// whether every person holding a role named in `<encounterProvider role=...>`
/// should travel with the form. Until that is decided this scanner is inert.
pub struct ProviderScanner;

impl DependencyScanner for ProviderScanner {
    fn name(&self) -> &'static str {
        "provider"
    }

    fn scan(&self, _markup: &str, _lookup: &dyn LookupService, _dependencies: &mut DependencySet) {}
}
