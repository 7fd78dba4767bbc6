//! Dependency scanners and the ordered plan that runs them.
//!
//! Each scanner reads macro-expanded markup, resolves the identifiers it
//! recognises through a [`LookupService`], and adds every match to a shared
//! [`DependencySet`]. Scanners never fail: tokens that resolve to nothing are
//! simply skipped.
//!
//! # Standard Scan Order
//!
//! 1. **UuidScanner** - always runs
//! 2. **MappedConceptScanner** - when mapped concepts are included
//! 3. **DrugNameScanner** - when drugs by name are included
//! 4. **LocationScanner** - when locations are included
//! 5. **ProviderScanner** - when providers are included (adds nothing yet)

mod drug_name;
mod location;
mod mapped_concept;
mod provider;
mod uuid;

use formshare_model::{DependencySet, InclusionFlags, LookupService};
use tracing::debug;

pub use drug_name::DrugNameScanner;
pub use location::LocationScanner;
pub use mapped_concept::MappedConceptScanner;
pub use provider::ProviderScanner;
pub use uuid::{UUID_RESOLVERS, UuidResolver, UuidScanner, resolve_uuid};

/// A single extraction strategy.
pub trait DependencyScanner: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Add every resolvable reference found in `markup` to `dependencies`.
    fn scan(&self, markup: &str, lookup: &dyn LookupService, dependencies: &mut DependencySet);
}

/// The scanners to run for one extraction pass, in order.
pub struct ScanPlan {
    scanners: Vec<&'static dyn DependencyScanner>,
}

impl ScanPlan {
    /// Build the plan for the given inclusion flags.
    pub fn for_flags(flags: InclusionFlags) -> Self {
        let mut scanners: Vec<&'static dyn DependencyScanner> = vec![&UuidScanner];
        if flags.mapped_concepts {
            scanners.push(&MappedConceptScanner);
        }
        if flags.drugs_by_name {
            scanners.push(&DrugNameScanner);
        }
        if flags.locations {
            scanners.push(&LocationScanner);
        }
        if flags.providers {
            scanners.push(&ProviderScanner);
        }
        Self { scanners }
    }

    /// Scanner names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.scanners.iter().map(|scanner| scanner.name()).collect()
    }

    /// Run every scanner over `markup` into a fresh set.
    pub fn run(&self, markup: &str, lookup: &dyn LookupService) -> DependencySet {
        let mut dependencies = DependencySet::new();
        for scanner in &self.scanners {
            let before = dependencies.len();
            scanner.scan(markup, lookup, &mut dependencies);
            debug!(
                scanner = scanner.name(),
                added = dependencies.len() - before,
                "scanner finished"
            );
        }
        dependencies
    }
}
