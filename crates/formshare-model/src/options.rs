//! Inclusion flags controlling what travels with a shared form.

use serde::{Deserialize, Serialize};

/// Which optional dependency kinds are exported with a form.
///
/// The flags serve two purposes: they gate the optional scanners, and a
/// `false` for locations or providers strips those environment-local
/// attributes from the exported markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionFlags {
    /// Resolve concepts referenced by `SOURCE:CODE` mapping pairs.
    pub mapped_concepts: bool,
    /// Resolve drugs referenced by name in `drugNames`.
    pub drugs_by_name: bool,
    /// Keep and resolve `encounterLocation` defaults.
    pub locations: bool,
    /// Keep `encounterProvider` defaults and roles.
    pub providers: bool,
}

impl Default for InclusionFlags {
    /// Locations travel with the form, providers do not.
    fn default() -> Self {
        Self {
            mapped_concepts: true,
            drugs_by_name: true,
            locations: true,
            providers: false,
        }
    }
}

impl InclusionFlags {
    /// Every optional kind disabled.
    pub fn none() -> Self {
        Self {
            mapped_concepts: false,
            drugs_by_name: false,
            locations: false,
            providers: false,
        }
    }

    /// Every optional kind enabled.
    pub fn all() -> Self {
        Self {
            mapped_concepts: true,
            drugs_by_name: true,
            locations: true,
            providers: true,
        }
    }

    #[must_use]
    pub fn with_mapped_concepts(mut self, enable: bool) -> Self {
        self.mapped_concepts = enable;
        self
    }

    #[must_use]
    pub fn with_drugs_by_name(mut self, enable: bool) -> Self {
        self.drugs_by_name = enable;
        self
    }

    #[must_use]
    pub fn with_locations(mut self, enable: bool) -> Self {
        self.locations = enable;
        self
    }

    #[must_use]
    pub fn with_providers(mut self, enable: bool) -> Self {
        self.providers = enable;
        self
    }
}
