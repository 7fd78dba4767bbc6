//! Serializable summary of a shared form, handed to packaging tools.

use serde::{Deserialize, Serialize};

use crate::dependency::DependencySet;
use crate::form::FormMetadata;
use crate::options::InclusionFlags;
use crate::reference::{Reference, ReferenceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub form: FormMetadata,
    pub flags: InclusionFlags,
    /// Sorted by kind then id so that repeated exports diff cleanly.
    pub dependencies: Vec<Reference>,
}

impl DependencyManifest {
    pub fn new(form: FormMetadata, flags: InclusionFlags, dependencies: &DependencySet) -> Self {
        Self {
            form,
            flags,
            dependencies: dependencies.sorted().into_iter().cloned().collect(),
        }
    }

    pub fn count_of(&self, kind: ReferenceKind) -> usize {
        self.dependencies
            .iter()
            .filter(|reference| reference.kind() == kind)
            .count()
    }
}
