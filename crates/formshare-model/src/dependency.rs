//! Deduplicated dependency accumulation.

use std::collections::HashSet;
use std::collections::hash_set;

use serde::{Deserialize, Serialize};

use crate::reference::{Reference, ReferenceKind};

/// Unordered set of references a form needs in order to be transported.
///
/// Insertion order is irrelevant and a `(kind, id)` pair is stored once no
/// matter how many times it is inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet {
    references: HashSet<Reference>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference. Returns `true` if it was not already present.
    pub fn insert(&mut self, reference: Reference) -> bool {
        self.references.insert(reference)
    }

    pub fn contains(&self, reference: &Reference) -> bool {
        self.references.contains(reference)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn clear(&mut self) {
        self.references.clear();
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Reference> {
        self.references.iter()
    }

    /// Number of references of the given kind.
    pub fn count_of(&self, kind: ReferenceKind) -> usize {
        self.references.iter().filter(|r| r.kind() == kind).count()
    }

    /// References ordered by kind then id, for stable output.
    pub fn sorted(&self) -> Vec<&Reference> {
        let mut refs: Vec<&Reference> = self.references.iter().collect();
        refs.sort();
        refs
    }
}

impl Extend<Reference> for DependencySet {
    fn extend<T: IntoIterator<Item = Reference>>(&mut self, iter: T) {
        self.references.extend(iter);
    }
}

impl FromIterator<Reference> for DependencySet {
    fn from_iter<T: IntoIterator<Item = Reference>>(iter: T) -> Self {
        Self {
            references: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DependencySet {
    type Item = Reference;
    type IntoIter = hash_set::IntoIter<Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.references.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Reference;
    type IntoIter = hash_set::Iter<'a, Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.references.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(id: &str) -> Reference {
        Reference::new(ReferenceKind::Concept, id).unwrap()
    }

    #[test]
    fn duplicate_inserts_are_absorbed() {
        let mut set = DependencySet::new();
        assert!(set.insert(concept("a")));
        assert!(!set.insert(concept("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sorted_orders_by_kind_then_id() {
        let set: DependencySet = vec![
            Reference::new(ReferenceKind::Drug, "d").unwrap(),
            concept("b"),
            concept("a"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = set.sorted().iter().map(|r| r.external_id()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert_eq!(set.count_of(ReferenceKind::Concept), 2);
    }
}
