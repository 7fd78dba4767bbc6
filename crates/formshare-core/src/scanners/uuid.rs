//! Resolution of bare UUID-shaped tokens.

use formshare_model::{DependencySet, LookupService, Reference, ReferenceKind};
use tracing::{trace, warn};

use super::DependencyScanner;
use crate::patterns::UUID_PATTERN;

type Resolve = fn(&dyn LookupService, &str) -> Option<Reference>;

/// A lookup capability for one reference kind.
pub struct UuidResolver {
    pub kind: ReferenceKind,
    resolve: Resolve,
}

impl UuidResolver {
    pub fn resolve(&self, lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
        (self.resolve)(lookup, uuid)
    }
}

/// Resolvers in priority order. The first one to answer wins.
pub const UUID_RESOLVERS: [UuidResolver; 5] = [
    UuidResolver {
        kind: ReferenceKind::Concept,
        resolve: concept,
    },
    UuidResolver {
        kind: ReferenceKind::Location,
        resolve: location,
    },
    UuidResolver {
        kind: ReferenceKind::Program,
        resolve: program,
    },
    UuidResolver {
        kind: ReferenceKind::Person,
        resolve: person,
    },
    UuidResolver {
        kind: ReferenceKind::Drug,
        resolve: drug,
    },
];

fn concept(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    lookup.find_concept_by_uuid(uuid)
}

fn location(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    lookup.find_location_by_uuid(uuid)
}

fn program(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    lookup.find_program_by_uuid(uuid)
}

fn person(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    lookup.find_person_by_uuid(uuid)
}

fn drug(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    lookup.find_drug_by_uuid(uuid)
}

/// Resolve `uuid` against each kind in priority order.
pub fn resolve_uuid(lookup: &dyn LookupService, uuid: &str) -> Option<Reference> {
    UUID_RESOLVERS
        .iter()
        .find_map(|resolver| resolver.resolve(lookup, uuid))
}

/// Finds every five-block hyphenated token and resolves it.
///
/// The shape is only a heuristic, so a token nothing recognises is logged
/// as a warning and skipped. Repeated tokens are looked up again each time.
pub struct UuidScanner;

impl DependencyScanner for UuidScanner {
    fn name(&self) -> &'static str {
        "uuid"
    }

    fn scan(&self, markup: &str, lookup: &dyn LookupService, dependencies: &mut DependencySet) {
        for token in UUID_PATTERN.find_iter(markup).map(|m| m.as_str()) {
            match resolve_uuid(lookup, token) {
                Some(reference) => {
                    trace!(uuid = token, kind = %reference.kind(), "resolved uuid");
                    dependencies.insert(reference);
                }
                None => {
                    warn!(uuid = token, "unable to load metadata object with uuid");
                }
            }
        }
    }
}
