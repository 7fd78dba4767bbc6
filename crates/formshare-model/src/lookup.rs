//! Lookup service boundary.
//!
//! The engine never owns metadata; it asks a [`LookupService`] whether an
//! identifier names something. Every method answers `None` on no match.
//! Implementations are expected to be stateless queries and safe to share
//! across threads.

use crate::reference::Reference;

pub trait LookupService: Send + Sync {
    fn find_concept_by_uuid(&self, uuid: &str) -> Option<Reference>;

    fn find_location_by_uuid(&self, uuid: &str) -> Option<Reference>;

    fn find_program_by_uuid(&self, uuid: &str) -> Option<Reference>;

    fn find_person_by_uuid(&self, uuid: &str) -> Option<Reference>;

    fn find_drug_by_uuid(&self, uuid: &str) -> Option<Reference>;

    /// Finds a concept by its code within a mapping source (e.g. `A10` in `ICD10`).
    fn find_concept_by_mapping(&self, code: &str, source: &str) -> Option<Reference>;

    /// Finds a drug by name or by numeric id.
    fn find_drug_by_name_or_id(&self, token: &str) -> Option<Reference>;

    /// Finds a location by an exact identifier (id, uuid or name).
    fn find_location_by_identifier(&self, token: &str) -> Option<Reference>;
}

impl<T: LookupService + ?Sized> LookupService for &T {
    fn find_concept_by_uuid(&self, uuid: &str) -> Option<Reference> {
        (**self).find_concept_by_uuid(uuid)
    }

    fn find_location_by_uuid(&self, uuid: &str) -> Option<Reference> {
        (**self).find_location_by_uuid(uuid)
    }

    fn find_program_by_uuid(&self, uuid: &str) -> Option<Reference> {
        (**self).find_program_by_uuid(uuid)
    }

    fn find_person_by_uuid(&self, uuid: &str) -> Option<Reference> {
        (**self).find_person_by_uuid(uuid)
    }

    fn find_drug_by_uuid(&self, uuid: &str) -> Option<Reference> {
        (**self).find_drug_by_uuid(uuid)
    }

    fn find_concept_by_mapping(&self, code: &str, source: &str) -> Option<Reference> {
        (**self).find_concept_by_mapping(code, source)
    }

    fn find_drug_by_name_or_id(&self, token: &str) -> Option<Reference> {
        (**self).find_drug_by_name_or_id(token)
    }

    fn find_location_by_identifier(&self, token: &str) -> Option<Reference> {
        (**self).find_location_by_identifier(token)
    }
}
