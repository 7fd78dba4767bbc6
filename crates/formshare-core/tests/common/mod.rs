//! Shared fixtures for formshare-core integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use formshare_model::{LookupService, Reference, ReferenceKind};

pub const UUID_A: &str = "aaaaaaaa-1111-2222-3333-444444444444";
pub const UUID_B: &str = "bbbbbbbb-1111-2222-3333-444444444444";

/// One method of [`LookupService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    ConceptByUuid,
    LocationByUuid,
    ProgramByUuid,
    PersonByUuid,
    DrugByUuid,
    ConceptByMapping,
    DrugByNameOrId,
    LocationByIdentifier,
}

impl Method {
    pub fn by_uuid(kind: ReferenceKind) -> Self {
        match kind {
            ReferenceKind::Concept => Self::ConceptByUuid,
            ReferenceKind::Location => Self::LocationByUuid,
            ReferenceKind::Program => Self::ProgramByUuid,
            ReferenceKind::Person => Self::PersonByUuid,
            ReferenceKind::Drug => Self::DrugByUuid,
        }
    }
}

/// Canned answers plus a log of every call made.
///
/// Mapping lookups are keyed as `SOURCE:CODE`.
#[derive(Default)]
pub struct RecordingLookup {
    answers: HashMap<(Method, String), Reference>,
    calls: Mutex<Vec<(Method, String)>>,
}

impl RecordingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, method: Method, key: &str, reference: Reference) -> Self {
        self.answers.insert((method, key.to_string()), reference);
        self
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(called, _)| *called == method)
            .map(|(_, key)| key)
            .collect()
    }

    fn answer(&self, method: Method, key: String) -> Option<Reference> {
        let found = self.answers.get(&(method, key.clone())).cloned();
        self.calls.lock().unwrap().push((method, key));
        found
    }
}

impl LookupService for RecordingLookup {
    fn find_concept_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.answer(Method::ConceptByUuid, uuid.to_string())
    }

    fn find_location_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.answer(Method::LocationByUuid, uuid.to_string())
    }

    fn find_program_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.answer(Method::ProgramByUuid, uuid.to_string())
    }

    fn find_person_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.answer(Method::PersonByUuid, uuid.to_string())
    }

    fn find_drug_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.answer(Method::DrugByUuid, uuid.to_string())
    }

    fn find_concept_by_mapping(&self, code: &str, source: &str) -> Option<Reference> {
        self.answer(Method::ConceptByMapping, format!("{source}:{code}"))
    }

    fn find_drug_by_name_or_id(&self, token: &str) -> Option<Reference> {
        self.answer(Method::DrugByNameOrId, token.to_string())
    }

    fn find_location_by_identifier(&self, token: &str) -> Option<Reference> {
        self.answer(Method::LocationByIdentifier, token.to_string())
    }
}

pub fn reference(kind: ReferenceKind, id: &str) -> Reference {
    Reference::new(kind, id).unwrap()
}
