//! In-memory metadata catalog.
//!
//! Holds the five entity kinds a form may reference and answers the
//! [`LookupService`] queries the extraction engine issues.

use std::collections::{BTreeMap, HashMap};

use formshare_model::{LookupService, Reference, ReferenceKind};

/// One catalog row: a metadata object of some kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub uuid: String,
    /// Numeric database id, when known.
    pub id: Option<i64>,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(uuid: impl Into<String>, id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            id,
            name: name.into(),
        }
    }
}

/// A `(source, code)` pair naming a concept in an external coding system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct MappingKey {
    /// Uppercased source name.
    source: String,
    code: String,
}

impl MappingKey {
    fn new(source: &str, code: &str) -> Self {
        Self {
            source: source.trim().to_ascii_uppercase(),
            code: code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    entries: BTreeMap<ReferenceKind, Vec<CatalogEntry>>,
    /// Mapping key to concept uuid.
    mappings: HashMap<MappingKey, String>,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. A later entry with the same uuid replaces the earlier one.
    pub fn add(&mut self, kind: ReferenceKind, entry: CatalogEntry) {
        let entries = self.entries.entry(kind).or_default();
        if let Some(existing) = entries.iter_mut().find(|e| e.uuid == entry.uuid) {
            *existing = entry;
        } else {
            entries.push(entry);
        }
    }

    /// Builder-style [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, kind: ReferenceKind, entry: CatalogEntry) -> Self {
        self.add(kind, entry);
        self
    }

    /// Registers a mapping from `source:code` to a concept uuid.
    pub fn add_concept_mapping(
        &mut self,
        concept_uuid: impl Into<String>,
        source: &str,
        code: &str,
    ) {
        self.mappings
            .insert(MappingKey::new(source, code), concept_uuid.into());
    }

    /// Builder-style [`add_concept_mapping`](Self::add_concept_mapping).
    #[must_use]
    pub fn with_mapping(mut self, concept_uuid: &str, source: &str, code: &str) -> Self {
        self.add_concept_mapping(concept_uuid, source, code);
        self
    }

    pub fn entries(&self, kind: ReferenceKind) -> &[CatalogEntry] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, kind: ReferenceKind) -> usize {
        self.entries(kind).len()
    }

    /// Entries across all kinds.
    pub fn total_len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty) && self.mappings.is_empty()
    }

    fn by_uuid(&self, kind: ReferenceKind, uuid: &str) -> Option<Reference> {
        self.entries(kind)
            .iter()
            .find(|entry| entry.uuid == uuid)
            .and_then(|entry| to_reference(kind, entry))
    }

    fn by_id(&self, kind: ReferenceKind, token: &str) -> Option<Reference> {
        let id: i64 = token.parse().ok()?;
        self.entries(kind)
            .iter()
            .find(|entry| entry.id == Some(id))
            .and_then(|entry| to_reference(kind, entry))
    }

    fn by_name(&self, kind: ReferenceKind, name: &str) -> Option<Reference> {
        self.entries(kind)
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .and_then(|entry| to_reference(kind, entry))
    }

    fn by_exact_name(&self, kind: ReferenceKind, name: &str) -> Option<Reference> {
        self.entries(kind)
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| to_reference(kind, entry))
    }
}

fn to_reference(kind: ReferenceKind, entry: &CatalogEntry) -> Option<Reference> {
    Reference::new(kind, entry.uuid.as_str())
        .ok()
        .map(|reference| reference.with_display_name(entry.name.as_str()))
}

impl LookupService for MetadataCatalog {
    fn find_concept_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.by_uuid(ReferenceKind::Concept, uuid)
    }

    fn find_location_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.by_uuid(ReferenceKind::Location, uuid)
    }

    fn find_program_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.by_uuid(ReferenceKind::Program, uuid)
    }

    fn find_person_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.by_uuid(ReferenceKind::Person, uuid)
    }

    fn find_drug_by_uuid(&self, uuid: &str) -> Option<Reference> {
        self.by_uuid(ReferenceKind::Drug, uuid)
    }

    fn find_concept_by_mapping(&self, code: &str, source: &str) -> Option<Reference> {
        let uuid = self.mappings.get(&MappingKey::new(source, code))?;
        self.by_uuid(ReferenceKind::Concept, uuid)
    }

    fn find_drug_by_name_or_id(&self, token: &str) -> Option<Reference> {
        let token = token.trim();
        self.by_id(ReferenceKind::Drug, token)
            .or_else(|| self.by_name(ReferenceKind::Drug, token))
    }

    fn find_location_by_identifier(&self, token: &str) -> Option<Reference> {
        let token = token.trim();
        self.by_id(ReferenceKind::Location, token)
            .or_else(|| self.by_uuid(ReferenceKind::Location, token))
            .or_else(|| self.by_exact_name(ReferenceKind::Location, token))
    }
}
