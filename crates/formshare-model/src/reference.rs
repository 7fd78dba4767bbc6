//! Resolved references to external metadata objects.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The kind of metadata object a form can depend on.
///
/// The declaration order is also the priority order used when a bare
/// UUID-shaped token is resolved: concept, location, program, person, drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A coded concept (question, answer, diagnosis).
    Concept,
    /// A physical or logical location.
    Location,
    /// A patient program.
    Program,
    /// A person (typically a provider).
    Person,
    /// A drug formulation.
    Drug,
}

impl ReferenceKind {
    /// All kinds, in UUID resolution priority order.
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Concept,
        ReferenceKind::Location,
        ReferenceKind::Program,
        ReferenceKind::Person,
        ReferenceKind::Drug,
    ];

    /// Returns the lowercase name used in manifests and catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Concept => "concept",
            ReferenceKind::Location => "location",
            ReferenceKind::Program => "program",
            ReferenceKind::Person => "person",
            ReferenceKind::Drug => "drug",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concept" => Ok(ReferenceKind::Concept),
            "location" => Ok(ReferenceKind::Location),
            "program" => Ok(ReferenceKind::Program),
            "person" => Ok(ReferenceKind::Person),
            "drug" => Ok(ReferenceKind::Drug),
            _ => Err(ModelError::UnknownReferenceKind(s.to_string())),
        }
    }
}

/// A resolved handle to an external metadata object.
///
/// Identity is the pair `(kind, external_id)`. The display name is carried
/// for reporting only and takes no part in equality, hashing or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawReference")]
pub struct Reference {
    kind: ReferenceKind,
    external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Reference {
    /// Creates a reference, rejecting blank identifiers.
    pub fn new(kind: ReferenceKind, external_id: impl Into<String>) -> Result<Self, ModelError> {
        let external_id = external_id.into();
        let trimmed = external_id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyExternalId(kind));
        }
        Ok(Self {
            kind,
            external_id: trimmed.to_string(),
            display_name: None,
        })
    }

    /// Attaches a human-readable name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
        self
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Wire form of [`Reference`], validated through [`Reference::new`].
#[derive(Deserialize)]
struct RawReference {
    kind: ReferenceKind,
    external_id: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl TryFrom<RawReference> for Reference {
    type Error = ModelError;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        let reference = Reference::new(raw.kind, raw.external_id)?;
        Ok(match raw.display_name {
            Some(name) => reference.with_display_name(name),
            None => reference,
        })
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.external_id == other.external_id
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.external_id.hash(state);
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.external_id.cmp(&other.external_id))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} {} ({})", self.kind, self.external_id, name),
            None => write!(f, "{} {}", self.kind, self.external_id),
        }
    }
}
