//! Form documents and their bookkeeping metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping fields cloned alongside the markup when a form is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Identifier of the owning form record.
    pub form_id: Option<i64>,
    pub creator: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub changed_by: Option<String>,
    pub date_changed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub retired: bool,
    pub retired_by: Option<String>,
    pub date_retired: Option<DateTime<Utc>>,
    pub retire_reason: Option<String>,
}

impl FormMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A templated form definition: markup plus its bookkeeping metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    pub metadata: FormMetadata,
    /// Raw, unexpanded form markup.
    pub markup: String,
}

impl FormDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            metadata: FormMetadata::default(),
            markup: markup.into(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: FormMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
