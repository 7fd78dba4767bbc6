//! Dependency extraction and sanitization for shareable form definitions.
//!
//! Start with [`ShareableForm::new`]. The individual stages are public for
//! callers that only need one of them.

pub mod error;
pub mod patterns;
pub mod preprocess;
pub mod scanners;
pub mod shareable;
pub mod strip;

pub use error::{PreprocessError, Result, ShareError};
pub use preprocess::{IdentityPreprocessor, MarkupPreprocessor, StandardPreprocessor};
pub use scanners::{
    DependencyScanner, DrugNameScanner, LocationScanner, MappedConceptScanner, ProviderScanner,
    ScanPlan, UuidScanner, resolve_uuid,
};
pub use shareable::ShareableForm;
pub use strip::strip_local_attributes;
