//! End-to-end tests for building shareable forms.

mod common;

use common::{Method, RecordingLookup, UUID_A, UUID_B, reference};
use formshare_core::{
    IdentityPreprocessor, MarkupPreprocessor, PreprocessError, ShareError, ShareableForm,
    StandardPreprocessor,
};
use formshare_model::{DependencySet, FormDocument, FormMetadata, InclusionFlags, ReferenceKind};

/// Always fails, as a preprocessor facing broken template syntax would.
struct BrokenPreprocessor;

impl MarkupPreprocessor for BrokenPreprocessor {
    fn expand_macros(&self, _markup: &str) -> Result<String, PreprocessError> {
        Err(PreprocessError::UnterminatedMacros)
    }

    fn expand_templates(&self, markup: &str) -> Result<String, PreprocessError> {
        Ok(markup.to_string())
    }
}

#[test]
fn preprocess_failure_aborts_the_whole_pass() {
    let form = FormDocument::new("<macros>\nweight=5089\n");
    let result = ShareableForm::new(
        &form,
        InclusionFlags::default(),
        &RecordingLookup::new(),
        &StandardPreprocessor,
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        ShareError::Preprocess(PreprocessError::UnterminatedMacros)
    ));
    assert!(err.to_string().contains("unable to process macros and templates"));
}

#[test]
fn dependencies_come_from_expansion_but_markup_stays_unexpanded() {
    let markup = "<htmlform><macros>\nweight=CIEL:5089\n</macros><obs conceptId=\"$weight\"/></htmlform>";
    let weight = reference(ReferenceKind::Concept, "weight");
    let lookup = RecordingLookup::new().with(Method::ConceptByMapping, "CIEL:5089", weight.clone());

    let shareable = ShareableForm::new(
        &FormDocument::new(markup),
        InclusionFlags::default(),
        &lookup,
        &StandardPreprocessor,
    )
    .unwrap();

    assert_eq!(shareable.dependencies().sorted(), vec![&weight]);
    assert_eq!(shareable.sanitized_markup(), markup);
}

#[test]
fn templated_uuids_are_resolved() {
    let markup = format!(
        r#"<repeat><template><obs conceptId="{{c}}"/></template><render c="{UUID_A}"/><render c="{UUID_B}"/></repeat>"#
    );
    let lookup = RecordingLookup::new()
        .with(Method::ConceptByUuid, UUID_A, reference(ReferenceKind::Concept, "a"))
        .with(Method::DrugByUuid, UUID_B, reference(ReferenceKind::Drug, "b"));

    let shareable = ShareableForm::new(
        &FormDocument::new(markup),
        InclusionFlags::default(),
        &lookup,
        &StandardPreprocessor,
    )
    .unwrap();

    assert_eq!(shareable.dependencies().count_of(ReferenceKind::Concept), 1);
    assert_eq!(shareable.dependencies().count_of(ReferenceKind::Drug), 1);
}

#[test]
fn stripped_attributes_are_never_scanned() {
    let markup = format!(
        r#"<encounterProvider default="{UUID_A}"/><encounterLocation default="{UUID_B}"/>"#
    );
    let lookup = RecordingLookup::new()
        .with(Method::PersonByUuid, UUID_A, reference(ReferenceKind::Person, "doc"))
        .with(Method::LocationByUuid, UUID_B, reference(ReferenceKind::Location, "ward"));
    let flags = InclusionFlags::default().with_locations(false);

    let shareable =
        ShareableForm::new(&FormDocument::new(markup), flags, &lookup, &IdentityPreprocessor)
            .unwrap();

    assert!(shareable.dependencies().is_empty());
    assert!(lookup.calls().is_empty());
    insta::assert_snapshot!(shareable.sanitized_markup(), @"<encounterProvider/><encounterLocation/>");
}

#[test]
fn included_location_is_kept_and_resolved() {
    let markup = r#"<encounterLocation default="7"/>"#;
    let ward = reference(ReferenceKind::Location, "ward");
    let lookup = RecordingLookup::new().with(Method::LocationByIdentifier, "7", ward.clone());

    let shareable = ShareableForm::new(
        &FormDocument::new(markup),
        InclusionFlags::default(),
        &lookup,
        &IdentityPreprocessor,
    )
    .unwrap();

    assert_eq!(shareable.sanitized_markup(), markup);
    assert!(shareable.dependencies().contains(&ward));
}

#[test]
fn recalculation_replaces_the_stored_set() {
    let markup = r#"<obs conceptId="CIEL:1"/>"#;
    let one = reference(ReferenceKind::Concept, "one");
    let lookup = RecordingLookup::new().with(Method::ConceptByMapping, "CIEL:1", one.clone());
    let mut shareable = ShareableForm::new(
        &FormDocument::new(markup),
        InclusionFlags::default(),
        &lookup,
        &IdentityPreprocessor,
    )
    .unwrap();

    let mut manual = DependencySet::new();
    manual.insert(reference(ReferenceKind::Drug, "stale"));
    shareable.set_dependencies(manual);
    assert_eq!(shareable.dependencies().count_of(ReferenceKind::Drug), 1);

    shareable
        .calculate_dependencies(&lookup, &IdentityPreprocessor)
        .unwrap();
    assert_eq!(shareable.dependencies().sorted(), vec![&one]);
}

#[test]
fn failed_recalculation_leaves_no_partial_set() {
    let lookup = RecordingLookup::new().with(
        Method::ConceptByMapping,
        "CIEL:1",
        reference(ReferenceKind::Concept, "one"),
    );
    let mut shareable = ShareableForm::new(
        &FormDocument::new(r#"<obs conceptId="CIEL:1"/>"#),
        InclusionFlags::default(),
        &lookup,
        &IdentityPreprocessor,
    )
    .unwrap();
    assert_eq!(shareable.dependencies().len(), 1);

    let result = shareable.calculate_dependencies(&lookup, &BrokenPreprocessor);

    assert!(result.is_err());
    assert!(shareable.dependencies().is_empty());
}

#[test]
fn metadata_travels_and_source_is_untouched() {
    let markup = r#"<encounterProvider role="Clinician"/>"#;
    let metadata = FormMetadata::new()
        .with_uuid("form-uuid")
        .with_name("Vitals")
        .with_description("Height and weight");
    let source = FormDocument::new(markup).with_metadata(metadata.clone());

    let shareable = ShareableForm::new(
        &source,
        InclusionFlags::default(),
        &RecordingLookup::new(),
        &IdentityPreprocessor,
    )
    .unwrap();

    assert_eq!(source.markup, markup);
    assert_eq!(shareable.metadata(), &metadata);
    assert_eq!(shareable.flags(), InclusionFlags::default());

    let manifest = shareable.manifest();
    assert_eq!(manifest.form.name.as_deref(), Some("Vitals"));
    assert!(manifest.dependencies.is_empty());

    let exported = shareable.into_form();
    assert_eq!(exported.metadata, metadata);
    assert_eq!(exported.markup, "<encounterProvider/>");
}
