//! Tests for the individual dependency scanners and the scan plan.

mod common;

use common::{Method, RecordingLookup, UUID_A, UUID_B, reference};
use formshare_core::scanners::UUID_RESOLVERS;
use formshare_core::{
    DependencyScanner, DrugNameScanner, LocationScanner, MappedConceptScanner, ProviderScanner,
    ScanPlan, UuidScanner, resolve_uuid,
};
use formshare_model::{DependencySet, InclusionFlags, ReferenceKind};

fn scan(scanner: &dyn DependencyScanner, markup: &str, lookup: &RecordingLookup) -> DependencySet {
    let mut set = DependencySet::new();
    scanner.scan(markup, lookup, &mut set);
    set
}

// ============================================================================
// UUID scanner
// ============================================================================

#[test]
fn uuid_resolves_through_any_single_kind() {
    for kind in ReferenceKind::ALL {
        let expected = reference(kind, "found");
        let lookup = RecordingLookup::new().with(Method::by_uuid(kind), UUID_A, expected.clone());

        let set = scan(&UuidScanner, &format!(r#"<obs conceptId="{UUID_A}"/>"#), &lookup);

        assert_eq!(set.len(), 1, "kind {kind}");
        assert!(set.contains(&expected), "kind {kind}");
    }
}

#[test]
fn earlier_kind_wins_when_two_services_match() {
    let kinds = ReferenceKind::ALL;
    for (i, &first) in kinds.iter().enumerate() {
        for &second in &kinds[i + 1..] {
            let lookup = RecordingLookup::new()
                .with(Method::by_uuid(first), UUID_A, reference(first, "winner"))
                .with(Method::by_uuid(second), UUID_A, reference(second, "loser"));

            let resolved = resolve_uuid(&lookup, UUID_A).expect("resolved");

            assert_eq!(resolved.kind(), first, "{first} before {second}");
            assert!(
                lookup.calls_to(Method::by_uuid(second)).is_empty(),
                "{second} must not be asked once {first} answered"
            );
        }
    }
}

#[test]
fn resolver_order_is_concept_location_program_person_drug() {
    let order: Vec<ReferenceKind> = UUID_RESOLVERS.iter().map(|r| r.kind).collect();
    assert_eq!(
        order,
        vec![
            ReferenceKind::Concept,
            ReferenceKind::Location,
            ReferenceKind::Program,
            ReferenceKind::Person,
            ReferenceKind::Drug,
        ]
    );
}

#[test]
fn unresolved_uuid_asks_every_kind_and_adds_nothing() {
    let lookup = RecordingLookup::new();
    let set = scan(&UuidScanner, &format!("<p>{UUID_B}</p>"), &lookup);

    assert!(set.is_empty());
    assert_eq!(lookup.calls().len(), 5);
}

#[test]
fn repeated_uuid_is_looked_up_each_time_but_stored_once() {
    let lookup = RecordingLookup::new().with(
        Method::ConceptByUuid,
        UUID_A,
        reference(ReferenceKind::Concept, "c"),
    );
    let set = scan(&UuidScanner, &format!("{UUID_A} {UUID_A}"), &lookup);

    assert_eq!(set.len(), 1);
    assert_eq!(lookup.calls_to(Method::ConceptByUuid).len(), 2);
}

// ============================================================================
// Mapped-concept scanner
// ============================================================================

#[test]
fn mapping_tokens_resolve_and_plain_ids_are_skipped() {
    let c1 = reference(ReferenceKind::Concept, "C1");
    let lookup = RecordingLookup::new().with(Method::ConceptByMapping, "ICD10:A10", c1.clone());

    let set = scan(&MappedConceptScanner, r#"<obs conceptId="ICD10:A10,123"/>"#, &lookup);

    assert_eq!(set.len(), 1);
    assert!(set.contains(&c1));
    assert_eq!(lookup.calls_to(Method::ConceptByMapping), vec!["ICD10:A10"]);
}

#[test]
fn mapping_source_and_code_are_trimmed() {
    let lookup = RecordingLookup::new();
    scan(
        &MappedConceptScanner,
        r#"<obs answerConceptIds=" CIEL : 1065 , CIEL:1066"/>"#,
        &lookup,
    );
    assert_eq!(
        lookup.calls_to(Method::ConceptByMapping),
        vec!["CIEL:1065", "CIEL:1066"]
    );
}

#[test]
fn every_concept_attribute_is_scanned() {
    let markup = r#"<obs conceptId="S:1" conceptIds="S:2" groupingConceptId="S:3"
        answerConceptId="S:4" answerConceptIds="S:5"
        discontinuedReasonConceptId="S:6" discontinueReasonAnswers="S:7"/>"#;
    let lookup = RecordingLookup::new();
    scan(&MappedConceptScanner, markup, &lookup);

    let mut codes = lookup.calls_to(Method::ConceptByMapping);
    codes.sort();
    assert_eq!(codes, vec!["S:1", "S:2", "S:3", "S:4", "S:5", "S:6", "S:7"]);
}

#[test]
fn same_mapping_twice_yields_one_reference() {
    let lookup = RecordingLookup::new().with(
        Method::ConceptByMapping,
        "CIEL:5089",
        reference(ReferenceKind::Concept, "weight"),
    );
    let set = scan(
        &MappedConceptScanner,
        r#"<obs conceptId="CIEL:5089"/><obs conceptId="CIEL:5089"/>"#,
        &lookup,
    );
    assert_eq!(set.len(), 1);
}

// ============================================================================
// Drug-name and location scanners
// ============================================================================

#[test]
fn drug_names_are_split_and_trimmed() {
    let aspirin = reference(ReferenceKind::Drug, "aspirin");
    let lookup = RecordingLookup::new().with(Method::DrugByNameOrId, "Aspirin", aspirin.clone());

    let set = scan(
        &DrugNameScanner,
        r#"<drugOrder drugNames="Aspirin, 42 ,,"/>"#,
        &lookup,
    );

    assert_eq!(set.sorted(), vec![&aspirin]);
    assert_eq!(lookup.calls_to(Method::DrugByNameOrId), vec!["Aspirin", "42"]);
}

#[test]
fn location_attributes_only_count_inside_their_tag() {
    let ward = reference(ReferenceKind::Location, "ward");
    let lookup = RecordingLookup::new().with(Method::LocationByIdentifier, "7", ward.clone());

    let set = scan(
        &LocationScanner,
        r#"<obs default="99"/><encounterLocation default="7" order="8,9"/>"#,
        &lookup,
    );

    assert_eq!(set.sorted(), vec![&ward]);
    assert_eq!(
        lookup.calls_to(Method::LocationByIdentifier),
        vec!["7", "8", "9"]
    );
}

#[test]
fn provider_scanner_adds_nothing_and_asks_nothing() {
    let lookup = RecordingLookup::new();
    let set = scan(
        &ProviderScanner,
        &format!(r#"<encounterProvider default="{UUID_A}" role="Clinician"/>"#),
        &lookup,
    );
    assert!(set.is_empty());
    assert!(lookup.calls().is_empty());
}

// ============================================================================
// Scan plan
// ============================================================================

#[test]
fn disabled_scanners_never_call_their_lookups() {
    let markup = r#"<obs conceptId="CIEL:1"/><drugOrder drugNames="Aspirin"/>
        <encounterLocation default="7"/>"#;
    let lookup = RecordingLookup::new();

    ScanPlan::for_flags(InclusionFlags::none()).run(markup, &lookup);

    assert!(lookup.calls_to(Method::ConceptByMapping).is_empty());
    assert!(lookup.calls_to(Method::DrugByNameOrId).is_empty());
    assert!(lookup.calls_to(Method::LocationByIdentifier).is_empty());
}

#[test]
fn plan_merges_results_from_all_enabled_scanners() {
    let markup = format!(
        r#"<obs conceptId="CIEL:1"/><drugOrder drugNames="Aspirin"/>
        <encounterLocation default="7"/><program id="{UUID_A}"/>"#
    );
    let lookup = RecordingLookup::new()
        .with(Method::ConceptByMapping, "CIEL:1", reference(ReferenceKind::Concept, "c"))
        .with(Method::DrugByNameOrId, "Aspirin", reference(ReferenceKind::Drug, "d"))
        .with(Method::LocationByIdentifier, "7", reference(ReferenceKind::Location, "l"))
        .with(Method::ProgramByUuid, UUID_A, reference(ReferenceKind::Program, "p"));

    let set = ScanPlan::for_flags(InclusionFlags::default()).run(&markup, &lookup);

    for kind in [
        ReferenceKind::Concept,
        ReferenceKind::Drug,
        ReferenceKind::Location,
        ReferenceKind::Program,
    ] {
        assert_eq!(set.count_of(kind), 1, "{kind}");
    }
}
