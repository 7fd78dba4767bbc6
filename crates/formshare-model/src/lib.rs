pub mod dependency;
pub mod error;
pub mod form;
pub mod lookup;
pub mod manifest;
pub mod options;
pub mod reference;

pub use dependency::DependencySet;
pub use error::{ModelError, Result};
pub use form::{FormDocument, FormMetadata};
pub use lookup::LookupService;
pub use manifest::DependencyManifest;
pub use options::InclusionFlags;
pub use reference::{Reference, ReferenceKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_serializes_sorted_dependencies() {
        let mut set = DependencySet::new();
        set.insert(Reference::new(ReferenceKind::Drug, "d-1").unwrap());
        set.insert(
            Reference::new(ReferenceKind::Concept, "c-1")
                .unwrap()
                .with_display_name("Weight (kg)"),
        );

        let manifest = DependencyManifest::new(
            FormMetadata::new().with_name("Vitals"),
            InclusionFlags::default(),
            &set,
        );
        let json = serde_json::to_value(&manifest).expect("serialize manifest");

        assert_eq!(json["form"]["name"], "Vitals");
        assert_eq!(json["flags"]["providers"], false);
        assert_eq!(json["dependencies"][0]["kind"], "concept");
        assert_eq!(json["dependencies"][0]["display_name"], "Weight (kg)");
        assert_eq!(json["dependencies"][1]["kind"], "drug");
        assert!(json["dependencies"][1].get("display_name").is_none());

        let round: DependencyManifest =
            serde_json::from_value(json).expect("deserialize manifest");
        assert_eq!(round.count_of(ReferenceKind::Concept), 1);
    }
}
