use std::fs;
use std::path::PathBuf;

use resiliency_core::{Feature, Grade, Report, Resource, ScoringError, Weight};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    features: Vec<CaseFeature>,
    expected_score: f64,
}

#[derive(Debug, Deserialize)]
struct CaseFeature {
    name: String,
    weight: i32,
    grade: i32,
}

#[test]
fn scoring_cases_pass() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fixture = root
        .join("..")
        .join("..")
        .join("data")
        .join("fixtures")
        .join("scoring_cases.json");

    let content = fs::read_to_string(&fixture)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", fixture.display()));
    let cases: Vec<Case> = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", fixture.display()));

    for case in cases {
        let features = case
            .features
            .into_iter()
            .map(|f| {
                let mut feature = Feature::with_weight_ordinal(f.name, f.weight);
                feature.set_grade_ordinal(f.grade);
                feature
            })
            .collect::<Vec<_>>();

        let resource = Resource::with_features(case.name.clone(), features);
        assert_eq!(
            resource.overall_score(),
            case.expected_score,
            "case {} failed",
            case.name
        );
    }
}

#[test]
fn missing_collections_are_invalid_arguments() {
    let report = Report::try_new("Contoso", None);
    assert!(matches!(
        report,
        Err(ScoringError::InvalidArgument { name: "resources", .. })
    ));

    let resource = Resource::try_new("web-1", None::<Vec<(&str, Weight)>>);
    assert!(matches!(
        resource,
        Err(ScoringError::InvalidArgument { name: "weights", .. })
    ));
}

#[test]
fn serialized_shapes_use_pascal_case() {
    let mut resource = Resource::new(
        "contoso-web",
        [("Backups", Weight::Mandatory), ("Auto-heal", Weight::GoodToHave)],
    );
    for feature in resource.features_mut() {
        feature.set_grade(Grade::Implemented);
    }
    resource
        .feature_mut("Auto-heal")
        .expect("feature")
        .set_solution_comments("Configure auto-heal rules.");

    let report = Report::new("Contoso", vec![resource.clone()]);

    assert_eq!(
        serde_json::to_value(&report).expect("report json"),
        json!({ "CustomerName": "Contoso" })
    );
    assert_eq!(
        serde_json::to_value(&resource).expect("resource json"),
        json!({ "Name": "contoso-web", "OverallScore": 100.0 })
    );
    assert_eq!(
        serde_json::to_value(resource.features()).expect("features json"),
        json!([
            {
                "Name": "Backups",
                "FeatureWeight": 25,
                "ImplementationGrade": 2,
                "GradeComments": "",
                "SolutionComments": ""
            },
            {
                "Name": "Auto-heal",
                "FeatureWeight": 1,
                "ImplementationGrade": 2,
                "GradeComments": "",
                "SolutionComments": "Configure auto-heal rules."
            }
        ])
    );
}

#[test]
fn features_decode_from_wire_form() {
    let features: Vec<Feature> = serde_json::from_value(json!([
        { "Name": "Backups", "FeatureWeight": 5, "ImplementationGrade": 1 },
        { "Name": "Bogus", "FeatureWeight": 4, "ImplementationGrade": 2 }
    ]))
    .expect("decode features");

    assert_eq!(features[0].weight(), Some(Weight::Important));
    assert_eq!(features[0].grade(), Some(Grade::PartiallyImplemented));
    assert!(features[1].weight().is_none());

    let resource = Resource::with_features("web-1", features);
    assert_eq!(resource.overall_score(), 50.0);
}
