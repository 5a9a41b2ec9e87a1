//! JSON shape and JsonSchema validation for the composed entity types.

use chrono::{TimeZone, Utc};
use schemars::schema_for;

use parts_core::audit::{AuditDraft, AuditFields};
use parts_core::entities::{BaseComponent, Category, Component, WebEntity};
use parts_core::enums::{EntityKind, MembershipKind, WebKind};
use parts_core::ordering::OrderedMembership;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! validates_against_schema {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_component() -> Component {
    let created = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
    Component {
        base: BaseComponent {
            id: 42,
            type_id: 1,
            library_id: 2,
            description: Some("100nF 50V X7R".into()),
            value: Some("100n".into()),
            autogenerate_description: true,
            autogenerate_value: false,
        },
        audit: AuditFields::for_insert(3, AuditDraft::default(), created),
        lifecycle_state_id: 1,
        manufacturer_id: 9,
        mpn: "GRM188R71H104KA93D".into(),
        mounting_type_id: 1,
        package_id: Some(4),
        remarks: None,
        stock: 1200,
        x: Some(1.6),
        y: Some(0.8),
        z: None,
    }
}

validates_against_schema!(component_schema, Component, sample_component());

validates_against_schema!(
    web_entity_schema,
    WebEntity,
    WebEntity {
        id: 1,
        kind: WebKind::Company,
        name: "Acme".into(),
        url: "http://x.com".into(),
    }
);

validates_against_schema!(
    category_schema,
    Category,
    Category {
        id: 1,
        name: "Passives".into(),
        description: None,
        content_type: EntityKind::Component,
    }
);

validates_against_schema!(
    membership_schema,
    OrderedMembership,
    OrderedMembership {
        id: 5,
        kind: MembershipKind::FNode,
        parent_id: 42,
        child_id: 7,
        order: 2,
    }
);

#[test]
fn component_json_is_flat() {
    let json = serde_json::to_value(sample_component()).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["creator_id"], 3);
    assert_eq!(json["created"], json["last_modified"]);
    assert_eq!(json["mpn"], "GRM188R71H104KA93D");
    assert!(json.get("base").is_none());
    assert!(json.get("audit").is_none());

    let back: Component = serde_json::from_value(json).unwrap();
    assert_eq!(back, sample_component());
}
