use tornapi_core::error::TransformError;
use tornapi_core::ir::{IrShape, IrType};
use tornapi_core::normalize::normalize;
use tornapi_core::parse;
use tornapi_core::sections::extract_v2_sections;
use tornapi_core::transform::component_schemas;

const TORN: &str = include_str!("fixtures/torn-openapi.json");

#[test]
fn extract_sections_from_fixture() {
    let spec = parse::from_json(TORN).unwrap();
    let sections = extract_v2_sections(&spec);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "user");
    assert_eq!(sections[1].name, "faction");

    let basic = &sections[0].selections["basic"];
    assert_eq!(basic.response.as_deref(), Some("UserBasicResponse"));
    let params: Vec<_> = basic.params.iter().map(String::as_str).collect();
    assert_eq!(params, ["timestamp", "striptags"]);

    let members = &sections[1].selections["members"];
    assert_eq!(members.response.as_deref(), Some("FactionMembersResponse"));
    let params: Vec<_> = members.params.iter().map(String::as_str).collect();
    assert_eq!(params, ["id"]);
}

#[test]
fn component_schemas_follow_declaration_order() {
    let mut spec = parse::from_json(TORN).unwrap();
    normalize(&mut spec);
    let schemas = component_schemas(&spec).unwrap();
    let names: Vec<_> = schemas.iter().map(|s| s.name().identifier.as_str()).collect();
    assert_eq!(
        names,
        [
            "UserStatusState",
            "UserBasic",
            "UserBasicResponse",
            "FactionMember",
            "FactionMembersResponse"
        ]
    );
    assert!(matches!(schemas[0].shape, IrShape::Enum(_)));
}

#[test]
fn component_names_are_kept_or_sanitized() {
    let spec = parse::from_json(
        r#"{
            "openapi": "3.1.0",
            "info": { "title": "t", "version": "1" },
            "paths": {},
            "components": { "schemas": {
                "FactionID": { "type": "integer" },
                "FactionId": { "type": "integer" },
                "2fa status": { "type": "string" }
            } }
        }"#,
    )
    .unwrap();
    let schemas = component_schemas(&spec).unwrap();
    let names: Vec<_> = schemas.iter().map(|s| s.name().identifier.as_str()).collect();
    assert_eq!(names, ["FactionID", "FactionId", "_2faStatus"]);
}

#[test]
fn colliding_component_names_are_rejected() {
    let spec = parse::from_json(
        r#"{
            "openapi": "3.1.0",
            "info": { "title": "t", "version": "1" },
            "paths": {},
            "components": { "schemas": {
                "KeyInfo": { "type": "string" },
                "key-info": { "type": "integer" }
            } }
        }"#,
    )
    .unwrap();
    let err = component_schemas(&spec).unwrap_err();
    let TransformError::NameCollision { identifier, first, second } = err else {
        panic!("expected a name collision, got {err}");
    };
    assert_eq!(identifier, "KeyInfo");
    assert_eq!((first.as_str(), second.as_str()), ("KeyInfo", "key-info"));
}

#[test]
fn normalized_all_of_property_becomes_reference() {
    let mut spec = parse::from_json(TORN).unwrap();
    normalize(&mut spec);
    let schemas = component_schemas(&spec).unwrap();
    let IrShape::Object { fields, .. } = &schemas[2].shape else {
        panic!("UserBasicResponse should be an object");
    };
    let profile = &fields[0];
    assert_eq!(profile.original_name, "profile");
    assert!(profile.required);
    assert_eq!(profile.field_type, IrType::Ref("UserBasic".into()));
}

#[test]
fn v2_sections_snapshot() {
    let spec = parse::from_json(TORN).unwrap();
    insta::assert_yaml_snapshot!(extract_v2_sections(&spec), @r"
    - name: user
      selections:
        basic:
          response: UserBasicResponse
          params:
            - timestamp
            - striptags
    - name: faction
      selections:
        members:
          response: FactionMembersResponse
          params:
            - id
    ");
}
