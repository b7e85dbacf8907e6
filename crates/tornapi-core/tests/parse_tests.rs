use tornapi_core::error::ParseError;
use tornapi_core::legacy::{FieldDescriptor, FieldKey, SectionSchema, StructureKind};
use tornapi_core::parse;
use tornapi_core::parse::document::RefOr;

const TORN: &str = include_str!("fixtures/torn-openapi.json");

#[test]
fn parse_torn_openapi_json() {
    let spec = parse::from_json(TORN).expect("should parse fixture");
    assert_eq!(spec.openapi, "3.1.0");
    assert_eq!(spec.info.title, "Torn API");
    assert_eq!(spec.paths.len(), 2);

    let basic = spec
        .paths
        .get("/user/basic")
        .and_then(|item| item.get.as_ref())
        .expect("should have GET /user/basic");
    assert_eq!(basic.operation_id.as_deref(), Some("getUserBasic"));
    assert_eq!(basic.parameters.len(), 4);
    assert_eq!(basic.parameters[0].ref_name(), Some("ApiKey"));
    assert!(matches!(basic.parameters[0], RefOr::Ref { .. }));
    assert_eq!(
        basic
            .ok_schema("application/json")
            .and_then(|schema| schema.ref_name()),
        Some("UserBasicResponse")
    );

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 5);
    assert_eq!(components.parameters.len(), 3);
}

#[test]
fn parse_invalid_version() {
    let json = r#"{ "openapi": "2.0", "info": { "title": "Old", "version": "1" }, "paths": {} }"#;
    let err = parse::from_json(json).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "2.0"));
}

#[test]
fn parse_yaml_document() {
    let yaml = r##"
openapi: 3.0.3
info:
  title: Torn API
  version: 2.0.0
paths:
  /torn/items:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/TornItemsResponse"
"##;
    let spec = parse::from_yaml(yaml).expect("should parse yaml");
    let items = spec.paths["/torn/items"].get.as_ref().unwrap();
    assert!(items.ok_schema("application/json").is_some());
    assert!(spec.components.is_none());
}

#[test]
fn parse_rejects_malformed_json() {
    assert!(matches!(
        parse::from_json("{ \"openapi\": "),
        Err(ParseError::Json(_))
    ));
}

#[test]
fn parse_legacy_section_schema() {
    let json = r#"{
        "selections": [{
            "name": "bars",
            "schema": {
                "energy": { "current": "Integer", "maximum": "Integer" },
                "chain": { "type": "Integer" },
                "state": { "structure": 7 },
                "<bar name>": "Integer",
                "'quoted'": "String"
            },
            "structures": [{ "id": "7", "type": "Enum", "values": ["On", "Off"] }],
            "params": ["timestamp"],
            "id": { "optional": false }
        }]
    }"#;
    let schema: SectionSchema = serde_json::from_str(json).expect("should parse legacy schema");
    let bars = &schema.selections[0];
    assert!(bars.requires_id());
    assert_eq!(bars.params, ["timestamp"]);

    let entries: Vec<_> = bars.schema.iter().collect();
    assert!(matches!(entries[0], (FieldKey::Plain(k), FieldDescriptor::Nested(m)) if k == "energy" && m.len() == 2));
    assert!(matches!(entries[1].1, FieldDescriptor::Primitive(t) if t == "Integer"));
    assert!(matches!(entries[2].1, FieldDescriptor::Structure(id) if id.to_string() == "7"));
    assert!(entries[3].0.is_placeholder());
    assert!(matches!(entries[4].0, FieldKey::Quoted(_)));

    assert!(matches!(&bars.structures[0].kind, StructureKind::Enum(values) if values == &["On", "Off"]));
}

#[test]
fn parse_legacy_rejects_bad_descriptor() {
    let json = r#"{ "selections": [{ "name": "x", "schema": { "level": 5 } }] }"#;
    assert!(serde_json::from_str::<SectionSchema>(json).is_err());
}
