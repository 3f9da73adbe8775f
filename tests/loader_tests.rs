use std::io::Write;

use content_mapping::mapping::element_model::Element;
use content_mapping::mapping::error::MappingError;
use content_mapping::mapping::loader::{MappingFormat, load_mapping, parse_mapping};

const ADDRESS_YAML: &str = r#"
name: contact
elements:
  - id: 1
    label: Name
  - id: "5"
    label: Address
    type: component
    children:
      - id: 1
        label: Street
      - id: 2
        label: City
"#;

fn malformed_path(err: MappingError) -> (String, String) {
    match err {
        MappingError::MalformedElement { path, reason } => (path, reason),
        other => panic!("Expected MalformedElement, got {:?}", other),
    }
}

#[test]
fn parse_yaml_mapping() {
    let mapping = parse_mapping(ADDRESS_YAML, MappingFormat::Yaml).unwrap();
    assert_eq!(mapping.name, "contact");
    assert_eq!(
        mapping.elements,
        vec![
            Element::plain("1", "Name"),
            Element::component(
                "5",
                "Address",
                vec![Element::plain("1", "Street"), Element::plain("2", "City")],
            ),
        ]
    );
}

#[test]
fn parse_json_mapping() {
    let json = r#"{
        "name": "contact",
        "elements": [
            {"id": "1", "label": "Name"},
            {"id": 5, "label": "Address", "type": "component", "children": []}
        ]
    }"#;
    let mapping = parse_mapping(json, MappingFormat::Json).unwrap();
    assert_eq!(mapping.elements.len(), 2);
    assert_eq!(mapping.elements[1], Element::component("5", "Address", vec![]));
}

#[test]
fn parse_rejects_missing_id() {
    let yaml = "elements:\n  - label: Name\n";
    let (path, reason) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(path, "elements[0]");
    assert_eq!(reason, "missing id");
}

#[test]
fn parse_rejects_blank_id() {
    let yaml = "elements:\n  - id: '  '\n    label: Name\n";
    let (_, reason) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(reason, "missing id");
}

#[test]
fn parse_rejects_missing_label() {
    let yaml = "elements:\n  - id: 1\n";
    let (_, reason) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(reason, "missing label");
}

#[test]
fn parse_rejects_component_without_children() {
    let yaml = "elements:\n  - id: 1\n    label: Name\n  - id: 2\n    label: Group\n    type: component\n";
    let (path, reason) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(path, "elements[1]");
    assert_eq!(reason, "component has no children list");
}

#[test]
fn parse_rejects_plain_with_children() {
    let yaml = "elements:\n  - id: 1\n    label: Name\n    children: []\n";
    let (_, reason) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(reason, "plain element has children");
}

#[test]
fn parse_reports_nested_path() {
    let yaml = r#"
elements:
  - id: 5
    label: Address
    type: component
    children:
      - id: 1
        label: Street
      - label: City
"#;
    let (path, _) = malformed_path(parse_mapping(yaml, MappingFormat::Yaml).unwrap_err());
    assert_eq!(path, "elements[0]/children[1]");
}

#[test]
fn parse_rejects_unknown_type() {
    let yaml = "elements:\n  - id: 1\n    label: Name\n    type: widget\n";
    let err = parse_mapping(yaml, MappingFormat::Yaml).unwrap_err();
    assert!(matches!(err, MappingError::Yaml { .. }), "Got {:?}", err);
}

#[test]
fn load_mapping_from_file_uses_stem_as_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newsletter.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "elements:\n  - id: 1\n    label: Email").unwrap();

    let mapping = load_mapping(&path).unwrap();
    assert_eq!(mapping.name, "newsletter");
    assert_eq!(mapping.elements, vec![Element::plain("1", "Email")]);
}

#[test]
fn load_mapping_json_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.json");
    std::fs::write(&path, r#"{"name":"m","elements":[{"id":"1","label":"A"}]}"#).unwrap();

    let mapping = load_mapping(&path).unwrap();
    assert_eq!(mapping.name, "m");
    assert_eq!(mapping.elements.len(), 1);
}

#[test]
fn load_mapping_missing_file() {
    let err = load_mapping("/nonexistent/mapping.yaml").unwrap_err();
    assert!(matches!(err, MappingError::Read { .. }));
}

#[test]
fn format_from_path() {
    use std::path::Path;
    assert_eq!(MappingFormat::from_path(Path::new("a.json")), MappingFormat::Json);
    assert_eq!(MappingFormat::from_path(Path::new("a.JSON")), MappingFormat::Json);
    assert_eq!(MappingFormat::from_path(Path::new("a.yml")), MappingFormat::Yaml);
    assert_eq!(MappingFormat::from_path(Path::new("noext")), MappingFormat::Yaml);
}
