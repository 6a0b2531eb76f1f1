//! Document-level integration tests
//!
//! Components adopted from XML files on disk: dispatch, warnings, rendering
//! under custom settings and round trips back through XML.

use ddms::components::{Identifier, IdentifierBuilder, Organization, RelatedResource};
use ddms::settings::IndexLevel;
use ddms::{parse_component, Builder, Component, DdmsVersion, Document, Error, MessageKind, Settings, VersionContext};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn load(name: &str) -> (ddms::Element, VersionContext) {
    let root = Document::from_file(fixture(name)).unwrap().into_root().unwrap();
    let ctx = VersionContext::for_element(&root).unwrap();
    (root, ctx)
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_parse_component_dispatches_on_local_name() {
    let (root, ctx) = load("organization_5_0.xml");
    assert_eq!(ctx.version(), DdmsVersion::V5_0);

    let component = parse_component(&root, &ctx).unwrap();
    assert_eq!(component.name(), "organization");
    assert_eq!(component.qualified_name(), "ddms:organization");
    assert_eq!(component.nested_components().len(), 1);
    assert!(component.warnings().is_empty());
}

#[test]
fn test_parse_component_rejects_unknown_elements() {
    let xml = r#"<ddms:resource xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"/>"#;
    let root = Document::from_string(xml).unwrap().into_root().unwrap();
    let ctx = VersionContext::for_element(&root).unwrap();

    let err = parse_component(&root, &ctx).unwrap_err();
    assert!(matches!(err, Error::MalformedComponent { .. }));
}

#[test]
fn test_wrong_component_type_is_malformed() {
    let (root, ctx) = load("organization_5_0.xml");
    let err = Identifier::from_element(&root, &ctx).unwrap_err();
    assert!(matches!(err, Error::MalformedComponent { .. }));
}

#[test]
fn test_namespace_must_match_version() {
    let (root, _) = load("organization_5_0.xml");
    let older = VersionContext::new(DdmsVersion::V4_1);
    let err = Organization::from_element(&root, &older).unwrap_err();
    assert!(matches!(err, Error::MalformedComponent { .. }));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_missing_value_is_fatal_with_locator() {
    let (root, ctx) = load("identifier_missing_value.xml");
    assert_eq!(ctx.version(), DdmsVersion::V4_1);

    let err = parse_component(&root, &ctx).unwrap_err();
    assert!(err.to_string().contains("value attribute is required."));
    assert_eq!(err.locator(), Some("/ddms:identifier"));
}

#[test]
fn test_legacy_related_resources_warns_and_keeps_first() {
    let (root, ctx) = load("related_resources_3_0.xml");
    assert_eq!(ctx.version(), DdmsVersion::V3_0);

    let resource = RelatedResource::from_element(&root, &ctx).unwrap();
    assert_eq!(resource.value(), "http://en.wikipedia.org/wiki/Tank");
    assert_eq!(resource.links().len(), 1);

    let warnings = resource.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, MessageKind::Warning);
    assert_eq!(warnings[0].locator, "/ddms:RelatedResources");
    assert!(warnings[0].text.contains("Only the first one was loaded."));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_text_output_of_organization() {
    let (root, ctx) = load("organization_5_0.xml");
    let component = parse_component(&root, &ctx).unwrap();

    let expected = "\
organization.name: Defense Information Systems Agency
organization.name: DISA
organization.phone: 703-885-1000
organization.email: ddms@fgm.com
organization.subOrganization: Program Executive Office
organization.subOrganization.classification: U
organization.subOrganization.ownerProducer: USA
organization.acronym: DISA
";
    assert_eq!(component.to_text(), expected);
}

#[test]
fn test_json_output_collects_repeated_keys() {
    let (root, ctx) = load("organization_5_0.xml");
    let component = parse_component(&root, &ctx).unwrap();

    let json = component.to_json();
    assert_eq!(
        json["organization.name"],
        serde_json::json!(["Defense Information Systems Agency", "DISA"])
    );
    assert_eq!(json["organization.acronym"], "DISA");
}

#[test]
fn test_related_resource_output_keys() {
    let (root, ctx) = load("related_resources_3_0.xml");
    let component = parse_component(&root, &ctx).unwrap();

    let text = component.to_text();
    assert!(text.contains("relatedResource.relationship: http://purl.org/dc/terms/references\n"));
    assert!(text.contains("relatedResource.direction: outbound\n"));
    assert!(text.contains("relatedResource.link.type: locator\n"));
    assert!(text.contains("relatedResource.link.label: tank\n"));
    assert!(text.contains("relatedResource.classification: U\n"));
}

#[test]
fn test_settings_file_controls_prefix_and_indexing() {
    let settings = Settings::from_file(fixture("settings.json")).unwrap();
    assert_eq!(settings.prefixes.ddms, "d");
    assert_eq!(settings.prefixes.ism, "ISM");
    assert_eq!(settings.output_index_level, IndexLevel::WhenMultiple);

    let (root, ctx) = load("organization_5_0.xml");
    let ctx = ctx.with_settings(settings.clone());
    let component = parse_component(&root, &ctx).unwrap();
    let text = component.to_text();
    assert!(text.contains("organization.name[1]: Defense Information Systems Agency\n"));
    assert!(text.contains("organization.name[2]: DISA\n"));
    assert!(text.contains("organization.phone: 703-885-1000\n"));

    let created = IdentifierBuilder {
        qualifier: Some("http://example.com/scheme".to_string()),
        value: Some("ID-123".to_string()),
    }
    .commit(&VersionContext::new(DdmsVersion::V5_0).with_settings(settings))
    .unwrap()
    .unwrap();
    let xml = created.to_xml().unwrap();
    assert!(xml.starts_with("<d:identifier"));
    assert!(xml.contains(r#"xmlns:d="urn:us:mil:ces:metadata:ddms:5""#));
    assert!(xml.contains(r#"d:value="ID-123""#));
}

#[test]
fn test_settings_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"defaultVersion": "3.1", "jsonPrettyPrint": true}}"#).unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.default_version, DdmsVersion::V3_1);
    assert!(settings.json_pretty_print);
    assert_eq!(settings.prefixes.ddms, "ddms");
    assert_eq!(VersionContext::from_settings(settings).version(), DdmsVersion::V3_1);
}

#[test]
fn test_settings_reject_bad_prefix() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"prefixes": {{"ddms": "1bad"}}}}"#).unwrap();
    assert!(Settings::from_file(file.path()).is_err());
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_adopted_component_round_trips_through_xml() {
    let (root, ctx) = load("organization_5_0.xml");
    let original = Organization::from_element(&root, &ctx).unwrap();

    let xml = original.to_xml().unwrap();
    let reparsed_root = Document::from_string(&xml).unwrap().into_root().unwrap();
    let reparsed = Organization::from_element(&reparsed_root, &ctx).unwrap();

    assert_eq!(reparsed, original);
    assert_eq!(reparsed.to_html(), original.to_html());
}

#[test]
fn test_legacy_round_trip_keeps_wrapper() {
    let (root, ctx) = load("related_resources_3_0.xml");
    let original = RelatedResource::from_element(&root, &ctx).unwrap();

    let rebuilt = ddms::components::RelatedResourceBuilder::from(&original)
        .commit(&ctx)
        .unwrap()
        .unwrap();
    assert_eq!(rebuilt, original);
    assert!(rebuilt.warnings().is_empty());

    let xml = rebuilt.to_xml().unwrap();
    assert!(xml.contains("<ddms:RelatedResources"));
    assert!(xml.contains("<ddms:RelatedResource "));
}
