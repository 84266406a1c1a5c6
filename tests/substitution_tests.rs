mod common;

use common::*;
use form_metadata_sharing::*;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::error::Error as _;

#[test]
fn test_form_substitution_rewrites_typed_values() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(DRUG_ORDER_FORM).with_name("prescriptions");

    let report = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap();

    assert_eq!(
        option_values(&form.xml_data),
        vec![
            "target-aspirin-uuid",
            "target-aspirin-uuid",
            "target-oral-uuid",
            "",
            "target-od-uuid",
            "SIMPLE",
        ]
    );
    assert!(form.xml_data.contains(r#"<orderProperty name="careSetting" value="target-outpatient-uuid"/>"#));
    assert!(form.xml_data.contains(r#"<orderProperty name="dosingType" value="SIMPLE">"#));
    assert_eq!(
        report,
        SubstitutionReport {
            values_seen: 5,
            values_changed: 5,
            compound_nodes_skipped: 1,
        }
    );
}

#[test]
fn test_route_option_scenario() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(
        r#"<htmlform><drugOrder><orderProperty name="route"><option value="123"/></orderProperty></drugOrder></htmlform>"#,
    );
    let strategy = |value: &str, entity_type: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
        assert_eq!(entity_type, EntityType::Concept);
        Ok(if value == "123" { "456".to_string() } else { value.to_string() })
    };

    descriptor
        .perform_substitutions(&mut form, &strategy, &SubstitutionMap::new())
        .unwrap();

    assert_eq!(
        form.xml_data,
        r#"<htmlform><drugOrder><orderProperty name="route"><option value="456"/></orderProperty></drugOrder></htmlform>"#
    );
}

#[test]
fn test_irrelevant_map_leaves_form_unchanged() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(DRUG_ORDER_FORM);
    let map = SubstitutionMap::new().with(
        Entity::new(EntityType::Drug, "ibuprofen").with_id(99),
        Entity::new(EntityType::Drug, "ibuprofen-target"),
    );

    let report = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &map)
        .unwrap();

    assert_eq!(form.xml_data, DRUG_ORDER_FORM);
    assert_eq!(report.values_changed, 0);
}

#[test]
fn test_unknown_property_never_reaches_strategy() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(
        r#"<htmlform><drugOrder><orderProperty name="urgency" value="STAT"><option value="ROUTINE"/></orderProperty></drugOrder></htmlform>"#,
    );
    let calls = Cell::new(0);
    let strategy = |value: &str, _: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
        calls.set(calls.get() + 1);
        Ok(value.to_string())
    };

    descriptor
        .perform_substitutions(&mut form, &strategy, &SubstitutionMap::new())
        .unwrap();

    assert_eq!(calls.get(), 0);
}

#[test]
fn test_strategy_failure_leaves_form_untouched() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(DRUG_ORDER_FORM);

    let err = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::strict(), &SubstitutionMap::new())
        .unwrap_err();

    assert_eq!(form.xml_data, DRUG_ORDER_FORM);
    assert_eq!(err.to_string(), "Unable to perform drug order tag substitutions");
    assert!(matches!(
        err.source,
        MetadataError::SubstitutionFailure {
            entity_type: EntityType::Drug,
            ..
        }
    ));
    assert!(err.source().is_some());
}

#[test]
fn test_malformed_form_is_wrapped() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new("<htmlform><drugOrder></htmlform>");

    let err = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap_err();

    assert!(matches!(err.source, MetadataError::MalformedInput(_)));
    assert_eq!(form.xml_data, "<htmlform><drugOrder></htmlform>");
}

#[test]
fn test_missing_root_is_a_noop() {
    let descriptor = create_test_descriptor();
    let xml = r#"<form><orderProperty name="drug" value="1"/></form>"#;
    let mut form = HtmlForm::new(xml);

    let report = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap();

    assert_eq!(report, SubstitutionReport::default());
    assert_eq!(form.xml_data, xml);
}

#[test]
fn test_custom_tag_config() {
    let config = TagConfig::default()
        .with_root_tag("form")
        .with_property_tag("field")
        .with_option_tag("choice");
    let descriptor = create_test_descriptor().with_config(config);
    let mut form = HtmlForm::new(
        r#"<form><field name="drug"><choice value="1"/></field><orderProperty name="drug" value="1"/></form>"#,
    );

    descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap();

    assert_eq!(
        form.xml_data,
        r#"<form><field name="drug"><choice value="target-aspirin-uuid"/></field><orderProperty name="drug" value="1"/></form>"#
    );
}

#[test]
fn test_renamed_compound_tag_and_value_attribute() {
    let config = TagConfig::default()
        .with_compound_tag("legacyOrder")
        .with_value_attribute("ref");
    let descriptor = create_test_descriptor().with_config(config);
    let mut form = HtmlForm::new(
        r#"<htmlform><legacyOrder ref="1"><orderProperty name="route" ref="123" value="123"/></legacyOrder></htmlform>"#,
    );

    let report = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap();

    assert_eq!(descriptor.attribute_name(), "ref");
    assert_eq!(report.compound_nodes_skipped, 1);
    assert_eq!(
        form.xml_data,
        r#"<htmlform><legacyOrder ref="1"><orderProperty name="route" ref="target-oral-uuid" value="123"/></legacyOrder></htmlform>"#
    );
}

#[test]
fn test_root_tag_matches_ignoring_case() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(
        r#"<HtmlForm><drugOrder><orderProperty name="route"><option value="123"/></orderProperty></drugOrder></HtmlForm>"#,
    );

    let registry = descriptor.dependencies(&form).unwrap();
    assert!(registry.contains(EntityType::Concept, &oral()));

    let report = descriptor
        .perform_substitutions(&mut form, &MapSubstituter::new(), &create_test_map())
        .unwrap();

    assert_eq!(report.values_changed, 1);
    assert_eq!(option_values(&form.xml_data), vec!["target-oral-uuid"]);
}

#[test]
fn test_type_dispatch_strategy() {
    let descriptor = create_test_descriptor();
    let mut form = HtmlForm::new(DRUG_ORDER_FORM);
    let frequency = |value: &str, _: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
        Ok(value.to_lowercase())
    };
    let substituter =
        TypeDispatchSubstituter::new(MapSubstituter::new()).with_strategy(EntityType::OrderFrequency, frequency);

    descriptor
        .perform_substitutions(&mut form, &substituter, &create_test_map())
        .unwrap();

    let values = option_values(&form.xml_data);
    assert_eq!(values[2], "target-oral-uuid");
    assert_eq!(values[4], "od");
}

#[test]
fn test_attribute_name() {
    assert_eq!(create_test_descriptor().attribute_name(), "value");
}
