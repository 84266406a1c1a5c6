//! Substitution pass: rewrites typed `value` attributes in place.

mod map;
mod strategy;

pub use map::{SubstitutionEntry, SubstitutionMap};
pub use strategy::{MapSubstituter, Substituter, TypeDispatchSubstituter};

use serde::Serialize;

use crate::document::Node;
use crate::error::{MetadataError, Result};
use crate::types::EntityType;
use crate::walker::TreeWalker;

/// What a substitution pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    /// Non-blank typed values handed to the substituter.
    pub values_seen: usize,
    /// Values whose text actually changed.
    pub values_changed: usize,
    /// Compound order elements left as they were.
    pub compound_nodes_skipped: usize,
}

/// Runs the substitution pass over `root` and its descendants.
///
/// Property-declaring and option elements under a known type context get
/// their value attribute replaced by the substituter's output. Compound
/// order elements are not modified (their descendants still are). The first
/// substituter error aborts the pass; attributes rewritten before it stay
/// rewritten, so callers working on a shared tree should pass a copy.
pub fn substitute_tree(
    root: Option<&mut Node>,
    walker: &TreeWalker<'_>,
    substituter: &dyn Substituter,
    map: &SubstitutionMap,
) -> Result<SubstitutionReport> {
    let config = walker.config();
    let mut report = SubstitutionReport::default();

    walker.walk_mut(root, None, &mut |node: &mut Node, context| {
        if node.is_named(&config.compound_tag) {
            // Legacy single-tag orders have no substitution rules yet.
            report.compound_nodes_skipped += 1;
            tracing::debug!(tag = %node.name, "Leaving compound order element unchanged");
            return Ok(());
        }

        let value_bearing = node.is_named(&config.property_tag) || node.is_named(&config.option_tag);
        match context {
            Some(entity_type) if value_bearing => update_value(
                node,
                entity_type,
                &config.value_attribute,
                substituter,
                map,
                &mut report,
            ),
            _ => Ok(()),
        }
    })?;

    tracing::debug!(
        seen = report.values_seen,
        changed = report.values_changed,
        skipped = report.compound_nodes_skipped,
        "Substitution pass finished"
    );
    Ok(report)
}

fn update_value(
    node: &mut Node,
    entity_type: EntityType,
    attribute: &str,
    substituter: &dyn Substituter,
    map: &SubstitutionMap,
    report: &mut SubstitutionReport,
) -> Result<()> {
    let Some(value) = node.attributes.get_mut(attribute) else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Ok(());
    }

    report.values_seen += 1;
    let replacement = substituter
        .substitute(value, entity_type, map)
        .map_err(|source| MetadataError::SubstitutionFailure {
            value: value.clone(),
            entity_type,
            source,
        })?;

    if replacement != *value {
        report.values_changed += 1;
        tracing::debug!(%entity_type, from = %value, to = %replacement, "Substituted value");
    }
    *value = replacement;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TagConfig;
    use crate::error::BoxError;
    use crate::types::{Entity, PropertyRegistry};
    use std::cell::RefCell;

    fn route_tree(value: Option<&str>) -> Node {
        let mut option = Node::element("option");
        if let Some(value) = value {
            option.set_attribute("value", value);
        }
        Node::element("htmlform").with_child(
            Node::element("drugOrder").with_child(
                Node::element("orderProperty")
                    .with_attribute("name", "route")
                    .with_child(option),
            ),
        )
    }

    fn run(root: &mut Node, substituter: &dyn Substituter) -> Result<SubstitutionReport> {
        let config = TagConfig::default();
        let walker = TreeWalker::new(PropertyRegistry::drug_order(), &config);
        substitute_tree(Some(root), &walker, substituter, &SubstitutionMap::new())
    }

    #[test]
    fn test_option_value_is_replaced() {
        let mut root = route_tree(Some("123"));
        let strategy = |value: &str, entity_type: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
            assert_eq!(entity_type, EntityType::Concept);
            Ok(if value == "123" { "456".to_string() } else { value.to_string() })
        };

        let report = run(&mut root, &strategy).unwrap();

        assert_eq!(
            root.find_element("option").and_then(|n| n.attribute("value")),
            Some("456")
        );
        assert_eq!(report.values_seen, 1);
        assert_eq!(report.values_changed, 1);
        assert_eq!(report.compound_nodes_skipped, 1);
    }

    #[test]
    fn test_blank_and_absent_values_are_not_substituted() {
        let calls = RefCell::new(Vec::new());
        let strategy = |value: &str, _: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
            calls.borrow_mut().push(value.to_string());
            Ok(value.to_string())
        };

        let mut blank = route_tree(Some("   "));
        run(&mut blank, &strategy).unwrap();
        let mut absent = route_tree(None);
        run(&mut absent, &strategy).unwrap();

        assert!(calls.borrow().is_empty());
        assert_eq!(
            blank.find_element("option").and_then(|n| n.attribute("value")),
            Some("   ")
        );
        assert!(absent.find_element("option").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_declaring_node_value_is_substituted() {
        let mut root = Node::element("orderProperty")
            .with_attribute("name", "drug")
            .with_attribute("value", "aspirin");
        let strategy = |value: &str, entity_type: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
            Ok(format!("{entity_type}:{value}"))
        };

        run(&mut root, &strategy).unwrap();
        assert_eq!(root.attribute("value"), Some("Drug:aspirin"));
    }

    #[test]
    fn test_compound_node_is_left_untouched() {
        let mut root = Node::element("htmlform").with_child(
            Node::element("drugOrder")
                .with_attribute("drugNames", "123")
                .with_attribute("value", "123"),
        );
        let before = root.clone();
        let strategy = |_: &str, _: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
            Ok("changed".to_string())
        };

        let report = run(&mut root, &strategy).unwrap();
        assert_eq!(root, before);
        assert_eq!(report.compound_nodes_skipped, 1);
        assert_eq!(report.values_seen, 0);
    }

    #[test]
    fn test_strategy_error_carries_value_and_type() {
        let mut root = route_tree(Some("123"));
        let failing = |_: &str, _: EntityType, _: &SubstitutionMap| -> std::result::Result<String, BoxError> {
            Err("lookup failed".into())
        };

        let err = run(&mut root, &failing).unwrap_err();
        match err {
            MetadataError::SubstitutionFailure {
                value, entity_type, ..
            } => {
                assert_eq!(value, "123");
                assert_eq!(entity_type, EntityType::Concept);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_map_substituter_end_to_end() {
        let config = TagConfig::default();
        let walker = TreeWalker::new(PropertyRegistry::drug_order(), &config);
        let map = SubstitutionMap::new().with(
            Entity::new(EntityType::Concept, "src-oral").with_id(123),
            Entity::new(EntityType::Concept, "dst-oral"),
        );
        let mut root = route_tree(Some("123"));

        substitute_tree(Some(&mut root), &walker, &MapSubstituter::new(), &map).unwrap();
        assert_eq!(
            root.find_element("option").and_then(|n| n.attribute("value")),
            Some("dst-oral")
        );
    }
}
