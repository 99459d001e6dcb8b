//! Tests for description and extension stripping

use rstest::rstest;
use serde_json::json;

use openapi_subset::domain::{
    remove_descriptions, remove_extensions, FieldClass, FieldFilter, Node,
};

fn node(value: serde_json::Value) -> Node {
    Node::from(value)
}

fn petstore() -> Node {
    node(json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Petstore",
            "description": "A sample API",
            "version": "1.0.0",
            "x-logo": {"url": "logo.png"}
        },
        "x-": "bare prefix",
        "paths": {
            "/pets": {
                "get": {
                    "summary": "List pets",
                    "description": "Returns all pets",
                    "x-code-samples": [{"lang": "sh", "source": "curl"}],
                    "parameters": [
                        {"name": "limit", "in": "query", "description": "max items", "x-example": 10},
                        "plain string",
                        42,
                        null,
                        []
                    ],
                    "responses": {
                        "200": {"description": "ok", "content": {}},
                        "x-response-type": "list"
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "description": {"type": "string", "description": "free text"},
                        "x-internal": {"type": "boolean"}
                    }
                }
            }
        }
    }))
}

fn has_key(node: &Node, pred: &dyn Fn(&str) -> bool) -> bool {
    match node {
        Node::Mapping(map) => map.iter().any(|(k, v)| pred(k) || has_key(v, pred)),
        Node::Sequence(items) => items.iter().any(|item| has_key(item, pred)),
        Node::Scalar(_) => false,
    }
}

#[test]
fn given_document_when_removing_descriptions_then_no_description_key_remains() {
    let result = remove_descriptions(&petstore());

    assert!(!has_key(&result, &|k| k == "description"));
    // extensions untouched
    assert!(has_key(&result, &|k| k == "x-logo"));
    assert_eq!(result.get("info").and_then(|i| i.get("title")), Some(&Node::from("Petstore")));
}

#[test]
fn given_document_when_removing_extensions_then_no_extension_key_remains() {
    let result = remove_extensions(&petstore());

    assert!(!has_key(&result, &|k| k.starts_with("x-")));
    assert!(result.get("x-").is_none());
    // descriptions untouched
    assert!(has_key(&result, &|k| k == "description"));
}

#[test]
fn given_property_named_description_when_removing_descriptions_then_property_is_removed_too() {
    // The key is literally `description`, even though it names a schema property.
    let result = remove_descriptions(&petstore());
    let props = result
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(|s| s.get("Pet"))
        .and_then(|p| p.get("properties"))
        .unwrap();
    assert!(props.get("description").is_none());
    assert!(props.get("x-internal").is_some());
}

#[rstest]
#[case::descriptions(FieldClass::Description)]
#[case::extensions(FieldClass::Extension)]
fn given_pass_when_applied_twice_then_same_as_once(#[case] class: FieldClass) {
    let filter = FieldFilter::new().with(class);
    let once = filter.apply(&petstore());
    let twice = filter.apply(&once);
    assert_eq!(once, twice);
}

#[test]
fn given_both_passes_when_order_swapped_then_results_equal() {
    let doc = petstore();
    assert_eq!(
        remove_descriptions(&remove_extensions(&doc)),
        remove_extensions(&remove_descriptions(&doc))
    );
}

#[test]
fn given_mapping_when_stripping_then_surviving_keys_keep_input_order() {
    let doc = node(json!({
        "zeta": 1, "description": "d", "alpha": 2, "x-mid": 3, "mu": {"b": 1, "x-a": 2, "a": 3}
    }));
    let filter = FieldFilter::new()
        .with(FieldClass::Description)
        .with(FieldClass::Extension);

    let result = filter.apply(&doc);

    let top: Vec<_> = result.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(top, vec!["zeta", "alpha", "mu"]);
    let inner: Vec<_> = result.get("mu").unwrap().as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(inner, vec!["b", "a"]);
}

#[test]
fn given_responses_with_extension_after_status_when_removing_descriptions_then_order_is_unchanged() {
    let doc = node(json!({
        "responses": {"200": {"description": "ok"}, "x-response-type": "list"}
    }));

    let result = remove_descriptions(&doc);

    let keys: Vec<_> = result.get("responses").unwrap().as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["200", "x-response-type"]);
}

#[rstest]
#[case::empty_mapping(json!({}))]
#[case::empty_sequence(json!({"tags": []}))]
#[case::scalars(json!({"a": 1, "b": true, "c": null, "d": 1.5, "e": "description"}))]
#[case::mixed_sequence(json!({"list": [1, "x-a", {"name": "n"}, [[], {}], null]}))]
#[case::near_misses(json!({"Description": 1, "descriptions": 2, "X-Custom": 3, "ax-b": 4, "x": 5}))]
fn given_tree_without_filtered_keys_when_stripping_then_unchanged(#[case] value: serde_json::Value) {
    let doc = node(value);
    assert_eq!(remove_descriptions(&doc), doc);
    assert_eq!(remove_extensions(&doc), doc);
}

#[test]
fn given_deeply_nested_tree_when_stripping_then_deepest_level_is_filtered() {
    let mut value = json!({"description": "bottom", "x-deep": true, "keep": 1});
    for _ in 0..64 {
        value = json!({"level": [value], "description": "d"});
    }

    let result = FieldFilter::new()
        .with(FieldClass::Description)
        .with(FieldClass::Extension)
        .apply(&node(value));

    let mut current = &result;
    for _ in 0..64 {
        assert!(current.get("description").is_none());
        current = &current.get("level").unwrap().as_sequence().unwrap()[0];
    }
    assert_eq!(current, &node(json!({"keep": 1})));
}

#[test]
fn given_empty_filter_when_applied_then_identity() {
    let doc = petstore();
    let filter = FieldFilter::new().with_if(FieldClass::Description, false);
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&doc), doc);
}
