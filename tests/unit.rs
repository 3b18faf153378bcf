//! Unit tests for the flow model and error formatting.
mod common;
use junban::error::{FlowConversionError, format_node_list};
use junban::prelude::*;
use serde_json::json;

#[test]
fn test_input_value_display() {
    assert_eq!(InputValue::flow_input("url").to_string(), "${inputs.url}");
    assert_eq!(InputValue::node_output("fetch").to_string(), "${fetch.output}");
    assert_eq!(
        InputValue::node_property("fetch", "body").to_string(),
        "${fetch.output.body}"
    );
    assert_eq!(InputValue::literal("plain").to_string(), "\"plain\"");
}

#[test]
fn test_input_value_accessors() {
    assert_eq!(InputValue::node_property("n", "p").node_name(), Some("n"));
    assert_eq!(InputValue::flow_input("i").input_name(), Some("i"));
    assert_eq!(InputValue::literal(1).node_name(), None);
    assert_eq!(InputValue::literal(1).input_name(), None);
}

#[test]
fn test_format_node_list() {
    assert_eq!(format_node_list(["a", "b"]), "['a', 'b']");
    assert_eq!(format_node_list(Vec::<String>::new()), "[]");
}

#[test]
fn test_flow_deserializes_from_canonical_json() {
    let flow: Flow = serde_json::from_value(json!({
        "name": "canonical",
        "inputs": [{ "name": "text" }],
        "nodes": [
            {
                "name": "b",
                "inputs": [{ "name": "x", "value": { "type": "node_reference", "node": "a" } }],
                "skip": {
                    "condition": { "type": "flow_input", "name": "text" },
                    "condition_value": "",
                    "return_value": { "type": "literal", "value": null }
                }
            },
            { "name": "a", "kind": "aggregation" }
        ],
        "outputs": [{ "name": "out", "reference": { "type": "node_reference", "node": "b", "property": "y" } }]
    }))
    .expect("Failed to deserialize flow");

    assert_eq!(flow.nodes.len(), 2);
    assert!(flow.get_node("a").unwrap().is_aggregation());
    assert_eq!(flow.get_node("b").unwrap().node_references(), vec!["a"]);
    assert_eq!(
        flow.get_output("out").unwrap().reference,
        InputValue::node_property("b", "y")
    );
}

#[test]
fn test_flow_converts_into_itself() {
    let flow = common::create_unordered_nodes();
    assert_eq!(flow.clone().into_flow().unwrap(), flow);
}

#[test]
fn test_error_display() {
    let err = FlowConversionError::InvalidReference("${broken}".to_string());
    assert!(err.to_string().contains("${broken}"));
    assert!(err.to_string().contains("${inputs.<name>}"));

    let err = ValidationError::CircularDependency {
        nodes: vec!["x".to_string()],
    };
    assert!(err.to_string().contains("['x']"));
}
