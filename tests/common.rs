//! Common test utilities for building flow definitions.
use junban::prelude::*;
use serde_json::json;

/// Wraps nodes and outputs into a flow declaring a single `text` input.
#[allow(dead_code)]
pub fn flow_with(nodes: Vec<Node>, outputs: Vec<FlowOutput>) -> Flow {
    Flow {
        name: "test_flow".to_string(),
        inputs: vec![FlowInput::new("text")],
        nodes,
        outputs,
    }
}

/// A node reading the `text` flow input.
#[allow(dead_code)]
pub fn source_node(name: &str) -> Node {
    Node::new(name).with_input("text", InputValue::flow_input("text"))
}

/// A node reading the output of each of `deps`.
#[allow(dead_code)]
pub fn node_after(name: &str, deps: &[&str]) -> Node {
    deps.iter().fold(Node::new(name), |node, dep| {
        node.with_input(format!("from_{}", dep), InputValue::node_output(*dep))
    })
}

#[allow(dead_code)]
pub fn skip_on(node: &str) -> SkipCondition {
    SkipCondition {
        condition: InputValue::node_output(node),
        condition_value: json!(true),
        return_value: InputValue::literal("skipped"),
    }
}

#[allow(dead_code)]
pub fn activate_on(node: &str) -> ActivateCondition {
    ActivateCondition {
        condition: InputValue::node_output(node),
        condition_value: json!("go"),
    }
}

/// Logic: `first_node -> second_node -> third_node`, declared as third, first, second.
#[allow(dead_code)]
pub fn create_unordered_nodes() -> Flow {
    flow_with(
        vec![
            node_after("third_node", &["second_node"]),
            source_node("first_node"),
            node_after("second_node", &["first_node"]),
        ],
        vec![FlowOutput::new(
            "content",
            InputValue::node_output("third_node"),
        )],
    )
}

/// Same shape as `create_unordered_nodes`, but `third_node` only waits on
/// `second_node` through its skip condition.
#[allow(dead_code)]
pub fn create_unordered_nodes_with_skip() -> Flow {
    flow_with(
        vec![
            source_node("third_node").with_skip(skip_on("second_node")),
            source_node("first_node"),
            node_after("second_node", &["first_node"]),
        ],
        vec![],
    )
}

/// Same shape as `create_unordered_nodes`, but `third_node` only waits on
/// `second_node` through its activate condition.
#[allow(dead_code)]
pub fn create_unordered_nodes_with_activate() -> Flow {
    flow_with(
        vec![
            source_node("third_node").with_activate(activate_on("second_node")),
            source_node("first_node"),
            node_after("second_node", &["first_node"]),
        ],
        vec![],
    )
}

/// `first_node` and `second_node` read each other.
#[allow(dead_code)]
pub fn create_nodes_cycle() -> Flow {
    flow_with(
        vec![
            node_after("first_node", &["second_node"]),
            node_after("second_node", &["first_node"]),
        ],
        vec![],
    )
}

#[allow(dead_code)]
pub fn create_nodes_cycle_with_skip() -> Flow {
    flow_with(
        vec![
            source_node("first_node").with_skip(skip_on("second_node")),
            node_after("second_node", &["first_node"]),
        ],
        vec![],
    )
}

#[allow(dead_code)]
pub fn create_nodes_cycle_with_activate() -> Flow {
    flow_with(
        vec![
            source_node("first_node").with_activate(activate_on("second_node")),
            node_after("second_node", &["first_node"]),
        ],
        vec![],
    )
}

/// `second_node` reads a `third_node` that does not exist.
#[allow(dead_code)]
pub fn create_wrong_node_reference() -> Flow {
    flow_with(
        vec![
            source_node("first_node"),
            node_after("second_node", &["third_node"]),
        ],
        vec![],
    )
}

/// A per-line node feeding an aggregation node, with one output each.
#[allow(dead_code)]
pub fn create_flow_with_aggregation() -> Flow {
    Flow {
        name: "flow_with_aggregation".to_string(),
        inputs: vec![FlowInput::new("num")],
        nodes: vec![
            Node::new("stringify_num").with_input("num", InputValue::flow_input("num")),
            Node::aggregation("aggregate_num")
                .with_input("num", InputValue::node_output("stringify_num")),
        ],
        outputs: vec![
            FlowOutput::new("content", InputValue::node_output("stringify_num")),
            FlowOutput::new(
                "aggregate_content",
                InputValue::node_output("aggregate_num"),
            ),
        ],
    }
}

/// A layered graph of `size` nodes declared in reverse. Node `i` reads `i / 2`
/// and, when it exists, `i - 3`.
#[allow(dead_code)]
pub fn create_layered_flow(size: usize) -> Flow {
    let names: Vec<String> = (0..size).map(|i| format!("n{}", i)).collect();
    let nodes = (0..size)
        .rev()
        .map(|i| {
            let mut deps = Vec::new();
            if i > 0 {
                deps.push(names[i / 2].as_str());
            }
            if i >= 3 {
                deps.push(names[i - 3].as_str());
            }
            node_after(&names[i], &deps)
        })
        .collect();
    flow_with(nodes, vec![])
}

/// Asserts that every node comes after all the nodes it references.
#[allow(dead_code)]
pub fn assert_topologically_valid(flow: &Flow) {
    let position = |name: &str| {
        flow.nodes
            .iter()
            .position(|n| n.name == name)
            .unwrap_or_else(|| panic!("Node '{}' missing from ordered flow", name))
    };
    for (index, node) in flow.nodes.iter().enumerate() {
        for dep in node.node_references() {
            assert!(
                position(dep) < index,
                "Node '{}' at {} runs before its dependency '{}'",
                node.name,
                index,
                dep
            );
        }
    }
}
