use crate::flow::{Flow, FlowOutput, NodeKind};
use ahash::AHashMap;

/// Splits the declared outputs into those available before aggregation runs and
/// those produced by aggregation nodes. Both halves keep declaration order.
///
/// Outputs reading flow inputs, literals or nodes unknown to the flow are kept:
/// unknown producers are reported by node ordering, not here.
pub fn partition_outputs(flow: &Flow) -> (Vec<FlowOutput>, Vec<FlowOutput>) {
    let kinds: AHashMap<&str, NodeKind> = flow
        .nodes
        .iter()
        .map(|node| (node.name.as_str(), node.kind))
        .collect();

    flow.outputs.iter().cloned().partition(|output| {
        !matches!(
            output.reference.node_name().and_then(|node| kinds.get(node)),
            Some(NodeKind::Aggregation)
        )
    })
}

/// Returns the outputs that do not depend on an aggregation node.
pub fn ensure_outputs_valid(flow: &Flow) -> Vec<FlowOutput> {
    let (outputs, aggregated) = partition_outputs(flow);
    for output in &aggregated {
        tracing::warn!(
            flow = %flow.name,
            output = %output.name,
            node = output.reference.node_name().unwrap_or_default(),
            "Output '{}' references an aggregation node, it is excluded from the pre-aggregation outputs.",
            output.name
        );
    }
    outputs
}
