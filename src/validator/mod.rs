use crate::error::ValidationError;
use crate::flow::{Flow, FlowOutput, Node};
use itertools::Itertools;

mod graph;
mod inputs;
mod ordering;
mod outputs;

pub use graph::{Dependencies, DependencyGraph};
pub use inputs::ensure_inputs_referenced;
pub use outputs::{ensure_outputs_valid, partition_outputs};

/// Replaces the flow's node sequence with a validated execution order.
///
/// Dependencies come from node references in input bindings and in skip and
/// activate conditions. The whole flow is rejected on the first duplicate name,
/// dangling reference or dependency cycle; nothing is reordered in that case.
pub fn ensure_nodes_order(flow: Flow) -> Result<Flow, ValidationError> {
    let order = {
        let dependencies = Dependencies::extract(&flow);
        tracing::debug!(
            flow = %flow.name,
            nodes = dependencies.len(),
            edges = dependencies.edge_count(),
            "Extracted node dependencies"
        );
        let graph = dependencies.resolve()?;
        graph.topological_order()?
    };

    let Flow {
        name,
        inputs,
        nodes,
        outputs,
    } = flow;
    let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
    let nodes: Vec<Node> = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    tracing::debug!(
        flow = %name,
        order = %nodes.iter().map(|n| n.name.as_str()).join(" -> "),
        "Resolved node order"
    );

    Ok(Flow {
        name,
        inputs,
        nodes,
        outputs,
    })
}

/// A flow that passed validation, ready to hand to an executor.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFlow {
    /// The flow with its nodes in execution order and all declared outputs.
    pub flow: Flow,
    /// The outputs available without running aggregation nodes.
    pub pre_aggregation_outputs: Vec<FlowOutput>,
}

/// Runs the full set of structural checks over a flow.
#[derive(Debug, Clone)]
pub struct FlowValidator {
    check_inputs: bool,
}

pub struct FlowValidatorBuilder {
    check_inputs: bool,
}

impl Default for FlowValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowValidatorBuilder {
    pub fn new() -> Self {
        Self { check_inputs: true }
    }

    /// Enables or disables rejecting references to undeclared flow inputs.
    pub fn with_input_check(mut self, enabled: bool) -> Self {
        self.check_inputs = enabled;
        self
    }

    pub fn build(self) -> FlowValidator {
        FlowValidator {
            check_inputs: self.check_inputs,
        }
    }
}

impl Default for FlowValidator {
    fn default() -> Self {
        FlowValidatorBuilder::new().build()
    }
}

impl FlowValidator {
    pub fn builder() -> FlowValidatorBuilder {
        FlowValidatorBuilder::new()
    }

    /// Orders the nodes, checks flow input references if enabled, and computes
    /// the pre-aggregation view of the outputs.
    pub fn validate(&self, flow: Flow) -> Result<ValidatedFlow, ValidationError> {
        let flow = ensure_nodes_order(flow)?;
        if self.check_inputs {
            ensure_inputs_referenced(&flow)?;
        }
        let pre_aggregation_outputs = ensure_outputs_valid(&flow);
        Ok(ValidatedFlow {
            flow,
            pre_aggregation_outputs,
        })
    }
}
