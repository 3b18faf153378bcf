use itertools::Itertools;
use thiserror::Error;

/// Errors raised while validating a flow's structure.
///
/// Every message is user-facing and rendered verbatim by callers, so the
/// templates below are the single source of truth for their wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Node '{node}' references a non-existent node '{reference}' in your flow. Please review your flow to ensure that the node name is accurately specified."
    )]
    DanglingReference { node: String, reference: String },

    #[error(
        "Node circular dependency has been detected among the nodes in your flow. Kindly review the reference relationships for the nodes {} and resolve the circular reference issue in the flow.",
        format_node_list(.nodes)
    )]
    CircularDependency { nodes: Vec<String> },

    #[error(
        "Node name '{0}' is used by more than one node in your flow. Please rename the nodes so that every node name is unique."
    )]
    DuplicateNodeName(String),

    #[error(
        "Node '{node}' references a non-existent flow input '{input}'. Please review your flow to ensure that the input name is accurately specified."
    )]
    InputReferenceNotFound { node: String, input: String },

    #[error(
        "Output '{output}' references a non-existent flow input '{input}'. Please review your flow to ensure that the input name is accurately specified."
    )]
    OutputInputReferenceNotFound { output: String, input: String },
}

/// Renders node names as a bracketed list of quoted names: `['a', 'b']`.
pub fn format_node_list<I>(nodes: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    format!(
        "[{}]",
        nodes
            .into_iter()
            .map(|n| format!("'{}'", n.as_ref()))
            .join(", ")
    )
}

/// Errors that can occur when converting a custom user format into a Junban `Flow`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Failed to parse flow definition: {0}")]
    ParseError(String),

    #[error("Invalid reference '{0}': expected '${{inputs.<name>}}' or '${{<node>.output[.<property>]}}'")]
    InvalidReference(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
