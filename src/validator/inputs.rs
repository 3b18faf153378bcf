use crate::error::ValidationError;
use crate::flow::{Flow, References};
use ahash::AHashSet;

/// Checks that every flow input read by a node or an output is declared by the flow.
///
/// Nodes are checked first in their current order, then outputs; the first
/// undeclared name fails the check.
pub fn ensure_inputs_referenced(flow: &Flow) -> Result<(), ValidationError> {
    let declared: AHashSet<&str> = flow.inputs.iter().map(|i| i.name.as_str()).collect();

    for node in &flow.nodes {
        if let Some(input) = node
            .input_references()
            .into_iter()
            .find(|input| !declared.contains(input))
        {
            return Err(ValidationError::InputReferenceNotFound {
                node: node.name.clone(),
                input: input.to_string(),
            });
        }
    }

    for output in &flow.outputs {
        if let Some(input) = output
            .reference
            .input_name()
            .filter(|input| !declared.contains(input))
        {
            return Err(ValidationError::OutputInputReferenceNotFound {
                output: output.name.clone(),
                input: input.to_string(),
            });
        }
    }

    Ok(())
}
