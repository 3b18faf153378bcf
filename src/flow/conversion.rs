use super::definition::Flow;
use crate::error::FlowConversionError;

/// A trait for custom data models that can be converted into a Junban `Flow`.
///
/// This is the seam between a concrete flow file format and the validator. By
/// implementing this trait on your own configuration structs, you provide the
/// translation layer that turns your parsed format into Junban's canonical model.
///
/// # Example
///
/// ```rust,no_run
/// use junban::prelude::*;
/// use junban::error::FlowConversionError;
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyStep { id: String, after: Vec<String> }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// // 2. Implement `IntoFlow` for your top-level struct.
/// impl IntoFlow for MyPipeline {
///     fn into_flow(self) -> Result<Flow, FlowConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|step| {
///                 step.after.iter().fold(Node::new(step.id), |node, dep| {
///                     node.with_input(dep.clone(), InputValue::node_output(dep.clone()))
///                 })
///             })
///             .collect();
///
///         Ok(Flow {
///             name: "pipeline".to_string(),
///             nodes,
///             ..Flow::default()
///         })
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a Junban flow.
    fn into_flow(self) -> Result<Flow, FlowConversionError>;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, FlowConversionError> {
        Ok(self)
    }
}
