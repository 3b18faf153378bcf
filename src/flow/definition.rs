use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete, canonical definition of a flow, ready for validation.
/// This is the target structure for any custom flow format conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<FlowInput>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub outputs: Vec<FlowOutput>,
}

impl Flow {
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn get_input(&self, name: &str) -> Option<&FlowInput> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn get_output(&self, name: &str) -> Option<&FlowOutput> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Node names in their current sequence.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }
}

/// An external value the flow is invoked with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowInput {
    pub name: String,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FlowInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            description: None,
        }
    }
}

/// A named result of the flow, resolved from a node output, a flow input or a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowOutput {
    pub name: String,
    pub reference: InputValue,
    #[serde(default)]
    pub description: Option<String>,
}

impl FlowOutput {
    pub fn new(name: impl Into<String>, reference: InputValue) -> Self {
        Self {
            name: name.into(),
            reference,
            description: None,
        }
    }
}

/// Whether a node runs once per line or once over the results of a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Ordinary,
    Aggregation,
}

/// A single named step of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub inputs: Vec<InputBinding>,
    #[serde(default)]
    pub skip: Option<SkipCondition>,
    #[serde(default)]
    pub activate: Option<ActivateCondition>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Ordinary,
            inputs: Vec::new(),
            skip: None,
            activate: None,
        }
    }

    pub fn aggregation(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Aggregation,
            ..Self::new(name)
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, value: InputValue) -> Self {
        self.inputs.push(InputBinding {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_skip(mut self, skip: SkipCondition) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_activate(mut self, activate: ActivateCondition) -> Self {
        self.activate = Some(activate);
        self
    }

    pub fn is_aggregation(&self) -> bool {
        self.kind == NodeKind::Aggregation
    }
}

/// Binds a node parameter to a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBinding {
    pub name: String,
    pub value: InputValue,
}

/// The value side of a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputValue {
    Literal { value: serde_json::Value },
    FlowInput { name: String },
    NodeReference {
        node: String,
        #[serde(default)]
        property: Option<String>,
    },
}

impl InputValue {
    pub fn literal(value: impl Into<serde_json::Value>) -> Self {
        InputValue::Literal {
            value: value.into(),
        }
    }

    pub fn flow_input(name: impl Into<String>) -> Self {
        InputValue::FlowInput { name: name.into() }
    }

    pub fn node_output(node: impl Into<String>) -> Self {
        InputValue::NodeReference {
            node: node.into(),
            property: None,
        }
    }

    pub fn node_property(node: impl Into<String>, property: impl Into<String>) -> Self {
        InputValue::NodeReference {
            node: node.into(),
            property: Some(property.into()),
        }
    }

    /// The referenced node name, if this value reads another node's output.
    pub fn node_name(&self) -> Option<&str> {
        match self {
            InputValue::NodeReference { node, .. } => Some(node),
            _ => None,
        }
    }

    /// The referenced flow input name, if this value reads a flow input.
    pub fn input_name(&self) -> Option<&str> {
        match self {
            InputValue::FlowInput { name } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Literal { value } => write!(f, "{}", value),
            InputValue::FlowInput { name } => write!(f, "${{inputs.{}}}", name),
            InputValue::NodeReference {
                node,
                property: None,
            } => write!(f, "${{{}.output}}", node),
            InputValue::NodeReference {
                node,
                property: Some(property),
            } => write!(f, "${{{}.output.{}}}", node, property),
        }
    }
}

/// Bypasses a node when `condition` evaluates to `condition_value`, yielding `return_value` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipCondition {
    pub condition: InputValue,
    pub condition_value: serde_json::Value,
    pub return_value: InputValue,
}

/// Runs a node only when `condition` evaluates to `condition_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateCondition {
    pub condition: InputValue,
    pub condition_value: serde_json::Value,
}
