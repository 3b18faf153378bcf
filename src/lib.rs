//! # Junban - Flow Graph Validation and Ordering
//!
//! **Junban** checks the node graph of a declarative computation flow before it is
//! executed. Every node consumes flow inputs, literals or the outputs of other nodes,
//! and may carry skip or activate conditions that read other nodes too. Junban turns
//! those references into a dependency graph, rejects graphs that cannot run, and
//! produces the deterministic sequential order an executor relies on.
//!
//! ## Core Workflow
//!
//! The validator is format-agnostic. It operates on a canonical model of a flow:
//!
//! 1.  **Load Your Data**: Parse your flow format (YAML, JSON, ...) into your own Rust structs.
//! 2.  **Convert to Junban's Model**: Implement the `IntoFlow` trait to translate your structs into a `Flow`.
//! 3.  **Order**: `ensure_nodes_order` returns the flow with its nodes in execution order, or a
//!     `ValidationError` naming the dangling reference or the dependency cycle.
//! 4.  **Filter Outputs**: `ensure_outputs_valid` returns the outputs that do not wait on aggregation nodes.
//!
//! `FlowValidator` bundles these steps, plus a check of flow input references.
//!
//! ## Ordering Guarantees
//!
//! - Every node comes after all nodes it references, including references made by
//!   skip and activate conditions.
//! - Among nodes that are free to move, the earliest declared node runs first, so an
//!   already valid order is returned unchanged.
//! - A cycle is reported as the chain of nodes found by walking dependencies from the
//!   earliest declared node that could not be scheduled.
//!
//! ## Quick Start
//!
//! ```rust
//! use junban::prelude::*;
//!
//! let flow = Flow {
//!     name: "summarize".to_string(),
//!     inputs: vec![FlowInput::new("url")],
//!     nodes: vec![
//!         Node::new("summarize").with_input("text", InputValue::node_output("fetch")),
//!         Node::new("fetch").with_input("url", InputValue::flow_input("url")),
//!         Node::aggregation("report").with_input("summary", InputValue::node_output("summarize")),
//!     ],
//!     outputs: vec![
//!         FlowOutput::new("summary", InputValue::node_output("summarize")),
//!         FlowOutput::new("report", InputValue::node_output("report")),
//!     ],
//! };
//!
//! let validated = FlowValidator::builder().build().validate(flow).unwrap();
//! assert_eq!(validated.flow.node_names(), vec!["fetch", "summarize", "report"]);
//! assert_eq!(validated.pre_aggregation_outputs.len(), 1);
//! assert_eq!(validated.pre_aggregation_outputs[0].name, "summary");
//! ```

pub mod error;
pub mod flow;
pub mod prelude;
pub mod validator;
