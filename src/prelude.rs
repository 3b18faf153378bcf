//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the junban crate.
//!
//! # Example
//!
//! ```rust
//! use junban::prelude::*;
//!
//! # fn run_example() -> std::result::Result<(), ValidationError> {
//! let flow = Flow {
//!     name: "example".to_string(),
//!     nodes: vec![
//!         Node::new("second").with_input("x", InputValue::node_output("first")),
//!         Node::new("first"),
//!     ],
//!     ..Flow::default()
//! };
//!
//! let ordered = ensure_nodes_order(flow)?;
//! assert_eq!(ordered.node_names(), vec!["first", "second"]);
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Flow model
pub use crate::flow::{
    ActivateCondition, Flow, FlowInput, FlowOutput, InputBinding, InputValue, IntoFlow, Node,
    NodeKind, References, SkipCondition,
};

// Validation
pub use crate::validator::{
    FlowValidator, ValidatedFlow, ensure_inputs_referenced, ensure_nodes_order,
    ensure_outputs_valid, partition_outputs,
};

// Error types
pub use crate::error::{FlowConversionError, ValidationError};
