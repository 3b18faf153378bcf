use super::definition::{ActivateCondition, InputBinding, InputValue, Node, SkipCondition};

/// Anything that can read the output of another node or a flow input.
///
/// Each binding kind reports the names it references, appending them in
/// declaration order so that callers can report the first offending reference.
pub trait References {
    /// Appends every referenced node name, duplicates included.
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>);

    /// Appends every referenced flow input name, duplicates included.
    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>);

    /// Convenience wrapper returning the node references of a single value.
    fn node_references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_node_references(&mut refs);
        refs
    }

    fn input_references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_input_references(&mut refs);
        refs
    }
}

impl References for InputValue {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(node) = self.node_name() {
            refs.push(node);
        }
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(input) = self.input_name() {
            refs.push(input);
        }
    }
}

impl References for InputBinding {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.value.collect_node_references(refs);
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.value.collect_input_references(refs);
    }
}

impl References for SkipCondition {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.condition.collect_node_references(refs);
        self.return_value.collect_node_references(refs);
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.condition.collect_input_references(refs);
        self.return_value.collect_input_references(refs);
    }
}

impl References for ActivateCondition {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.condition.collect_node_references(refs);
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        self.condition.collect_input_references(refs);
    }
}

impl<T: References> References for Option<T> {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(inner) = self {
            inner.collect_node_references(refs);
        }
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(inner) = self {
            inner.collect_input_references(refs);
        }
    }
}

impl Node {
    /// Every reference-bearing field, in the order references are reported.
    fn reference_fields(&self) -> impl Iterator<Item = &dyn References> {
        self.inputs
            .iter()
            .map(|binding| binding as &dyn References)
            .chain([
                &self.skip as &dyn References,
                &self.activate as &dyn References,
            ])
    }
}

impl References for Node {
    fn collect_node_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        for field in self.reference_fields() {
            field.collect_node_references(refs);
        }
    }

    fn collect_input_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        for field in self.reference_fields() {
            field.collect_input_references(refs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_references_follow_declaration_order() {
        let node = Node::new("summarize")
            .with_input("text", InputValue::node_output("fetch"))
            .with_input("question", InputValue::flow_input("question"))
            .with_input("limit", InputValue::literal(3))
            .with_skip(SkipCondition {
                condition: InputValue::node_property("classify", "is_empty"),
                condition_value: json!(true),
                return_value: InputValue::node_output("fallback"),
            })
            .with_activate(ActivateCondition {
                condition: InputValue::node_output("gate"),
                condition_value: json!("go"),
            });

        assert_eq!(
            node.node_references(),
            vec!["fetch", "classify", "fallback", "gate"]
        );
        assert_eq!(node.input_references(), vec!["question"]);
    }

    #[test]
    fn test_literals_reference_nothing() {
        let node = Node::new("constant").with_input("value", InputValue::literal("x"));
        assert!(node.node_references().is_empty());
        assert!(node.input_references().is_empty());
    }
}
