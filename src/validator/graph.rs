use crate::error::ValidationError;
use crate::flow::{Flow, References};
use ahash::AHashMap;
use itertools::Itertools;

/// The node names each node depends on, extracted from its bindings.
///
/// Entries keep the flow's declaration order and every dependency list keeps
/// the order in which the references were first declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependencies<'a> {
    entries: Vec<(&'a str, Vec<&'a str>)>,
}

impl<'a> Dependencies<'a> {
    /// Collects the dependencies of every node. Flow inputs and literals are ignored,
    /// repeated references to the same node collapse into one.
    pub fn extract(flow: &'a Flow) -> Self {
        let entries = flow
            .nodes
            .iter()
            .map(|node| {
                let mut refs = Vec::new();
                node.collect_node_references(&mut refs);
                (node.name.as_str(), refs.into_iter().unique().collect())
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, node: &str) -> Option<&[&'a str]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == node)
            .map(|(_, deps)| deps.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a str])> {
        self.entries
            .iter()
            .map(|(name, deps)| (*name, deps.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, deps)| deps.len()).sum()
    }

    /// Checks that node names are unique and that every dependency names an
    /// existing node, then links the names into an index-based graph.
    ///
    /// Fails on the first offending node in declaration order.
    pub fn resolve(&self) -> Result<DependencyGraph<'a>, ValidationError> {
        let mut index: AHashMap<&str, usize> = AHashMap::with_capacity(self.entries.len());
        for (i, (name, _)) in self.entries.iter().enumerate() {
            if index.insert(name, i).is_some() {
                return Err(ValidationError::DuplicateNodeName(name.to_string()));
            }
        }

        let mut dependencies = vec![Vec::new(); self.entries.len()];
        let mut dependents = vec![Vec::new(); self.entries.len()];
        for (i, (name, deps)) in self.entries.iter().enumerate() {
            for dep in deps {
                let target = *index.get(dep).ok_or_else(|| ValidationError::DanglingReference {
                    node: name.to_string(),
                    reference: dep.to_string(),
                })?;
                dependencies[i].push(target);
                dependents[target].push(i);
            }
        }

        Ok(DependencyGraph {
            names: self.entries.iter().map(|(name, _)| *name).collect(),
            dependencies,
            dependents,
        })
    }
}

/// An arena view of the dependency graph.
///
/// Nodes are addressed by their declaration index. `dependencies[i]` lists the
/// nodes `i` requires, `dependents[i]` the nodes that require `i`.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    pub(super) names: Vec<&'a str>,
    pub(super) dependencies: Vec<Vec<usize>>,
    pub(super) dependents: Vec<Vec<usize>>,
}

impl<'a> DependencyGraph<'a> {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> &'a str {
        self.names[index]
    }

    pub fn dependencies(&self, index: usize) -> &[usize] {
        &self.dependencies[index]
    }

    pub fn dependents(&self, index: usize) -> &[usize] {
        &self.dependents[index]
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }
}
