use super::graph::DependencyGraph;
use crate::error::ValidationError;
use std::collections::BTreeSet;

impl DependencyGraph<'_> {
    /// Orders the graph so that every node comes after all of its dependencies.
    ///
    /// Kahn's algorithm with an ordered frontier: at each step the eligible node
    /// with the lowest declaration index is emitted, so nodes without a forced
    /// relative order keep their declared sequence.
    pub fn topological_order(&self) -> Result<Vec<usize>, ValidationError> {
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(index, _)| index)
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(next) = ready.pop_first() {
            order.push(next);
            for &dependent in &self.dependents[next] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < self.len() {
            let nodes = self
                .find_cycle(&in_degree)
                .into_iter()
                .map(|index| self.names[index].to_string())
                .collect();
            return Err(ValidationError::CircularDependency { nodes });
        }

        Ok(order)
    }

    /// Walks the nodes left over by the sort and returns one closed chain among them.
    ///
    /// The walk starts at the lowest-index remaining node and always follows the
    /// lowest-index remaining dependency. Remaining nodes are exactly those with a
    /// non-zero residual in-degree, and each of them has at least one remaining
    /// dependency, so the walk can only end by revisiting a node.
    fn find_cycle(&self, in_degree: &[usize]) -> Vec<usize> {
        let remaining = |index: &usize| in_degree[*index] > 0;

        let Some(mut current) = (0..self.len()).find(remaining) else {
            return Vec::new();
        };
        let mut position: Vec<Option<usize>> = vec![None; self.len()];
        let mut path = Vec::new();

        loop {
            if let Some(start) = position[current] {
                return path.split_off(start);
            }
            position[current] = Some(path.len());
            path.push(current);

            match self.dependencies[current].iter().copied().filter(remaining).min() {
                Some(next) => current = next,
                None => return path,
            }
        }
    }
}
