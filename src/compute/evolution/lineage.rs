//! Ancestry tracking across genetic operators.
//!
//! Every individual created during a run gets a node. Individuals produced by
//! crossover or modified by mutation also record the operator and the ids of
//! their parents, so the graph can be walked backwards from any individual.
//! The engine only appends; nothing reads the graph during evolution.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::schema::{Gene, Individual};

/// Operator that produced an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneticOperator {
    Crossover,
    Mutation,
}

/// One individual in the lineage graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    pub id: u64,
    /// Generation the individual was created in.
    pub generation: usize,
    /// `None` for individuals of the initial population.
    pub operator: Option<GeneticOperator>,
    pub parents: Vec<u64>,
    /// Genes at creation time.
    pub genes: Vec<Gene>,
}

/// Parent-to-child derivation graph of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineageGraph {
    nodes: BTreeMap<u64, LineageNode>,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an individual of the initial population.
    pub fn record_initial(&mut self, individual: &Individual) {
        self.insert(LineageNode {
            id: individual.id,
            generation: 0,
            operator: None,
            parents: Vec::new(),
            genes: individual.genes.clone(),
        });
    }

    /// Register an individual produced by `operator` from `parents`.
    pub fn record(
        &mut self,
        generation: usize,
        operator: GeneticOperator,
        parents: Vec<u64>,
        child: &Individual,
    ) {
        log::trace!(
            "lineage: gen {} {:?} {:?} -> {}",
            generation,
            operator,
            parents,
            child.id
        );
        self.insert(LineageNode {
            id: child.id,
            generation,
            operator: Some(operator),
            parents,
            genes: child.genes.clone(),
        });
    }

    fn insert(&mut self, node: LineageNode) {
        self.nodes.insert(node.id, node);
    }

    pub fn node(&self, id: u64) -> Option<&LineageNode> {
        self.nodes.get(&id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &LineageNode> {
        self.nodes.values()
    }

    /// Operator events (non-initial nodes) in creation order.
    pub fn events(&self) -> impl Iterator<Item = &LineageNode> {
        self.nodes.values().filter(|n| n.operator.is_some())
    }

    /// Operator events of one generation.
    pub fn events_in(&self, generation: usize) -> impl Iterator<Item = &LineageNode> {
        self.events().filter(move |n| n.generation == generation)
    }

    /// `(parent, child, operator)` edges.
    pub fn edges(&self) -> impl Iterator<Item = (u64, u64, GeneticOperator)> + '_ {
        self.nodes
            .values()
            .filter_map(|node| node.operator.map(|operator| (node, operator)))
            .flat_map(|(node, operator)| node.parents.iter().map(move |&p| (p, node.id, operator)))
    }

    pub fn parents_of(&self, id: u64) -> &[u64] {
        self.nodes
            .get(&id)
            .map(|n| n.parents.as_slice())
            .unwrap_or_default()
    }

    pub fn children_of(&self, id: u64) -> Vec<u64> {
        self.events()
            .filter(|n| n.parents.contains(&id))
            .map(|n| n.id)
            .collect()
    }

    /// Ancestors of `id` up to `max_depth` operator steps back (unbounded when `None`).
    pub fn ancestors(&self, id: u64, max_depth: Option<usize>) -> BTreeSet<u64> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([(id, 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for &parent in self.parents_of(current) {
                if seen.insert(parent) {
                    queue.push_back((parent, depth + 1));
                }
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render as a Graphviz digraph, edges pointing from parent to child.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph lineage {\n");
        for node in self.nodes.values() {
            let _ = writeln!(out, "  {} [label=\"{} (g{})\"];", node.id, node.id, node.generation);
        }
        for (parent, child, operator) in self.edges() {
            let style = match operator {
                GeneticOperator::Crossover => "solid",
                GeneticOperator::Mutation => "dashed",
            };
            let _ = writeln!(out, "  {parent} -> {child} [style={style}];");
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual(id: u64) -> Individual {
        Individual::new(id, vec![Gene::Int(id as i64)])
    }

    fn sample_graph() -> LineageGraph {
        let mut graph = LineageGraph::new();
        graph.record_initial(&individual(0));
        graph.record_initial(&individual(1));
        graph.record(1, GeneticOperator::Crossover, vec![0, 1], &individual(2));
        graph.record(1, GeneticOperator::Crossover, vec![1, 0], &individual(3));
        graph.record(1, GeneticOperator::Mutation, vec![2], &individual(4));
        graph.record(2, GeneticOperator::Mutation, vec![4], &individual(5));
        graph
    }

    #[test]
    fn test_events_per_generation() {
        let graph = sample_graph();

        assert_eq!(graph.len(), 6);
        assert_eq!(graph.events().count(), 4);
        assert_eq!(graph.events_in(1).count(), 3);
        assert_eq!(graph.events_in(2).count(), 1);
        assert_eq!(graph.edges().count(), 6);
    }

    #[test]
    fn test_parents_and_children() {
        let graph = sample_graph();

        assert_eq!(graph.parents_of(3), &[1, 0]);
        assert!(graph.parents_of(0).is_empty());
        assert!(graph.parents_of(99).is_empty());
        assert_eq!(graph.children_of(0), vec![2, 3]);
    }

    #[test]
    fn test_ancestors() {
        let graph = sample_graph();

        assert_eq!(graph.ancestors(5, None), BTreeSet::from([0, 1, 2, 4]));
        assert_eq!(graph.ancestors(5, Some(1)), BTreeSet::from([4]));
        assert!(graph.ancestors(0, None).is_empty());
    }

    #[test]
    fn test_dot_export() {
        let dot = sample_graph().to_dot();

        assert!(dot.starts_with("digraph lineage {"));
        assert!(dot.contains("0 -> 2 [style=solid];"));
        assert!(dot.contains("4 -> 5 [style=dashed];"));
    }

    #[test]
    fn test_serialization() {
        let graph = sample_graph();
        let json = serde_json::to_string(&graph).unwrap();
        let parsed: LineageGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), graph.len());
        assert_eq!(parsed.node(4), graph.node(4));
    }
}
