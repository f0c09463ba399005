//! Token dependency graph
//!
//! Nodes are token names, edges are `var()` references from a definition's
//! value. Built from an immutable token set; iteration order is sorted so
//! downstream reports are deterministic.

mod cycles;

use crate::models::Token;
use std::collections::BTreeMap;

/// Directed graph of token references
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from extracted token definitions
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Self {
        let mut graph = Self::new();
        for token in tokens {
            graph.add_node(&token.name, token.references.clone());
        }
        graph
    }

    /// Add a node with its outgoing references. First definition wins;
    /// duplicate names are ignored here (the extractor reports them).
    pub fn add_node(&mut self, name: &str, mut references: Vec<String>) {
        references.dedup();
        self.adjacency.entry(name.to_string()).or_insert(references);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Node names in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Outgoing references of a node (empty for unknown names)
    pub fn references(&self, name: &str) -> &[String] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of nodes that reference `name`
    pub fn referenced_by(&self, name: &str) -> Vec<&str> {
        self.adjacency
            .iter()
            .filter(|(_, refs)| refs.iter().any(|r| r == name))
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Whether any node references `name`
    pub fn is_referenced(&self, name: &str) -> bool {
        self.adjacency
            .values()
            .any(|refs| refs.iter().any(|r| r == name))
    }

    /// Detect all cycles with an iterative three-color depth-first search.
    ///
    /// Runs in O(V+E) without recursion, so arbitrarily deep reference chains
    /// cannot overflow the stack. Each cycle is returned as an ordered name
    /// list with the closing name repeated.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        cycles::detect(self)
    }
}
