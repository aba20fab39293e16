//! Word co-occurrence graph.
//!
//! Every pair of words in the same section is joined by an undirected edge
//! whose weight grows by `1 / distance` each time the pair occurs, where
//! distance is the gap between their positions. Adjacent words add 1, words
//! two apart add 0.5, and so on. Edges never cross sections.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};

use crate::normalize::is_word;
use crate::pipeline::WordStat;

/// Unordered pair of words, stored with the lexicographically smaller word first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    a: String,
    b: String,
}

impl EdgeKey {
    /// Build the canonical key for `{x, y}`.
    pub fn new(x: &str, y: &str) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    /// The two endpoints, smaller first.
    pub fn words(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    /// Returns true if both endpoints are the same word.
    pub fn is_self_edge(&self) -> bool {
        self.a == self.b
    }

    /// Returns true if `word` is one of the endpoints.
    pub fn touches(&self, word: &str) -> bool {
        self.a == word || self.b == word
    }
}

/// One weighted edge, as exported to graph consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Lexicographically smaller endpoint.
    pub source: String,
    /// Lexicographically larger endpoint.
    pub target: String,
    /// Accumulated inverse-distance weight.
    pub weight: f64,
}

/// Weighted, undirected word adjacency.
///
/// The node set is implicit: every word appearing in at least one edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordGraph {
    edges: HashMap<EdgeKey, f64>,
}

impl WordGraph {
    /// Weight of the edge `{a, b}`, or `None` if the words never co-occurred.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        self.edges.get(&EdgeKey::new(a, b)).copied()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over `(key, weight)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, f64)> {
        self.edges.iter().map(|(k, w)| (k, *w))
    }

    /// Every word that is an endpoint of some edge, sorted.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.edges
            .keys()
            .flat_map(|k| [k.a.as_str(), k.b.as_str()])
            .collect()
    }

    /// All edges sorted by `(source, target)`.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .edges
            .iter()
            .map(|(key, weight)| Edge {
                source: key.a.clone(),
                target: key.b.clone(),
                weight: *weight,
            })
            .collect();
        edges.sort_by(|x, y| (&x.source, &x.target).cmp(&(&y.source, &y.target)));
        edges
    }

    /// A copy without any edge touching one of `nodes`.
    ///
    /// This is the consumer-side counterpart of stopword filtering: the
    /// pipeline leaves stopword edges in place, and a visualization that
    /// does not want them drops them here.
    pub fn without_nodes(&self, nodes: &HashSet<String>) -> Self {
        let edges = self
            .edges
            .iter()
            .filter(|(key, _)| !nodes.contains(&key.a) && !nodes.contains(&key.b))
            .map(|(k, w)| (k.clone(), *w))
            .collect();
        Self { edges }
    }

    /// A copy without edges from a word to itself.
    pub fn without_self_edges(&self) -> Self {
        let edges = self
            .edges
            .iter()
            .filter(|(key, _)| !key.is_self_edge())
            .map(|(k, w)| (k.clone(), *w))
            .collect();
        Self { edges }
    }

    /// A copy keeping only edges with `weight >= min_weight`.
    pub fn with_min_weight(&self, min_weight: f64) -> Self {
        let edges = self
            .edges
            .iter()
            .filter(|(_, w)| **w >= min_weight)
            .map(|(k, w)| (k.clone(), *w))
            .collect();
        Self { edges }
    }
}

impl Serialize for WordGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.edges().serialize(serializer)
    }
}

/// Accumulates a [`WordGraph`] one section at a time.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraphBuilder {
    edges: HashMap<EdgeKey, f64>,
}

impl CooccurrenceGraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every pair of words in one section's positional token stream.
    ///
    /// Placeholders keep their positions but never become endpoints.
    pub fn add_section(&mut self, tokens: &[String]) {
        for (i, word) in tokens.iter().enumerate() {
            if !is_word(word) {
                continue;
            }
            for (n, neighbour) in tokens.iter().enumerate().skip(i + 1) {
                if !is_word(neighbour) {
                    continue;
                }
                let weight = 1.0 / (n - i) as f64;
                *self.edges.entry(EdgeKey::new(word, neighbour)).or_insert(0.0) += weight;
            }
        }
    }

    /// Fold another builder into this one by summing weights.
    pub fn merge(&mut self, other: Self) {
        for (key, weight) in other.edges {
            *self.edges.entry(key).or_insert(0.0) += weight;
        }
    }

    /// Finish accumulation.
    pub fn build(self) -> WordGraph {
        WordGraph { edges: self.edges }
    }
}

/// A node in a [`GraphExport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// The word.
    pub id: String,
    /// Occurrences, absent for words excluded from the statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Anomaly score, absent for words excluded from the statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<f64>,
}

/// Node and edge lists ready for a force-directed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Every node of the graph, sorted by word.
    pub nodes: Vec<GraphNode>,
    /// Every edge, sorted by `(source, target)`.
    pub edges: Vec<Edge>,
}

impl GraphExport {
    /// Join a graph with the word statistics that size and colour its nodes.
    pub fn new(graph: &WordGraph, words: &BTreeMap<String, WordStat>) -> Self {
        let nodes = graph
            .nodes()
            .into_iter()
            .map(|id| {
                let stat = words.get(id);
                GraphNode {
                    id: id.to_string(),
                    count: stat.map(|s| s.count),
                    anomaly: stat.map(|s| s.anomaly),
                }
            })
            .collect();
        Self {
            nodes,
            edges: graph.edges(),
        }
    }
}
