//! Betweenness-centrality analysis driven by per-source shortest-path trees
//! (§4.10). Two algorithms compute the same score mapping: a naive
//! `Brute` pass that walks every `(src, dest)` path, and the `Tree`
//! aggregation that folds `DescendantsCount` over each source's tree.

use std::collections::HashMap;

use butterfly_common::{Error, Result, StopId};

use crate::dijkstra::{DescendantsCount, Dijkstra};
use crate::graph::Graph;

/// Which betweenness algorithm `BetweennessAnalysis::compute` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetweennessAlgorithm {
    /// O(V·(V + E·log V)): one Dijkstra plus one `DescendantsCount` pass
    /// per source.
    Tree,
    /// O(V²·E·log V): one Dijkstra per source, then a full path walk to
    /// every destination. Quadratically more work than `Tree`; kept as a
    /// reference implementation the two are tested to agree against.
    Brute,
}

/// Per-node betweenness scores: the number of shortest-path-tree paths
/// passing through each node, summed over all sources.
#[derive(Debug, Clone, Default)]
pub struct BetweennessAnalysis {
    scores: HashMap<StopId, u64>,
}

impl BetweennessAnalysis {
    /// Computes betweenness scores for every node in `graph` using `alg`.
    pub fn compute<G: Graph + ?Sized>(graph: &G, alg: BetweennessAlgorithm) -> Self {
        match alg {
            BetweennessAlgorithm::Tree => Self::compute_tree(graph),
            BetweennessAlgorithm::Brute => Self::compute_brute(graph),
        }
    }

    fn compute_tree<G: Graph + ?Sized>(graph: &G) -> Self {
        let mut scores: HashMap<StopId, u64> = graph.node_ids().map(|id| (id, 0)).collect();

        for src in graph.node_ids() {
            let dijkstra = Dijkstra::run(graph, src);
            let descendants = DescendantsCount::from_engine(&dijkstra);
            for (&node, &count) in descendants.counts() {
                *scores.entry(node).or_insert(0) += count;
            }
        }

        Self { scores }
    }

    fn compute_brute<G: Graph + ?Sized>(graph: &G) -> Self {
        let mut scores: HashMap<StopId, u64> = graph.node_ids().map(|id| (id, 0)).collect();

        for src in graph.node_ids() {
            let dijkstra = Dijkstra::run(graph, src);
            for dest in graph.node_ids() {
                for edge in dijkstra.reverse_path_from(dest) {
                    *scores.entry(edge.dest()).or_insert(0) += 1;
                    if edge.src() == src {
                        *scores.entry(src).or_insert(0) += 1;
                    }
                }
            }
        }

        Self { scores }
    }

    pub fn scores(&self) -> &HashMap<StopId, u64> {
        &self.scores
    }

    pub fn score(&self, node: StopId) -> u64 {
        self.scores.get(&node).copied().unwrap_or(0)
    }

    /// Returns the `k` node ids with the highest score, ties broken toward
    /// the smaller id for repeatability. Errors if `k` falls outside
    /// `[0, scores.len()]` (§4.10, §7).
    pub fn top_scores(&self, k: usize) -> Result<Vec<StopId>> {
        if k > self.scores.len() {
            return Err(Error::RangeError(format!(
                "top_scores({k}) exceeds scored node count {}",
                self.scores.len()
            )));
        }

        let mut by_score: Vec<(StopId, u64)> = self.scores.iter().map(|(&id, &s)| (id, s)).collect();
        by_score.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(by_score.into_iter().take(k).map(|(id, _)| id).collect())
    }
}
