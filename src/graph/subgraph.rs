//! SubGraphCalculator: slim subgraph extraction on an explicit work queue.
//!
//! Starting from the base vertices, walks parent edges until the queue is
//! drained, never looking past a stop node. Each vertex is processed at most
//! once, so diamonds and even cycles terminate, and stack depth stays flat no
//! matter how deep the hierarchy is.

use std::collections::{HashSet, VecDeque};

use super::OntologyGraph;
use crate::model::{AncestorGraph, RelationType, TermId};

/// One subgraph request: the relations to follow and where to stop.
///
/// The visited set lives in the result, not in the graph's closure cache,
/// because stop nodes differ per request.
pub struct SubGraphCalculator<'g> {
    graph: &'g OntologyGraph,
    stop_nodes: HashSet<TermId>,
    relations: Vec<RelationType>,
}

impl<'g> SubGraphCalculator<'g> {
    pub fn new(
        graph: &'g OntologyGraph,
        stop_nodes: HashSet<TermId>,
        relations: &[RelationType],
    ) -> Self {
        Self {
            graph,
            stop_nodes,
            relations: relations.to_vec(),
        }
    }

    /// Drain the work queue seeded with `base_vertices`.
    ///
    /// Vertices that cannot be looked up (unknown or malformed ids) are
    /// logged and skipped; they never fail the whole extraction.
    pub fn calculate<I>(&self, base_vertices: I) -> AncestorGraph
    where
        I: IntoIterator<Item = TermId>,
    {
        let mut queue: VecDeque<TermId> = base_vertices.into_iter().collect();
        let mut result = AncestorGraph::new();

        while let Some(vertex) = queue.pop_front() {
            if result.vertices.contains(&vertex) {
                continue;
            }
            if !self.graph.contains_vertex(&vertex) {
                tracing::warn!(%vertex, "skipping vertex absent from the ontology");
                continue;
            }

            let parents = if self.stop_nodes.contains(&vertex) {
                None
            } else {
                match self.graph.parents(&vertex, &self.relations) {
                    Ok(parents) => Some(parents),
                    Err(e) => {
                        tracing::warn!(%vertex, error = %e, "skipping vertex whose parents could not be read");
                        continue;
                    }
                }
            };

            result.vertices.insert(vertex);
            for edge in parents.into_iter().flatten() {
                if !result.vertices.contains(&edge.parent) {
                    queue.push_back(edge.parent.clone());
                }
                result.edges.insert(edge);
            }
        }

        tracing::debug!(
            vertices = result.vertices.len(),
            edges = result.edges.len(),
            "extracted ancestor subgraph"
        );
        result
    }
}
