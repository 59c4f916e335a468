//! AncestorGraph: the vertices and edges of an extracted slim subgraph.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::OntologyRelationship;

/// Query result of a subgraph extraction. Not part of the stored model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorGraph {
    pub vertices: HashSet<String>,
    pub edges: HashSet<OntologyRelationship>,
}

impl AncestorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.vertices.contains(vertex)
    }

    /// Edges leaving `vertex` inside this subgraph.
    pub fn edges_from<'a>(
        &'a self,
        vertex: &'a str,
    ) -> impl Iterator<Item = &'a OntologyRelationship> + 'a {
        self.edges.iter().filter(move |e| e.child == vertex)
    }
}
