//! All-paths enumeration between two vertex sets.

use std::collections::HashSet;

use super::{require_vertex_set, EdgeStore, OntologyGraph};
use crate::model::{OntologyRelationship, RelationType};
use crate::{Error, Result};

/// A path as the ordered list of edges walked, child to parent.
pub type EdgePath = Vec<OntologyRelationship>;

impl OntologyGraph {
    /// Every simple directed path from a start vertex to an end vertex that
    /// uses only edges whose relation is in `relations` (empty = all).
    ///
    /// Direct one-hop edges between a start and an end vertex are reported
    /// first, then the multi-hop enumeration. Paths equal by value are
    /// reported once. A path may pass through one end vertex on its way to
    /// another.
    ///
    /// Fails if either set is empty or the two sets intersect.
    pub fn paths<S, E>(
        &self,
        start_vertices: S,
        end_vertices: E,
        relations: &[RelationType],
    ) -> Result<Vec<EdgePath>>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let starts = require_vertex_set("start vertices", start_vertices)?;
        let ends = require_vertex_set("end vertices", end_vertices)?;
        let end_set: HashSet<&str> = ends.iter().map(String::as_str).collect();
        if let Some(both) = starts.iter().find(|v| end_set.contains(v.as_str())) {
            return Err(Error::InvalidArgument(format!(
                "vertex {both} is both a start and an end vertex"
            )));
        }

        let store = self.store.read();
        let mut seen: HashSet<EdgePath> = HashSet::new();
        let mut result = Vec::new();
        let mut report = |path: EdgePath| {
            if seen.insert(path.clone()) {
                result.push(path);
            }
        };

        for start in &starts {
            for &id in store.outgoing(start) {
                let edge = store.edge(id);
                if end_set.contains(edge.parent.as_str())
                    && edge.relationship.has_transitive_type(relations)
                {
                    report(vec![edge.clone()]);
                }
            }
        }

        for start in starts.iter().filter(|v| store.contains(v)) {
            for path in enumerate_from(&store, start, &end_set, relations) {
                report(path);
            }
        }

        Ok(result)
    }
}

/// Iterative DFS over simple paths starting at `start`.
fn enumerate_from(
    store: &EdgeStore,
    start: &str,
    ends: &HashSet<&str>,
    relations: &[RelationType],
) -> Vec<EdgePath> {
    let mut found = Vec::new();
    // (vertex, next outgoing edge to try)
    let mut frames: Vec<(&str, usize)> = vec![(start, 0)];
    let mut on_path: HashSet<&str> = HashSet::from([start]);
    let mut path: Vec<usize> = Vec::new();

    while let Some(frame) = frames.last_mut() {
        let (vertex, cursor) = *frame;
        let outgoing = store.outgoing(vertex);
        let Some(&id) = outgoing.get(cursor) else {
            frames.pop();
            on_path.remove(vertex);
            path.pop();
            continue;
        };
        frame.1 += 1;

        let edge = store.edge(id);
        let parent = edge.parent.as_str();
        if !edge.relationship.has_transitive_type(relations) || on_path.contains(parent) {
            continue;
        }

        path.push(id);
        if ends.contains(parent) {
            found.push(path.iter().map(|&i| store.edge(i).clone()).collect());
        }
        on_path.insert(parent);
        frames.push((parent, 0));
    }

    found
}
