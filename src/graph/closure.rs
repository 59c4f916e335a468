//! Memoized ancestor-edge closures.
//!
//! For a vertex `v`, the closure is `(v, v, IDENTITY)` plus, for every
//! outgoing edge `(v, p, r1)` and every `(p, a, r2)` in the closure of `p`,
//! the edge `(v, a, combine(r1, r2))` unless that composes to `UNDEFINED`.
//! Stop nodes contribute only their identity edge.
//!
//! The walk is a post-order DFS on an explicit stack, so deep hierarchies
//! cannot exhaust the call stack. Parents are always published to the cache
//! before the children that read them.

use std::collections::HashSet;
use std::sync::Arc;

use super::{require_vertex, EdgeStore, OntologyGraph};
use crate::model::{OntologyRelationship, RelationType};
use crate::{Error, Result};

type Closure = Arc<HashSet<OntologyRelationship>>;

struct Frame<'s> {
    vertex: &'s str,
    next_parent: usize,
}

impl OntologyGraph {
    /// The full ancestor-edge closure of `vertex`, identity edge included.
    /// Unknown vertices have an empty closure and are not cached.
    pub fn ancestor_edges(&self, vertex: &str) -> Result<Closure> {
        require_vertex(vertex)?;
        let store = self.store.read();
        if !store.contains(vertex) {
            return Ok(Closure::default());
        }
        self.closure_for(&store, vertex)
    }

    /// Compute and cache the closure of every vertex. Meant to run once,
    /// single-threaded, after loading and before serving queries.
    pub fn warm_cache(&self) -> Result<usize> {
        let store = self.store.read();
        for vertex in &store.vertices {
            self.closure_for(&store, vertex)?;
        }
        let cached = self.ancestor_edges.read().len();
        tracing::debug!(cached, "pre-warmed ancestor closures");
        Ok(cached)
    }

    pub(super) fn closure_for<'s>(&self, store: &'s EdgeStore, root: &'s str) -> Result<Closure> {
        if let Some(hit) = self.cached(root) {
            return Ok(hit);
        }

        let mut stack = vec![Frame { vertex: root, next_parent: 0 }];
        let mut on_stack: HashSet<&str> = HashSet::from([root]);
        let mut last = Closure::default();

        while let Some(frame) = stack.last_mut() {
            let parents = self.expandable(store, frame.vertex);
            if let Some(&id) = parents.get(frame.next_parent) {
                frame.next_parent += 1;
                let parent = store.edge(id).parent.as_str();
                if self.ancestor_edges.read().contains_key(parent) {
                    continue;
                }
                if on_stack.contains(parent) {
                    tracing::warn!(vertex = parent, "cycle in ancestor closure");
                    return Err(Error::CycleDetected { vertex: parent.to_string() });
                }
                on_stack.insert(parent);
                stack.push(Frame { vertex: parent, next_parent: 0 });
                continue;
            }

            let vertex = frame.vertex;
            let closure = self.compose(store, vertex);
            last = self.publish(vertex, closure);
            stack.pop();
            on_stack.remove(vertex);
        }

        // root is popped last
        Ok(last)
    }

    fn expandable<'s>(&self, store: &'s EdgeStore, vertex: &str) -> &'s [usize] {
        if self.is_stop_node(vertex) {
            &[]
        } else {
            store.outgoing(vertex)
        }
    }

    fn compose(&self, store: &EdgeStore, vertex: &str) -> HashSet<OntologyRelationship> {
        let mut closure = HashSet::from([OntologyRelationship::identity(vertex)]);
        for &id in self.expandable(store, vertex) {
            let edge = store.edge(id);
            let Some(upper) = self.cached(&edge.parent) else {
                continue;
            };
            for ancestor in upper.iter() {
                let combined = RelationType::combine(edge.relationship, ancestor.relationship);
                if combined != RelationType::Undefined {
                    closure.insert(OntologyRelationship::new(
                        vertex,
                        ancestor.parent.clone(),
                        combined,
                    ));
                }
            }
        }
        tracing::trace!(vertex, ancestors = closure.len(), "computed ancestor closure");
        closure
    }

    fn cached(&self, vertex: &str) -> Option<Closure> {
        self.ancestor_edges.read().get(vertex).cloned()
    }

    /// Compute-if-absent: the first published closure wins.
    fn publish(&self, vertex: &str, closure: HashSet<OntologyRelationship>) -> Closure {
        self.ancestor_edges
            .write()
            .entry(vertex.to_string())
            .or_insert_with(|| Arc::new(closure))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use RelationType::*;

    fn graph(config: GraphConfig, edges: &[(&str, &str, RelationType)]) -> OntologyGraph {
        let g = OntologyGraph::with_config(config);
        g.add_relationships(edges.iter().map(|&(c, p, r)| OntologyRelationship::new(c, p, r)))
            .unwrap();
        g
    }

    #[test]
    fn test_closure_contains_identity_and_composed_edges() {
        let g = graph(GraphConfig::default(), &[("X", "Y", IsA), ("Y", "Z", PartOf)]);
        let closure = g.ancestor_edges("X").unwrap();
        let expected: HashSet<_> = [
            OntologyRelationship::identity("X"),
            OntologyRelationship::new("X", "Y", IsA),
            OntologyRelationship::new("X", "Z", PartOf),
        ]
        .into_iter()
        .collect();
        assert_eq!(*closure, expected);
    }

    #[test]
    fn test_closure_keeps_parallel_relations() {
        // X reaches Z both as is_a and as part_of.
        let g = graph(
            GraphConfig::default(),
            &[("X", "Y", IsA), ("X", "Y", PartOf), ("Y", "Z", IsA)],
        );
        let closure = g.ancestor_edges("X").unwrap();
        assert!(closure.contains(&OntologyRelationship::new("X", "Z", IsA)));
        assert!(closure.contains(&OntologyRelationship::new("X", "Z", PartOf)));
    }

    #[test]
    fn test_stop_node_is_not_expanded() {
        let config = GraphConfig::default().with_stop_nodes(["B"]);
        let g = graph(config, &[("A", "B", IsA), ("B", "C", IsA)]);
        let closure = g.ancestor_edges("B").unwrap();
        assert_eq!(closure.len(), 1);
        assert!(closure.contains(&OntologyRelationship::identity("B")));

        let above_a: HashSet<String> = g.ancestors(["A"], &[IsA]).unwrap();
        assert_eq!(above_a, HashSet::from(["B".to_string()]));
    }

    #[test]
    fn test_unknown_vertex_has_empty_closure() {
        let g = graph(GraphConfig::default(), &[("A", "B", IsA)]);
        assert!(g.ancestor_edges("GO:9999999").unwrap().is_empty());
        assert!(matches!(g.ancestor_edges(""), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_cycle_is_reported() {
        let g = graph(
            GraphConfig::default(),
            &[("A", "B", IsA), ("B", "C", IsA), ("C", "A", PartOf)],
        );
        assert!(matches!(g.ancestor_edges("A"), Err(Error::CycleDetected { .. })));
        assert!(matches!(g.ancestors(["B"], &[]), Err(Error::CycleDetected { .. })));
    }

    #[test]
    fn test_self_loop_is_reported() {
        let g = graph(GraphConfig::default(), &[("A", "A", IsA)]);
        assert!(matches!(
            g.ancestor_edges("A"),
            Err(Error::CycleDetected { vertex }) if vertex == "A"
        ));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        // part_of/regulates alternate, so every closure stays small while the
        // walk still has to climb the whole chain.
        let depth = 50_000;
        let names: Vec<String> = (0..=depth).map(|i| format!("T{i}")).collect();
        let g = OntologyGraph::new();
        g.add_relationships(names.windows(2).enumerate().map(|(i, w)| {
            let relation = if i % 2 == 0 { PartOf } else { Regulates };
            OntologyRelationship::new(w[0].clone(), w[1].clone(), relation)
        }))
        .unwrap();

        assert_eq!(
            g.ancestors([names[0].as_str()], &[]).unwrap(),
            HashSet::from([names[0].clone(), names[1].clone()])
        );
        assert_eq!(
            g.ancestors([names[1].as_str()], &[Regulates]).unwrap(),
            HashSet::from([names[2].clone(), names[3].clone()])
        );
    }

    #[test]
    fn test_warm_cache_covers_every_vertex() {
        let g = graph(
            GraphConfig::default().with_prewarm(true),
            &[("A", "B", IsA), ("B", "C", PartOf), ("D", "C", IsA)],
        );
        assert_eq!(g.warm_cache().unwrap(), 4);
        let before = g.ancestor_edges("A").unwrap();
        g.warm_cache().unwrap();
        assert!(Arc::ptr_eq(&before, &g.ancestor_edges("A").unwrap()));
    }

    #[test]
    fn test_cached_closure_is_shared() {
        let g = graph(GraphConfig::default(), &[("A", "B", IsA)]);
        let first = g.ancestor_edges("A").unwrap();
        let second = g.ancestor_edges("A").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
