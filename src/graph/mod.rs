//! # Ontology Graph
//!
//! A directed multigraph of ontology terms. Edges point from child to parent
//! and carry a [`RelationType`]; parallel edges between the same ordered pair
//! are allowed when their relations differ.
//!
//! ## Lifecycle
//!
//! The graph is loaded once via [`OntologyGraph::add_relationships`] (which may
//! be called repeatedly for incremental bulk loads) and is read-only after
//! that. Ancestor-edge closures are computed on first use and cached for the
//! lifetime of the graph; they are never invalidated, so edges added after the
//! first query may not be reflected by cached closures.
//!
//! ## Acyclicity
//!
//! Ancestor closures assume the relationship graph is a DAG. A cycle is not
//! silently tolerated: the closure walk reports [`Error::CycleDetected`], and
//! hosts can assert the assumption up front with
//! [`OntologyGraph::check_acyclic`].
//!
//! ## Concurrency
//!
//! `OntologyGraph` is `Send + Sync`. Edge storage sits behind one `RwLock`,
//! the closure cache behind another. Cache misses are computed outside the
//! cache lock and published compute-if-absent, so concurrent first readers of
//! the same vertex always observe one value.

mod closure;
mod paths;
mod subgraph;

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::config::GraphConfig;
use crate::model::*;
use crate::{Error, Result};

pub use paths::EdgePath;
pub use subgraph::SubGraphCalculator;

/// Edge indices incident to one vertex. Most GO terms have a handful of parents.
type EdgeList = SmallVec<[usize; 4]>;

type ClosureCache = HashMap<TermId, Arc<HashSet<OntologyRelationship>>>;

// ============================================================================
// Edge storage
// ============================================================================

#[derive(Debug, Default)]
pub(crate) struct EdgeStore {
    vertices: HashSet<TermId>,
    edges: Vec<OntologyRelationship>,
    /// edge → position in `edges`, for idempotent inserts
    edge_ids: HashMap<OntologyRelationship, usize>,
    /// vertex → edges where it is the child ("is-a-child-of")
    outgoing: HashMap<TermId, EdgeList>,
    /// vertex → edges where it is the parent ("is-a-parent-of")
    incoming: HashMap<TermId, EdgeList>,
}

impl EdgeStore {
    fn insert(&mut self, edge: OntologyRelationship) -> bool {
        if self.edge_ids.contains_key(&edge) {
            return false;
        }
        let id = self.edges.len();
        self.vertices.insert(edge.child.clone());
        self.vertices.insert(edge.parent.clone());
        self.outgoing.entry(edge.child.clone()).or_default().push(id);
        self.incoming.entry(edge.parent.clone()).or_default().push(id);
        self.edge_ids.insert(edge.clone(), id);
        self.edges.push(edge);
        true
    }

    pub(crate) fn contains(&self, vertex: &str) -> bool {
        self.vertices.contains(vertex)
    }

    pub(crate) fn outgoing(&self, vertex: &str) -> &[usize] {
        self.outgoing.get(vertex).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn incoming(&self, vertex: &str) -> &[usize] {
        self.incoming.get(vertex).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn edge(&self, id: usize) -> &OntologyRelationship {
        &self.edges[id]
    }

    fn filtered(&self, ids: &[usize], relations: &[RelationType]) -> HashSet<OntologyRelationship> {
        ids.iter()
            .map(|&id| &self.edges[id])
            .filter(|e| e.relationship.has_transitive_type(relations))
            .cloned()
            .collect()
    }
}

// ============================================================================
// OntologyGraph
// ============================================================================

/// The ontology as a queryable multigraph.
pub struct OntologyGraph {
    config: GraphConfig,
    store: RwLock<EdgeStore>,
    /// vertex → memoized ancestor-edge closure
    ancestor_edges: RwLock<ClosureCache>,
}

impl Default for OntologyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyGraph {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            store: RwLock::new(EdgeStore::default()),
            ancestor_edges: RwLock::new(HashMap::new()),
        }
    }

    /// Build a graph in one step: load `edges`, then pre-warm the closure
    /// cache if the config asks for it.
    pub fn from_relationships<I>(config: GraphConfig, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = OntologyRelationship>,
    {
        let graph = Self::with_config(config);
        graph.add_relationships(edges)?;
        if graph.config.prewarm_cache {
            graph.warm_cache()?;
        }
        Ok(graph)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Insert edges, creating vertices on first sight. Returns how many edges
    /// were new.
    ///
    /// The batch is validated before anything is inserted: blank endpoints and
    /// the synthetic `identity`/`undefined` relations are rejected.
    pub fn add_relationships<I>(&self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = OntologyRelationship>,
    {
        let edges: Vec<OntologyRelationship> = edges.into_iter().collect();
        for edge in &edges {
            require_vertex(&edge.child)?;
            require_vertex(&edge.parent)?;
            if matches!(edge.relationship, RelationType::Identity | RelationType::Undefined) {
                return Err(Error::InvalidArgument(format!(
                    "cannot insert synthetic relation: {edge}"
                )));
            }
        }

        if !self.ancestor_edges.read().is_empty() {
            tracing::warn!("adding relationships after ancestor closures were cached; cached closures are not refreshed");
        }

        let mut store = self.store.write();
        let submitted = edges.len();
        let mut inserted = 0;
        for edge in edges {
            if store.insert(edge) {
                inserted += 1;
            }
        }
        tracing::debug!(
            submitted,
            inserted,
            vertices = store.vertices.len(),
            edges = store.edges.len(),
            "loaded ontology relationships"
        );
        Ok(inserted)
    }

    /// Insert raw `(child, parent, relation name)` triples. All triples are
    /// parsed before any is inserted.
    pub fn add_triples<I, S>(&self, triples: I) -> Result<usize>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let edges = triples
            .into_iter()
            .map(|(c, p, r)| OntologyRelationship::from_triple(c.as_ref(), p.as_ref(), r.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.add_relationships(edges)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn vertex_count(&self) -> usize {
        self.store.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.store.read().edges.len()
    }

    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.store.read().contains(vertex)
    }

    pub fn vertices(&self) -> HashSet<TermId> {
        self.store.read().vertices.clone()
    }

    pub fn edges(&self) -> HashSet<OntologyRelationship> {
        self.store.read().edges.iter().cloned().collect()
    }

    /// Distinct relations present, sorted.
    pub fn relation_types(&self) -> Vec<RelationType> {
        let store = self.store.read();
        let set: BTreeSet<RelationType> = store.edges.iter().map(|e| e.relationship).collect();
        set.into_iter().collect()
    }

    pub fn is_stop_node(&self, vertex: &str) -> bool {
        self.config.stop_nodes.contains(vertex)
    }

    // ========================================================================
    // One-hop queries
    // ========================================================================

    /// Outgoing edges of `vertex` whose relation is in `relations` (empty = all).
    /// An unknown vertex has no parents.
    pub fn parents(
        &self,
        vertex: &str,
        relations: &[RelationType],
    ) -> Result<HashSet<OntologyRelationship>> {
        require_vertex(vertex)?;
        let store = self.store.read();
        Ok(store.filtered(store.outgoing(vertex), relations))
    }

    /// Incoming edges of `vertex` whose relation is in `relations` (empty = all).
    pub fn children(
        &self,
        vertex: &str,
        relations: &[RelationType],
    ) -> Result<HashSet<OntologyRelationship>> {
        require_vertex(vertex)?;
        let store = self.store.read();
        Ok(store.filtered(store.incoming(vertex), relations))
    }

    // ========================================================================
    // Transitive queries
    // ========================================================================

    /// Every vertex reachable from any base vertex through a chain whose
    /// composed relation is in `relations`.
    ///
    /// A base vertex appears in its own result only when `relations` is empty
    /// (through its identity edge). Unknown base vertices are skipped.
    pub fn ancestors<I>(&self, base_vertices: I, relations: &[RelationType]) -> Result<HashSet<TermId>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let base = require_vertex_set("base vertices", base_vertices)?;
        let store = self.store.read();
        let mut result = HashSet::new();
        for vertex in base.iter().filter(|v| store.contains(v)) {
            let closure = self.closure_for(&store, vertex)?;
            result.extend(
                closure
                    .iter()
                    .filter(|e| e.relationship.has_transitive_type(relations))
                    .map(|e| e.parent.clone()),
            );
        }
        Ok(result)
    }

    /// Every vertex that reaches any top vertex through a chain whose composed
    /// relation is in `relations`, plus the (known) top vertices themselves.
    ///
    /// Not memoized. Visited `(vertex, relation)` pairs are tracked, so this
    /// terminates even on cyclic input.
    pub fn descendants<I>(&self, top_vertices: I, relations: &[RelationType]) -> Result<HashSet<TermId>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tops = require_vertex_set("top vertices", top_vertices)?;
        let store = self.store.read();

        let mut result = HashSet::new();
        let mut seen: HashSet<(&str, RelationType)> = HashSet::new();
        let mut queue: VecDeque<(&str, RelationType)> = VecDeque::new();

        for top in &tops {
            if let Some(vertex) = store.vertices.get(top.as_str()) {
                result.insert(vertex.clone());
                if seen.insert((vertex.as_str(), RelationType::Identity)) {
                    queue.push_back((vertex.as_str(), RelationType::Identity));
                }
            }
        }

        while let Some((vertex, to_top)) = queue.pop_front() {
            for &id in store.incoming(vertex) {
                let edge = store.edge(id);
                let combined = RelationType::combine(edge.relationship, to_top);
                if combined == RelationType::Undefined {
                    continue;
                }
                if seen.insert((edge.child.as_str(), combined)) {
                    if combined.has_transitive_type(relations) {
                        result.insert(edge.child.clone());
                    }
                    queue.push_back((edge.child.as_str(), combined));
                }
            }
        }

        Ok(result)
    }

    /// Ancestor subgraph of `base_vertices`, bounded by `stop_nodes`. An empty
    /// stop set falls back to the configured stop nodes.
    ///
    /// Unknown base vertices are skipped, not reported.
    pub fn sub_graph<I, S>(
        &self,
        base_vertices: I,
        stop_nodes: S,
        relations: &[RelationType],
    ) -> Result<AncestorGraph>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let base: Vec<TermId> = base_vertices
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        if base.is_empty() {
            return Err(Error::InvalidArgument("base vertices must not be empty".into()));
        }

        let mut stops: HashSet<TermId> = stop_nodes
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        if stops.is_empty() {
            stops = self.config.stop_nodes.iter().cloned().collect();
        }

        Ok(SubGraphCalculator::new(self, stops, relations).calculate(base))
    }

    // ========================================================================
    // Startup checks
    // ========================================================================

    /// Verify the relationship graph is a DAG (Kahn's algorithm over
    /// child → parent edges).
    pub fn check_acyclic(&self) -> Result<()> {
        let store = self.store.read();
        let mut pending: HashMap<&str, usize> = store
            .vertices
            .iter()
            .map(|v| (v.as_str(), store.outgoing(v).len()))
            .collect();
        let mut ready: Vec<&str> = pending
            .iter()
            .filter(|&(_, &n)| n == 0)
            .map(|(&v, _)| v)
            .collect();

        let mut removed = 0;
        while let Some(vertex) = ready.pop() {
            removed += 1;
            for &id in store.incoming(vertex) {
                let child = store.edge(id).child.as_str();
                if let Some(n) = pending.get_mut(child) {
                    *n -= 1;
                    if *n == 0 {
                        ready.push(child);
                    }
                }
            }
        }

        if removed == store.vertices.len() {
            return Ok(());
        }
        let vertex = pending
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&v, _)| v)
            .min()
            .unwrap_or_default()
            .to_string();
        tracing::warn!(%vertex, "ontology relationships contain a cycle");
        Err(Error::CycleDetected { vertex })
    }
}

impl std::fmt::Debug for OntologyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read();
        f.debug_struct("OntologyGraph")
            .field("vertices", &store.vertices.len())
            .field("edges", &store.edges.len())
            .field("cached_closures", &self.ancestor_edges.read().len())
            .finish()
    }
}

/// Structural equality: vertex set, edge set and cache contents.
impl PartialEq for OntologyGraph {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let (a, b) = (self.store.read(), other.store.read());
        if a.vertices != b.vertices || a.edges.len() != b.edges.len() {
            return false;
        }
        if !a.edges.iter().all(|e| b.edge_ids.contains_key(e)) {
            return false;
        }
        let (ca, cb) = (self.ancestor_edges.read(), other.ancestor_edges.read());
        ca.len() == cb.len()
            && ca
                .iter()
                .all(|(k, v)| cb.get(k).is_some_and(|w| v.as_ref() == w.as_ref()))
    }
}

impl Eq for OntologyGraph {}

// ============================================================================
// Argument validation
// ============================================================================

fn require_vertex(vertex: &str) -> Result<()> {
    if vertex.trim().is_empty() {
        return Err(Error::InvalidArgument("vertex id must not be blank".into()));
    }
    Ok(())
}

fn require_vertex_set<I>(what: &str, vertices: I) -> Result<Vec<TermId>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let vertices: Vec<TermId> = vertices
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect();
    if vertices.is_empty() {
        return Err(Error::InvalidArgument(format!("{what} must not be empty")));
    }
    for v in &vertices {
        require_vertex(v)?;
    }
    Ok(vertices)
}

// ============================================================================
// Tests
// ============================================================================
