//! # Ontology Model
//!
//! Plain data shared by the graph and its callers: relation kinds with their
//! composition table, edges, and the subgraph result type.
//!
//! This module is pure data: no locks, no caches, no I/O.

pub mod relation_type;
pub mod relationship;
pub mod ancestor_graph;

pub use relation_type::RelationType;
pub use relationship::{OntologyRelationship, TermId};
pub use ancestor_graph::AncestorGraph;
