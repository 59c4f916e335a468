//! # ontology-graph: Ontology Traversal Engine
//!
//! Models a biological ontology (e.g. the Gene Ontology) as a directed,
//! labeled multigraph and answers structural queries over it: ancestors,
//! descendants, immediate parents/children, paths between term sets, and
//! "slim" subgraphs bounded by stop nodes.
//!
//! ## Design Principles
//!
//! 1. **Composition is data**: how two relations chain is one explicit table
//!    ([`RelationType::combine`]), never inferred
//! 2. **Load once, read many**: the graph is built at startup and shared
//!    read-only across request threads
//! 3. **No deep recursion**: closures, paths and subgraphs all walk explicit
//!    stacks or queues
//! 4. **DAG assumed, not trusted**: cycles surface as [`Error::CycleDetected`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ontology_graph::{OntologyGraph, RelationType};
//!
//! # fn example() -> ontology_graph::Result<()> {
//! let graph = OntologyGraph::new();
//! graph.add_triples([
//!     ("GO:0000002", "GO:0000001", "is_a"),
//!     ("GO:0000001", "GO:0008150", "part_of"),
//! ])?;
//!
//! let above = graph.ancestors(["GO:0000002"], &[RelationType::PartOf])?;
//! assert!(above.contains("GO:0008150"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod graph;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{AncestorGraph, OntologyRelationship, RelationType, TermId};
pub use config::GraphConfig;
pub use graph::{EdgePath, OntologyGraph, SubGraphCalculator};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown relation type: {0}")]
    UnknownRelation(String),

    #[error("Cycle detected in ontology at vertex {vertex}")]
    CycleDetected { vertex: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
