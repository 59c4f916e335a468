//! Relationship (edge) between two ontology terms.

use serde::{Deserialize, Serialize};

use super::RelationType;
use crate::{Error, Result};

/// Opaque term identifier, e.g. `"GO:0008150"`.
pub type TermId = String;

/// A directed edge: `child` stands in `relationship` to `parent`.
///
/// Equality and hashing cover all three fields, so two edges between the
/// same ordered pair with different relations are distinct (multigraph).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OntologyRelationship {
    pub child: TermId,
    pub parent: TermId,
    pub relationship: RelationType,
}

impl OntologyRelationship {
    pub fn new(
        child: impl Into<TermId>,
        parent: impl Into<TermId>,
        relationship: RelationType,
    ) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
            relationship,
        }
    }

    /// Build an edge from a raw `(child, parent, relation name)` feed triple.
    ///
    /// Rejects blank ids, unknown relation names and the synthetic
    /// `identity`/`undefined` relations, which never appear in loaded data.
    pub fn from_triple(child: &str, parent: &str, relation: &str) -> Result<Self> {
        if child.trim().is_empty() || parent.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "relationship endpoints must not be blank: ({child:?}, {parent:?})"
            )));
        }
        let relationship: RelationType = relation.parse()?;
        if matches!(relationship, RelationType::Identity | RelationType::Undefined) {
            return Err(Error::InvalidArgument(format!(
                "relation {relationship} cannot be loaded from raw data"
            )));
        }
        Ok(Self::new(child, parent, relationship))
    }

    /// The synthesized self-edge `(vertex, vertex, IDENTITY)`.
    pub fn identity(vertex: impl Into<TermId>) -> Self {
        let vertex = vertex.into();
        Self {
            child: vertex.clone(),
            parent: vertex,
            relationship: RelationType::Identity,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.relationship == RelationType::Identity
    }
}

impl std::fmt::Display for OntologyRelationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.child, self.relationship, self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_covers_relation() {
        let a = OntologyRelationship::new("GO:1", "GO:2", RelationType::IsA);
        let b = OntologyRelationship::new("GO:1", "GO:2", RelationType::PartOf);
        let set: HashSet<_> = [a.clone(), b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_triple() {
        let edge = OntologyRelationship::from_triple("GO:1", "GO:2", "part_of").unwrap();
        assert_eq!(edge, OntologyRelationship::new("GO:1", "GO:2", RelationType::PartOf));

        assert!(matches!(
            OntologyRelationship::from_triple(" ", "GO:2", "is_a"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            OntologyRelationship::from_triple("GO:1", "GO:2", "sibling_of"),
            Err(Error::UnknownRelation(_))
        ));
        assert!(matches!(
            OntologyRelationship::from_triple("GO:1", "GO:1", "identity"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_identity_edge() {
        let edge = OntologyRelationship::identity("GO:7");
        assert!(edge.is_identity());
        assert_eq!(edge.child, edge.parent);
        assert_eq!(edge.to_string(), "GO:7 -[identity]-> GO:7");
    }
}
