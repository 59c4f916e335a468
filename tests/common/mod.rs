//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use ontology_graph::{GraphConfig, OntologyGraph, OntologyRelationship, RelationType};

pub const BIOLOGICAL_PROCESS: &str = "GO:0008150";
pub const CELLULAR_PROCESS: &str = "GO:0009987";
pub const METABOLIC_PROCESS: &str = "GO:0008152";
pub const CELLULAR_METABOLIC_PROCESS: &str = "GO:0044237";
pub const TRANSLATION: &str = "GO:0006412";
pub const BIOLOGICAL_REGULATION: &str = "GO:0065007";
pub const REGULATION_OF_BP: &str = "GO:0050789";
pub const REGULATION_OF_TRANSLATION: &str = "GO:0006417";
pub const POS_REGULATION_OF_TRANSLATION: &str = "GO:0045727";

pub const CELLULAR_COMPONENT: &str = "GO:0005575";
pub const INTRACELLULAR_STRUCTURE: &str = "GO:0005622";
pub const RIBOSOME: &str = "GO:0005840";

pub const MOLECULAR_FUNCTION: &str = "GO:0003674";
pub const STRUCTURAL_MOLECULE_ACTIVITY: &str = "GO:0005198";
pub const RIBOSOME_CONSTITUENT: &str = "GO:0003735";

/// A small slice of GO spanning all three aspects and every loadable relation.
pub fn go_triples() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (CELLULAR_PROCESS, BIOLOGICAL_PROCESS, "is_a"),
        (METABOLIC_PROCESS, BIOLOGICAL_PROCESS, "is_a"),
        (CELLULAR_METABOLIC_PROCESS, CELLULAR_PROCESS, "is_a"),
        (CELLULAR_METABOLIC_PROCESS, METABOLIC_PROCESS, "is_a"),
        (TRANSLATION, CELLULAR_METABOLIC_PROCESS, "is_a"),
        (BIOLOGICAL_REGULATION, BIOLOGICAL_PROCESS, "is_a"),
        (REGULATION_OF_BP, BIOLOGICAL_REGULATION, "is_a"),
        (REGULATION_OF_BP, BIOLOGICAL_PROCESS, "regulates"),
        (REGULATION_OF_TRANSLATION, REGULATION_OF_BP, "is_a"),
        (REGULATION_OF_TRANSLATION, TRANSLATION, "regulates"),
        (POS_REGULATION_OF_TRANSLATION, REGULATION_OF_TRANSLATION, "is_a"),
        (POS_REGULATION_OF_TRANSLATION, TRANSLATION, "positively_regulates"),
        (INTRACELLULAR_STRUCTURE, CELLULAR_COMPONENT, "is_a"),
        (RIBOSOME, INTRACELLULAR_STRUCTURE, "part_of"),
        (STRUCTURAL_MOLECULE_ACTIVITY, MOLECULAR_FUNCTION, "is_a"),
        (RIBOSOME_CONSTITUENT, STRUCTURAL_MOLECULE_ACTIVITY, "is_a"),
        (RIBOSOME_CONSTITUENT, RIBOSOME, "occurs_in"),
    ]
}

pub fn go_graph() -> OntologyGraph {
    let graph = OntologyGraph::new();
    graph.add_triples(go_triples()).unwrap();
    graph
}

/// `L1 -is_a-> L2 -is_a-> L3 -is_a-> L4 -is_a-> ROOT -is_a-> ABOVE_ROOT`
pub fn linear_chain() -> OntologyGraph {
    graph_from(
        GraphConfig::default(),
        &[
            ("L1", "L2", RelationType::IsA),
            ("L2", "L3", RelationType::IsA),
            ("L3", "L4", RelationType::IsA),
            ("L4", "ROOT", RelationType::IsA),
            ("ROOT", "ABOVE_ROOT", RelationType::IsA),
        ],
    )
}

pub fn graph_from(config: GraphConfig, edges: &[(&str, &str, RelationType)]) -> OntologyGraph {
    OntologyGraph::from_relationships(
        config,
        edges.iter().map(|&(c, p, r)| OntologyRelationship::new(c, p, r)),
    )
    .unwrap()
}

pub fn edge(child: &str, parent: &str, relation: RelationType) -> OntologyRelationship {
    OntologyRelationship::new(child, parent, relation)
}

pub fn ids(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
