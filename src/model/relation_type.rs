//! Relation kinds and their composition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The label on a directed ontology edge (child → parent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Synthesized self-edge `(v, v)`; never loaded from raw data.
    Identity,
    IsA,
    PartOf,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    OccursIn,
    /// No valid composed relation. Chains that reach this are discarded.
    Undefined,
}

impl RelationType {
    /// Every relation, sentinels included.
    pub const ALL: [RelationType; 8] = [
        RelationType::Identity,
        RelationType::IsA,
        RelationType::PartOf,
        RelationType::Regulates,
        RelationType::PositivelyRegulates,
        RelationType::NegativelyRegulates,
        RelationType::OccursIn,
        RelationType::Undefined,
    ];

    /// Relations followed when mapping terms up to a GO slim.
    pub const DEFAULT_TRAVERSAL_TYPES: [RelationType; 3] =
        [RelationType::IsA, RelationType::PartOf, RelationType::OccursIn];

    /// Short code used in compact relationship feeds.
    pub fn short_name(self) -> &'static str {
        match self {
            RelationType::Identity => "=",
            RelationType::IsA => "I",
            RelationType::PartOf => "P",
            RelationType::Regulates => "R",
            RelationType::PositivelyRegulates => "PR",
            RelationType::NegativelyRegulates => "NR",
            RelationType::OccursIn => "OI",
            RelationType::Undefined => "?",
        }
    }

    /// OBO-style relation name.
    pub fn long_name(self) -> &'static str {
        match self {
            RelationType::Identity => "identity",
            RelationType::IsA => "is_a",
            RelationType::PartOf => "part_of",
            RelationType::Regulates => "regulates",
            RelationType::PositivelyRegulates => "positively_regulates",
            RelationType::NegativelyRegulates => "negatively_regulates",
            RelationType::OccursIn => "occurs_in",
            RelationType::Undefined => "undefined",
        }
    }

    /// Whether the relation takes part in multi-hop chains.
    pub fn is_transitive(self) -> bool {
        !matches!(self, RelationType::Undefined)
    }

    fn is_regulation(self) -> bool {
        matches!(
            self,
            RelationType::Regulates
                | RelationType::PositivelyRegulates
                | RelationType::NegativelyRegulates
        )
    }

    /// True when `self` is one of `requested`, or `requested` is empty.
    pub fn has_transitive_type(self, requested: &[RelationType]) -> bool {
        requested.is_empty() || requested.contains(&self)
    }

    /// Label of the implied edge `a → c`, given `a -first-> b` and `b -second-> c`.
    ///
    /// Associative, not commutative, and not total: pairs with no sound
    /// composition yield [`RelationType::Undefined`].
    pub fn combine(first: RelationType, second: RelationType) -> RelationType {
        use RelationType::*;

        match (first, second) {
            (Undefined, _) | (_, Undefined) => Undefined,
            (Identity, r) | (r, Identity) => r,
            (IsA, r) | (r, IsA) => r,
            (PartOf, PartOf) => PartOf,
            (r, PartOf) if r.is_regulation() => Regulates,
            (OccursIn, PartOf) => OccursIn,
            _ => Undefined,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for RelationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RelationType::ALL
            .into_iter()
            .find(|r| {
                r.short_name().eq_ignore_ascii_case(trimmed)
                    || r.long_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| Error::UnknownRelation(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
