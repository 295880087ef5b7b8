use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

/// Computes a deterministic SipHash64 of a single item.
///
/// Fixed keys keep the value stable across runs and processes.
pub fn item_hash<T: Hash + ?Sized>(item: &T) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    item.hash(&mut hasher);
    hasher.finish()
}

/// How a pair of items is folded into a single edge key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashPolicy {
    /// `hash(a) ^ hash(b)`; `(a, b)` and `(b, a)` address the same edge.
    #[default]
    Symmetric,
    /// Hash of the ordered tuple; `(a, b)` and `(b, a)` are distinct edges.
    Ordered,
}

impl HashPolicy {
    /// Selects the policy matching a `keep_order` flag.
    pub const fn from_keep_order(keep_order: bool) -> Self {
        if keep_order {
            HashPolicy::Ordered
        } else {
            HashPolicy::Symmetric
        }
    }

    /// Returns true when endpoint order is ignored.
    pub const fn is_symmetric(self) -> bool {
        matches!(self, HashPolicy::Symmetric)
    }

    /// Computes the edge key for `(a, b)`.
    pub fn key<T: Hash + ?Sized>(self, a: &T, b: &T) -> u64 {
        match self {
            HashPolicy::Symmetric => item_hash(a) ^ item_hash(b),
            HashPolicy::Ordered => {
                let mut hasher = SipHasher13::new_with_keys(0, 0);
                a.hash(&mut hasher);
                b.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// True equality of two pairs under this policy.
    ///
    /// Keys only place pairs into buckets; this comparison decides identity.
    pub fn same_pair<T: Eq>(self, lhs: (&T, &T), rhs: (&T, &T)) -> bool {
        if lhs.0 == rhs.0 && lhs.1 == rhs.1 {
            return true;
        }
        self.is_symmetric() && lhs.0 == rhs.1 && lhs.1 == rhs.0
    }
}

/// Predicate deciding whether a submitted pair may form an edge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneracyCheck {
    /// Reject pairs whose items are equal.
    #[default]
    #[serde(alias = "value")]
    ValueEquality,
    /// Reject pairs whose items hash to the same value.
    ///
    /// Over-triggers on hash collisions between distinct items.
    #[serde(alias = "hash")]
    HashEquality,
    /// Never reject; self-pairs become ordinary edges.
    Never,
}

impl DegeneracyCheck {
    /// Returns true when `(a, b)` must not produce an edge.
    pub fn is_degenerate<T: Eq + Hash + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            DegeneracyCheck::ValueEquality => a == b,
            DegeneracyCheck::HashEquality => item_hash(a) == item_hash(b),
            DegeneracyCheck::Never => false,
        }
    }
}
