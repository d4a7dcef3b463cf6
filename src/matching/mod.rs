//! # Containment Matching Engine
//!
//! Decides, for a pair of directed graphs, whether one structurally embeds
//! in the other (directed-edge monomorphism: extra edges and nodes in the
//! host are permitted, missing edges are not) and classifies the result as
//! a [`Verdict`]. The verdict names the superset graph: `BContainsA` means
//! A embeds into B.
//!
//! The engine is a stateless service — `compare` is a free function, holds
//! nothing across calls, and is safe to run in parallel over candidates.

mod search;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{Graph, MAX_NODES};
use crate::signature::signature;
use search::EmbedOutcome;

// ============================================================================
// Search budget
// ============================================================================

/// Step budget for one directed embedding search.
///
/// Counts candidate-target trials. When the budget runs out the comparison
/// reports [`Verdict::Incomparable`] with `budget_exhausted: true` — an
/// inconclusive result, distinct from a confirmed negative, so callers can
/// retry with a larger budget. Each search direction gets its own counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    pub max_steps: u64,
}

impl SearchBudget {
    pub const fn new(max_steps: u64) -> Self {
        Self { max_steps }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        // Generous for graphs in the tens of nodes; sub-millisecond for the
        // corpus sizes this crate targets.
        Self { max_steps: 1_000_000 }
    }
}

// ============================================================================
// Witness mapping
// ============================================================================

/// The injective node mapping proving a containment verdict.
///
/// Index `u` of the smaller graph maps to node `target_of(u)` of the larger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMapping {
    targets: SmallVec<[usize; MAX_NODES]>,
}

impl NodeMapping {
    pub(crate) fn from_targets(targets: SmallVec<[usize; MAX_NODES]>) -> Self {
        Self { targets }
    }

    /// Identity mapping over `n` nodes.
    pub fn identity(n: usize) -> Self {
        Self { targets: (0..n).collect() }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Target of source node `u`.
    pub fn target_of(&self, u: usize) -> usize {
        self.targets[u]
    }

    /// Iterate `(source, target)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    /// True if no two sources share a target.
    pub fn is_injective(&self) -> bool {
        let mut seen = 0u64;
        for &t in &self.targets {
            if seen & (1 << t) != 0 {
                return false;
            }
            seen |= 1 << t;
        }
        true
    }

    /// Verify the mapping: every edge of `small`, pushed through the map,
    /// must land on an edge of `large`.
    pub fn preserves_edges(&self, small: &Graph, large: &Graph) -> bool {
        if self.targets.len() != small.node_count() || !self.is_injective() {
            return false;
        }
        for i in 0..small.node_count() {
            for j in 0..small.node_count() {
                if small.has_edge(i, j) && !large.has_edge(self.targets[i], self.targets[j]) {
                    return false;
                }
            }
        }
        true
    }
}

// ============================================================================
// Verdict
// ============================================================================

/// Classified outcome of comparing graph A (query) against graph B
/// (candidate). Containment verdicts carry the witness mapping from the
/// smaller graph's nodes into the larger graph's nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// Structurally isomorphic. The witness maps A's nodes onto B's.
    EqualSameOrder { witness: NodeMapping },
    /// A is the superset: B embeds into A. Witness maps B → A.
    AContainsB { witness: NodeMapping },
    /// B is the superset: A embeds into B. Witness maps A → B.
    BContainsA { witness: NodeMapping },
    /// Neither graph embeds into the other — or, when `budget_exhausted`
    /// is set, the search gave up before deciding.
    Incomparable { budget_exhausted: bool },
}

impl Verdict {
    /// The witness mapping, when containment holds.
    pub fn witness(&self) -> Option<&NodeMapping> {
        match self {
            Verdict::EqualSameOrder { witness }
            | Verdict::AContainsB { witness }
            | Verdict::BContainsA { witness } => Some(witness),
            Verdict::Incomparable { .. } => None,
        }
    }

    /// False only for a budget-exhausted `Incomparable`.
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Verdict::Incomparable { budget_exhausted: true })
    }
}

// ============================================================================
// compare
// ============================================================================

/// Determine the containment relation between two graphs.
///
/// Runs the embedding search in whichever directions the sizes permit.
/// Equal-size graphs with identical signatures short-circuit to
/// [`Verdict::EqualSameOrder`] with the identity witness (the signature
/// fully determines the matrix for a fixed node ordering); everything else
/// goes through the backtracking search.
pub fn compare(a: &Graph, b: &Graph, budget: SearchBudget) -> Verdict {
    let n = a.node_count();
    let m = b.node_count();

    if n < m {
        return match search::embed(a, b, budget) {
            EmbedOutcome::Found(witness) => Verdict::BContainsA { witness },
            EmbedOutcome::Absent => Verdict::Incomparable { budget_exhausted: false },
            EmbedOutcome::OutOfBudget => Verdict::Incomparable { budget_exhausted: true },
        };
    }

    if n > m {
        return match search::embed(b, a, budget) {
            EmbedOutcome::Found(witness) => Verdict::AContainsB { witness },
            EmbedOutcome::Absent => Verdict::Incomparable { budget_exhausted: false },
            EmbedOutcome::OutOfBudget => Verdict::Incomparable { budget_exhausted: true },
        };
    }

    if signature(a) == signature(b) {
        return Verdict::EqualSameOrder { witness: NodeMapping::identity(n) };
    }

    // Equal size does not preclude either direction failing, or both
    // succeeding (isomorphism via relabeling).
    let forward = search::embed(a, b, budget);
    let backward = search::embed(b, a, budget);

    match (forward, backward) {
        (EmbedOutcome::Found(witness), EmbedOutcome::Found(_)) => {
            Verdict::EqualSameOrder { witness }
        }
        (EmbedOutcome::Found(witness), _) => Verdict::BContainsA { witness },
        (_, EmbedOutcome::Found(witness)) => Verdict::AContainsB { witness },
        (forward, backward) => Verdict::Incomparable {
            budget_exhausted: forward == EmbedOutcome::OutOfBudget
                || backward == EmbedOutcome::OutOfBudget,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
