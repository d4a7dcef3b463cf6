//! Backtracking monomorphism search.
//!
//! Finds an injective map `f: nodes(small) → nodes(large)` such that every
//! edge `i → j` of the small graph has a counterpart `f(i) → f(j)` in the
//! large graph. Extra edges and nodes in the target are allowed; missing
//! edges are not. Worst case `m!/(m-n)!` — the step budget is the guard.
//!
//! Pruning, in order of application:
//! 1. edge-count reject (an embeddable graph cannot have more edges)
//! 2. degree-sequence domination (sorted out/in sequences, admissible only)
//! 3. per-pair degree feasibility during the search
//! 4. most-constrained-first node ordering (highest combined degree first)

use smallvec::SmallVec;

use super::{NodeMapping, SearchBudget};
use crate::model::{Graph, MAX_NODES};

/// Outcome of one directed embedding search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EmbedOutcome {
    /// A complete injective edge-preserving mapping was found.
    Found(NodeMapping),
    /// The search space was exhausted — provably no mapping.
    Absent,
    /// The step budget ran out before the search finished. Inconclusive.
    OutOfBudget,
}

enum Step {
    Matched,
    Deadend,
    OutOfSteps,
}

struct SearchState<'g> {
    small: &'g Graph,
    large: &'g Graph,
    /// Query nodes in assignment order, most-constrained first.
    order: SmallVec<[usize; MAX_NODES]>,
    /// map[u] = target of small node u (valid for already-assigned nodes).
    map: SmallVec<[usize; MAX_NODES]>,
    /// Bitmask over large nodes already used as targets.
    used: u32,
    steps: u64,
    max_steps: u64,
}

/// Search for an embedding of `small` into `large`.
pub(crate) fn embed(small: &Graph, large: &Graph, budget: SearchBudget) -> EmbedOutcome {
    let n = small.node_count();
    let m = large.node_count();

    if n > m || small.edge_count() > large.edge_count() {
        return EmbedOutcome::Absent;
    }
    if !degrees_dominated(small, large) {
        return EmbedOutcome::Absent;
    }

    // Most-constrained first: highest combined degree gets assigned earliest,
    // so edge-consistency checks bite as soon as possible.
    let mut order: SmallVec<[usize; MAX_NODES]> = (0..n).collect();
    order.sort_by_key(|&u| std::cmp::Reverse(small.out_degree(u) + small.in_degree(u)));

    let mut state = SearchState {
        small,
        large,
        order,
        map: SmallVec::from_elem(0, n),
        used: 0,
        steps: 0,
        max_steps: budget.max_steps,
    };

    match extend(&mut state, 0) {
        Step::Matched => EmbedOutcome::Found(NodeMapping::from_targets(state.map)),
        Step::Deadend => EmbedOutcome::Absent,
        Step::OutOfSteps => EmbedOutcome::OutOfBudget,
    }
}

fn extend(state: &mut SearchState<'_>, depth: usize) -> Step {
    if depth == state.order.len() {
        return Step::Matched;
    }

    let u = state.order[depth];
    let m = state.large.node_count();

    for v in 0..m {
        if state.used & (1 << v) != 0 {
            continue;
        }

        state.steps += 1;
        if state.steps > state.max_steps {
            return Step::OutOfSteps;
        }

        if !feasible(state, u, v, depth) {
            continue;
        }

        state.map[u] = v;
        state.used |= 1 << v;

        match extend(state, depth + 1) {
            Step::Matched => return Step::Matched,
            Step::OutOfSteps => return Step::OutOfSteps,
            Step::Deadend => {
                state.used &= !(1 << v);
            }
        }
    }

    Step::Deadend
}

/// Can large node `v` host small node `u`, given the first `depth`
/// assignments? Checks degree feasibility plus edge consistency against
/// every already-mapped neighbor, in both directions.
fn feasible(state: &SearchState<'_>, u: usize, v: usize, depth: usize) -> bool {
    if state.large.out_degree(v) < state.small.out_degree(u)
        || state.large.in_degree(v) < state.small.in_degree(u)
    {
        return false;
    }

    for &prior in &state.order[..depth] {
        let prior_target = state.map[prior];
        if state.small.has_edge(u, prior) && !state.large.has_edge(v, prior_target) {
            return false;
        }
        if state.small.has_edge(prior, u) && !state.large.has_edge(prior_target, v) {
            return false;
        }
    }

    true
}

/// Sorted-degree domination: for a monomorphism, every small node must map
/// to a large node with at least its out- and in-degree, so the small
/// graph's sorted degree sequences must be dominated entry-wise by the
/// large graph's top-n. Necessary, never sufficient.
fn degrees_dominated(small: &Graph, large: &Graph) -> bool {
    let n = small.node_count();

    let dominated = |small_degs: &mut SmallVec<[usize; MAX_NODES]>,
                     large_degs: &mut SmallVec<[usize; MAX_NODES]>| {
        small_degs.sort_unstable_by(|a, b| b.cmp(a));
        large_degs.sort_unstable_by(|a, b| b.cmp(a));
        small_degs.iter().zip(large_degs.iter()).all(|(s, l)| s <= l)
    };

    let mut small_out: SmallVec<[usize; MAX_NODES]> =
        (0..n).map(|u| small.out_degree(u)).collect();
    let mut large_out: SmallVec<[usize; MAX_NODES]> =
        (0..large.node_count()).map(|v| large.out_degree(v)).collect();
    if !dominated(&mut small_out, &mut large_out) {
        return false;
    }

    let mut small_in: SmallVec<[usize; MAX_NODES]> =
        (0..n).map(|u| small.in_degree(u)).collect();
    let mut large_in: SmallVec<[usize; MAX_NODES]> =
        (0..large.node_count()).map(|v| large.in_degree(v)).collect();
    dominated(&mut small_in, &mut large_in)
}
