//! # Candidate Retrieval Pipeline
//!
//! Answers "which stored networks structurally contain this query graph?"
//! against a potentially huge corpus:
//!
//! ```text
//! query → size/edge floor (one store fetch) → per-candidate compare
//!       → keep Exact / Subgraph → sort by id
//! ```
//!
//! The single `fetch_candidates` call is the pipeline's only suspension
//! point. Matching itself is pure and CPU-bound, so the fan-out runs on
//! rayon's worker pool; results are sorted by candidate id afterwards so
//! output is deterministic regardless of scheduling. Read-only throughout —
//! an adapter failure aborts the whole call with no partial results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::matching::{SearchBudget, Verdict, compare};
use crate::model::{Graph, NetworkSummary};
use crate::store::NetworkStore;

// ============================================================================
// Match classification
// ============================================================================

/// How a stored network matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Structurally isomorphic to the query.
    Exact,
    /// Strictly contains the query as a subgraph.
    Subgraph,
}

/// One retrieval hit: the classification plus enough candidate metadata for
/// the caller to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub kind: MatchKind,
    pub network: NetworkSummary,
}

/// Knobs for one retrieval call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrievalOptions {
    /// Per-pair, per-direction search budget.
    pub budget: SearchBudget,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Find all stored networks that contain (or equal) the query graph.
///
/// Candidates below the query's node or edge count never reach the matching
/// engine — the store filter is derived from the monotonicity of subgraph
/// embedding. Verdicts other than `EqualSameOrder`/`BContainsA` (including
/// budget-exhausted inconclusives) are excluded from the result.
pub async fn find_containing<S>(
    store: &S,
    query: &Graph,
    options: &RetrievalOptions,
) -> Result<Vec<MatchResult>>
where
    S: NetworkStore + ?Sized,
{
    let min_nodes = query.node_count();
    let min_edges = query.edge_count();

    let candidates = store.fetch_candidates(min_nodes, min_edges).await?;
    debug!(
        candidates = candidates.len(),
        min_nodes, min_edges, "candidate pool fetched"
    );

    let budget = options.budget;
    let mut matches: Vec<MatchResult> = candidates
        .par_iter()
        .filter_map(|candidate| {
            let kind = match compare(query, &candidate.graph, budget) {
                Verdict::EqualSameOrder { .. } => MatchKind::Exact,
                Verdict::BContainsA { .. } => MatchKind::Subgraph,
                Verdict::AContainsB { .. } | Verdict::Incomparable { .. } => return None,
            };
            Some(MatchResult { kind, network: candidate.summary() })
        })
        .collect();

    matches.sort_by_key(|m| m.network.id);
    debug!(matches = matches.len(), "retrieval complete");
    Ok(matches)
}

// ============================================================================
// Tests
// ============================================================================
