//! # Network Store Trait
//!
//! This is THE contract between the containment core and any persistence
//! engine. The retrieval pipeline only ever asks a store for candidates
//! meeting the size/edge floor; everything else here is the CRUD surface
//! the surrounding application glue needs.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |
//!
//! A store must guarantee the graphs it returns are well-formed — which
//! holds by construction here, since records only enter through [`Graph`]
//! values — and that a fetched candidate's matrix is a stable snapshot for
//! the duration of one comparison.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::model::{Graph, NetworkId, NetworkMeta, NetworkSummary};

pub use memory::MemoryStore;

// ============================================================================
// Stored record
// ============================================================================

/// A network as the store holds it: identity, structure, metadata, and the
/// derived signature hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNetwork {
    pub id: NetworkId,
    pub graph: Graph,
    pub meta: NetworkMeta,
    pub signature_hash: String,
    pub created_at: DateTime<Utc>,
}

impl StoredNetwork {
    /// Listing-row view without the adjacency matrix.
    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            id: self.id,
            name: self.meta.name.clone(),
            kind: self.meta.kind,
            organism: self.meta.organism.clone(),
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            signature_hash: self.signature_hash.clone(),
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// NetworkStore trait
// ============================================================================

/// The persistence adapter contract.
///
/// Implementations assign ids and timestamps on insert. Any failure
/// (connectivity, timeout, corruption) surfaces as `Error::Adapter` and
/// aborts the caller's whole operation — no partial results.
#[async_trait]
pub trait NetworkStore: Send + Sync + 'static {
    /// Persist a network. The store assigns the id and `created_at`.
    async fn insert(
        &self,
        graph: Graph,
        meta: NetworkMeta,
        signature_hash: String,
    ) -> Result<StoredNetwork>;

    /// Fetch a network by id. Returns None if not found.
    async fn get(&self, id: NetworkId) -> Result<Option<StoredNetwork>>;

    /// Delete a network. Returns true if it existed.
    async fn delete(&self, id: NetworkId) -> Result<bool>;

    /// Summaries of all stored networks, newest first.
    async fn list(&self) -> Result<Vec<NetworkSummary>>;

    /// Total number of stored networks.
    async fn count(&self) -> Result<u64>;

    /// Ids of networks with the given signature hash — the exact-order
    /// duplicate set for a graph, nothing more.
    async fn find_by_signature(&self, signature_hash: &str) -> Result<Vec<NetworkId>>;

    /// All candidates with `node_count ≥ min_node_count` and
    /// `edge_count ≥ min_edge_count`, ordered ascending by node count
    /// (cheapest comparisons first), ties by id.
    ///
    /// This floor is necessary-but-not-sufficient: an embeddable subgraph
    /// cannot have more nodes or edges than its host.
    async fn fetch_candidates(
        &self,
        min_node_count: usize,
        min_edge_count: usize,
    ) -> Result<Vec<StoredNetwork>>;
}
