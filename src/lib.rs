//! # bionet-rs — Biological Network Containment Store
//!
//! Stores directed graphs representing biological networks (metabolic,
//! protein-interaction, gene-regulation) and answers containment queries:
//! does any stored network structurally contain — or get contained by — a
//! given query graph?
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `NetworkStore` is the contract between the
//!    containment core and persistence
//! 2. **Clean DTOs**: `Graph`, `NetworkMeta`, `MatchResult` cross all
//!    boundaries
//! 3. **Stateless matching**: `compare` is a pure function — no comparator
//!    object, no shared state across calls
//! 4. **Floor before search**: candidates below the query's node/edge count
//!    never reach the backtracking engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bionet_rs::{NetworkDb, NetworkKind, NetworkMeta, RetrievalOptions};
//!
//! # async fn example() -> bionet_rs::Result<()> {
//! let db = NetworkDb::open_memory();
//!
//! // Store the glycolysis backbone.
//! let meta = NetworkMeta::new("glycolysis", NetworkKind::Metabolic, "Homo sapiens");
//! let matrix = vec![
//!     vec![0, 1, 0],
//!     vec![0, 0, 1],
//!     vec![0, 0, 0],
//! ];
//! db.create(meta, &matrix, None).await?;
//!
//! // Which stored networks contain this 2-node chain?
//! let query = bionet_rs::Graph::from_matrix(&[vec![0, 1], vec![0, 0]])?;
//! for hit in db.find_containing(&query, &RetrievalOptions::default()).await? {
//!     println!("{:?} {}", hit.kind, hit.network.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | Memory | (default) | In-memory corpus for testing/embedding |
//!
//! Any persistence engine can participate by implementing [`NetworkStore`].

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod signature;
pub mod matching;
pub mod retrieval;
pub mod store;
pub mod seed;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Graph, MAX_NODES, NetworkId, NetworkKind, NetworkMeta, NetworkSummary};

// ============================================================================
// Re-exports: Matching
// ============================================================================

pub use matching::{NodeMapping, SearchBudget, Verdict, compare};

// ============================================================================
// Re-exports: Retrieval
// ============================================================================

pub use retrieval::{MatchKind, MatchResult, RetrievalOptions, find_containing};

// ============================================================================
// Re-exports: Store
// ============================================================================

pub use store::{MemoryStore, NetworkStore, StoredNetwork};

use signature::{signature, signature_hash};
use tracing::debug;

// ============================================================================
// Top-level NetworkDb handle
// ============================================================================

/// The primary entry point. A `NetworkDb` wraps a network store and provides
/// creation, lookup, and containment search.
pub struct NetworkDb<S: NetworkStore> {
    store: S,
}

impl<S: NetworkStore> NetworkDb<S> {
    /// Create a database handle over the given store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a network described by a dense adjacency matrix.
    ///
    /// Computes the signature hash on the way in; the store assigns identity
    /// and timestamp.
    pub async fn create(
        &self,
        meta: NetworkMeta,
        matrix: &[Vec<u8>],
        labels: Option<Vec<String>>,
    ) -> Result<StoredNetwork> {
        let mut graph = Graph::from_matrix(matrix)?;
        if let Some(labels) = labels {
            graph = graph.with_labels(labels)?;
        }
        self.create_graph(meta, graph).await
    }

    /// Store an already-constructed graph.
    pub async fn create_graph(&self, meta: NetworkMeta, graph: Graph) -> Result<StoredNetwork> {
        let hash = signature_hash(&signature(&graph));
        let record = self.store.insert(graph, meta, hash).await?;
        debug!(
            id = %record.id,
            nodes = record.graph.node_count(),
            edges = record.graph.edge_count(),
            "network created"
        );
        Ok(record)
    }

    /// Fetch a network by id. Returns None if not found.
    pub async fn get(&self, id: NetworkId) -> Result<Option<StoredNetwork>> {
        self.store.get(id).await
    }

    /// Fetch a network by id, failing with [`Error::NotFound`] if absent.
    pub async fn require(&self, id: NetworkId) -> Result<StoredNetwork> {
        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Network {id}")))
    }

    /// Delete a network. Returns true if it existed.
    pub async fn delete(&self, id: NetworkId) -> Result<bool> {
        self.store.delete(id).await
    }

    /// Summaries of all stored networks, newest first.
    pub async fn list(&self) -> Result<Vec<NetworkSummary>> {
        self.store.list().await
    }

    /// Total number of stored networks.
    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    /// Ids of stored networks identical to `graph` in the same node order.
    ///
    /// Signature-hash equality only — isomorphic-but-reordered duplicates
    /// are invisible here; use [`find_containing`] for structural search.
    pub async fn find_duplicates(&self, graph: &Graph) -> Result<Vec<NetworkId>> {
        let hash = signature_hash(&signature(graph));
        self.store.find_by_signature(&hash).await
    }

    /// Find all stored networks that contain (or equal) the query graph.
    pub async fn find_containing(
        &self,
        query: &Graph,
        options: &RetrievalOptions,
    ) -> Result<Vec<MatchResult>> {
        retrieval::find_containing(&self.store, query, options).await
    }

    /// Access the underlying store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory database for testing and embedding.
impl NetworkDb<MemoryStore> {
    pub fn open_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time graph validation failure: non-square matrix,
    /// non-0/1 entries, non-zero diagonal, label/length mismatch, oversize.
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Lookup of an id the store doesn't have.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence adapter failure — aborts the whole operation, no
    /// partial results.
    #[error("Adapter failure: {0}")]
    Adapter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
