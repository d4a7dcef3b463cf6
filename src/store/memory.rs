//! In-memory network store.
//!
//! This is the reference implementation of `NetworkStore`. It uses simple
//! HashMaps protected by RwLock, plus a signature-hash secondary index for
//! duplicate lookups.
//!
//! ## Limitations
//!
//! - **No durability**: everything is gone when the process exits.
//! - **Full scans**: `fetch_candidates` walks every record. Fine for test
//!   corpora; a real deployment wants an indexed store behind the same
//!   trait.
//!
//! Use this store for testing the matching engine and retrieval pipeline,
//! or for embedding the crate in applications that don't need persistence.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::{NetworkStore, StoredNetwork};
use crate::Result;
use crate::model::{Graph, NetworkId, NetworkMeta, NetworkSummary};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory network storage.
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    records: RwLock<HashMap<NetworkId, StoredNetwork>>,
    /// signature_hash → ids sharing it (exact-order duplicates)
    by_signature: RwLock<HashMap<String, Vec<NetworkId>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                records: RwLock::new(HashMap::new()),
                by_signature: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// NetworkStore impl
// ============================================================================

#[async_trait]
impl NetworkStore for MemoryStore {
    async fn insert(
        &self,
        graph: Graph,
        meta: NetworkMeta,
        signature_hash: String,
    ) -> Result<StoredNetwork> {
        let id = NetworkId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let record = StoredNetwork {
            id,
            graph,
            meta,
            signature_hash: signature_hash.clone(),
            created_at: Utc::now(),
        };

        self.inner
            .by_signature
            .write()
            .entry(signature_hash)
            .or_default()
            .push(id);
        self.inner.records.write().insert(id, record.clone());

        debug!(%id, nodes = record.graph.node_count(), "network inserted");
        Ok(record)
    }

    async fn get(&self, id: NetworkId) -> Result<Option<StoredNetwork>> {
        Ok(self.inner.records.read().get(&id).cloned())
    }

    async fn delete(&self, id: NetworkId) -> Result<bool> {
        let removed = self.inner.records.write().remove(&id);

        if let Some(record) = &removed {
            let mut idx = self.inner.by_signature.write();
            if let Some(ids) = idx.get_mut(&record.signature_hash) {
                ids.retain(|nid| *nid != id);
                if ids.is_empty() {
                    idx.remove(&record.signature_hash);
                }
            }
        }

        Ok(removed.is_some())
    }

    async fn list(&self) -> Result<Vec<NetworkSummary>> {
        let records = self.inner.records.read();
        let mut summaries: Vec<NetworkSummary> =
            records.values().map(StoredNetwork::summary).collect();
        // Newest first, id as tiebreaker for insertions in the same instant.
        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.records.read().len() as u64)
    }

    async fn find_by_signature(&self, signature_hash: &str) -> Result<Vec<NetworkId>> {
        Ok(self
            .inner
            .by_signature
            .read()
            .get(signature_hash)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_candidates(
        &self,
        min_node_count: usize,
        min_edge_count: usize,
    ) -> Result<Vec<StoredNetwork>> {
        let records = self.inner.records.read();
        let mut candidates: Vec<StoredNetwork> = records
            .values()
            .filter(|r| {
                r.graph.node_count() >= min_node_count
                    && r.graph.edge_count() >= min_edge_count
            })
            .cloned()
            .collect();

        candidates.sort_by(|a, b| {
            a.graph
                .node_count()
                .cmp(&b.graph.node_count())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(candidates)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkKind;
    use crate::signature::{signature, signature_hash};

    fn meta(name: &str) -> NetworkMeta {
        NetworkMeta::new(name, NetworkKind::Metabolic, "E. coli")
    }

    fn hashed(graph: &Graph) -> String {
        signature_hash(&signature(graph))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let hash = hashed(&graph);

        let record = store.insert(graph, meta("path"), hash).await.unwrap();
        let fetched = store.get(record.id).await.unwrap().unwrap();

        assert_eq!(fetched, record);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get(NetworkId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_signature_index() {
        let store = MemoryStore::new();
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let hash = hashed(&graph);

        let record = store
            .insert(graph, meta("edge"), hash.clone())
            .await
            .unwrap();
        assert_eq!(store.find_by_signature(&hash).await.unwrap(), vec![record.id]);

        assert!(store.delete(record.id).await.unwrap());
        assert!(store.find_by_signature(&hash).await.unwrap().is_empty());
        assert!(!store.delete(record.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_signature_index_groups_duplicates() {
        let store = MemoryStore::new();
        let graph = Graph::from_edges(3, &[(0, 1), (0, 2)]).unwrap();
        let hash = hashed(&graph);

        let a = store
            .insert(graph.clone(), meta("first"), hash.clone())
            .await
            .unwrap();
        let b = store
            .insert(graph, meta("second"), hash.clone())
            .await
            .unwrap();

        assert_eq!(store.find_by_signature(&hash).await.unwrap(), vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_fetch_candidates_applies_floor_and_order() {
        let store = MemoryStore::new();

        let tiny = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let mid = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let big = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();

        for (g, name) in [(&tiny, "tiny"), (&big, "big"), (&mid, "mid")] {
            let hash = hashed(g);
            store.insert(g.clone(), meta(name), hash).await.unwrap();
        }

        // Floor of 3 nodes / 2 edges excludes `tiny`.
        let candidates = store.fetch_candidates(3, 2).await.unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.meta.name.as_str()).collect();
        assert_eq!(names, vec!["mid", "big"]);
    }

    #[tokio::test]
    async fn test_list_contains_summaries() {
        let store = MemoryStore::new();
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let hash = hashed(&graph);
        store.insert(graph, meta("listed"), hash.clone()).await.unwrap();

        let listing = store.list().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "listed");
        assert_eq!(listing[0].node_count, 3);
        assert_eq!(listing[0].edge_count, 2);
        assert_eq!(listing[0].signature_hash, hash);
    }
}
