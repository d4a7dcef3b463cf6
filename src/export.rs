//! Corpus snapshot export/import — serialize a store's networks as JSON.
//!
//! Produces a self-contained JSON array that can be archived, diffed, or
//! loaded into another store. Import re-validates every adjacency matrix
//! through `Graph` construction and recomputes signature hashes, so a
//! snapshot edited by hand cannot smuggle malformed records in.
//!
//! ```text
//! store → export_json() → [{ id, meta, labels, adjacency, ... }]
//!       → import_json() → fresh ids in the target store
//! ```

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::model::{Graph, NetworkId, NetworkMeta};
use crate::signature::{signature, signature_hash};
use crate::store::{NetworkStore, StoredNetwork};

/// Wire form of one stored network.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    id: NetworkId,
    meta: NetworkMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
    adjacency: Vec<Vec<u8>>,
    signature_hash: String,
    created_at: DateTime<Utc>,
}

impl From<StoredNetwork> for SnapshotRecord {
    fn from(record: StoredNetwork) -> Self {
        SnapshotRecord {
            id: record.id,
            meta: record.meta,
            labels: record.graph.labels().map(<[String]>::to_vec),
            adjacency: record.graph.to_matrix(),
            signature_hash: record.signature_hash,
            created_at: record.created_at,
        }
    }
}

/// Export every stored network as a JSON snapshot.
pub async fn export_json<S>(store: &S, writer: &mut dyn Write) -> Result<()>
where
    S: NetworkStore + ?Sized,
{
    let summaries = store.list().await?;

    let mut records = Vec::with_capacity(summaries.len());
    for summary in summaries {
        if let Some(record) = store.get(summary.id).await? {
            records.push(SnapshotRecord::from(record));
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    Ok(())
}

/// Load a JSON snapshot into a store.
///
/// Records get fresh ids and timestamps from the target store; signature
/// hashes are recomputed rather than trusted from the snapshot.
pub async fn import_json<S>(store: &S, reader: &mut dyn Read) -> Result<Vec<NetworkId>>
where
    S: NetworkStore + ?Sized,
{
    let records: Vec<SnapshotRecord> = serde_json::from_reader(reader)?;

    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let mut graph = Graph::from_matrix(&record.adjacency)?;
        if let Some(labels) = record.labels {
            graph = graph.with_labels(labels)?;
        }
        let hash = signature_hash(&signature(&graph));
        let stored = store.insert(graph, record.meta, hash).await?;
        ids.push(stored.id);
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkKind;
    use crate::store::MemoryStore;

    async fn sample_store() -> MemoryStore {
        let store = MemoryStore::new();

        let path = Graph::from_edges(3, &[(0, 1), (1, 2)])
            .unwrap()
            .with_labels(vec!["Glucose".into(), "G6P".into(), "F6P".into()])
            .unwrap();
        let hash = signature_hash(&signature(&path));
        store
            .insert(
                path,
                NetworkMeta::new("glycolysis_prefix", NetworkKind::Metabolic, "Homo sapiens"),
                hash,
            )
            .await
            .unwrap();

        let cycle = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let hash = signature_hash(&signature(&cycle));
        store
            .insert(
                cycle,
                NetworkMeta::new("feedback_loop", NetworkKind::GeneRegulation, "E. coli"),
                hash,
            )
            .await
            .unwrap();

        store
    }

    #[tokio::test]
    async fn test_round_trip_preserves_structure() {
        let source = sample_store().await;

        let mut buffer = Vec::new();
        export_json(&source, &mut buffer).await.unwrap();

        let target = MemoryStore::new();
        let ids = import_json(&target, &mut buffer.as_slice()).await.unwrap();
        assert_eq!(ids.len(), 2);

        let mut source_list = source.list().await.unwrap();
        let mut target_list = target.list().await.unwrap();
        source_list.sort_by(|a, b| a.name.cmp(&b.name));
        target_list.sort_by(|a, b| a.name.cmp(&b.name));

        for (a, b) in source_list.iter().zip(&target_list) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.node_count, b.node_count);
            assert_eq!(a.edge_count, b.edge_count);
            assert_eq!(a.signature_hash, b.signature_hash);
        }
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_matrix() {
        let snapshot = r#"[{
            "id": 1,
            "meta": { "name": "bad", "kind": "protein", "organism": "E. coli" },
            "adjacency": [[1, 0], [0, 0]],
            "signature_hash": "",
            "created_at": "2026-01-01T00:00:00Z"
        }]"#;

        let store = MemoryStore::new();
        let result = import_json(&store, &mut snapshot.as_bytes()).await;
        assert!(result.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_export_empty_store() {
        let store = MemoryStore::new();
        let mut buffer = Vec::new();
        export_json(&store, &mut buffer).await.unwrap();

        let parsed: Vec<serde_json::Value> =
            serde_json::from_slice(&buffer).unwrap();
        assert!(parsed.is_empty());
    }
}
