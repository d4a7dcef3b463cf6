//! End-to-end store tests: facade CRUD, signature dedup, seeding, and
//! snapshot round-trips against MemoryStore.

use pretty_assertions::assert_eq;

use bionet_rs::{
    Graph, NetworkDb, NetworkKind, NetworkMeta, RetrievalOptions,
    export::{export_json, import_json},
    seed::{self, SeedConfig},
    store::MemoryStore,
};

fn sample_matrix() -> Vec<Vec<u8>> {
    vec![
        vec![0, 1, 0],
        vec![0, 0, 1],
        vec![1, 0, 0],
    ]
}

// ============================================================================
// 1. Create computes metrics and signature hash
// ============================================================================

#[tokio::test]
async fn test_create_populates_derived_fields() {
    let db = NetworkDb::open_memory();

    let record = db
        .create(
            NetworkMeta::new("tca_loop", NetworkKind::Metabolic, "Homo sapiens")
                .with_description("three-step cycle"),
            &sample_matrix(),
            Some(vec!["Citrate".into(), "Isocitrate".into(), "Malate".into()]),
        )
        .await
        .unwrap();

    assert_eq!(record.graph.node_count(), 3);
    assert_eq!(record.graph.edge_count(), 3);
    assert_eq!(record.signature_hash.len(), 64);
    assert_eq!(record.meta.description, "three-step cycle");
}

// ============================================================================
// 2. Create / get / list / delete round-trip
// ============================================================================

#[tokio::test]
async fn test_crud_round_trip() {
    let db = NetworkDb::open_memory();

    let record = db
        .create(
            NetworkMeta::new("loop", NetworkKind::GeneRegulation, "E. coli"),
            &sample_matrix(),
            None,
        )
        .await
        .unwrap();

    let fetched = db.get(record.id).await.unwrap().unwrap();
    assert_eq!(fetched, record);
    assert_eq!(db.count().await.unwrap(), 1);
    assert_eq!(db.list().await.unwrap()[0].name, "loop");

    assert!(db.delete(record.id).await.unwrap());
    assert!(db.get(record.id).await.unwrap().is_none());
    assert!(db.require(record.id).await.is_err());
    assert_eq!(db.count().await.unwrap(), 0);
}

// ============================================================================
// 3. Invalid matrices fail fast, before anything is stored
// ============================================================================

#[tokio::test]
async fn test_invalid_matrix_rejected_at_create() {
    let db = NetworkDb::open_memory();
    let meta = NetworkMeta::new("bad", NetworkKind::Protein, "E. coli");

    let non_square = vec![vec![0, 1], vec![0]];
    assert!(db.create(meta.clone(), &non_square, None).await.is_err());

    let self_loop = vec![vec![1, 0], vec![0, 0]];
    assert!(db.create(meta.clone(), &self_loop, None).await.is_err());

    let bad_labels = sample_matrix();
    assert!(
        db.create(meta, &bad_labels, Some(vec!["only-one".into()]))
            .await
            .is_err()
    );

    assert_eq!(db.count().await.unwrap(), 0);
}

// ============================================================================
// 4. Same-order duplicates are visible through the signature hash
// ============================================================================

#[tokio::test]
async fn test_find_duplicates_same_order_only() {
    let db = NetworkDb::open_memory();
    let meta = NetworkMeta::new("dup", NetworkKind::Protein, "Homo sapiens");

    let original = db.create(meta.clone(), &sample_matrix(), None).await.unwrap();
    db.create(meta, &sample_matrix(), None).await.unwrap();

    let graph = Graph::from_matrix(&sample_matrix()).unwrap();
    let duplicates = db.find_duplicates(&graph).await.unwrap();
    assert_eq!(duplicates.len(), 2);
    assert!(duplicates.contains(&original.id));

    // A relabeled-but-isomorphic graph is NOT a signature duplicate.
    let reordered = Graph::from_edges(3, &[(1, 0), (0, 2), (2, 1)]).unwrap();
    assert!(db.find_duplicates(&reordered).await.unwrap().is_empty());
}

// ============================================================================
// 5. Seeded corpora are searchable end to end
// ============================================================================

#[tokio::test]
async fn test_seeded_corpus_retrieval() {
    let store = MemoryStore::new();
    let config = SeedConfig { count: 40, rng_seed: 11, ..SeedConfig::default() };
    seed::populate(&store, &config).await.unwrap();

    let db = NetworkDb::with_store(store);
    assert_eq!(db.count().await.unwrap(), 40);

    // A single directed edge is the loosest non-trivial query; the seeded
    // corpus at default density is all but guaranteed to contain it.
    let edge = Graph::from_edges(2, &[(0, 1)]).unwrap();
    let matches = db
        .find_containing(&edge, &RetrievalOptions::default())
        .await
        .unwrap();
    assert!(!matches.is_empty());

    for window in matches.windows(2) {
        assert!(window[0].network.id < window[1].network.id);
    }
}

// ============================================================================
// 6. Snapshot export → import preserves the corpus
// ============================================================================

#[tokio::test]
async fn test_snapshot_round_trip_via_facade() {
    let source = MemoryStore::new();
    let config = SeedConfig { count: 10, rng_seed: 3, ..SeedConfig::default() };
    seed::populate(&source, &config).await.unwrap();

    let mut snapshot = Vec::new();
    export_json(&source, &mut snapshot).await.unwrap();

    let target = MemoryStore::new();
    let ids = import_json(&target, &mut snapshot.as_slice()).await.unwrap();
    assert_eq!(ids.len(), 10);

    let db = NetworkDb::with_store(target);
    assert_eq!(db.count().await.unwrap(), 10);
}
