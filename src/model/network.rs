//! Network identity and metadata DTOs.
//!
//! These carry everything the retrieval pipeline attaches to a match besides
//! the classification itself. The core never interprets them — persistence
//! identity is an opaque attribute assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque network identifier, assigned by the persistence adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkId(pub u64);

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The biological category of a stored network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    Metabolic,
    Protein,
    GeneRegulation,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] =
        [NetworkKind::Metabolic, NetworkKind::Protein, NetworkKind::GeneRegulation];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Metabolic => "metabolic",
            NetworkKind::Protein => "protein",
            NetworkKind::GeneRegulation => "gene_regulation",
        }
    }
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied descriptive metadata for a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMeta {
    pub name: String,
    pub kind: NetworkKind,
    pub organism: String,
    #[serde(default)]
    pub description: String,
}

impl NetworkMeta {
    pub fn new(
        name: impl Into<String>,
        kind: NetworkKind,
        organism: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            organism: organism.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Listing-row view of a stored network: identity, metadata, and the derived
/// structural metrics, without the adjacency matrix itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub id: NetworkId,
    pub name: String,
    pub kind: NetworkKind,
    pub organism: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub signature_hash: String,
    pub created_at: DateTime<Utc>,
}
