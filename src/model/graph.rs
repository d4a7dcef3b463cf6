//! Directed graph value — the canonical in-memory form.
//!
//! Adjacency is stored as one bitmask per row: bit `j` of `rows[i]` is set
//! iff the directed edge `i → j` exists. With node counts capped at
//! [`MAX_NODES`] the whole matrix fits in a handful of words, which keeps
//! the matching engine's inner loop on plain integer ops.
//!
//! Invariants (enforced at construction, never re-checked downstream):
//! - matrix is square and matches `node_count`
//! - entries are 0/1
//! - diagonal is zero (no self-loops)
//! - labels, when present, have length `node_count`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// Upper bound on nodes per graph. The containment search is exponential in
/// the worst case; the whole design assumes small graphs.
pub const MAX_NODES: usize = 32;

/// An immutable directed graph with optional node labels.
///
/// Labels participate in no comparison — only structure is compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphDto", into = "GraphDto")]
pub struct Graph {
    node_count: usize,
    /// rows[i] bit j == edge i → j
    rows: SmallVec<[u32; MAX_NODES]>,
    labels: Option<Vec<String>>,
}

impl Graph {
    /// Build a graph from a dense 0/1 adjacency matrix.
    pub fn from_matrix(matrix: &[Vec<u8>]) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(Error::InvalidGraph("adjacency matrix is empty".into()));
        }
        if n > MAX_NODES {
            return Err(Error::InvalidGraph(format!(
                "{n} nodes exceeds the supported maximum of {MAX_NODES}"
            )));
        }

        let mut rows: SmallVec<[u32; MAX_NODES]> = SmallVec::with_capacity(n);
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidGraph(format!(
                    "matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            let mut mask = 0u32;
            for (j, &entry) in row.iter().enumerate() {
                match entry {
                    0 => {}
                    1 if i == j => {
                        return Err(Error::InvalidGraph(format!(
                            "self-loop at node {i} (diagonal must be zero)"
                        )));
                    }
                    1 => mask |= 1 << j,
                    other => {
                        return Err(Error::InvalidGraph(format!(
                            "entry [{i}][{j}] is {other}, expected 0 or 1"
                        )));
                    }
                }
            }
            rows.push(mask);
        }

        Ok(Self { node_count: n, rows, labels: None })
    }

    /// Build a graph from an edge list. Convenient for tests and seeding.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if node_count == 0 {
            return Err(Error::InvalidGraph("graph needs at least one node".into()));
        }
        if node_count > MAX_NODES {
            return Err(Error::InvalidGraph(format!(
                "{node_count} nodes exceeds the supported maximum of {MAX_NODES}"
            )));
        }

        let mut rows: SmallVec<[u32; MAX_NODES]> = SmallVec::from_elem(0, node_count);
        for &(src, dst) in edges {
            if src >= node_count || dst >= node_count {
                return Err(Error::InvalidGraph(format!(
                    "edge ({src}, {dst}) out of range for {node_count} nodes"
                )));
            }
            if src == dst {
                return Err(Error::InvalidGraph(format!(
                    "self-loop at node {src} (diagonal must be zero)"
                )));
            }
            rows[src] |= 1 << dst;
        }

        Ok(Self { node_count, rows, labels: None })
    }

    /// Attach node labels (length must match the node count).
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.node_count {
            return Err(Error::InvalidGraph(format!(
                "{} labels for {} nodes",
                labels.len(),
                self.node_count
            )));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.rows[src] & (1 << dst) != 0
    }

    /// Outgoing-edge bitmask of node `i` (bit `j` == edge `i → j`).
    pub fn row_mask(&self, i: usize) -> u32 {
        self.rows[i]
    }

    /// Incoming-edge bitmask of column `c` (bit `i` == edge `i → c`).
    pub fn column_mask(&self, c: usize) -> u32 {
        let mut mask = 0u32;
        for (i, row) in self.rows.iter().enumerate() {
            mask |= ((row >> c) & 1) << i;
        }
        mask
    }

    pub fn out_degree(&self, i: usize) -> usize {
        self.rows[i].count_ones() as usize
    }

    pub fn in_degree(&self, c: usize) -> usize {
        self.column_mask(c).count_ones() as usize
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Expand back into a dense 0/1 matrix.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.node_count)
            .map(|i| (0..self.node_count).map(|j| u8::from(self.has_edge(i, j))).collect())
            .collect()
    }
}

// ============================================================================
// Serde bridge — (de)serializes as a dense matrix so the construction
// invariants hold across the wire as well.
// ============================================================================

#[derive(Serialize, Deserialize)]
struct GraphDto {
    adjacency: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl TryFrom<GraphDto> for Graph {
    type Error = Error;

    fn try_from(dto: GraphDto) -> Result<Self> {
        let graph = Graph::from_matrix(&dto.adjacency)?;
        match dto.labels {
            Some(labels) => graph.with_labels(labels),
            None => Ok(graph),
        }
    }
}

impl From<Graph> for GraphDto {
    fn from(graph: Graph) -> Self {
        GraphDto {
            adjacency: graph.to_matrix(),
            labels: graph.labels,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
