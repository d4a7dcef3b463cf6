//! Per-column structural fingerprints.
//!
//! The signature couples "who points at me" with "my position": the entry
//! for column `c` is the incoming-edge bitmask of `c` plus `c · 2^n`. Two
//! graphs presented with different node orderings generally produce
//! different signatures even when isomorphic — this is a cheap
//! discriminator and an exact-order dedup key, NOT a canonical form.
//! Containment and isomorphism decisions belong to the matching engine.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smallvec::SmallVec;

use crate::model::{Graph, MAX_NODES};

/// Ordered per-column fingerprint sequence, one entry per node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(SmallVec<[u64; MAX_NODES]>);

impl Signature {
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the signature of a graph.
///
/// Entry `c` is `column_mask(c) + c · 2^node_count`, where the column mask
/// treats column `c` of the adjacency matrix as a bitmask over rows (bit `i`
/// set iff edge `i → c` exists). Deterministic; position-sensitive.
pub fn signature(graph: &Graph) -> Signature {
    let n = graph.node_count();
    let mut entries: SmallVec<[u64; MAX_NODES]> = SmallVec::with_capacity(n);
    for c in 0..n {
        let incoming = graph.column_mask(c) as u64;
        entries.push(incoming + ((c as u64) << n));
    }
    Signature(entries)
}

/// SHA-256 digest of a signature, as a lowercase hex string.
///
/// The sequence is serialized as comma-joined decimal integers before
/// hashing — unambiguous and order-preserving, so identical graphs in
/// identical node order hash identically and nothing else is promised.
pub fn signature_hash(signature: &Signature) -> String {
    let joined = signature
        .as_slice()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let digest = Sha256::digest(joined.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_path_graph() {
        // 0 → 1 → 2. Column 0 has no incoming edges; column 1 receives from
        // row 0; column 2 receives from row 1.
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let sig = signature(&g);

        assert_eq!(sig.as_slice(), &[0, 1 + (1 << 3), 2 + (2 << 3)]);
    }

    #[test]
    fn test_signature_is_position_sensitive() {
        // The same path relabeled: 2 → 1 → 0. Isomorphic, different signature.
        let a = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let b = Graph::from_edges(3, &[(2, 1), (1, 0)]).unwrap();

        assert_ne!(signature(&a), signature(&b));
        assert_ne!(signature_hash(&signature(&a)), signature_hash(&signature(&b)));
    }

    #[test]
    fn test_signature_determines_matrix() {
        let a = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let b = Graph::from_matrix(&a.to_matrix()).unwrap();
        assert_eq!(signature(&a), signature(&b));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let g = Graph::from_edges(5, &[(0, 2), (2, 4), (4, 1), (1, 3)]).unwrap();
        let h1 = signature_hash(&signature(&g));
        let h2 = signature_hash(&signature(&g));

        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_single_node_signature() {
        let g = Graph::from_matrix(&[vec![0]]).unwrap();
        assert_eq!(signature(&g).as_slice(), &[0]);
    }
}
