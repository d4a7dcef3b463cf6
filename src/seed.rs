//! Random biological network generation.
//!
//! Produces corpora of plausible metabolic / protein / gene-regulation
//! networks for tests, benchmarks, and demo stores. Generation is fully
//! deterministic for a fixed `rng_seed`, so test corpora are reproducible.

use tracing::debug;

use crate::Result;
use crate::model::{Graph, MAX_NODES, NetworkId, NetworkKind, NetworkMeta};
use crate::signature::{signature, signature_hash};
use crate::store::NetworkStore;

/// Node-name pool: metabolites, proteins, genes, enzymes.
const NODE_NAMES: &[&str] = &[
    // Metabolites
    "Glucose", "G6P", "F6P", "FBP", "DHAP", "G3P", "Pyruvate", "Lactate",
    "Acetyl-CoA", "Citrate", "Isocitrate", "α-Ketoglutarate", "Succinate",
    "Fumarate", "Malate", "Oxaloacetate", "ATP", "ADP", "NAD", "NADH",
    // Proteins
    "p53", "MDM2", "ATM", "DNA-PK", "CHK2", "BRCA1", "BRCA2", "RAD51",
    "Cyclin-D", "CDK4", "Rb", "E2F", "p21", "p27", "Bax", "Bcl2",
    "Caspase3", "PARP", "AKT", "mTOR", "PI3K", "PTEN", "ERK", "MEK",
    // Genes
    "TP53", "MYC", "KRAS", "EGFR", "BRAF", "PIK3CA", "APC", "RB1",
    "CDKN2A", "SMAD4", "STK11", "NFE2L2", "KEAP1", "CTNNB1",
    // Enzymes
    "Hexokinase", "PFK", "Aldolase", "GAPDH", "PGK", "Enolase", "PK",
    "LDH", "PDH", "CS", "IDH", "KGDH", "SDH", "FH", "MDH",
];

const ORGANISMS: &[&str] = &[
    "Homo sapiens", "Mus musculus", "E. coli", "S. cerevisiae",
    "D. melanogaster", "C. elegans", "A. thaliana",
];

/// Parameters for corpus generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedConfig {
    pub count: usize,
    pub min_nodes: usize,
    pub max_nodes: usize,
    /// Probability of each off-diagonal edge.
    pub edge_probability: f64,
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: 1_000,
            min_nodes: 3,
            max_nodes: 20,
            edge_probability: 0.3,
            rng_seed: 0x5eed,
        }
    }
}

impl SeedConfig {
    fn validate(&self) -> Result<()> {
        if self.min_nodes == 0 || self.min_nodes > self.max_nodes {
            return Err(crate::Error::InvalidGraph(format!(
                "seed node range {}..={} is empty",
                self.min_nodes, self.max_nodes
            )));
        }
        if self.max_nodes > MAX_NODES {
            return Err(crate::Error::InvalidGraph(format!(
                "seed max_nodes {} exceeds the supported maximum of {MAX_NODES}",
                self.max_nodes
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(crate::Error::InvalidGraph(format!(
                "edge probability {} outside [0, 1]",
                self.edge_probability
            )));
        }
        Ok(())
    }
}

/// Generate `config.count` random networks. Deterministic per `rng_seed`.
pub fn generate(config: &SeedConfig) -> Result<Vec<(Graph, NetworkMeta)>> {
    config.validate()?;
    let mut rng = fastrand::Rng::with_seed(config.rng_seed);
    let mut networks = Vec::with_capacity(config.count);

    for index in 0..config.count {
        let node_count = rng.usize(config.min_nodes..=config.max_nodes);
        let kind = NetworkKind::ALL[rng.usize(..NetworkKind::ALL.len())];
        let organism = ORGANISMS[rng.usize(..ORGANISMS.len())];

        // Distinct labels, sampled without replacement.
        let mut pool: Vec<&str> = NODE_NAMES.to_vec();
        rng.shuffle(&mut pool);
        let labels: Vec<String> = pool[..node_count].iter().map(|s| s.to_string()).collect();

        let mut edges = Vec::new();
        for i in 0..node_count {
            for j in 0..node_count {
                if i != j && rng.f64() < config.edge_probability {
                    edges.push((i, j));
                }
            }
        }

        let graph = Graph::from_edges(node_count, &edges)?.with_labels(labels)?;
        let meta = NetworkMeta::new(
            format!("{}_{}_{}", kind.as_str(), organism.replace(' ', "_"), index),
            kind,
            organism,
        )
        .with_description(format!(
            "Auto-generated {kind} network with {node_count} nodes"
        ));

        networks.push((graph, meta));
    }

    Ok(networks)
}

/// Generate a corpus and insert it through the adapter, computing the
/// signature hash for each network on the way in.
pub async fn populate<S>(store: &S, config: &SeedConfig) -> Result<Vec<NetworkId>>
where
    S: NetworkStore + ?Sized,
{
    let networks = generate(config)?;
    let mut ids = Vec::with_capacity(networks.len());

    for (graph, meta) in networks {
        let hash = signature_hash(&signature(&graph));
        let record = store.insert(graph, meta, hash).await?;
        ids.push(record.id);
    }

    debug!(count = ids.len(), seed = config.rng_seed, "corpus seeded");
    Ok(ids)
}
