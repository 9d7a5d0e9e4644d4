// FICHIER : engine/src/genetics/traits.rs

use super::reporting::FitnessStats;
use crate::utils::{async_trait, Duration, Result};

/// Score sémantique d'un lot de textes contre la référence.
/// Appelé une seule fois par population : le modèle est coûteux à invoquer.
pub trait SimilarityScorer: Send + Sync {
    fn score_batch(&self, candidates: &[String], reference: &str) -> Result<Vec<f64>>;
}

/// Destinataire des statistiques de chaque génération.
#[async_trait]
pub trait MetricsSink: Send {
    async fn record(
        &mut self,
        generation: usize,
        stats: &FitnessStats,
        duration: Duration,
    ) -> Result<()>;
}
