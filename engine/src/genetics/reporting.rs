// FICHIER : engine/src/genetics/reporting.rs

use super::traits::MetricsSink;
use super::types::Individual;
use crate::utils::{async_trait, Duration, Result};
use serde::Serialize;

/// Statistiques de fitness d'une population (écart-type de population).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FitnessStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

pub fn fitness_stats(population: &[Individual]) -> FitnessStats {
    if population.is_empty() {
        return FitnessStats::default();
    }

    let count = population.len();
    let n = count as f64;
    let mean = population.iter().map(|i| i.fitness).sum::<f64>() / n;
    let variance = population
        .iter()
        .map(|i| (i.fitness - mean).powi(2))
        .sum::<f64>()
        / n;
    let min = population
        .iter()
        .map(|i| i.fitness)
        .fold(f64::INFINITY, f64::min);
    let max = population
        .iter()
        .map(|i| i.fitness)
        .fold(f64::NEG_INFINITY, f64::max);

    FitnessStats {
        count,
        mean,
        std: variance.sqrt(),
        min,
        max,
    }
}

/// Stagnation : sur les `window` dernières moyennes, la plus ancienne
/// est >= au maximum des suivantes (aucune amélioration stricte).
pub fn check_stagnation(history: &[f64], window: usize) -> bool {
    if window < 2 || history.len() < window {
        return false;
    }
    let tail = &history[history.len() - window..];
    let first = tail[0];
    let best_since = tail[1..].iter().copied().fold(f64::NEG_INFINITY, f64::max);
    first >= best_since
}

/// Puits en mémoire : garde chaque ligne enregistrée.
#[derive(Debug, Default)]
pub struct MemoryMetricsLog {
    pub rows: Vec<(usize, FitnessStats, Duration)>,
}

#[async_trait]
impl MetricsSink for MemoryMetricsLog {
    async fn record(
        &mut self,
        generation: usize,
        stats: &FitnessStats,
        duration: Duration,
    ) -> Result<()> {
        self.rows.push((generation, *stats, duration));
        Ok(())
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;

    fn pop(values: &[f64]) -> Vec<Individual> {
        values
            .iter()
            .map(|&f| Individual {
                fitness: f,
                ..Individual::new("r", "t", "p")
            })
            .collect()
    }

    #[test]
    fn test_stats_basic() {
        let stats = fitness_stats(&pop(&[0.2, 0.4, 0.6]));
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 0.4).abs() < 1e-12);
        assert!((stats.std - (0.08f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.6);
    }

    #[test]
    fn test_stats_empty_population() {
        assert_eq!(fitness_stats(&[]), FitnessStats::default());
    }

    #[test]
    fn test_stagnation_detected() {
        assert!(check_stagnation(&[0.5, 0.6, 0.6, 0.6], 3));
    }

    #[test]
    fn test_stagnation_not_detected_on_improvement() {
        assert!(!check_stagnation(&[0.5, 0.6, 0.7, 0.8], 3));
    }

    #[test]
    fn test_stagnation_boundaries() {
        assert!(!check_stagnation(&[0.6, 0.6], 3));
        assert!(!check_stagnation(&[0.6, 0.6, 0.6], 1));
        assert!(check_stagnation(&[0.7, 0.6, 0.65], 3));
    }

    #[tokio::test]
    async fn test_memory_sink_records() {
        let mut sink = MemoryMetricsLog::default();
        let stats = fitness_stats(&pop(&[0.5]));
        sink.record(1, &stats, Duration::from_millis(3)).await.unwrap();
        assert_eq!(sink.rows.len(), 1);
        assert_eq!(sink.rows[0].0, 1);
    }
}
