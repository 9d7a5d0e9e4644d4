// FICHIER : engine/src/genetics/bridge.rs

//! Pont vers un tuner externe de paramètres (ex. irace) : paramètres en pourcentage
//! vers tailles entières, et coût à minimiser lu dans le journal de métriques.

use crate::utils::fs;
use crate::utils::prelude::*;
use std::path::Path;

pub const MIN_TOURNAMENT_SIZE: usize = 3;
pub const MIN_ELITE_SIZE: usize = 1;

/// Paramètres tels que proposés par le tuner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningParameters {
    pub n: usize,
    pub generations: usize,
    pub prob_mutation: f64,
    pub prob_crossover: f64,
    pub k_perc: f64,
    pub elit_perc: f64,
}

impl TuningParameters {
    pub fn tournament_size(&self) -> usize {
        ((self.k_perc * self.n as f64).ceil() as usize).max(MIN_TOURNAMENT_SIZE)
    }

    pub fn elite_size(&self) -> usize {
        ((self.elit_perc * self.n as f64).ceil() as usize).max(MIN_ELITE_SIZE)
    }
}

/// Colonne `max_fitness` de la dernière ligne du journal.
pub async fn read_final_max_fitness(metrics_path: &Path) -> Result<f64> {
    let content = fs::read_to_string(metrics_path).await?;
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| AppError::Metrics(format!("{} est vide", metrics_path.display())))?;
    let column = header
        .split(',')
        .position(|h| h.trim() == "max_fitness")
        .ok_or_else(|| AppError::Metrics("colonne max_fitness absente".into()))?;

    let last = lines
        .last()
        .ok_or_else(|| AppError::Metrics("aucune génération enregistrée".into()))?;
    let raw = last
        .split(',')
        .nth(column)
        .ok_or_else(|| AppError::Metrics(format!("ligne tronquée : {}", last)))?;

    raw.trim()
        .parse::<f64>()
        .map_err(|e| AppError::Metrics(format!("max_fitness illisible '{}' : {}", raw, e)))
}

/// Le tuner minimise : coût = 1 - fitness maximale.
pub fn tuning_cost(max_fitness: f64) -> f64 {
    1.0 - max_fitness
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;

    fn params(n: usize, k_perc: f64, elit_perc: f64) -> TuningParameters {
        TuningParameters {
            n,
            generations: 5,
            prob_mutation: 0.1,
            prob_crossover: 0.8,
            k_perc,
            elit_perc,
        }
    }

    #[test]
    fn test_percentages_to_sizes() {
        let p = params(30, 0.25, 0.1);
        assert_eq!(p.tournament_size(), 8);
        assert_eq!(p.elite_size(), 3);

        let small = params(10, 0.05, 0.01);
        assert_eq!(small.tournament_size(), MIN_TOURNAMENT_SIZE);
        assert_eq!(small.elite_size(), MIN_ELITE_SIZE);
    }

    #[test]
    fn test_cost() {
        assert!((tuning_cost(0.75) - 0.25).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_read_last_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics_log.csv");
        std::fs::write(
            &path,
            "generation,count,mean_fitness,std_fitness,min_fitness,max_fitness,duration_sec\n\
             0,4,0.500000,0.010000,0.480000,0.520000,1.000000\n\
             1,4,0.600000,0.010000,0.580000,0.640000,1.000000\n",
        )
        .unwrap();

        let max = read_final_max_fitness(&path).await.unwrap();
        assert!((max - 0.64).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_header_only_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics_log.csv");
        std::fs::write(&path, "generation,max_fitness\n").unwrap();
        assert!(matches!(
            read_final_max_fitness(&path).await,
            Err(AppError::Metrics(_))
        ));
        assert!(matches!(
            read_final_max_fitness(&dir.path().join("absent.csv")).await,
            Err(AppError::NotFound(_))
        ));
    }
}
