// FICHIER : engine/src/experiment/saving.rs

use crate::genetics::reporting::FitnessStats;
use crate::genetics::traits::MetricsSink;
use crate::genetics::types::Individual;
use crate::utils::fs::{self, Path, PathBuf};
use crate::utils::prelude::*;
use crate::utils::{async_trait, Duration};

pub const METRICS_FILE: &str = "metrics_log.csv";
pub const METRICS_HEADER: &str =
    "generation,count,mean_fitness,std_fitness,min_fitness,max_fitness,duration_sec";
pub const GEN0_SNAPSHOT: &str = "population_gen_0.json";
pub const FINAL_SNAPSHOT: &str = "population_final.json";

/// Journal CSV des générations, une ligne par appel à `record`.
#[derive(Debug, Clone)]
pub struct CsvMetricsLog {
    path: PathBuf,
}

impl CsvMetricsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Journal standard d'un répertoire d'exécution.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(METRICS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn format_row(generation: usize, stats: &FitnessStats, duration: Duration) -> String {
    format!(
        "{},{},{:.6},{:.6},{:.6},{:.6},{:.6}\n",
        generation,
        stats.count,
        stats.mean,
        stats.std,
        stats.min,
        stats.max,
        duration.as_secs_f64()
    )
}

#[async_trait]
impl MetricsSink for CsvMetricsLog {
    async fn record(
        &mut self,
        generation: usize,
        stats: &FitnessStats,
        duration: Duration,
    ) -> Result<()> {
        let mut chunk = String::new();
        if !fs::exists(&self.path).await {
            if let Some(parent) = self.path.parent() {
                fs::ensure_dir(parent).await?;
            }
            chunk.push_str(METRICS_HEADER);
            chunk.push('\n');
        }
        chunk.push_str(&format_row(generation, stats, duration));
        fs::append(&self.path, chunk.as_bytes()).await
    }
}

/// Instantané JSON lisible (UTF-8 brut) d'une population.
pub async fn save_population(path: &Path, population: &[Individual]) -> Result<()> {
    fs::write_json_atomic(path, &population).await?;
    debug!("Population sauvegardée : {} ({} individus)", path.display(), population.len());
    Ok(())
}
