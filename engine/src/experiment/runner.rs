// FICHIER : engine/src/experiment/runner.rs

use super::saving::{save_population, CsvMetricsLog, FINAL_SNAPSHOT, GEN0_SNAPSHOT};
use super::setup::ExperimentSetup;
use crate::ai::llm::LlmService;
use crate::genetics::engine::EvolutionEngine;
use crate::genetics::evaluators::FitnessEvaluator;
use crate::genetics::population::{build_initial_population, fill_generated_data};
use crate::genetics::reporting::{fitness_stats, FitnessStats};
use crate::genetics::traits::{MetricsSink, SimilarityScorer};
use crate::genetics::types::Individual;
use crate::utils::config::AppConfig;
use crate::utils::fs::PathBuf;
use crate::utils::prelude::*;
use crate::utils::{Arc, Duration, Instant};

/// Bilan d'une exécution complète.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub final_stats: FitnessStats,
    pub best: Option<Individual>,
    pub duration: Duration,
}

/// Pipeline complet : génération 0, textes, évaluation, journal et instantané,
/// évolution, puis instantané final réévalué.
#[instrument(skip_all, fields(output_dir = ?setup.output_dir))]
pub async fn run_experiment(
    config: &AppConfig,
    llm: Arc<dyn LlmService>,
    scorer: Arc<dyn SimilarityScorer>,
    setup: ExperimentSetup,
) -> Result<RunSummary> {
    config.validate()?;
    if let Some(fallback) = &setup.corpus_fallback {
        warn!(
            "Corpus principal absent : référence tirée de {}",
            fallback.display()
        );
    }
    let started = Instant::now();
    let evo = &config.evolution;
    let reference = setup.reference_text.as_str();
    let mut metrics = CsvMetricsLog::in_dir(&setup.output_dir);

    // 1. Génération 0
    let mut population =
        build_initial_population(llm.as_ref(), reference, evo.population_size, evo).await?;

    // 2. Textes puis évaluation (la durée de la génération 0 couvre les deux)
    let gen0_started = Instant::now();
    fill_generated_data(llm.as_ref(), &mut population, reference, evo).await?;
    let evaluator = FitnessEvaluator::new(scorer, config.fitness.clone());
    evaluator.evaluate(&mut population, reference, 0, evo.generations)?;

    let gen0_stats = fitness_stats(&population);
    metrics.record(0, &gen0_stats, gen0_started.elapsed()).await?;
    save_population(&setup.output_dir.join(GEN0_SNAPSHOT), &population).await?;
    info!("Génération 0 évaluée : moyenne {:.4}", gen0_stats.mean);

    // 3. Évolution (réévaluation finale incluse)
    let mut engine = EvolutionEngine::new(llm, evaluator, evo.clone())?;
    let final_population = engine.run(population, reference, &mut metrics).await?;
    save_population(&setup.output_dir.join(FINAL_SNAPSHOT), &final_population).await?;

    let best = final_population
        .iter()
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .cloned();
    let duration = started.elapsed();
    info!("Exécution terminée en {:.2}s", duration.as_secs_f64());

    Ok(RunSummary {
        output_dir: setup.output_dir,
        final_stats: fitness_stats(&final_population),
        best,
        duration,
    })
}
