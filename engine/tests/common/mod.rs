// FICHIER : engine/tests/common/mod.rs

use evoprompt::ai::llm::mock::ScriptedLlm;
use evoprompt::genetics::evaluators::coherence::test_mocks::FixedScorer;
use evoprompt::genetics::{FitnessEvaluator, Individual};
use evoprompt::utils::config::{AppConfig, EvolutionConfig, FitnessConfig};
use evoprompt::utils::Arc;
use std::sync::Once;

static INIT: Once = Once::new();

pub const REFERENCE: &str = "Vaccines are safe and they protect the people around you.";

/// Logs de test (une seule fois par binaire).
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[allow(dead_code)]
pub fn evolution_config(population_size: usize, generations: usize, elite_size: usize) -> EvolutionConfig {
    EvolutionConfig {
        population_size,
        generations,
        elite_size,
        tournament_size: 2,
        batch_size: 4,
        max_empty_batches: 3,
        seed: Some(7),
        ..EvolutionConfig::default()
    }
}

#[allow(dead_code)]
pub fn app_config(population_size: usize, generations: usize) -> AppConfig {
    AppConfig {
        evolution: evolution_config(population_size, generations, 1),
        ..AppConfig::default()
    }
}

#[allow(dead_code)]
pub fn fixed_evaluator(score: f64) -> FitnessEvaluator {
    FitnessEvaluator::new(Arc::new(FixedScorer(score)), FitnessConfig::default())
}

/// Population déjà évaluée, fitness imposées.
#[allow(dead_code)]
pub fn evaluated_population(fitness: &[f64]) -> Vec<Individual> {
    fitness
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            let mut ind = Individual::new(format!("seed-role-{}", i), format!("seed-topic-{}", i), "seed prompt")
                .with_data(format!("Seed text number {} about vaccines.", i));
            ind.fitness = f;
            ind
        })
        .collect()
}

#[allow(dead_code)]
pub fn scripted() -> Arc<ScriptedLlm> {
    Arc::new(ScriptedLlm::new())
}
