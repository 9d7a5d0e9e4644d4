// FICHIER : engine/src/genetics/population.rs

use super::batching::{run_until_quota, BatchLimits};
use super::operators::{generate_data, infer_role, synthesize_topic_and_prompt};
use super::types::Individual;
use crate::ai::llm::{LlmService, OperatorResult};
use crate::utils::config::EvolutionConfig;
use crate::utils::prelude::*;

pub(crate) fn limits(config: &EvolutionConfig) -> BatchLimits {
    BatchLimits {
        batch_size: config.batch_size,
        max_empty_batches: config.max_empty_batches,
    }
}

/// Inférence du rôle puis synthèse (sujet, consigne). Individu non évalué.
async fn create_one(
    llm: &dyn LlmService,
    reference: &str,
    config: &EvolutionConfig,
) -> OperatorResult<Individual> {
    let temps = &config.temperatures;
    let role = infer_role(llm, reference, temps.role).await?;
    let (topic, prompt) = synthesize_topic_and_prompt(llm, &role, reference, temps.synthesis).await?;
    Ok(Individual::new(role, topic, prompt))
}

/// Génération 0 : exactement `n` individus, sans texte et à fitness 0.
/// Une tentative ratée est abandonnée et remplacée par une nouvelle.
#[instrument(skip_all, fields(n = n))]
pub async fn build_initial_population(
    llm: &dyn LlmService,
    reference: &str,
    n: usize,
    config: &EvolutionConfig,
) -> Result<Vec<Individual>> {
    info!("Création de la génération 0 ({} individus)", n);

    let population = run_until_quota(n, limits(config), "Génération 0", || async move {
        match create_one(llm, reference, config).await {
            Ok(individual) => Some(individual),
            Err(e) => {
                debug!("Individu initial abandonné : {}", e);
                None
            }
        }
    })
    .await?;

    info!("Génération 0 créée : {} individus", population.len());
    Ok(population)
}

/// Remplit `generated_data` pour chaque individu qui n'en a pas encore,
/// en réessayant les mêmes individus jusqu'à ce que tous aient un texte.
#[instrument(skip_all, fields(size = population.len()))]
pub async fn fill_generated_data(
    llm: &dyn LlmService,
    population: &mut [Individual],
    reference: &str,
    config: &EvolutionConfig,
) -> Result<()> {
    let batch_size = config.batch_size.max(1);
    let temperature = config.temperatures.data;
    let mut empty_batches = 0usize;

    loop {
        let missing: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.has_data())
            .map(|(idx, _)| idx)
            .take(batch_size)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        let snapshot: &[Individual] = &*population;
        let outcomes = futures::future::join_all(
            missing
                .iter()
                .map(|&idx| generate_data(llm, &snapshot[idx], reference, temperature)),
        )
        .await;

        let mut successes = 0usize;
        for (idx, outcome) in missing.into_iter().zip(outcomes) {
            match outcome {
                Ok(text) => {
                    population[idx].generated_data = Some(text);
                    successes += 1;
                }
                Err(e) => debug!("Génération de données échouée (individu {}) : {}", idx, e),
            }
        }

        if successes == 0 {
            empty_batches += 1;
            if empty_batches >= config.max_empty_batches {
                return Err(AppError::Ai(format!(
                    "Génération de données : {} lots consécutifs sans succès",
                    empty_batches
                )));
            }
        } else {
            empty_batches = 0;
        }
    }
}
