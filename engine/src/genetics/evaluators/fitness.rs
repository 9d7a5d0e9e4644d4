// FICHIER : engine/src/genetics/evaluators/fitness.rs

use super::diversity::{compression_ratio, internal_repetition};
use crate::genetics::traits::SimilarityScorer;
use crate::genetics::types::Individual;
use crate::utils::config::FitnessConfig;
use crate::utils::prelude::*;
use crate::utils::Arc;

/// Fitness en deux temps : score de cohérence calculé en lot, puis pénalités individuelles.
/// Seul composant autorisé à écrire `Individual::fitness`.
#[derive(Clone)]
pub struct FitnessEvaluator {
    scorer: Arc<dyn SimilarityScorer>,
    config: FitnessConfig,
}

impl FitnessEvaluator {
    pub fn new(scorer: Arc<dyn SimilarityScorer>, config: FitnessConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Réécrit la fitness de chaque individu. Population vide : rien à faire.
    /// En cas d'échec du scoreur, aucune fitness n'est modifiée.
    #[instrument(skip_all, fields(size = population.len(), generation = generation))]
    pub fn evaluate(
        &self,
        population: &mut [Individual],
        reference: &str,
        generation: usize,
        max_generations: usize,
    ) -> Result<()> {
        if population.is_empty() {
            return Ok(());
        }

        let candidates: Vec<String> = population.iter().map(|i| i.text().to_string()).collect();
        let scores = self
            .scorer
            .score_batch(&candidates, reference)
            .map_err(|e| AppError::Ai(format!("Score de cohérence indisponible : {}", e)))?;

        if scores.len() != population.len() {
            return Err(AppError::Ai(format!(
                "Le scoreur a renvoyé {} scores pour {} individus",
                scores.len(),
                population.len()
            )));
        }

        for (individual, base) in population.iter_mut().zip(scores) {
            individual.fitness =
                self.apply_penalties(base, individual.text(), generation, max_generations);
        }
        Ok(())
    }

    /// Pénalités de cohérence excessive et de faible diversité, fitness bornée à 0.
    pub fn apply_penalties(
        &self,
        base: f64,
        text: &str,
        generation: usize,
        max_generations: usize,
    ) -> f64 {
        let cfg = &self.config;
        let mut penalty = 0.0;

        if base > cfg.coherence_upper_threshold {
            penalty += (base - cfg.coherence_upper_threshold) * cfg.coherence_penalty_factor;
        }

        let low_diversity = compression_ratio(text) > cfg.compression_threshold
            || internal_repetition(text, cfg.ngram_min, cfg.ngram_max) > cfg.repetition_threshold;
        if low_diversity {
            penalty += cfg.diversity_penalty_factor * ramp(generation, max_generations);
        }

        (base - penalty).max(0.0)
    }
}

/// Progression linéaire de 0 (génération 0) à 1 (dernière génération).
fn ramp(generation: usize, max_generations: usize) -> f64 {
    if max_generations == 0 {
        return 0.0;
    }
    generation as f64 / max_generations as f64
}
