// FICHIER : engine/src/genetics/engine.rs

use super::batching::run_until_quota;
use super::evaluators::FitnessEvaluator;
use super::operators::{
    generate_data, regenerate_prompt, semantic_crossover, semantic_mutation, tournament_select,
    MutationMode, MutationTarget,
};
use super::population::limits;
use super::reporting::{check_stagnation, fitness_stats};
use super::traits::MetricsSink;
use super::types::{sort_by_fitness_desc, Genes, Individual};
use crate::ai::llm::{LlmService, OperatorFailure, OperatorResult};
use crate::utils::config::{EvolutionConfig, OperatorTemperatures};
use crate::utils::prelude::*;
use crate::utils::{Arc, Instant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Décisions aléatoires d'une tentative d'enfant, tirées par le moteur avant le lancement du lot.
#[derive(Debug, Clone)]
struct ChildPlan {
    parent1: Genes,
    parent2: Genes,
    crossover: bool,
    mutation: Option<MutationTarget>,
    mode: MutationMode,
}

/// Pilote de l'algorithme génétique : tournoi, élitisme, stagnation, lots d'enfants.
pub struct EvolutionEngine {
    llm: Arc<dyn LlmService>,
    evaluator: FitnessEvaluator,
    config: EvolutionConfig,
    rng: StdRng,
    history: Vec<f64>,
}

impl EvolutionEngine {
    /// Refuse une configuration hors bornes (ex. probabilité > 1) au lieu de
    /// paniquer au premier tirage.
    pub fn new(
        llm: Arc<dyn LlmService>,
        evaluator: FitnessEvaluator,
        config: EvolutionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            llm,
            evaluator,
            config,
            rng,
            history: Vec::new(),
        })
    }

    /// Moyennes de fitness par génération (génération 0 incluse).
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Fait évoluer une population déjà évaluée pendant `generations` générations,
    /// puis la réévalue entièrement à l'indice final.
    #[instrument(skip_all, fields(size = population.len(), generations = self.config.generations))]
    pub async fn run(
        &mut self,
        population: Vec<Individual>,
        reference: &str,
        sink: &mut dyn MetricsSink,
    ) -> Result<Vec<Individual>> {
        let generations = self.config.generations;
        let pop_size = population.len();
        let mut current = population;

        self.history = vec![fitness_stats(&current).mean];
        info!("Début de l'évolution : {} individus, {} générations", pop_size, generations);

        for g in 1..=generations {
            let started = Instant::now();
            sort_by_fitness_desc(&mut current);

            let stuck = check_stagnation(&self.history, self.config.stagnation_window);
            if stuck {
                warn!("Génération {} : stagnation détectée, mutations en mode exploration", g);
            }

            let elite_count = self.config.elite_size.min(pop_size);
            let mut next: Vec<Individual> = current[..elite_count].to_vec();

            let mut children = self
                .produce_children(&current, pop_size - elite_count, reference, MutationMode::from_stagnation(stuck))
                .await?;
            self.evaluator.evaluate(&mut children, reference, g, generations)?;
            next.extend(children);
            current = next;

            let stats = fitness_stats(&current);
            self.history.push(stats.mean);
            let elapsed = started.elapsed();
            sink.record(g, &stats, elapsed).await?;

            info!(
                "Génération {}/{} terminée en {:.2}s : moyenne {:.4}, max {:.4}",
                g,
                generations,
                elapsed.as_secs_f64(),
                stats.mean,
                stats.max
            );
        }

        self.evaluator
            .evaluate(&mut current, reference, generations, generations)?;
        info!("Évolution terminée");
        Ok(current)
    }

    async fn produce_children(
        &mut self,
        current: &[Individual],
        count: usize,
        reference: &str,
        mode: MutationMode,
    ) -> Result<Vec<Individual>> {
        let llm: &dyn LlmService = self.llm.as_ref();
        let temps = &self.config.temperatures;
        let k = self.config.tournament_size;
        let prob_crossover = self.config.prob_crossover;
        let prob_mutation = self.config.prob_mutation;
        let rng = &mut self.rng;

        run_until_quota(count, limits(&self.config), "Enfants", || {
            let plan = draw_plan(current, k, prob_crossover, prob_mutation, mode, rng);
            async move {
                match plan {
                    Some(plan) => match run_child_pipeline(llm, plan, reference, temps).await {
                        Ok(child) => Some(child),
                        Err(e) => {
                            debug!("Tentative d'enfant abandonnée : {}", e);
                            None
                        }
                    },
                    None => None,
                }
            }
        })
        .await
    }
}

fn draw_plan<R: Rng + ?Sized>(
    population: &[Individual],
    k: usize,
    prob_crossover: f64,
    prob_mutation: f64,
    mode: MutationMode,
    rng: &mut R,
) -> Option<ChildPlan> {
    let parent1 = tournament_select(population, k, rng)?.genes();
    let parent2 = tournament_select(population, k, rng)?.genes();
    let crossover = rng.random_bool(prob_crossover);
    let mutation = rng
        .random_bool(prob_mutation)
        .then(|| MutationTarget::pick(rng));
    Some(ChildPlan {
        parent1,
        parent2,
        crossover,
        mutation,
        mode,
    })
}

/// Croisement ou copie, mutation éventuelle, nouvelle consigne, puis texte.
/// Toute étape en échec fait échouer la tentative.
async fn run_child_pipeline(
    llm: &dyn LlmService,
    plan: ChildPlan,
    reference: &str,
    temps: &OperatorTemperatures,
) -> OperatorResult<Individual> {
    let mut genes = if plan.crossover {
        semantic_crossover(llm, &plan.parent1, &plan.parent2, reference, temps.crossover).await?
    } else {
        plan.parent1
    };
    if !genes.is_complete() {
        return Err(OperatorFailure::Invalid("rôle ou sujet manquant".into()));
    }

    if let Some(target) = plan.mutation {
        genes = semantic_mutation(llm, &genes, reference, target, plan.mode, temps.mutation).await?;
        if !genes.is_complete() {
            return Err(OperatorFailure::Invalid("mutation incomplète".into()));
        }
    }

    let prompt = regenerate_prompt(llm, &genes.role, &genes.topic, reference, temps.prompt).await?;
    let mut child = Individual::new(genes.role, genes.topic, prompt);
    let data = generate_data(llm, &child, reference, temps.data).await?;
    child.generated_data = Some(data);
    Ok(child)
}
