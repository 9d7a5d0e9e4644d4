// FICHIER : engine/tools/evo-cli/src/commands/evolve.rs

use clap::Args;
use evoprompt::ai::llm::LlmClient;
use evoprompt::experiment::corpus::{DEFAULT_CORPUS, FALLBACK_CORPUS};
use evoprompt::experiment::{run_experiment, setup_experiment, ReferenceSource, RunSummary};
use evoprompt::genetics::EmbeddingF1Scorer;
use evoprompt::utils::context::{init_logging, AppConfig};
use evoprompt::utils::io::PathBuf;
use evoprompt::utils::prelude::*;
use evoprompt::utils::Arc;
use evoprompt::{user_info, user_success};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Paramètres d'une exécution. Les valeurs absentes viennent du fichier de
/// configuration, puis des variables EVO_*, puis des défauts.
#[derive(Args, Clone, Debug, Default)]
pub struct EvolveArgs {
    /// Taille de la population [défaut : 30]
    #[arg(long)]
    pub n: Option<usize>,

    /// Nombre de générations [défaut : 10]
    #[arg(long)]
    pub generations: Option<usize>,

    /// Taille du tournoi [défaut : 3]
    #[arg(long)]
    pub k: Option<usize>,

    /// Individus recopiés tels quels à chaque génération [défaut : 2]
    #[arg(long)]
    pub elite_size: Option<usize>,

    #[arg(long)]
    pub prob_crossover: Option<f64>,

    #[arg(long)]
    pub prob_mutation: Option<f64>,

    /// Pipelines LLM lancés ensemble
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Modèle LLM [défaut : llama3]
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub llm_url: Option<String>,

    /// Modèle d'embeddings du score de cohérence
    #[arg(long)]
    pub embedding_model: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Dossier parent des exécutions horodatées
    #[arg(long, default_value = "exec")]
    pub outdir_base: PathBuf,

    /// Fichier de texte de référence (sinon ligne tirée du corpus)
    #[arg(long)]
    pub reference_text: Option<PathBuf>,

    /// Corpus CSV de références
    #[arg(long, conflicts_with = "reference_text")]
    pub corpus: Option<PathBuf>,

    /// Fichier de configuration JSON
    #[arg(long, env = "EVO_CONFIG")]
    pub config: Option<PathBuf>,
}

impl EvolveArgs {
    /// Applique les flags présents par-dessus la configuration chargée.
    pub fn apply(&self, config: &mut AppConfig) {
        let evo = &mut config.evolution;
        if let Some(v) = self.n {
            evo.population_size = v;
        }
        if let Some(v) = self.generations {
            evo.generations = v;
        }
        if let Some(v) = self.k {
            evo.tournament_size = v;
        }
        if let Some(v) = self.elite_size {
            evo.elite_size = v;
        }
        if let Some(v) = self.prob_crossover {
            evo.prob_crossover = v;
        }
        if let Some(v) = self.prob_mutation {
            evo.prob_mutation = v;
        }
        if let Some(v) = self.batch_size {
            evo.batch_size = v;
        }
        if let Some(v) = self.seed {
            evo.seed = Some(v);
        }
        if let Some(v) = &self.model {
            config.llm.model = v.clone();
        }
        if let Some(v) = &self.llm_url {
            config.llm.base_url = v.clone();
        }
        if let Some(v) = &self.embedding_model {
            config.scorer.embedding_model = v.clone();
        }
    }

    pub fn reference_source(&self) -> ReferenceSource {
        match (&self.reference_text, &self.corpus) {
            (Some(path), _) => ReferenceSource::File(path.clone()),
            (None, Some(path)) => ReferenceSource::Corpus {
                path: path.clone(),
                fallback: None,
            },
            (None, None) => ReferenceSource::Corpus {
                path: PathBuf::from(DEFAULT_CORPUS),
                fallback: Some(PathBuf::from(FALLBACK_CORPUS)),
            },
        }
    }

    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Exécution complète, sans affichage : partagée avec `tune`.
pub async fn run(args: &EvolveArgs) -> Result<RunSummary> {
    let config = args.resolve_config()?;

    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let setup = setup_experiment(&args.outdir_base, &args.reference_source(), &mut rng).await?;
    init_logging(Some(&setup.output_dir));

    let llm = Arc::new(LlmClient::new(&config.llm)?);
    let scorer = Arc::new(EmbeddingF1Scorer::from_model(&config.scorer.embedding_model)?);
    run_experiment(&config, llm, scorer, setup).await
}

pub async fn handle(args: EvolveArgs) -> Result<()> {
    user_info!("EVOLVE_START", "Sortie sous {}", args.outdir_base.display());

    let summary = run(&args).await?;

    if let Some(best) = &summary.best {
        user_info!(
            "EVOLVE_BEST",
            "{:.4} | rôle : {} | sujet : {}",
            best.fitness,
            best.role,
            best.topic
        );
    }
    user_success!(
        "EVOLVE_DONE",
        "{:.2}s, fitness moyenne {:.4}, max {:.4}, résultats : {}",
        summary.duration.as_secs_f64(),
        summary.final_stats.mean,
        summary.final_stats.max,
        summary.output_dir.display()
    );
    Ok(())
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = EvolveArgs {
            n: Some(12),
            k: Some(4),
            prob_mutation: Some(0.3),
            model: Some("mistral".into()),
            ..EvolveArgs::default()
        };
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.evolution.population_size, 12);
        assert_eq!(config.evolution.tournament_size, 4);
        assert_eq!(config.evolution.prob_mutation, 0.3);
        assert_eq!(config.evolution.generations, 10);
        assert_eq!(config.llm.model, "mistral");
    }

    #[test]
    fn test_reference_source_selection() {
        let mut args = EvolveArgs::default();
        assert_eq!(
            args.reference_source(),
            ReferenceSource::Corpus {
                path: PathBuf::from(DEFAULT_CORPUS),
                fallback: Some(PathBuf::from(FALLBACK_CORPUS)),
            }
        );

        args.reference_text = Some(PathBuf::from("instance.txt"));
        assert_eq!(
            args.reference_source(),
            ReferenceSource::File(PathBuf::from("instance.txt"))
        );
    }

    #[test]
    fn test_invalid_flags_rejected_before_any_io() {
        let args = EvolveArgs {
            n: Some(2),
            elite_size: Some(2),
            ..EvolveArgs::default()
        };
        assert!(matches!(args.resolve_config(), Err(AppError::Config(_))));
    }
}
