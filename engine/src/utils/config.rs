// FICHIER : engine/src/utils/config.rs

use crate::utils::env;
use crate::utils::error::{AppError, Result};
use crate::utils::json;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration globale d'une exécution, construite une seule fois au démarrage
/// puis passée explicitement au moteur et à l'évaluateur.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub fitness: FitnessConfig,
    pub llm: LlmConfig,
    pub scorer: ScorerConfig,
}

// --- SOUS-STRUCTURES DE CONFIGURATION ---

/// Paramètres de la boucle évolutive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub elite_size: usize,
    pub prob_crossover: f64,
    pub prob_mutation: f64,
    /// Nombre maximal de pipelines LLM lancés ensemble.
    pub batch_size: usize,
    /// Fenêtre (en générations) de détection de stagnation.
    pub stagnation_window: usize,
    /// Lots consécutifs sans aucun succès tolérés avant abandon.
    pub max_empty_batches: usize,
    pub seed: Option<u64>,
    pub temperatures: OperatorTemperatures,
}

/// Température d'échantillonnage de chaque opérateur.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OperatorTemperatures {
    pub role: f32,
    pub synthesis: f32,
    pub crossover: f32,
    pub mutation: f32,
    pub prompt: f32,
    pub data: f32,
}

/// Seuils et facteurs du modèle de pénalités.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FitnessConfig {
    pub coherence_upper_threshold: f64,
    pub coherence_penalty_factor: f64,
    pub compression_threshold: f64,
    pub repetition_threshold: f64,
    pub diversity_penalty_factor: f64,
    pub ngram_min: usize,
    pub ngram_max: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScorerConfig {
    pub embedding_model: String,
}

impl EvolutionConfig {
    /// Bornes requises par le moteur (tailles, probabilités dans [0, 1]).
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AppError::Config("population_size doit être > 0".into()));
        }
        if self.elite_size >= self.population_size {
            return Err(AppError::Config(format!(
                "elite_size ({}) doit être < population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(AppError::Config("tournament_size doit être >= 1".into()));
        }
        for (name, p) in [
            ("prob_crossover", self.prob_crossover),
            ("prob_mutation", self.prob_mutation),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppError::Config(format!(
                    "{} hors de [0, 1] : {}",
                    name, p
                )));
            }
        }
        if self.batch_size == 0 {
            return Err(AppError::Config("batch_size doit être > 0".into()));
        }
        if self.stagnation_window == 0 {
            return Err(AppError::Config("stagnation_window doit être > 0".into()));
        }
        if self.max_empty_batches == 0 {
            return Err(AppError::Config("max_empty_batches doit être > 0".into()));
        }
        Ok(())
    }
}

// --- IMPLÉMENTATIONS PAR DÉFAUT ---

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 10,
            tournament_size: 3,
            elite_size: 2,
            prob_crossover: 0.8,
            prob_mutation: 0.1,
            batch_size: 10,
            stagnation_window: 3,
            max_empty_batches: 25,
            seed: None,
            temperatures: OperatorTemperatures::default(),
        }
    }
}

impl Default for OperatorTemperatures {
    fn default() -> Self {
        Self {
            role: 0.5,
            synthesis: 0.7,
            crossover: 0.7,
            mutation: 0.8,
            prompt: 0.7,
            data: 0.7,
        }
    }
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            coherence_upper_threshold: 0.8,
            coherence_penalty_factor: 0.5,
            compression_threshold: 2.0,
            repetition_threshold: 0.5,
            diversity_penalty_factor: 0.1,
            ngram_min: 4,
            ngram_max: 6,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            embedding_model: "bge-small-en-v1.5".to_string(),
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Défauts -> fichier JSON optionnel -> variables d'environnement.
    /// Les flags CLI sont appliqués ensuite par l'appelant.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "Fichier de configuration introuvable : {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        json::parse(&content).map_err(|e| {
            AppError::Config(format!("Configuration illisible ({}) : {}", path.display(), e))
        })
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(url) = env::get_optional("EVO_LLM_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = env::get_optional("EVO_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(model) = env::get_optional("EVO_EMBEDDING_MODEL") {
            self.scorer.embedding_model = model;
        }
        if let Some(seed) = env::get_parsed::<u64>("EVO_SEED")? {
            self.evolution.seed = Some(seed);
        }
        Ok(())
    }

    /// Rejette les combinaisons qui rendraient la boucle incohérente.
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;

        let fit = &self.fitness;
        if fit.ngram_min == 0 || fit.ngram_min > fit.ngram_max {
            return Err(AppError::Config(format!(
                "Fenêtre n-gram invalide : {}..={}",
                fit.ngram_min, fit.ngram_max
            )));
        }
        Ok(())
    }
}

// --- TESTS UNITAIRES ---
