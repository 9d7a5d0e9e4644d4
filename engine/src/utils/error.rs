// FICHIER : engine/src/utils/error.rs

use std::io;

/// Type de résultat standard de la librairie.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs fatales (setup, I/O, service).
/// Les échecs d'opérateurs génétiques ne passent PAS par ici : voir `OperatorFailure`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Réseau : {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erreur IA/LLM : {0}")]
    Ai(String),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corpus inutilisable : {0}")]
    Corpus(String),

    #[error("Journal de métriques invalide : {0}")]
    Metrics(String),
}

// Permet de faire : return Err(format!(...).into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
