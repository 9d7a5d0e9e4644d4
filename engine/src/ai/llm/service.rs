// FICHIER : engine/src/ai/llm/service.rs

use crate::utils::async_trait;
use serde_json::Value;

/// Raison d'échec d'un appel d'opérateur.
/// Reste locale au pipeline : un échec signifie "pas d'individu", jamais une erreur fatale.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperatorFailure {
    #[error("transport LLM : {0}")]
    Transport(String),

    #[error("réponse LLM vide")]
    EmptyResponse,

    #[error("JSON malformé : {0}")]
    Malformed(String),

    #[error("sortie invalide : {0}")]
    Invalid(String),
}

pub type OperatorResult<T> = std::result::Result<T, OperatorFailure>;

/// Une requête au service : consignes système/utilisateur, schéma attendu, température.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub schema: Value,
    pub temperature: f32,
}

/// Capacité consommée par tous les opérateurs génétiques.
/// Renvoie le texte brut du modèle ; la validation structurée est faite par `response_parser`.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> OperatorResult<String>;
}
