// FICHIER : engine/src/ai/llm/mock.rs

//! Service LLM scripté et déterministe, pour les tests et les essais hors-ligne.

use super::prompts;
use super::service::{LlmRequest, LlmService, OperatorFailure, OperatorResult};
use crate::utils::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Opérateur reconnu à partir des clés requises du schéma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Role,
    Synthesis,
    Crossover,
    Mutation,
    RegeneratePrompt,
    Data,
}

impl OperatorKind {
    pub fn from_schema(schema: &Value) -> Option<Self> {
        let mut keys: Vec<&str> = schema
            .get("required")?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        keys.sort_unstable();
        match keys.as_slice() {
            ["role"] => Some(Self::Role),
            ["prompt", "topic"] => Some(Self::Synthesis),
            ["new_role", "new_topic"] => Some(Self::Crossover),
            ["new_value"] => Some(Self::Mutation),
            ["prompt"] => Some(Self::RegeneratePrompt),
            ["generated_text"] => Some(Self::Data),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Journal {
    calls: HashMap<OperatorKind, usize>,
    crossovers: Vec<(String, String)>,
    mutation_explore_flags: Vec<bool>,
}

/// Renvoie des valeurs numérotées (`role-1`, `cross-topic-4`...) et garde
/// la trace de ce qu'il a produit.
#[derive(Default)]
pub struct ScriptedLlm {
    counter: AtomicUsize,
    failure_every: Option<usize>,
    panic_every: Option<usize>,
    always_fail: bool,
    data_text: Option<String>,
    journal: Mutex<Journal>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaque n-ième appel échoue (erreur de transport).
    pub fn with_failure_every(mut self, n: usize) -> Self {
        self.failure_every = Some(n.max(1));
        self
    }

    /// Chaque n-ième appel panique.
    pub fn with_panic_every(mut self, n: usize) -> Self {
        self.panic_every = Some(n.max(1));
        self
    }

    pub fn always_failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    /// Texte fixe renvoyé par la génération de données.
    pub fn with_data_text(mut self, text: impl Into<String>) -> Self {
        self.data_text = Some(text.into());
        self
    }

    pub fn calls(&self, kind: OperatorKind) -> usize {
        self.journal().calls.get(&kind).copied().unwrap_or(0)
    }

    /// Paires (rôle, sujet) produites par les croisements réussis.
    pub fn crossover_outputs(&self) -> Vec<(String, String)> {
        self.journal().crossovers.clone()
    }

    /// Pour chaque mutation : `true` si la consigne était en mode exploration.
    pub fn mutation_explore_flags(&self) -> Vec<bool> {
        self.journal().mutation_explore_flags.clone()
    }

    fn journal(&self) -> std::sync::MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn respond(&self, kind: OperatorKind, request: &LlmRequest, n: usize) -> Value {
        match kind {
            OperatorKind::Role => json!({ "role": format!("role-{}", n) }),
            OperatorKind::Synthesis => json!({
                "topic": format!("topic-{}", n),
                "prompt": format!("prompt-{}", n)
            }),
            OperatorKind::Crossover => {
                let pair = (format!("cross-role-{}", n), format!("cross-topic-{}", n));
                self.journal().crossovers.push(pair.clone());
                json!({ "new_role": pair.0, "new_topic": pair.1 })
            }
            OperatorKind::Mutation => {
                let explore = request
                    .system
                    .starts_with(prompts::MUTATION_EXPLORE_SYSTEM_PROMPT);
                self.journal().mutation_explore_flags.push(explore);
                json!({ "new_value": format!("mutated-{}", n) })
            }
            OperatorKind::RegeneratePrompt => json!({ "prompt": format!("regenerated-{}", n) }),
            OperatorKind::Data => {
                let text = self.data_text.clone().unwrap_or_else(|| {
                    format!("Sample {} answers the request in one short sentence.", n)
                });
                json!({ "generated_text": text })
            }
        }
    }
}

#[async_trait]
impl LlmService for ScriptedLlm {
    async fn complete(&self, request: &LlmRequest) -> OperatorResult<String> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = OperatorKind::from_schema(&request.schema)
            .ok_or_else(|| OperatorFailure::Invalid("schéma inconnu".into()))?;
        *self.journal().calls.entry(kind).or_insert(0) += 1;

        if self.always_fail || self.failure_every.is_some_and(|every| n % every == 0) {
            return Err(OperatorFailure::Transport(format!("échec simulé #{}", n)));
        }
        if self.panic_every.is_some_and(|every| n % every == 0) {
            panic!("panne simulée #{}", n);
        }

        Ok(format!("```json\n{}\n```", self.respond(kind, request, n)))
    }
}
