// FICHIER : engine/src/genetics/operators/mutation.rs

use super::string_object_schema;
use crate::ai::llm::{call_structured, prompts, LlmService, OperatorResult, StructuredOutput};
use crate::genetics::types::Genes;
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

/// Attribut modifié par une mutation ; l'autre sert d'ancre de contexte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    Role,
    Topic,
}

impl MutationTarget {
    /// Tirage uniforme, fait par l'appelant pour garder l'aléa injectable.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Role
        } else {
            Self::Topic
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Topic => "topic",
        }
    }
}

/// Refine : petite variation locale. Explore : saut créatif, utilisé en stagnation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    Refine,
    Explore,
}

impl MutationMode {
    pub fn from_stagnation(stuck: bool) -> Self {
        if stuck {
            Self::Explore
        } else {
            Self::Refine
        }
    }

    fn system_prompt(self) -> &'static str {
        match self {
            Self::Refine => prompts::MUTATION_REFINE_SYSTEM_PROMPT,
            Self::Explore => prompts::MUTATION_EXPLORE_SYSTEM_PROMPT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MutationOutput {
    new_value: String,
}

impl StructuredOutput for MutationOutput {
    fn name() -> &'static str {
        "MutationOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[(
            "new_value",
            "The new, mutated value (a role or a topic) for the attribute.",
        )])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("new_value", &self.new_value)]
    }
}

/// Mute exactement l'attribut ciblé ; l'autre est recopié tel quel.
pub async fn semantic_mutation(
    llm: &dyn LlmService,
    genes: &Genes,
    reference: &str,
    target: MutationTarget,
    mode: MutationMode,
    temperature: f32,
) -> OperatorResult<Genes> {
    let (value, anchor) = match target {
        MutationTarget::Role => ((target.label(), genes.role.as_str()), ("topic", genes.topic.as_str())),
        MutationTarget::Topic => ((target.label(), genes.topic.as_str()), ("role", genes.role.as_str())),
    };

    let user = prompts::mutation_user_prompt(reference, value, anchor);
    let out: MutationOutput =
        call_structured(llm, mode.system_prompt(), &user, temperature).await?;
    let new_value = out.new_value.trim().to_string();

    Ok(match target {
        MutationTarget::Role => Genes::new(new_value, genes.topic.clone()),
        MutationTarget::Topic => Genes::new(genes.role.clone(), new_value),
    })
}
