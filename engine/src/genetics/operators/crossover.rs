// FICHIER : engine/src/genetics/operators/crossover.rs

use super::string_object_schema;
use crate::ai::llm::{call_structured, prompts, LlmService, OperatorResult, StructuredOutput};
use crate::genetics::types::Genes;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CrossoverOutput {
    new_role: String,
    new_topic: String,
}

impl StructuredOutput for CrossoverOutput {
    fn name() -> &'static str {
        "CrossoverOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[
            (
                "new_role",
                "The child's role, inherited from the stronger parent or combining both.",
            ),
            ("new_topic", "The child's topic, inherited or combined."),
        ])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("new_role", &self.new_role), ("new_topic", &self.new_topic)]
    }
}

/// Croisement sémantique : pour le rôle et le sujet, le modèle hérite de
/// l'attribut le plus pertinent ou fusionne les deux, ancré sur la référence.
pub async fn semantic_crossover(
    llm: &dyn LlmService,
    parent1: &Genes,
    parent2: &Genes,
    reference: &str,
    temperature: f32,
) -> OperatorResult<Genes> {
    let user = prompts::crossover_user_prompt(
        reference,
        (parent1.role.as_str(), parent1.topic.as_str()),
        (parent2.role.as_str(), parent2.topic.as_str()),
    );
    let out: CrossoverOutput =
        call_structured(llm, prompts::CROSSOVER_SYSTEM_PROMPT, &user, temperature).await?;

    Ok(Genes::new(out.new_role.trim(), out.new_topic.trim()))
}
