// FICHIER : engine/src/genetics/operators/synthesis.rs

use super::string_object_schema;
use crate::ai::llm::{call_structured, prompts, LlmService, OperatorResult, StructuredOutput};
use serde::Deserialize;
use serde_json::Value;

// --- SORTIES STRUCTURÉES ---

#[derive(Debug, Deserialize)]
struct RoleOutput {
    role: String,
}

impl StructuredOutput for RoleOutput {
    fn name() -> &'static str {
        "RoleOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[(
            "role",
            "The inferred speaker role (e.g. a concerned citizen, a health expert).",
        )])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("role", &self.role)]
    }
}

#[derive(Debug, Deserialize)]
struct SynthesisOutput {
    topic: String,
    prompt: String,
}

impl StructuredOutput for SynthesisOutput {
    fn name() -> &'static str {
        "SynthesisOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[
            ("topic", "A concise topic capturing the core theme."),
            (
                "prompt",
                "An instruction aligned with the role, the topic and the reference text.",
            ),
        ])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("topic", &self.topic), ("prompt", &self.prompt)]
    }
}

#[derive(Debug, Deserialize)]
struct PromptOutput {
    prompt: String,
}

impl StructuredOutput for PromptOutput {
    fn name() -> &'static str {
        "PromptOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[(
            "prompt",
            "The new instruction built from the evolved role and topic.",
        )])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("prompt", &self.prompt)]
    }
}

// --- OPÉRATEURS ---

/// Déduit la persona qui a écrit le texte de référence.
pub async fn infer_role(
    llm: &dyn LlmService,
    reference: &str,
    temperature: f32,
) -> OperatorResult<String> {
    let out: RoleOutput = call_structured(
        llm,
        prompts::ROLE_SYSTEM_PROMPT,
        &prompts::role_user_prompt(reference),
        temperature,
    )
    .await?;
    Ok(out.role.trim().to_string())
}

/// Analyse -> sujet -> consigne, à partir d'un rôle et de la référence.
pub async fn synthesize_topic_and_prompt(
    llm: &dyn LlmService,
    role: &str,
    reference: &str,
    temperature: f32,
) -> OperatorResult<(String, String)> {
    let out: SynthesisOutput = call_structured(
        llm,
        prompts::SYNTHESIS_SYSTEM_PROMPT,
        &prompts::synthesis_user_prompt(role, reference),
        temperature,
    )
    .await?;
    Ok((out.topic.trim().to_string(), out.prompt.trim().to_string()))
}

/// Nouvelle consigne pour un couple (rôle, sujet) évolué.
pub async fn regenerate_prompt(
    llm: &dyn LlmService,
    role: &str,
    topic: &str,
    reference: &str,
    temperature: f32,
) -> OperatorResult<String> {
    let out: PromptOutput = call_structured(
        llm,
        prompts::REGENERATE_PROMPT_SYSTEM_PROMPT,
        &prompts::regenerate_prompt_user_prompt(role, topic, reference),
        temperature,
    )
    .await?;
    Ok(out.prompt.trim().to_string())
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::llm::mock::{OperatorKind, ScriptedLlm};
    use crate::ai::llm::OperatorFailure;

    #[tokio::test]
    async fn test_role_then_synthesis() {
        let llm = ScriptedLlm::new();
        let role = infer_role(&llm, "The vaccine is safe.", 0.5).await.unwrap();
        assert_eq!(role, "role-1");

        let (topic, prompt) = synthesize_topic_and_prompt(&llm, &role, "The vaccine is safe.", 0.7)
            .await
            .unwrap();
        assert_eq!(topic, "topic-2");
        assert_eq!(prompt, "prompt-2");
        assert_eq!(llm.calls(OperatorKind::Synthesis), 1);
    }

    #[tokio::test]
    async fn test_regenerate_prompt() {
        let llm = ScriptedLlm::new();
        let prompt = regenerate_prompt(&llm, "nurse", "booster shots", "ref", 0.7)
            .await
            .unwrap();
        assert_eq!(prompt, "regenerated-1");
        assert_eq!(llm.calls(OperatorKind::RegeneratePrompt), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_raised() {
        let llm = ScriptedLlm::always_failing();
        let res = infer_role(&llm, "ref", 0.5).await;
        assert!(matches!(res, Err(OperatorFailure::Transport(_))));
    }
}
