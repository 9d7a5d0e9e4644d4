// FICHIER : engine/src/genetics/operators/generation.rs

use super::string_object_schema;
use crate::ai::llm::{call_structured, prompts, LlmService, OperatorResult, StructuredOutput};
use crate::genetics::types::Individual;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct DataOutput {
    generated_text: String,
}

impl StructuredOutput for DataOutput {
    fn name() -> &'static str {
        "DataOutput"
    }
    fn schema() -> Value {
        string_object_schema(&[(
            "generated_text",
            "A single short (1-2 sentences) text-only output fulfilling the instruction.",
        )])
    }
    fn required_text(&self) -> Vec<(&'static str, &str)> {
        vec![("generated_text", &self.generated_text)]
    }
}

/// Exécute la consigne de l'individu : texte court, sans balisage ni lien.
pub async fn generate_data(
    llm: &dyn LlmService,
    individual: &Individual,
    reference: &str,
    temperature: f32,
) -> OperatorResult<String> {
    let user = prompts::data_user_prompt(
        &individual.role,
        &individual.topic,
        &individual.prompt,
        reference,
    );
    let out: DataOutput =
        call_structured(llm, prompts::DATA_SYSTEM_PROMPT, &user, temperature).await?;
    Ok(out.generated_text.trim().to_string())
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::llm::mock::{OperatorKind, ScriptedLlm};
    use crate::ai::llm::OperatorFailure;

    #[tokio::test]
    async fn test_generate_data_trims() {
        let llm = ScriptedLlm::new().with_data_text("  Masks work.  ");
        let ind = Individual::new("nurse", "masks", "say something");
        assert_eq!(generate_data(&llm, &ind, "ref", 0.7).await.unwrap(), "Masks work.");
        assert_eq!(llm.calls(OperatorKind::Data), 1);
    }

    #[tokio::test]
    async fn test_blank_output_is_invalid() {
        let llm = ScriptedLlm::new().with_data_text("   ");
        let ind = Individual::new("nurse", "masks", "say something");
        assert!(matches!(
            generate_data(&llm, &ind, "ref", 0.7).await,
            Err(OperatorFailure::Invalid(_))
        ));
    }
}
