// FICHIER : engine/src/ai/llm/response_parser.rs

use super::prompts;
use super::service::{LlmRequest, LlmService, OperatorFailure, OperatorResult};
use crate::utils::json::snippet;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Forme de sortie attendue d'un opérateur.
pub trait StructuredOutput: DeserializeOwned {
    fn name() -> &'static str;

    /// Schéma JSON envoyé au modèle (champ `format` côté Ollama).
    fn schema() -> Value;

    /// Champs texte qui ne doivent pas être vides.
    fn required_text(&self) -> Vec<(&'static str, &str)>;
}

/// Extrait le premier objet JSON équilibré d'une réponse "bavarde"
/// (balises Markdown, phrase d'introduction...).
pub fn extract_json(raw: &str) -> OperatorResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OperatorFailure::EmptyResponse);
    }

    let start = trimmed
        .find('{')
        .ok_or_else(|| OperatorFailure::Malformed(format!("aucun objet JSON : {}", snippet(trimmed))))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (offset, c) in trimmed[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(start + offset + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end.ok_or_else(|| {
        OperatorFailure::Malformed(format!("objet JSON non refermé : {}", snippet(trimmed)))
    })?;

    serde_json::from_str(&trimmed[start..end])
        .map_err(|e| OperatorFailure::Malformed(e.to_string()))
}

/// Valide une réponse brute contre la forme `T`.
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> OperatorResult<T> {
    let value = extract_json(raw)?;
    let parsed: T = serde_json::from_value(value)
        .map_err(|e| OperatorFailure::Malformed(format!("{} : {}", T::name(), e)))?;

    for (field, text) in parsed.required_text() {
        if text.trim().is_empty() {
            return Err(OperatorFailure::Invalid(format!(
                "{} : champ '{}' vide",
                T::name(),
                field
            )));
        }
    }
    Ok(parsed)
}

/// Point d'entrée unique des opérateurs : requête + validation.
pub async fn call_structured<T: StructuredOutput>(
    llm: &dyn LlmService,
    system: &str,
    user: &str,
    temperature: f32,
) -> OperatorResult<T> {
    let schema = T::schema();
    let request = LlmRequest {
        system: format!("{}\n\n{}", system, prompts::schema_instruction(&schema)),
        user: user.to_string(),
        schema,
        temperature,
    };

    let raw = llm.complete(&request).await?;
    let result = parse_structured::<T>(&raw);
    if let Err(e) = &result {
        debug!(output = T::name(), "Sortie LLM rejetée : {}", e);
    }
    result
}
