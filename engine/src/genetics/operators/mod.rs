// FICHIER : engine/src/genetics/operators/mod.rs

//! Opérateurs génétiques sémantiques : chacun enveloppe un appel au service LLM
//! et renvoie un `OperatorResult`, sans jamais propager d'erreur fatale.

pub mod crossover;
pub mod generation;
pub mod mutation;
pub mod selection;
pub mod synthesis;

pub use crossover::semantic_crossover;
pub use generation::generate_data;
pub use mutation::{semantic_mutation, MutationMode, MutationTarget};
pub use selection::tournament_select;
pub use synthesis::{infer_role, regenerate_prompt, synthesize_topic_and_prompt};

use serde_json::{json, Map, Value};

/// Schéma JSON d'un objet dont tous les champs sont des chaînes requises.
pub(crate) fn string_object_schema(fields: &[(&str, &str)]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({ "type": "string", "description": description }),
            )
        })
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_object_schema() {
        let schema = string_object_schema(&[("topic", "a theme"), ("prompt", "an instruction")]);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["topic"]["type"], "string");
        assert_eq!(schema["required"], json!(["topic", "prompt"]));
    }
}
