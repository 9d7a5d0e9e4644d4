// FICHIER : engine/src/ai/nlp/embeddings.rs

use crate::utils::prelude::*;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

/// Modèles d'embedding acceptés par la configuration.
pub fn resolve_model(name: &str) -> Result<EmbeddingModel> {
    match name.trim().to_lowercase().as_str() {
        "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        "all-minilm-l6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        other => Err(AppError::Config(format!(
            "Modèle d'embedding inconnu : {}",
            other
        ))),
    }
}

/// Moteur ONNX local (fastembed). Le modèle est téléchargé au premier usage.
pub struct EmbeddingEngine {
    model: TextEmbedding,
}

impl EmbeddingEngine {
    pub fn new(model_name: &str) -> Result<Self> {
        let options =
            InitOptions::new(resolve_model(model_name)?).with_show_download_progress(true);

        let model = TextEmbedding::try_new(options).map_err(|e| {
            AppError::Ai(format!("Initialisation fastembed ({}) : {}", model_name, e))
        })?;
        info!("Moteur d'embedding prêt : {}", model_name);
        Ok(Self { model })
    }

    pub fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let batch_size = texts.len();
        if batch_size == 0 {
            return Ok(Vec::new());
        }

        let embeddings = self
            .model
            .embed(texts, None)
            .map_err(|e| AppError::Ai(format!("Embedding d'un lot de {} textes : {}", batch_size, e)))?;

        if embeddings.len() != batch_size {
            return Err(AppError::Ai(format!(
                "Le modèle a produit {} vecteurs pour {} textes",
                embeddings.len(),
                batch_size
            )));
        }
        Ok(embeddings)
    }
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        assert!(matches!(
            resolve_model("BGE-small-en-v1.5"),
            Ok(EmbeddingModel::BGESmallENV15)
        ));
        assert!(matches!(
            resolve_model("all-minilm-l6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(resolve_model("gpt-9"), Err(AppError::Config(_))));
    }

    #[test]
    #[ignore = "télécharge le modèle ONNX"]
    fn test_fast_embed_batch() {
        let mut engine = EmbeddingEngine::new("bge-small-en-v1.5").expect("Init failed");
        let batch = engine
            .embed_batch(vec!["cat".to_string(), "dog".to_string()])
            .expect("Batch failed");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].len(), 384);
    }
}
