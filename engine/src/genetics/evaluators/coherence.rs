// FICHIER : engine/src/genetics/evaluators/coherence.rs

use crate::ai::nlp::EmbeddingEngine;
use crate::genetics::traits::SimilarityScorer;
use crate::utils::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// Score de cohérence façon BERTScore : appariement glouton des mots du candidat
/// et de la référence par similarité cosinus de leurs embeddings, puis F1.
pub struct EmbeddingF1Scorer {
    engine: Mutex<EmbeddingEngine>,
}

impl EmbeddingF1Scorer {
    pub fn new(engine: EmbeddingEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    pub fn from_model(model_name: &str) -> Result<Self> {
        Ok(Self::new(EmbeddingEngine::new(model_name)?))
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// F1 de l'appariement glouton entre deux séquences de vecteurs.
pub fn greedy_f1(candidate: &[&[f32]], reference: &[&[f32]]) -> f64 {
    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }
    fn best_match(from: &[&[f32]], to: &[&[f32]]) -> f64 {
        from.iter()
            .map(|a| {
                to.iter()
                    .map(|b| cosine(a, b))
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .sum::<f64>()
            / from.len() as f64
    }

    let precision = best_match(candidate, reference);
    let recall = best_match(reference, candidate);
    if precision + recall <= 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

impl SimilarityScorer for EmbeddingF1Scorer {
    fn score_batch(&self, candidates: &[String], reference: &str) -> Result<Vec<f64>> {
        let reference_tokens = tokenize(reference);
        let candidate_tokens: Vec<Vec<String>> = candidates.iter().map(|c| tokenize(c)).collect();

        // Vocabulaire unique : un seul appel au modèle pour tout le lot
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut texts: Vec<String> = Vec::new();
        for token in reference_tokens.iter().chain(candidate_tokens.iter().flatten()) {
            if !vocabulary.contains_key(token) {
                vocabulary.insert(token.clone(), texts.len());
                texts.push(token.clone());
            }
        }

        let vectors = {
            let mut engine = self
                .engine
                .lock()
                .map_err(|_| AppError::Ai("Moteur d'embedding empoisonné".into()))?;
            engine.embed_batch(texts)?
        };

        let lookup = |tokens: &[String]| -> Vec<&[f32]> {
            tokens
                .iter()
                .filter_map(|t| vocabulary.get(t))
                .map(|&idx| vectors[idx].as_slice())
                .collect()
        };

        let reference_vectors = lookup(&reference_tokens);
        let scores = candidate_tokens
            .iter()
            .map(|tokens| greedy_f1(&lookup(tokens), &reference_vectors))
            .collect();

        debug!("Cohérence calculée pour {} candidats", candidates.len());
        Ok(scores)
    }
}

/// Scoreurs déterministes pour les tests (sans modèle ONNX).
pub mod test_mocks {
    use super::*;

    /// Renvoie toujours la même valeur.
    pub struct FixedScorer(pub f64);

    impl SimilarityScorer for FixedScorer {
        fn score_batch(&self, candidates: &[String], _reference: &str) -> Result<Vec<f64>> {
            Ok(vec![self.0; candidates.len()])
        }
    }

    /// Score = part des mots de la référence présents dans le candidat.
    pub struct OverlapScorer;

    impl SimilarityScorer for OverlapScorer {
        fn score_batch(&self, candidates: &[String], reference: &str) -> Result<Vec<f64>> {
            let reference_tokens = tokenize(reference);
            Ok(candidates
                .iter()
                .map(|c| {
                    if reference_tokens.is_empty() {
                        return 0.0;
                    }
                    let tokens = tokenize(c);
                    let hits = reference_tokens
                        .iter()
                        .filter(|t| tokens.contains(t))
                        .count();
                    hits as f64 / reference_tokens.len() as f64
                })
                .collect())
        }
    }

    /// Échoue systématiquement.
    pub struct FailingScorer;

    impl SimilarityScorer for FailingScorer {
        fn score_batch(&self, _candidates: &[String], _reference: &str) -> Result<Vec<f64>> {
            Err(AppError::Ai("scoreur indisponible".into()))
        }
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::test_mocks::*;
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Don't PANIC, it's fine!"),
            vec!["don't", "panic", "it's", "fine"]
        );
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_cosine() {
        assert!((cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_greedy_f1_identical_and_disjoint() {
        let a: &[f32] = &[1.0, 0.0];
        let b: &[f32] = &[0.0, 1.0];
        assert!((greedy_f1(&[a, b], &[b, a]) - 1.0).abs() < 1e-12);
        assert_eq!(greedy_f1(&[a], &[b]), 0.0);
        assert_eq!(greedy_f1(&[], &[a]), 0.0);
    }

    #[test]
    fn test_greedy_f1_partial_match() {
        let a: &[f32] = &[1.0, 0.0];
        let b: &[f32] = &[0.0, 1.0];
        // précision 1.0 (a trouve a), rappel 0.5 (b sans équivalent)
        let f1 = greedy_f1(&[a], &[a, b]);
        assert!((f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mock_scorers() {
        let cands = vec!["the cat".to_string(), "a dog".to_string()];
        assert_eq!(FixedScorer(0.3).score_batch(&cands, "x").unwrap(), vec![0.3, 0.3]);
        assert_eq!(
            OverlapScorer.score_batch(&cands, "the cat sat").unwrap(),
            vec![2.0 / 3.0, 0.0]
        );
        assert!(FailingScorer.score_batch(&cands, "x").is_err());
    }
}
