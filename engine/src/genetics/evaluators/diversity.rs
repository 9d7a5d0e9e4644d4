// FICHIER : engine/src/genetics/evaluators/diversity.rs

//! Signaux de redondance d'un texte : compressibilité et répétition de n-grams.

use crate::utils::compression;
use std::collections::HashSet;

pub const DEFAULT_NGRAM_MIN: usize = 4;
pub const DEFAULT_NGRAM_MAX: usize = 6;

/// Taille brute / taille compressée (zstd). Plus c'est haut, plus le texte est redondant.
/// Jamais d'erreur : 1.0 pour un texte vide ou un échec du compresseur.
pub fn compression_ratio(text: &str) -> f64 {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return 1.0;
    }
    match compression::compress(bytes) {
        Ok(compressed) if !compressed.is_empty() => bytes.len() as f64 / compressed.len() as f64,
        _ => 1.0,
    }
}

/// Taux de n-grams répétés : (total - uniques) / total, pour n dans `n_min..=n_max`,
/// sur les mots en minuscules. 0.0 quand aucun n-gram n'existe.
pub fn internal_repetition(text: &str, n_min: usize, n_max: usize) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut total = 0usize;
    let mut unique: HashSet<&[&str]> = HashSet::new();

    for n in n_min.max(1)..=n_max {
        if words.len() < n {
            continue;
        }
        for gram in words.windows(n) {
            total += 1;
            unique.insert(gram);
        }
    }

    if total == 0 {
        return 0.0;
    }
    (total - unique.len()) as f64 / total as f64
}

pub fn internal_repetition_default(text: &str) -> f64 {
    internal_repetition(text, DEFAULT_NGRAM_MIN, DEFAULT_NGRAM_MAX)
}
