// FICHIER : engine/src/utils/json.rs

use crate::utils::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

const SNIPPET_LEN: usize = 100;

/// Parse une chaîne JSON en un type T.
/// En cas d'échec, l'erreur embarque un extrait du contenu.
pub fn parse<T: DeserializeOwned>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| {
        AppError::System(anyhow::anyhow!(
            "JSON invalide ({}) près de : {}",
            e,
            snippet(s)
        ))
    })
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

/// Tronque proprement (frontière de caractère) pour les messages d'erreur.
pub fn snippet(s: &str) -> &str {
    match s.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Gene {
        role: String,
        topic: String,
    }

    #[test]
    fn test_parse_success() {
        let raw = r#"{"role": "poet", "topic": "the sea"}"#;
        let gene: Gene = parse(raw).unwrap();
        assert_eq!(gene.role, "poet");
    }

    #[test]
    fn test_parse_error_carries_snippet() {
        let bad_raw = r#"{"role": 42}"#;
        let err = parse::<Gene>(bad_raw).unwrap_err();
        assert!(err.to_string().contains(r#"{"role": 42}"#));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(snippet(&long).chars().count(), SNIPPET_LEN);
        assert_eq!(snippet("court"), "court");
    }

    #[test]
    fn test_stringify_pretty() {
        let v = json!({ "a": 1 });
        assert!(stringify_pretty(&v).unwrap().contains('\n'));
    }
}
