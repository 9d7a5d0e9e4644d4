use crate::utils::{AppError, Result};
use std::env;
use std::str::FromStr;

/// Récupère une variable d'environnement (Optionnel).
/// Renvoie `None` si la clé est manquante ou vide.
pub fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Récupère et parse une variable optionnelle (ex: EVO_SEED=42).
/// Absente -> `Ok(None)`, présente mais illisible -> erreur de configuration.
pub fn get_parsed<T: FromStr>(key: &str) -> Result<Option<T>> {
    match get_optional(key) {
        None => Ok(None),
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Impossible de parser la variable : {}", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_parsed_roundtrip() {
        env::set_var("EVO_TEST_PARSED", "42");
        assert_eq!(get_parsed::<u64>("EVO_TEST_PARSED").unwrap(), Some(42));

        env::set_var("EVO_TEST_PARSED", "quarante-deux");
        assert!(get_parsed::<u64>("EVO_TEST_PARSED").is_err());

        env::remove_var("EVO_TEST_PARSED");
        assert_eq!(get_parsed::<u64>("EVO_TEST_PARSED").unwrap(), None);
    }

    #[test]
    #[serial]
    fn test_blank_value_is_absent() {
        env::set_var("EVO_TEST_BLANK", "   ");
        assert!(get_optional("EVO_TEST_BLANK").is_none());
        env::remove_var("EVO_TEST_BLANK");
    }
}
