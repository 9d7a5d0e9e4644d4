// FICHIER : engine/src/utils/logger.rs

use std::path::Path;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

pub const LOG_FILE_NAME: &str = "evolution.log";

/// Initialise le logging global.
/// Console compacte sur stderr (stdout reste réservé aux résultats du CLI),
/// et, si un dossier est fourni, un journal JSON dans `<dir>/evolution.log`.
pub fn init_logging(log_dir: Option<&Path>) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : FICHIER JSON (optionnel, dossier d'expérience)
        // =========================================================================
        let file_layer = log_dir.and_then(|dir| {
            std::fs::create_dir_all(dir).ok()?;
            let file_appender = rolling::never(dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        });

        // =========================================================================
        // LAYER 2 : CONSOLE (Pour l'Humain)
        // =========================================================================
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // Les macros user_* affichent déjà le message : pas de doublon console
        let anti_double_filter = filter_fn(|metadata| {
            !metadata.fields().iter().any(|f| f.name() == "event")
        });

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .with_filter(anti_double_filter);

        // =========================================================================
        // ASSEMBLAGE ET INITIALISATION
        // =========================================================================
        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        if registry.try_init().is_err() {
            tracing::warn!("[Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        match log_dir {
            Some(dir) => tracing::debug!("Logger initialisé. Journal JSON : {:?}", dir.join(LOG_FILE_NAME)),
            None => tracing::debug!("Logger initialisé (console uniquement)."),
        }
    });
}
