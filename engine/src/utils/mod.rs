// FICHIER : engine/src/utils/mod.rs

// =========================================================================
//  Foundation Layer : erreurs, configuration, I/O, réseau, logs
// =========================================================================

pub mod compression;
pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;
pub mod macros;
pub mod net;

// --- FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result};
    pub use chrono::Local;
}

/// **Physical Layer (I/O)** : Accès disque atomique.
pub mod io {
    pub use super::compression::compress;
    pub use super::fs::{
        append, create_unique_dir, ensure_dir, exists, read_to_string, write_atomic,
        write_json_atomic, Path, PathBuf,
    };
}

/// **Application Context** : Config, logs, environnement.
pub mod context {
    pub use super::config::{
        AppConfig, EvolutionConfig, FitnessConfig, LlmConfig, OperatorTemperatures, ScorerConfig,
    };
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::core::{AppError, Result};
    pub use super::json::{json, Value};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
}

// --- EXPORTS DIRECTS ---
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;

pub use async_trait::async_trait;
pub use std::sync::Arc;
pub use std::time::{Duration, Instant};
