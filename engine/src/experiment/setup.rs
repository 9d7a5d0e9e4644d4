// FICHIER : engine/src/experiment/setup.rs

use super::corpus::{self, DEFAULT_CORPUS, FALLBACK_CORPUS};
use crate::utils::core::Local;
use crate::utils::fs::{self, Path, PathBuf};
use crate::utils::prelude::*;
use rand::Rng;

pub const REFERENCE_FILE: &str = "reference_text.txt";
pub const RUN_DIR_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Origine du texte de référence d'une exécution.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSource {
    /// Fichier explicite, lu entièrement puis rogné.
    File(PathBuf),
    /// Ligne tirée au hasard ; `fallback` sert si `path` n'existe pas.
    Corpus {
        path: PathBuf,
        fallback: Option<PathBuf>,
    },
}

impl Default for ReferenceSource {
    fn default() -> Self {
        Self::Corpus {
            path: PathBuf::from(DEFAULT_CORPUS),
            fallback: Some(PathBuf::from(FALLBACK_CORPUS)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperimentSetup {
    pub output_dir: PathBuf,
    pub reference_text: String,
    /// Corpus de repli effectivement lu, le cas échéant. Signalé par
    /// `run_experiment`, une fois le journal de l'exécution ouvert.
    pub corpus_fallback: Option<PathBuf>,
}

/// Nom horodaté du répertoire d'une exécution.
pub fn run_dir_name() -> String {
    Local::now().format(RUN_DIR_FORMAT).to_string()
}

/// Texte de référence, et corpus de repli s'il a servi.
async fn load_reference<R: Rng + ?Sized>(
    source: &ReferenceSource,
    rng: &mut R,
) -> Result<(String, Option<PathBuf>)> {
    match source {
        ReferenceSource::File(path) => {
            let text = fs::read_to_string(path).await?;
            let text = text.trim();
            if text.is_empty() {
                return Err(AppError::Corpus(format!("{} est vide", path.display())));
            }
            Ok((text.to_string(), None))
        }
        ReferenceSource::Corpus { path, fallback } => {
            let primary_exists = fs::exists(path).await;
            match fallback {
                Some(fb) if !primary_exists => {
                    debug!("Corpus {} absent, repli sur {}", path.display(), fb.display());
                    let text = corpus::load_random_reference(fb, rng).await?;
                    Ok((text, Some(fb.clone())))
                }
                _ => Ok((corpus::load_random_reference(path, rng).await?, None)),
            }
        }
    }
}

/// Crée `<base_dir>/<horodatage>/` (suffixé `_1`, `_2`... si déjà pris),
/// charge la référence et l'y recopie.
#[instrument(skip(rng))]
pub async fn setup_experiment<R: Rng + ?Sized>(
    base_dir: &Path,
    source: &ReferenceSource,
    rng: &mut R,
) -> Result<ExperimentSetup> {
    let (reference_text, corpus_fallback) = load_reference(source, rng).await?;

    let output_dir = fs::create_unique_dir(base_dir, &run_dir_name()).await?;
    fs::write_atomic(&output_dir.join(REFERENCE_FILE), reference_text.as_bytes()).await?;

    info!("Répertoire d'exécution : {}", output_dir.display());
    Ok(ExperimentSetup {
        output_dir,
        reference_text,
        corpus_fallback,
    })
}
