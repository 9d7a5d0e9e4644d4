// FICHIER : engine/src/utils/fs.rs

use crate::utils::error::{AppError, Result};
use crate::utils::json;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

/// Écrit via un fichier temporaire puis `rename` : un lecteur ne voit jamais
/// de fichier à moitié écrit.
#[instrument(skip(content), fields(path = ?path))]
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(content).await?;
    file.flush().await.ok();
    file.sync_all().await.ok();

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(AppError::Io(e));
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = json::stringify_pretty(data)?;
    write_atomic(path, content.as_bytes()).await
}

/// Ajoute à la fin d'un fichier (créé au besoin).
pub async fn append(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(content).await?;
    file.flush().await?;
    Ok(())
}

pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

pub async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || exists(path).await {
        return Ok(());
    }
    fs::create_dir_all(path).await?;
    Ok(())
}

/// Crée `<parent>/<name>` en exclusivité ; si le dossier existe déjà,
/// essaie `<name>_1`, `<name>_2`... Deux appelants n'obtiennent jamais le même dossier.
pub async fn create_unique_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    ensure_dir(parent).await?;
    let mut suffix = 0usize;
    loop {
        let candidate = match suffix {
            0 => parent.join(name),
            n => parent.join(format!("{}_{}", name, n)),
        };
        match fs::create_dir(&candidate).await {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(AppError::Io(e)),
        }
    }
}

pub async fn read_to_string(path: &Path) -> Result<String> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "{}",
            path.display()
        ))),
        Err(e) => Err(AppError::Io(e)),
    }
}
