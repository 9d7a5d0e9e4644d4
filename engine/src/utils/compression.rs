// FICHIER : engine/src/utils/compression.rs

use crate::utils::error::{AppError, Result};
use std::io::Write;

/// Niveau zstd utilisé pour les mesures de compressibilité.
pub const COMPRESSION_LEVEL: i32 = 3;

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = zstd::Encoder::new(Vec::new(), COMPRESSION_LEVEL).map_err(AppError::Io)?;
    encoder.write_all(data).map_err(AppError::Io)?;
    let res = encoder.finish().map_err(AppError::Io)?;
    Ok(res)
}
