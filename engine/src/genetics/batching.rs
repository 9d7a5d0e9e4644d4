// FICHIER : engine/src/genetics/batching.rs

use crate::utils::prelude::*;
use futures::future::join_all;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Limites d'une boucle "lancer des lots jusqu'au quota".
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub batch_size: usize,
    /// Lots consécutifs sans aucun succès tolérés avant abandon.
    pub max_empty_batches: usize,
}

/// Lance des lots de tentatives (au plus `batch_size` en vol, join-all) jusqu'à
/// obtenir exactement `target` résultats. Une tentative qui échoue ou panique
/// ne produit rien ; l'ordre des résultats est celui des lots et des tentatives.
pub async fn run_until_quota<T, F, Fut>(
    target: usize,
    limits: BatchLimits,
    label: &str,
    mut next_attempt: F,
) -> Result<Vec<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let batch_size = limits.batch_size.max(1);
    let mut collected: Vec<T> = Vec::with_capacity(target);
    let mut empty_batches = 0usize;

    while collected.len() < target {
        let size = (target - collected.len()).min(batch_size);
        debug!(
            "{} : lot de {} tentatives ({}/{})",
            label,
            size,
            collected.len(),
            target
        );

        let attempts: Vec<_> = (0..size)
            .map(|_| AssertUnwindSafe(next_attempt()).catch_unwind())
            .collect();

        let mut successes = 0usize;
        for outcome in join_all(attempts).await {
            match outcome {
                Ok(Some(item)) => {
                    collected.push(item);
                    successes += 1;
                }
                Ok(None) => {}
                Err(_) => warn!("{} : une tentative a paniqué, ignorée", label),
            }
        }

        if successes == 0 {
            empty_batches += 1;
            warn!(
                "{} : lot sans succès ({}/{})",
                label, empty_batches, limits.max_empty_batches
            );
            if empty_batches >= limits.max_empty_batches {
                return Err(AppError::Ai(format!(
                    "{} : {} lots consécutifs sans succès, service LLM indisponible ?",
                    label, empty_batches
                )));
            }
        } else {
            empty_batches = 0;
        }
    }

    Ok(collected)
}
