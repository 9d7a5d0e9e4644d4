// FICHIER : engine/src/utils/net.rs

use crate::utils::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Client HTTP partagé par un service (pool de connexions réutilisé).
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("evoprompt/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AppError::Network)
}

/// POST JSON avec retry et backoff exponentiel.
/// Les erreurs client (4xx hors 429) sont fatales immédiatement.
#[instrument(skip(client, body), fields(url = %url))]
pub async fn post_json_with_retry<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: &T,
    max_retries: u32,
) -> Result<R> {
    let max_retries = max_retries.max(1);
    let mut attempt = 0;
    let mut delay = Duration::from_millis(500);

    loop {
        attempt += 1;
        debug!("Requête POST {}/{} vers {}", attempt, max_retries, url);

        match client.post(url).json(body).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response.json::<R>().await.map_err(AppError::Network);
                }

                warn!("Erreur HTTP {} sur {} (Tentative {})", status, url, attempt);

                if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
                    let text = response.text().await.unwrap_or_default();
                    return Err(AppError::Ai(format!("HTTP {} : {}", status, text)));
                }
            }
            Err(e) => {
                warn!(
                    "Échec de connexion (Tentative {}/{}): {}",
                    attempt, max_retries, e
                );
                if attempt >= max_retries {
                    return Err(AppError::Network(e));
                }
            }
        }

        if attempt >= max_retries {
            return Err(AppError::Ai(format!(
                "Le service ne répond pas après {} tentatives : {}",
                max_retries, url
            )));
        }

        tokio::time::sleep(delay).await;
        delay = std::cmp::min(delay * 2, MAX_BACKOFF);
    }
}
