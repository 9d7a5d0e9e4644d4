// FICHIER : engine/src/ai/llm/client.rs

use super::service::{LlmRequest, LlmService, OperatorFailure, OperatorResult};
use crate::utils::config::LlmConfig;
use crate::utils::prelude::*;
use crate::utils::{async_trait, net, Duration};
use reqwest::Client;

/// Client du point `/api/chat` d'un serveur compatible Ollama.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    endpoint: String,
    model: String,
    max_retries: u32,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.model.trim().is_empty() {
            return Err(AppError::Config("Aucun modèle LLM configuré".into()));
        }
        let http = net::build_client(Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/chat", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_body(&self, request: &LlmRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "format": request.schema,
            "options": { "temperature": request.temperature },
            "stream": false
        })
    }
}

/// Le contenu du message est normalement une chaîne JSON,
/// certains serveurs renvoient directement l'objet.
pub fn message_content(response: &Value) -> OperatorResult<String> {
    match response.pointer("/message/content") {
        Some(Value::String(s)) if s.trim().is_empty() => Err(OperatorFailure::EmptyResponse),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(obj @ Value::Object(_)) => Ok(obj.to_string()),
        Some(Value::Null) | None => Err(OperatorFailure::EmptyResponse),
        Some(other) => Err(OperatorFailure::Malformed(format!(
            "contenu inattendu : {}",
            other
        ))),
    }
}

#[async_trait]
impl LlmService for LlmClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &LlmRequest) -> OperatorResult<String> {
        let body = self.build_body(request);
        let response: Value =
            net::post_json_with_retry(&self.http, &self.endpoint, &body, self.max_retries)
                .await
                .map_err(|e| {
                    warn!("Appel LLM échoué : {}", e);
                    OperatorFailure::Transport(e.to_string())
                })?;
        message_content(&response)
    }
}
