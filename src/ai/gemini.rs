// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::GenerativeModel;
use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::config::AiConfig;
use crate::error::AiError;
use crate::utils::http_client;

/// Blocking client for the hosted Gemini REST API.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = http_client(config.timeout)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, AiError> {
        Self::new(AiConfig::from_env()?)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        tracing::debug!(model = %self.config.model, "sending generateContent request");
        let resp = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "AI provider rejected request");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body: GenerateContentResponse = resp.json()?;
        tracing::debug!(candidates = body.candidates.len(), "received generateContent response");
        Ok(body)
    }
}
