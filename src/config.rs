// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AiError;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "SMARTSPEND_AI_MODEL";
pub const BASE_URL_ENV: &str = "SMARTSPEND_AI_BASE_URL";
pub const TIMEOUT_ENV: &str = "SMARTSPEND_AI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the hosted generative-AI endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let api_key = get(API_KEY_ENV)
            .or_else(|| get(API_KEY_FALLBACK_ENV))
            .ok_or(AiError::MissingApiKey(API_KEY_ENV))?;
        let mut cfg = Self::new(api_key);
        if let Some(model) = get(MODEL_ENV) {
            cfg.model = model;
        }
        if let Some(url) = get(BASE_URL_ENV) {
            cfg.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get(TIMEOUT_ENV) {
            match secs.parse::<u64>() {
                Ok(n) if n > 0 => cfg.timeout = Duration::from_secs(n),
                _ => tracing::warn!(value = %secs, "ignoring invalid {}", TIMEOUT_ENV),
            }
        }
        Ok(cfg)
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
