// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod gateway;
pub mod gemini;
pub mod wire;

pub use gateway::{AiGateway, ChatReply, ReceiptImage, ToolCall, fallback_insights};
pub use gemini::GeminiClient;

use crate::error::AiError;
use wire::{GenerateContentRequest, GenerateContentResponse};

/// One-shot access to a hosted generative model.
pub trait GenerativeModel {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError>;
}

impl<T: GenerativeModel + ?Sized> GenerativeModel for &T {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        (**self).generate_content(request)
    }
}
