// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::GenerativeModel;
use super::wire::{
    Content, FunctionCall, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, Tool,
};
use crate::error::AiError;
use crate::models::{
    AIInsight, InsightImpact, InsightKind, Transaction, TransactionDraft, TransactionType,
};
use crate::registry::{FALLBACK_CATEGORY, find_category};
use base64::Engine as _;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;

pub const INSIGHT_HISTORY_LIMIT: usize = 50;
pub const MAX_INSIGHTS: usize = 3;
pub const CHAT_CONTEXT_LIMIT: usize = 20;
pub const RECEIPT_MAX_BYTES: u64 = 10 * 1024 * 1024;

pub const TOOL_ADD_TRANSACTION: &str = "addTransaction";
pub const TOOL_SET_BUDGET: &str = "setBudget";

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").expect("valid regex"));

/// An action the assistant asks the caller to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    AddTransaction(TransactionDraft),
    SetBudget { category: String, limit: Decimal },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Text(String),
    Tool(ToolCall),
}

/// Receipt picture (or PDF) ready to be sent inline.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ReceiptImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AiError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "pdf" => "application/pdf",
            _ => return Err(AiError::UnsupportedReceipt(path.display().to_string())),
        };
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > RECEIPT_MAX_BYTES {
            return Err(AiError::UnsupportedReceipt(format!(
                "{} is larger than {} bytes",
                path.display(),
                RECEIPT_MAX_BYTES
            )));
        }
        Ok(Self::new(mime_type, std::fs::read(path)?))
    }

    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Shape the model is asked to fill in for a transaction.
#[derive(Debug, Deserialize)]
struct RawDraft {
    amount: Decimal,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<TransactionType>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    category: String,
    limit: Decimal,
}

/// Turns free text, receipts and questions into typed results. The gateway
/// never touches application state.
pub struct AiGateway<M> {
    model: M,
}

impl<M: GenerativeModel> AiGateway<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn parse_transaction(
        &self,
        text: &str,
        categories: &[String],
        today: NaiveDate,
    ) -> Result<TransactionDraft, AiError> {
        let prompt = format!(
            "Extract a single financial transaction from this note: \"{}\".\n\
             Today is {}. Use one of these categories: {}.\n\
             Amounts are positive numbers; use type \"income\" for money received and \
             \"expense\" for money spent. Dates are YYYY-MM-DD.",
            text.trim(),
            today,
            categories.join(", ")
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: Some(GenerationConfig::json(draft_schema(true))),
            ..Default::default()
        };
        let response = self.model.generate_content(&request)?;
        let raw: RawDraft = decode_json(&response)?;
        into_draft(raw, categories, today, None)
    }

    pub fn parse_receipt(
        &self,
        receipt: &ReceiptImage,
        categories: &[String],
        today: NaiveDate,
    ) -> Result<TransactionDraft, AiError> {
        let prompt = format!(
            "Read this receipt and report the total paid, the merchant as description, \
             the purchase date (YYYY-MM-DD, today is {}) and the best matching category \
             from: {}.",
            today,
            categories.join(", ")
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(receipt.mime_type.clone(), receipt.base64()),
                Part::text(prompt),
            ])],
            generation_config: Some(GenerationConfig::json(draft_schema(false))),
            ..Default::default()
        };
        let response = self.model.generate_content(&request)?;
        let raw: RawDraft = decode_json(&response)?;
        into_draft(raw, categories, today, Some(TransactionType::Expense))
    }

    /// Answers a question, or hands back a tool call for the caller to run.
    pub fn ask(
        &self,
        question: &str,
        transactions: &[Transaction],
        categories: &[String],
        today: NaiveDate,
    ) -> Result<ChatReply, AiError> {
        let context: Vec<Value> = most_recent(transactions, CHAT_CONTEXT_LIMIT)
            .into_iter()
            .map(|t| {
                json!({
                    "date": t.date.to_string(),
                    "amount": t.amount,
                    "category": t.category,
                    "description": t.description,
                    "type": t.kind,
                })
            })
            .collect();
        let system = format!(
            "You are a personal finance coach. Today is {}. Available categories: {}.\n\
             Recent transactions: {}\n\
             Answer briefly. When the user asks to record a transaction or set a budget, \
             call the matching function instead of answering.",
            today,
            categories.join(", "),
            Value::Array(context)
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(question.trim())])],
            system_instruction: Some(Content::system(system)),
            tools: vec![chat_tools()],
            ..Default::default()
        };
        let response = self.model.generate_content(&request)?;
        if let Some(call) = response.function_call() {
            return Ok(ChatReply::Tool(decode_tool_call(call, categories, today)?));
        }
        response
            .text()
            .map(ChatReply::Text)
            .ok_or_else(|| AiError::ParseFailure("empty response".into()))
    }

    /// Up to three insights over the latest transactions. Never fails; a
    /// generic hint stands in when the model cannot be used.
    pub fn insights(&self, transactions: &[Transaction]) -> Vec<AIInsight> {
        if transactions.is_empty() {
            return Vec::new();
        }
        match self.try_insights(transactions) {
            Ok(insights) => insights,
            Err(e) => {
                tracing::warn!(error = %e, "insight generation failed, using fallback");
                fallback_insights()
            }
        }
    }

    fn try_insights(&self, transactions: &[Transaction]) -> Result<Vec<AIInsight>, AiError> {
        let summary: Vec<Value> = most_recent(transactions, INSIGHT_HISTORY_LIMIT)
            .into_iter()
            .map(|t| {
                json!({
                    "date": t.date.to_string(),
                    "amount": t.amount,
                    "category": t.category,
                    "type": t.kind,
                })
            })
            .collect();
        let prompt = format!(
            "Analyze these recent transactions and provide {} actionable financial insights. \
             Focus on trends, overspending, and potential savings.\nTransactions: {}",
            MAX_INSIGHTS,
            Value::Array(summary)
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: Some(GenerationConfig::json(insight_schema())),
            ..Default::default()
        };
        let response = self.model.generate_content(&request)?;
        let mut insights: Vec<AIInsight> = decode_json(&response)?;
        insights.truncate(MAX_INSIGHTS);
        Ok(insights)
    }
}

pub fn fallback_insights() -> Vec<AIInsight> {
    vec![AIInsight {
        title: "Data Analysis".into(),
        description: "Keep recording more transactions to see automated insights here.".into(),
        impact: InsightImpact::Medium,
        kind: InsightKind::Trend,
    }]
}

/// Latest first by date; equal dates keep collection order.
fn most_recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => text.trim(),
    }
}

fn decode_json<T: for<'de> Deserialize<'de>>(response: &GenerateContentResponse) -> Result<T, AiError> {
    let text = response
        .text()
        .ok_or_else(|| AiError::ParseFailure("empty response".into()))?;
    serde_json::from_str(strip_code_fence(&text)).map_err(|e| AiError::ParseFailure(e.to_string()))
}

/// Maps the model's category onto the user's list. Unknown names go to
/// `Other`, or to the first category when `Other` was removed.
fn canonical_category(categories: &[String], proposed: Option<&str>) -> Result<String, AiError> {
    proposed
        .and_then(|p| find_category(categories, p))
        .or_else(|| find_category(categories, FALLBACK_CATEGORY))
        .or_else(|| categories.first().map(String::as_str))
        .map(str::to_string)
        .ok_or_else(|| AiError::ParseFailure("no categories to choose from".into()))
}

fn into_draft(
    raw: RawDraft,
    categories: &[String],
    today: NaiveDate,
    forced_kind: Option<TransactionType>,
) -> Result<TransactionDraft, AiError> {
    let kind = forced_kind
        .or(raw.kind)
        .ok_or_else(|| AiError::ParseFailure("missing transaction type".into()))?;
    let date = match raw.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => today,
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| AiError::ParseFailure(format!("invalid date '{}'", d)))?,
    };
    let category = canonical_category(categories, raw.category.as_deref())?;
    let description = raw
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| category.clone());
    Ok(TransactionDraft {
        date,
        amount: raw.amount.abs(),
        category,
        description,
        kind,
        is_recurring: false,
    })
}

fn decode_tool_call(
    call: &FunctionCall,
    categories: &[String],
    today: NaiveDate,
) -> Result<ToolCall, AiError> {
    let bad_args = |e: serde_json::Error| {
        AiError::ParseFailure(format!("invalid arguments for {}: {}", call.name, e))
    };
    match call.name.as_str() {
        TOOL_ADD_TRANSACTION => {
            let raw: RawDraft = serde_json::from_value(call.args.clone()).map_err(bad_args)?;
            Ok(ToolCall::AddTransaction(into_draft(raw, categories, today, None)?))
        }
        TOOL_SET_BUDGET => {
            let raw: RawBudget = serde_json::from_value(call.args.clone()).map_err(bad_args)?;
            let category = find_category(categories, &raw.category)
                .map(str::to_string)
                .unwrap_or(raw.category);
            Ok(ToolCall::SetBudget {
                category,
                limit: raw.limit.abs(),
            })
        }
        other => Err(AiError::ParseFailure(format!("unknown function '{}'", other))),
    }
}

fn draft_schema(with_type: bool) -> Value {
    let mut properties = json!({
        "amount": { "type": "NUMBER" },
        "category": { "type": "STRING" },
        "description": { "type": "STRING" },
        "date": { "type": "STRING", "description": "YYYY-MM-DD" },
    });
    let mut required = vec!["amount", "category", "description", "date"];
    if with_type {
        properties["type"] = json!({ "type": "STRING", "enum": ["expense", "income"] });
        required.push("type");
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn insight_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "impact": { "type": "STRING", "enum": ["high", "medium", "low"] },
                "type": { "type": "STRING", "enum": ["saving", "trend", "alert"] },
            },
            "required": ["title", "description", "impact", "type"],
        }
    })
}

fn chat_tools() -> Tool {
    Tool {
        function_declarations: vec![
            FunctionDeclaration {
                name: TOOL_ADD_TRANSACTION.into(),
                description: "Record a new income or expense transaction.".into(),
                parameters: draft_schema(true),
            },
            FunctionDeclaration {
                name: TOOL_SET_BUDGET.into(),
                description: "Set the monthly spending limit for a category.".into(),
                parameters: json!({
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "limit": { "type": "NUMBER" },
                    },
                    "required": ["category", "limit"],
                }),
            },
        ],
    }
}

