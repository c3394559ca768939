use serde::{Deserialize, Serialize};

/// One AI decision record from `/api/trading/chats`. Immutable once
/// fetched; the store replaces the whole list on every successful poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    #[serde(default)]
    pub model: String,
    /// Opaque structured decision payload; the backend stores raw JSON and
    /// falls back to `{"content": ...}` when it cannot parse its own row.
    #[serde(rename = "chat", default)]
    pub decision: serde_json::Value,
    #[serde(default)]
    pub reasoning: String,
    #[serde(rename = "user_prompt", default)]
    pub prompt: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
