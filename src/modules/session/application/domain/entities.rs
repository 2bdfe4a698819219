use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    PendingProcessing,
    Processing,
    Processed,
    NoCredits,
    Failed,
}

impl SessionStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::PendingProcessing => "pending_processing",
            SessionStatus::Processing => "processing",
            SessionStatus::Processed => "processed",
            SessionStatus::NoCredits => "no_credits",
            SessionStatus::Failed => "failed",
        }
    }

    /// The source carries a legacy `raw_only` status alongside `no_credits`;
    /// both collapse to `NoCredits` here (DESIGN.md open question #1).
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "open" => SessionStatus::Open,
            "pending_processing" => SessionStatus::PendingProcessing,
            "processing" => SessionStatus::Processing,
            "processed" => SessionStatus::Processed,
            "no_credits" | "raw_only" => SessionStatus::NoCredits,
            _ => SessionStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub session_type: String,
    pub status: SessionStatus,
    pub ai_summary: Option<String>,
    pub suggested_title: Option<String>,
    pub capture_language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Voice,
    Image,
    Marker,
    TranscriptionBackend,
    ImageDescription,
}

impl BlockType {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Voice => "voice",
            BlockType::Image => "image",
            BlockType::Marker => "marker",
            BlockType::TranscriptionBackend => "transcription_backend",
            BlockType::ImageDescription => "image_description",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(BlockType::Text),
            "voice" => Some(BlockType::Voice),
            "image" => Some(BlockType::Image),
            "marker" => Some(BlockType::Marker),
            "transcription_backend" => Some(BlockType::TranscriptionBackend),
            "image_description" => Some(BlockType::ImageDescription),
            _ => None,
        }
    }

    /// `transcription_backend` and `image_description` blocks are written only
    /// by the pipeline worker; clients may not append them directly.
    pub fn is_client_appendable(&self) -> bool {
        !matches!(
            self,
            BlockType::TranscriptionBackend | BlockType::ImageDescription
        )
    }

    /// Text-bearing types collected for stage C's summary/embedding input.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            BlockType::Text
                | BlockType::Voice
                | BlockType::TranscriptionBackend
                | BlockType::ImageDescription
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub id: Uuid,
    pub session_id: Uuid,
    pub block_type: BlockType,
    pub text_content: Option<String>,
    pub media_object_key: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlock {
    pub block_type: BlockType,
    pub text_content: Option<String>,
    pub media_object_key: Option<String>,
    pub metadata: serde_json::Value,
}
