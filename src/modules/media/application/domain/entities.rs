use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    pub fn as_db_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(MediaKind::Audio),
            "image" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFileStatus {
    Pending,
    Uploaded,
}

impl MediaFileStatus {
    pub fn as_db_str(self) -> &'static str {
        match self {
            MediaFileStatus::Pending => "pending",
            MediaFileStatus::Uploaded => "uploaded",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MediaFileStatus::Pending),
            "uploaded" => Some(MediaFileStatus::Uploaded),
            _ => None,
        }
    }
}

/// Metadata for a file held in the object store. Status only ever moves
/// `pending -> uploaded`; the commit that performs that transition is
/// idempotent.
#[derive(Debug, Clone, Serialize)]
pub struct MediaFile {
    pub id: Uuid,
    pub session_id: Uuid,
    pub kind: MediaKind,
    pub object_key: String,
    pub content_type: String,
    pub byte_size: Option<i64>,
    pub status: MediaFileStatus,
    pub created_at: DateTime<Utc>,
}
