use uuid::Uuid;

/// One ranked hit, already scoped to the searching principal's own sessions.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchHit {
    pub session_id: Uuid,
    pub block_id: Option<Uuid>,
    pub text: String,
    pub similarity: f32,
    pub provider: String,
}
