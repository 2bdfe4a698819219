use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct VectorMatch {
    pub embedding_id: Uuid,
    pub session_id: Uuid,
    pub block_id: Option<Uuid>,
    pub chunk_text: String,
    pub distance: f64,
}
