use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity of a request initiator. Created on first authenticated request;
/// never deleted by the core. `credits` is mutated only through the credit
/// ledger's conditional update (`modules::credit`).
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: Uuid,
    pub external_subject: String,
    pub email: Option<String>,
    pub credits: i32,
    pub push_token: Option<String>,
    pub preferred_language: String,
    pub payment_customer_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
