use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::payment::application::domain::entities::{Payment, PaymentStatus};
use crate::modules::payment::application::ports::outgoing::payment_repository::{
    NewPayment, PaymentRepository, PaymentRepositoryError,
};

#[derive(Clone)]
pub struct PaymentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PaymentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct PaymentRow {
    id: Uuid,
    owner_id: Uuid,
    checkout_session_handle: Option<String>,
    payment_intent_handle: Option<String>,
    amount_minor: i64,
    currency: String,
    credits_granted: i32,
    package_id: String,
    status: String,
    created_at: chrono::DateTime<chrono::FixedOffset>,
    completed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            owner_id: row.owner_id,
            checkout_session_handle: row.checkout_session_handle,
            payment_intent_handle: row.payment_intent_handle,
            amount_minor: row.amount_minor,
            currency: row.currency,
            credits_granted: row.credits_granted,
            package_id: row.package_id,
            status: PaymentStatus::from_db_str(&row.status),
            created_at: row.created_at.with_timezone(&chrono::Utc),
            completed_at: row.completed_at.map(|t| t.with_timezone(&chrono::Utc)),
        }
    }
}

const SELECT_COLUMNS: &str = "id, owner_id, checkout_session_handle, payment_intent_handle, \
     amount_minor, currency, credits_granted, package_id, status, created_at, completed_at";

#[async_trait]
impl PaymentRepository for PaymentRepositoryPostgres {
    async fn insert_pending(&self, new_payment: NewPayment) -> Result<Payment, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!(
                r#"
                INSERT INTO payments
                    (owner_id, checkout_session_handle, payment_intent_handle,
                     amount_minor, currency, credits_granted, package_id, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
                RETURNING {SELECT_COLUMNS}
                "#
            ),
            [
                new_payment.owner_id.into(),
                new_payment.checkout_session_handle.into(),
                new_payment.payment_intent_handle.into(),
                new_payment.amount_minor.into(),
                new_payment.currency.into(),
                new_payment.credits_granted.into(),
                new_payment.package_id.into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        row.map(Payment::from)
            .ok_or_else(|| PaymentRepositoryError::Database("insert did not return a row".to_string()))
    }

    async fn find_by_checkout_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!("SELECT {SELECT_COLUMNS} FROM payments WHERE checkout_session_handle = $1"),
            [handle.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Payment::from))
    }

    async fn find_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!("SELECT {SELECT_COLUMNS} FROM payments WHERE payment_intent_handle = $1"),
            [handle.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Payment::from))
    }

    async fn complete_by_checkout_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!(
                r#"
                UPDATE payments SET status = 'completed', completed_at = now()
                WHERE checkout_session_handle = $1 AND status = 'pending'
                RETURNING {SELECT_COLUMNS}
                "#
            ),
            [handle.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Payment::from))
    }

    async fn complete_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!(
                r#"
                UPDATE payments SET status = 'completed', completed_at = now()
                WHERE payment_intent_handle = $1 AND status = 'pending'
                RETURNING {SELECT_COLUMNS}
                "#
            ),
            [handle.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Payment::from))
    }

    async fn fail_pending_by_intent_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let row = PaymentRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            &format!(
                r#"
                UPDATE payments SET status = 'failed'
                WHERE payment_intent_handle = $1 AND status = 'pending'
                RETURNING {SELECT_COLUMNS}
                "#
            ),
            [handle.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PaymentRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Payment::from))
    }
}

