use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::principal::application::domain::entities::Principal;
use crate::modules::principal::application::ports::outgoing::principal_repository::{
    PrincipalRepository, PrincipalRepositoryError, TRIAL_CREDITS,
};

#[derive(Clone)]
pub struct PrincipalRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PrincipalRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct PrincipalRow {
    id: Uuid,
    external_subject: String,
    email: Option<String>,
    credits: i32,
    push_token: Option<String>,
    preferred_language: String,
    payment_customer_handle: Option<String>,
    created_at: chrono::DateTime<chrono::FixedOffset>,
    updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        Principal {
            id: row.id,
            external_subject: row.external_subject,
            email: row.email,
            credits: row.credits,
            push_token: row.push_token,
            preferred_language: row.preferred_language,
            payment_customer_handle: row.payment_customer_handle,
            created_at: row.created_at.with_timezone(&chrono::Utc),
            updated_at: row.updated_at.with_timezone(&chrono::Utc),
        }
    }
}

#[async_trait]
impl PrincipalRepository for PrincipalRepositoryPostgres {
    async fn get_or_create_by_subject(
        &self,
        external_subject: &str,
        email: Option<&str>,
    ) -> Result<Principal, PrincipalRepositoryError> {
        let row = PrincipalRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO principals (external_subject, email, credits)
            VALUES ($1, $2, $3)
            ON CONFLICT (external_subject) DO UPDATE
                SET email = COALESCE(EXCLUDED.email, principals.email)
            RETURNING id, external_subject, email, credits, push_token,
                      preferred_language, payment_customer_handle, created_at, updated_at
            "#,
            [
                external_subject.into(),
                email.map(str::to_string).into(),
                TRIAL_CREDITS.into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PrincipalRepositoryError::Database(e.to_string()))?
        .ok_or(PrincipalRepositoryError::NotFound)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Principal, PrincipalRepositoryError> {
        let row = PrincipalRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT id, external_subject, email, credits, push_token,
                   preferred_language, payment_customer_handle, created_at, updated_at
            FROM principals WHERE id = $1
            "#,
            [id.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PrincipalRepositoryError::Database(e.to_string()))?
        .ok_or(PrincipalRepositoryError::NotFound)?;

        Ok(row.into())
    }

    async fn set_push_token(&self, id: Uuid, token: &str) -> Result<(), PrincipalRepositoryError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE principals SET push_token = $1 WHERE id = $2",
                [token.into(), id.into()],
            ))
            .await
            .map_err(|e| PrincipalRepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn set_preferred_language(
        &self,
        id: Uuid,
        language: &str,
    ) -> Result<(), PrincipalRepositoryError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE principals SET preferred_language = $1 WHERE id = $2",
                [language.into(), id.into()],
            ))
            .await
            .map_err(|e| PrincipalRepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn set_payment_customer_handle(
        &self,
        id: Uuid,
        handle: &str,
    ) -> Result<(), PrincipalRepositoryError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE principals SET payment_customer_handle = $1 WHERE id = $2",
                [handle.into(), id.into()],
            ))
            .await
            .map_err(|e| PrincipalRepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}
