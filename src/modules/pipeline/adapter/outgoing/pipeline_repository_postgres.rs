use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::pipeline::application::ports::outgoing::pipeline_repository::{
    ClaimedJob, PipelineRepository, PipelineRepositoryError,
};
use crate::modules::session::application::domain::entities::{
    Block, BlockType, Session, SessionStatus,
};

#[derive(Clone)]
pub struct PipelineRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PipelineRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct SessionRow {
    id: Uuid,
    owner_id: Uuid,
    session_type: String,
    status: String,
    ai_summary: Option<String>,
    suggested_title: Option<String>,
    capture_language: Option<String>,
    created_at: chrono::DateTime<chrono::FixedOffset>,
    updated_at: chrono::DateTime<chrono::FixedOffset>,
    finalized_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    processed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            owner_id: row.owner_id,
            session_type: row.session_type,
            status: SessionStatus::from_db_str(&row.status),
            ai_summary: row.ai_summary,
            suggested_title: row.suggested_title,
            capture_language: row.capture_language,
            created_at: row.created_at.with_timezone(&chrono::Utc),
            updated_at: row.updated_at.with_timezone(&chrono::Utc),
            finalized_at: row.finalized_at.map(|t| t.with_timezone(&chrono::Utc)),
            processed_at: row.processed_at.map(|t| t.with_timezone(&chrono::Utc)),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct BlockRow {
    id: Uuid,
    session_id: Uuid,
    block_type: String,
    text_content: Option<String>,
    media_object_key: Option<String>,
    metadata: serde_json::Value,
    created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl TryFrom<BlockRow> for Block {
    type Error = PipelineRepositoryError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        let block_type = BlockType::from_db_str(&row.block_type).ok_or_else(|| {
            PipelineRepositoryError::Database(format!("unknown block_type `{}`", row.block_type))
        })?;
        Ok(Block {
            id: row.id,
            session_id: row.session_id,
            block_type,
            text_content: row.text_content,
            media_object_key: row.media_object_key,
            metadata: row.metadata,
            created_at: row.created_at.with_timezone(&chrono::Utc),
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct ClaimRow {
    id: Uuid,
    owner_id: Uuid,
    session_id: Uuid,
}

#[async_trait]
impl PipelineRepository for PipelineRepositoryPostgres {
    async fn claim_pending_job(&self) -> Result<Option<ClaimedJob>, PipelineRepositoryError> {
        let sql = r#"
            UPDATE ai_jobs
            SET locked_at = now()
            WHERE id = (
                SELECT id FROM ai_jobs
                WHERE status = 'pending'
                  AND (locked_at IS NULL OR locked_at < now() - interval '30 minutes')
                ORDER BY created_at ASC
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            RETURNING id, owner_id, session_id
        "#;

        let row = ClaimRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            sql.to_owned(),
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;

        Ok(row.map(|r| ClaimedJob { job_id: r.id, session_id: r.session_id, owner_id: r.owner_id }))
    }

    async fn set_session_status(
        &self,
        session_id: Uuid,
        status: &str,
    ) -> Result<(), PipelineRepositoryError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE sessions SET status = $1::session_status WHERE id = $2",
                [status.into(), session_id.into()],
            ))
            .await
            .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn append_pipeline_block(
        &self,
        session_id: Uuid,
        block_type: BlockType,
        text_content: Option<&str>,
        media_object_key: Option<&str>,
    ) -> Result<Block, PipelineRepositoryError> {
        let sql = r#"
            INSERT INTO blocks (session_id, block_type, text_content, media_object_key, metadata)
            VALUES ($1, $2, $3, $4, '{}'::jsonb)
            RETURNING id, session_id, block_type, text_content, media_object_key, metadata, created_at
        "#;

        let row = BlockRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [
                session_id.into(),
                block_type.as_db_str().into(),
                text_content.map(str::to_string).into(),
                media_object_key.map(str::to_string).into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?
        .ok_or_else(|| PipelineRepositoryError::Database("insert returned no row".into()))?;

        row.try_into()
    }

    async fn list_blocks(&self, session_id: Uuid) -> Result<Vec<Block>, PipelineRepositoryError> {
        let rows = BlockRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT id, session_id, block_type, text_content, media_object_key, metadata, created_at
            FROM blocks WHERE session_id = $1 ORDER BY created_at ASC
            "#,
            [session_id.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<Session>, PipelineRepositoryError> {
        let row = SessionRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT id, owner_id, session_type, status, ai_summary, suggested_title,
                   capture_language, created_at, updated_at, finalized_at, processed_at
            FROM sessions WHERE id = $1
            "#,
            [session_id.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn set_summary_and_title(
        &self,
        session_id: Uuid,
        summary: &str,
        title: &str,
    ) -> Result<(), PipelineRepositoryError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"
                UPDATE sessions
                SET ai_summary = $1, suggested_title = $2, status = 'processed'::session_status,
                    processed_at = now()
                WHERE id = $3
                "#,
                [summary.into(), title.into(), session_id.into()],
            ))
            .await
            .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn complete_job(&self, job_id: Uuid, session_id: Uuid) -> Result<(), PipelineRepositoryError> {
        let _ = session_id;
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE ai_jobs SET status = 'completed'::ai_job_status, completed_at = now() WHERE id = $1",
                [job_id.into()],
            ))
            .await
            .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn fail_job(&self, job_id: Uuid, session_id: Uuid) -> Result<(), PipelineRepositoryError> {
        let _ = session_id;
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE ai_jobs SET status = 'failed'::ai_job_status, completed_at = now() WHERE id = $1",
                [job_id.into()],
            ))
            .await
            .map_err(|e| PipelineRepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}
