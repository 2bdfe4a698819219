use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::session::application::domain::entities::{
    Block, BlockType, NewBlock, Session, SessionStatus,
};
use crate::modules::session::application::ports::outgoing::session_repository::{
    SessionRepository, SessionRepositoryError,
};

#[derive(Clone)]
pub struct SessionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SessionRepositoryPostgres {
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
    type Error = SessionRepositoryError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        let block_type = BlockType::from_db_str(&row.block_type).ok_or_else(|| {
            SessionRepositoryError::Database(format!("unknown block_type `{}`", row.block_type))
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

#[async_trait]
impl SessionRepository for SessionRepositoryPostgres {
    async fn create(
        &self,
        owner: Uuid,
        session_type: &str,
        language: Option<&str>,
    ) -> Result<Session, SessionRepositoryError> {
        let row = SessionRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO sessions (owner_id, session_type, capture_language)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, session_type, status, ai_summary, suggested_title,
                      capture_language, created_at, updated_at, finalized_at, processed_at
            "#,
            [owner.into(), session_type.into(), language.map(str::to_string).into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?
        .ok_or_else(|| SessionRepositoryError::Database("insert returned no row".into()))?;

        Ok(row.into())
    }

    async fn append_block(
        &self,
        session_id: Uuid,
        owner: Uuid,
        block: NewBlock,
    ) -> Result<Block, SessionRepositoryError> {
        let row = BlockRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO blocks (session_id, block_type, text_content, media_object_key, metadata)
            SELECT $1, $2, $3, $4, $5
            FROM sessions
            WHERE id = $1 AND owner_id = $6 AND status = 'open'
            RETURNING id, session_id, block_type, text_content, media_object_key, metadata, created_at
            "#,
            [
                session_id.into(),
                block.block_type.as_db_str().into(),
                block.text_content.into(),
                block.media_object_key.into(),
                block.metadata.into(),
                owner.into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.classify_write_miss(session_id, owner).await?),
        }
    }

    async fn get(&self, session_id: Uuid, owner: Uuid) -> Result<Option<Session>, SessionRepositoryError> {
        let row = SessionRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT id, owner_id, session_type, status, ai_summary, suggested_title,
                   capture_language, created_at, updated_at, finalized_at, processed_at
            FROM sessions WHERE id = $1 AND owner_id = $2
            "#,
            [session_id.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_blocks(
        &self,
        session_id: Uuid,
        owner: Uuid,
    ) -> Result<Vec<Block>, SessionRepositoryError> {
        if self.get(session_id, owner).await?.is_none() {
            return Err(SessionRepositoryError::NotFoundOrAccessDenied);
        }

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
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete(&self, session_id: Uuid, owner: Uuid) -> Result<Vec<String>, SessionRepositoryError> {
        #[derive(FromQueryResult)]
        struct KeyRow {
            object_key: String,
        }

        let keys = KeyRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT object_key FROM media_files WHERE session_id = $1",
            [session_id.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        #[derive(FromQueryResult)]
        struct IdRow {
            #[allow(dead_code)]
            id: Uuid,
        }

        // cascade deletes blocks, ai_jobs, embeddings, and media_files via FK (see migrations)
        let deleted = IdRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "DELETE FROM sessions WHERE id = $1 AND owner_id = $2 RETURNING id",
            [session_id.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        if deleted.is_none() {
            return Err(SessionRepositoryError::NotFoundOrAccessDenied);
        }

        Ok(keys.into_iter().map(|r| r.object_key).collect())
    }

    async fn list_owned_ids(&self, owner: Uuid) -> Result<Vec<Uuid>, SessionRepositoryError> {
        #[derive(FromQueryResult)]
        struct IdRow {
            id: Uuid,
        }

        let rows = IdRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT id FROM sessions WHERE owner_id = $1",
            [owner.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| SessionRepositoryError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.id).collect())
    }
}

impl SessionRepositoryPostgres {
    async fn classify_write_miss(
        &self,
        session_id: Uuid,
        owner: Uuid,
    ) -> Result<SessionRepositoryError, SessionRepositoryError> {
        match self.get(session_id, owner).await? {
            None => Ok(SessionRepositoryError::NotFoundOrAccessDenied),
            Some(_) => Ok(SessionRepositoryError::StateConflict),
        }
    }
}
