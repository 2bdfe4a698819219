use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::{MediaFile, MediaFileStatus, MediaKind};
use crate::modules::media::application::ports::outgoing::media_repository::{
    MediaRepository, MediaRepositoryError,
};

#[derive(Clone)]
pub struct MediaRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl MediaRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MediaRow {
    id: Uuid,
    session_id: Uuid,
    kind: String,
    object_key: String,
    content_type: String,
    byte_size: Option<i64>,
    status: String,
    created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl TryFrom<MediaRow> for MediaFile {
    type Error = MediaRepositoryError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let kind = MediaKind::from_db_str(&row.kind)
            .ok_or_else(|| MediaRepositoryError::Database(format!("unknown kind `{}`", row.kind)))?;
        let status = MediaFileStatus::from_db_str(&row.status).ok_or_else(|| {
            MediaRepositoryError::Database(format!("unknown status `{}`", row.status))
        })?;
        Ok(MediaFile {
            id: row.id,
            session_id: row.session_id,
            kind,
            object_key: row.object_key,
            content_type: row.content_type,
            byte_size: row.byte_size,
            status,
            created_at: row.created_at.with_timezone(&chrono::Utc),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, session_id, kind, object_key, content_type, byte_size, status, created_at";

#[async_trait]
impl MediaRepository for MediaRepositoryPostgres {
    async fn insert_pending(
        &self,
        session_id: Uuid,
        kind: MediaKind,
        object_key: &str,
        content_type: &str,
    ) -> Result<MediaFile, MediaRepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO media_files (session_id, kind, object_key, content_type)
            VALUES ($1, $2, $3, $4)
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let row = MediaRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [
                session_id.into(),
                kind.as_db_str().into(),
                object_key.into(),
                content_type.into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| MediaRepositoryError::Database(e.to_string()))?
        .ok_or_else(|| MediaRepositoryError::Database("insert returned no row".into()))?;

        row.try_into()
    }

    async fn commit(
        &self,
        media_id: Uuid,
        owner: Uuid,
        byte_size: Option<i64>,
    ) -> Result<MediaFile, MediaRepositoryError> {
        // idempotent: `status = 'pending'` guard lets an already-uploaded row
        // fall through to the plain re-read below rather than error.
        let sql = format!(
            r#"
            UPDATE media_files mf
            SET status = 'uploaded', byte_size = $1
            FROM sessions s
            WHERE mf.id = $2 AND mf.session_id = s.id AND s.owner_id = $3 AND mf.status = 'pending'
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let row = MediaRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [byte_size.into(), media_id.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| MediaRepositoryError::Database(e.to_string()))?;

        match row {
            Some(row) => row.try_into(),
            None => self.get(media_id, owner).await,
        }
    }

    async fn get(&self, media_id: Uuid, owner: Uuid) -> Result<MediaFile, MediaRepositoryError> {
        let sql = format!(
            r#"
            SELECT mf.id, mf.session_id, mf.kind, mf.object_key, mf.content_type,
                   mf.byte_size, mf.status, mf.created_at
            FROM media_files mf
            JOIN sessions s ON s.id = mf.session_id
            WHERE mf.id = $1 AND s.owner_id = $2
            "#
        );

        let row = MediaRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [media_id.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| MediaRepositoryError::Database(e.to_string()))?
        .ok_or(MediaRepositoryError::NotFoundOrAccessDenied)?;

        row.try_into()
    }

    async fn list_committed(
        &self,
        session_id: Uuid,
        kind: Option<MediaKind>,
    ) -> Result<Vec<MediaFile>, MediaRepositoryError> {
        let rows = match kind {
            Some(kind) => {
                let sql = format!(
                    r#"
                    SELECT {SELECT_COLUMNS} FROM media_files
                    WHERE session_id = $1 AND status = 'uploaded' AND kind = $2
                    ORDER BY created_at ASC
                    "#
                );
                MediaRow::find_by_statement(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    sql,
                    [session_id.into(), kind.as_db_str().into()],
                ))
                .all(&*self.db)
                .await
            }
            None => {
                let sql = format!(
                    r#"
                    SELECT {SELECT_COLUMNS} FROM media_files
                    WHERE session_id = $1 AND status = 'uploaded'
                    ORDER BY created_at ASC
                    "#
                );
                MediaRow::find_by_statement(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    sql,
                    [session_id.into()],
                ))
                .all(&*self.db)
                .await
            }
        }
        .map_err(|e| MediaRepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete(&self, media_id: Uuid, owner: Uuid) -> Result<String, MediaRepositoryError> {
        #[derive(FromQueryResult)]
        struct KeyRow {
            object_key: String,
        }

        let sql = r#"
            DELETE FROM media_files mf
            USING sessions s
            WHERE mf.id = $1 AND mf.session_id = s.id AND s.owner_id = $2
            RETURNING mf.object_key AS object_key
        "#;

        let row = KeyRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [media_id.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| MediaRepositoryError::Database(e.to_string()))?
        .ok_or(MediaRepositoryError::NotFoundOrAccessDenied)?;

        Ok(row.object_key)
    }
}
