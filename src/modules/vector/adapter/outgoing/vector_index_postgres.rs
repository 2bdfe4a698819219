use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::vector::application::domain::entities::VectorMatch;
use crate::modules::vector::application::ports::outgoing::vector_index::{
    VectorIndex, VectorIndexError, VectorQuery,
};

pub const EMBEDDING_DIMENSION: usize = 1536;

#[derive(Clone)]
pub struct VectorIndexPostgres {
    db: Arc<DatabaseConnection>,
}

impl VectorIndexPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// pgvector accepts a text literal of the form `[0.1,0.2,...]` cast to
/// `vector`; there is no sea-orm `Value` variant for the column type.
fn embedding_literal(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 8 + 2);
    out.push('[');
    for (i, v) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}

#[derive(Debug, FromQueryResult)]
struct MatchRow {
    id: Uuid,
    session_id: Uuid,
    block_id: Option<Uuid>,
    chunk_text: String,
    distance: f64,
}

impl From<MatchRow> for VectorMatch {
    fn from(row: MatchRow) -> Self {
        VectorMatch {
            embedding_id: row.id,
            session_id: row.session_id,
            block_id: row.block_id,
            chunk_text: row.chunk_text,
            distance: row.distance,
        }
    }
}

#[async_trait]
impl VectorIndex for VectorIndexPostgres {
    async fn upsert(
        &self,
        session_id: Uuid,
        block_id: Option<Uuid>,
        provider: &str,
        chunk_text: &str,
        embedding: &[f32],
    ) -> Result<Uuid, VectorIndexError> {
        if embedding.len() != EMBEDDING_DIMENSION {
            return Err(VectorIndexError::DimensionMismatch {
                expected: EMBEDDING_DIMENSION,
                actual: embedding.len(),
            });
        }

        let sql = r#"
            INSERT INTO embeddings (session_id, block_id, provider, chunk_text, embedding)
            VALUES ($1, $2, $3, $4, $5::vector)
            RETURNING id
        "#;

        #[derive(FromQueryResult)]
        struct IdRow {
            id: Uuid,
        }

        let row = IdRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [
                session_id.into(),
                block_id.into(),
                provider.into(),
                chunk_text.into(),
                embedding_literal(embedding).into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| VectorIndexError::Database(e.to_string()))?
        .ok_or_else(|| VectorIndexError::Database("insert returned no row".into()))?;

        Ok(row.id)
    }

    async fn delete_by_session(&self, session_id: Uuid) -> Result<(), VectorIndexError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "DELETE FROM embeddings WHERE session_id = $1",
                [session_id.into()],
            ))
            .await
            .map_err(|e| VectorIndexError::Database(e.to_string()))?;
        Ok(())
    }

    async fn query(&self, query: VectorQuery<'_>) -> Result<Vec<VectorMatch>, VectorIndexError> {
        if query.embedding.len() != EMBEDDING_DIMENSION {
            return Err(VectorIndexError::DimensionMismatch {
                expected: EMBEDDING_DIMENSION,
                actual: query.embedding.len(),
            });
        }

        if query.session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let max_distance = 1.0_f64 - query.min_similarity as f64;

        let mut values: Vec<sea_orm::Value> =
            vec![embedding_literal(query.embedding).into(), max_distance.into()];

        let mut placeholder = 3;
        let session_placeholders: Vec<String> = query
            .session_ids
            .iter()
            .map(|id| {
                values.push((*id).into());
                let p = format!("${placeholder}");
                placeholder += 1;
                p
            })
            .collect();

        let provider_clause = if let Some(provider) = query.provider {
            values.push(provider.into());
            let clause = format!("AND provider = ${placeholder}");
            placeholder += 1;
            clause
        } else {
            String::new()
        };

        values.push((query.top_k as i64).into());
        let limit_placeholder = placeholder;

        let sql = format!(
            r#"
            SELECT id, session_id, block_id, chunk_text, embedding <=> $1::vector AS distance
            FROM embeddings
            WHERE session_id IN ({session_list}) {provider_clause}
              AND embedding <=> $1::vector <= $2
            ORDER BY distance ASC
            LIMIT ${limit_placeholder}
            "#,
            session_list = session_placeholders.join(", "),
        );

        let rows = MatchRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            values,
        ))
        .all(&*self.db)
        .await
        .map_err(|e| VectorIndexError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(VectorMatch::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_literal_formats_as_bracketed_csv() {
        let literal = embedding_literal(&[0.1, -0.2, 3.0]);
        assert_eq!(literal, "[0.1,-0.2,3]");
    }
}
