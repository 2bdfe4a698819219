use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::session::application::ports::outgoing::finalize_transaction::{
    FinalizeOutcome, FinalizeTransaction, FinalizeTransactionError,
};

#[derive(Clone)]
pub struct FinalizeTransactionPostgres {
    db: Arc<DatabaseConnection>,
}

impl FinalizeTransactionPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> FinalizeTransactionError {
        FinalizeTransactionError::Database(e.to_string())
    }

    async fn finalize_with_db<D: SessionDb>(
        db: &D,
        session_id: Uuid,
        owner: Uuid,
        credits_required: i32,
    ) -> Result<FinalizeOutcome, FinalizeTransactionError> {
        let mut txn = db.begin().await.map_err(Self::map_db_err)?;

        // `SELECT ... FOR UPDATE` cannot carry a GROUP BY/aggregate, so the
        // status lock and the block count are two statements, not one.
        #[derive(FromQueryResult)]
        struct LockedSession {
            status: String,
        }

        let locked = match txn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT status FROM sessions WHERE id = $1 AND owner_id = $2 FOR UPDATE",
                [session_id.into(), owner.into()],
            ))
            .await
        {
            Ok(row) => row,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        let locked: Option<LockedSession> = match locked {
            Some(row) => match LockedSession::from_query_result(&row, "") {
                Ok(v) => Some(v),
                Err(e) => {
                    let _ = txn.rollback().await;
                    return Err(FinalizeTransactionError::Database(e.to_string()));
                }
            },
            None => None,
        };

        let locked = match locked {
            Some(l) => l,
            None => {
                let _ = txn.rollback().await;
                return Err(FinalizeTransactionError::NotFoundOrAccessDenied);
            }
        };

        if locked.status != "open" {
            let _ = txn.rollback().await;
            return Err(FinalizeTransactionError::StateConflict);
        }

        #[derive(FromQueryResult)]
        struct CountRow {
            block_count: i64,
        }

        let block_count = match txn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*) AS block_count FROM blocks WHERE session_id = $1",
                [session_id.into()],
            ))
            .await
        {
            Ok(Some(row)) => match CountRow::from_query_result(&row, "") {
                Ok(v) => v.block_count,
                Err(e) => {
                    let _ = txn.rollback().await;
                    return Err(FinalizeTransactionError::Database(e.to_string()));
                }
            },
            Ok(None) => 0,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        if block_count == 0 {
            let _ = txn.rollback().await;
            return Err(FinalizeTransactionError::NoBlocks);
        }

        #[derive(FromQueryResult)]
        struct DebitedRow {
            #[allow(dead_code)]
            id: Uuid,
        }

        let debited = match txn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"
                UPDATE principals SET credits = credits - $1
                WHERE id = $2 AND credits >= $1
                RETURNING id
                "#,
                [credits_required.into(), owner.into()],
            ))
            .await
        {
            Ok(row) => row,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        let outcome = if debited.is_some() {
            let job_id = Uuid::new_v4();

            if let Err(e) = txn
                .execute(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    r#"
                    UPDATE sessions
                    SET status = 'pending_processing', finalized_at = now()
                    WHERE id = $1
                    "#,
                    [session_id.into()],
                ))
                .await
            {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }

            if let Err(e) = txn
                .execute(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    r#"
                    INSERT INTO ai_jobs (id, owner_id, session_id, credits_used, status)
                    VALUES ($1, $2, $3, $4, 'pending')
                    "#,
                    [job_id.into(), owner.into(), session_id.into(), credits_required.into()],
                ))
                .await
            {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }

            FinalizeOutcome::WithAi { job_id }
        } else {
            if let Err(e) = txn
                .execute(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    r#"
                    UPDATE sessions
                    SET status = 'no_credits', finalized_at = now()
                    WHERE id = $1
                    "#,
                    [session_id.into()],
                ))
                .await
            {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }

            FinalizeOutcome::NoCredits
        };

        txn.commit().await.map_err(Self::map_db_err)?;
        Ok(outcome)
    }
}

#[async_trait]
impl FinalizeTransaction for FinalizeTransactionPostgres {
    async fn finalize_with_credit(
        &self,
        session_id: Uuid,
        owner: Uuid,
        credits_required: i32,
    ) -> Result<FinalizeOutcome, FinalizeTransactionError> {
        let db = SeaOrmDb { db: self.db.clone() };
        Self::finalize_with_db(&db, session_id, owner, credits_required).await
    }
}

// ============================================================================
// Minimal DB facade, so tests don't rely on SeaORM MockDatabase txn behavior
// (mirrors the multimedia module's `MediaDb`/`MediaTxn` split).
// ============================================================================

#[async_trait]
trait SessionDb: Send + Sync {
    type Txn: SessionTxn;
    async fn begin(&self) -> Result<Self::Txn, DbErr>;
}

#[async_trait]
trait SessionTxn: Send {
    async fn query_one(&mut self, stmt: Statement) -> Result<Option<sea_orm::QueryResult>, DbErr>;
    async fn execute(&mut self, stmt: Statement) -> Result<(), DbErr>;
    async fn commit(self) -> Result<(), DbErr>;
    async fn rollback(self) -> Result<(), DbErr>;
}

struct SeaOrmDb {
    db: Arc<DatabaseConnection>,
}

struct SeaOrmTxn {
    txn: sea_orm::DatabaseTransaction,
}

#[async_trait]
impl SessionDb for SeaOrmDb {
    type Txn = SeaOrmTxn;

    async fn begin(&self) -> Result<Self::Txn, DbErr> {
        let txn = self.db.begin().await?;
        Ok(SeaOrmTxn { txn })
    }
}

#[async_trait]
impl SessionTxn for SeaOrmTxn {
    async fn query_one(&mut self, stmt: Statement) -> Result<Option<sea_orm::QueryResult>, DbErr> {
        self.txn.query_one(stmt).await
    }

    async fn execute(&mut self, stmt: Statement) -> Result<(), DbErr> {
        self.txn.execute(stmt).await?;
        Ok(())
    }

    async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

// ============================================================================
// Tests (deterministic, do not touch a real database)
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    enum Step {
        Begin(Result<(), DbErr>),
        QueryOne(Result<Option<sea_orm::QueryResult>, DbErr>),
        Exec(Result<(), DbErr>),
        Commit(Result<(), DbErr>),
        Rollback(Result<(), DbErr>),
    }

    #[derive(Clone)]
    struct FakeDb {
        steps: Arc<Mutex<Vec<Step>>>,
    }

    struct FakeTxn {
        steps: Arc<Mutex<Vec<Step>>>,
    }

    impl FakeDb {
        fn new(steps: Vec<Step>) -> Self {
            Self { steps: Arc::new(Mutex::new(steps)) }
        }
    }

    #[async_trait]
    impl SessionDb for FakeDb {
        type Txn = FakeTxn;

        async fn begin(&self) -> Result<Self::Txn, DbErr> {
            match self.steps.lock().unwrap().remove(0) {
                Step::Begin(Ok(())) => Ok(FakeTxn { steps: self.steps.clone() }),
                Step::Begin(Err(e)) => Err(e),
                other => panic!("expected Step::Begin, got {other:?}"),
            }
        }
    }

    #[async_trait]
    impl SessionTxn for FakeTxn {
        async fn query_one(&mut self, _stmt: Statement) -> Result<Option<sea_orm::QueryResult>, DbErr> {
            match self.steps.lock().unwrap().remove(0) {
                Step::QueryOne(res) => res,
                other => panic!("expected Step::QueryOne, got {other:?}"),
            }
        }

        async fn execute(&mut self, _stmt: Statement) -> Result<(), DbErr> {
            match self.steps.lock().unwrap().remove(0) {
                Step::Exec(res) => res,
                other => panic!("expected Step::Exec, got {other:?}"),
            }
        }

        async fn commit(self) -> Result<(), DbErr> {
            match self.steps.lock().unwrap().remove(0) {
                Step::Commit(res) => res,
                other => panic!("expected Step::Commit, got {other:?}"),
            }
        }

        async fn rollback(self) -> Result<(), DbErr> {
            match self.steps.lock().unwrap().remove(0) {
                Step::Rollback(res) => res,
                other => panic!("expected Step::Rollback, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn not_found_rolls_back_without_touching_credits() {
        let db = FakeDb::new(vec![
            Step::Begin(Ok(())),
            Step::QueryOne(Ok(None)),
            Step::Rollback(Ok(())),
        ]);

        let result =
            FinalizeTransactionPostgres::finalize_with_db(&db, Uuid::new_v4(), Uuid::new_v4(), 1)
                .await;

        assert!(matches!(result, Err(FinalizeTransactionError::NotFoundOrAccessDenied)));
    }

    #[tokio::test]
    async fn begin_error_is_surfaced_without_a_rollback_attempt() {
        let db = FakeDb::new(vec![Step::Begin(Err(DbErr::Custom("pool exhausted".into())))]);

        let result =
            FinalizeTransactionPostgres::finalize_with_db(&db, Uuid::new_v4(), Uuid::new_v4(), 1)
                .await;

        assert!(matches!(result, Err(FinalizeTransactionError::Database(_))));
    }
}
