use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::credit::application::ports::outgoing::credit_ledger::{
    CreditLedger, CreditLedgerError,
};

#[derive(Clone)]
pub struct CreditLedgerPostgres {
    db: Arc<DatabaseConnection>,
}

impl CreditLedgerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(FromQueryResult)]
struct BalanceRow {
    credits: i32,
}

#[async_trait]
impl CreditLedger for CreditLedgerPostgres {
    async fn balance(&self, owner: Uuid) -> Result<i32, CreditLedgerError> {
        let row = BalanceRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT credits FROM principals WHERE id = $1",
            [owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| CreditLedgerError::Database(e.to_string()))?;

        // spec §4.2: "balance(owner) -> int — returns 0 for unknown owner."
        Ok(row.map(|r| r.credits).unwrap_or(0))
    }

    async fn has_at_least(&self, owner: Uuid, n: i32) -> Result<bool, CreditLedgerError> {
        Ok(self.balance(owner).await? >= n)
    }

    async fn debit(&self, owner: Uuid, n: i32) -> Result<bool, CreditLedgerError> {
        if n == 0 {
            return Ok(true);
        }

        #[derive(FromQueryResult)]
        struct DebitedRow {
            id: Uuid,
        }

        let result = DebitedRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            UPDATE principals SET credits = credits - $1
            WHERE id = $2 AND credits >= $1
            RETURNING id
            "#,
            [n.into(), owner.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| CreditLedgerError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn credit(&self, owner: Uuid, n: i32) -> Result<(), CreditLedgerError> {
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE principals SET credits = credits + $1 WHERE id = $2",
                [n.into(), owner.into()],
            ))
            .await
            .map_err(|e| CreditLedgerError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, MockExecResult};

    #[tokio::test]
    async fn debit_zero_short_circuits_without_a_query() {
        // an empty mock would panic if `debit` issued a statement for n == 0
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let ledger = CreditLedgerPostgres::new(db);

        assert!(ledger.debit(Uuid::new_v4(), 0).await.unwrap());
    }

    #[tokio::test]
    async fn credit_executes_unconditional_update() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let ledger = CreditLedgerPostgres::new(db);

        assert!(ledger.credit(Uuid::new_v4(), 10).await.is_ok());
    }
}
