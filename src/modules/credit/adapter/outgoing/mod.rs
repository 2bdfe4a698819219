pub mod credit_ledger_postgres;
