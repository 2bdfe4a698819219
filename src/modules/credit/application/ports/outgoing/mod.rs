pub mod credit_ledger;
