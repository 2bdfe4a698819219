pub mod verified_identity;
