pub mod resolve_principal;
