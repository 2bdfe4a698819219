pub mod payment_repository_postgres;
pub mod payments_provider_stripe;
