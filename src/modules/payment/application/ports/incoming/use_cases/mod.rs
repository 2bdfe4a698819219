pub mod create_checkout;
pub mod create_payment_intent;
pub mod handle_webhook;
pub mod list_packages;
