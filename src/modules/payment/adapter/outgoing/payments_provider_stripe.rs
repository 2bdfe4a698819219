//! Stripe-backed `PaymentsProvider`. No example in this codebase's dependency
//! graph ships a Stripe/payments SDK, so this talks to the REST API directly
//! over `reqwest` the same way `OpenAiCompatibleClient` hand-rolls its own
//! provider client, and verifies webhook signatures with the `hmac`/`sha2`
//! pair already used for token hashing (`token_hasher.rs`) rather than
//! pulling in a dedicated crate for Stripe's one-off scheme.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::modules::payment::application::domain::catalog::{default_catalog, CreditPackage};
use crate::modules::payment::application::ports::outgoing::payments_provider::{
    CheckoutSession, PaymentIntent, PaymentsProvider, PaymentsProviderError, WebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

const API_BASE: &str = "https://api.stripe.com/v1";

pub struct StripePaymentsProvider {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: Option<String>,
}

impl StripePaymentsProvider {
    pub fn new(secret_key: impl Into<String>, webhook_secret: Option<String>) -> Self {
        Self { http: reqwest::Client::new(), secret_key: secret_key.into(), webhook_secret }
    }

    async fn post_form(&self, path: &str, params: Vec<(String, String)>) -> Result<serde_json::Value, PaymentsProviderError> {
        let response = self
            .http
            .post(format!("{API_BASE}/{path}"))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentsProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PaymentsProviderError::Transport(format!("{status}: {text}")));
        }

        response.json().await.map_err(|e| PaymentsProviderError::Transport(e.to_string()))
    }
}

#[async_trait]
impl PaymentsProvider for StripePaymentsProvider {
    fn list_packages(&self) -> Vec<CreditPackage> {
        default_catalog()
    }

    async fn create_checkout_session(
        &self,
        customer_handle: Option<&str>,
        package: &CreditPackage,
        success_url: &str,
        cancel_url: &str,
        owner_id: uuid::Uuid,
    ) -> Result<CheckoutSession, PaymentsProviderError> {
        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("line_items[0][price_data][currency]".to_string(), package.currency.clone()),
            ("line_items[0][price_data][unit_amount]".to_string(), package.price_minor.to_string()),
            ("line_items[0][price_data][product_data][name]".to_string(), package.name.clone()),
            ("metadata[user_id]".to_string(), owner_id.to_string()),
            ("metadata[credits]".to_string(), package.credits.to_string()),
            ("metadata[package_id]".to_string(), package.id.clone()),
        ];
        if let Some(customer) = customer_handle {
            params.push(("customer".to_string(), customer.to_string()));
        }

        let body = self.post_form("checkout/sessions", params).await?;
        let checkout_session_handle = body
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentsProviderError::Transport("missing checkout session id in response".to_string()))?
            .to_string();
        let checkout_url = body
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentsProviderError::Transport("missing checkout url in response".to_string()))?
            .to_string();

        Ok(CheckoutSession { checkout_url, checkout_session_handle })
    }

    async fn create_payment_intent(
        &self,
        customer_handle: Option<&str>,
        package: &CreditPackage,
        owner_id: uuid::Uuid,
    ) -> Result<PaymentIntent, PaymentsProviderError> {
        let mut params = vec![
            ("amount".to_string(), package.price_minor.to_string()),
            ("currency".to_string(), package.currency.clone()),
            ("metadata[user_id]".to_string(), owner_id.to_string()),
            ("metadata[credits]".to_string(), package.credits.to_string()),
            ("metadata[package_id]".to_string(), package.id.clone()),
        ];
        if let Some(customer) = customer_handle {
            params.push(("customer".to_string(), customer.to_string()));
        }

        let body = self.post_form("payment_intents", params).await?;
        let payment_intent_handle = body
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentsProviderError::Transport("missing payment intent id in response".to_string()))?
            .to_string();
        let client_secret = body
            .get("client_secret")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentsProviderError::Transport("missing client_secret in response".to_string()))?
            .to_string();

        Ok(PaymentIntent { client_secret, payment_intent_handle })
    }

    fn verify_and_parse_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, PaymentsProviderError> {
        let secret = self.webhook_secret.as_ref().ok_or(PaymentsProviderError::MissingSecret)?;
        verify_signature(secret, payload, signature_header)?;

        let parsed: serde_json::Value =
            serde_json::from_slice(payload).map_err(|_| PaymentsProviderError::BadSignature)?;

        let event_type = parsed.get("type").and_then(|v| v.as_str()).unwrap_or_default();
        let object_id = parsed
            .pointer("/data/object/id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(match event_type {
            "checkout.session.completed" => WebhookEvent::CheckoutCompleted { checkout_session_handle: object_id },
            "payment_intent.succeeded" => WebhookEvent::PaymentIntentSucceeded { payment_intent_handle: object_id },
            "checkout.session.expired" => WebhookEvent::CheckoutExpired { checkout_session_handle: object_id },
            "payment_intent.payment_failed" => WebhookEvent::PaymentIntentFailed { payment_intent_handle: object_id },
            other => WebhookEvent::Other(other.to_string()),
        })
    }
}

/// Stripe's `Stripe-Signature` header: `t=<unix-ts>,v1=<hex-hmac>[,v1=<hex-hmac>...]`.
/// The signed payload is `"{timestamp}.{raw_body}"`; a request is valid if
/// any `v1` value matches. Timestamp tolerance is intentionally not enforced
/// here since replays are already harmless (spec §4.7).
fn verify_signature(secret: &str, payload: &[u8], header: &str) -> Result<(), PaymentsProviderError> {
    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        let mut kv = part.splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(v)) => timestamp = Some(v),
            (Some("v1"), Some(v)) => candidates.push(v),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(PaymentsProviderError::BadSignature)?;
    if candidates.is_empty() {
        return Err(PaymentsProviderError::BadSignature);
    }

    let mut signed_payload = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    signed_payload.extend_from_slice(timestamp.as_bytes());
    signed_payload.push(b'.');
    signed_payload.extend_from_slice(payload);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentsProviderError::Transport(e.to_string()))?;
    mac.update(&signed_payload);
    let expected = mac.finalize().into_bytes();
    let expected_hex = hex_encode(&expected);

    if candidates.iter().any(|c| constant_time_eq(c, &expected_hex)) {
        Ok(())
    } else {
        Err(PaymentsProviderError::BadSignature)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut signed_payload = Vec::new();
        signed_payload.extend_from_slice(timestamp.as_bytes());
        signed_payload.push(b'.');
        signed_payload.extend_from_slice(payload);
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(&signed_payload);
        hex_encode(&mac.finalize().into_bytes())
    }

    #[test]
    fn a_correctly_signed_payload_verifies() {
        let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let signature = sign("whsec_test", "12345", payload);
        let header = format!("t=12345,v1={signature}");
        assert!(verify_signature("whsec_test", payload, &header).is_ok());
    }

    #[test]
    fn a_tampered_payload_is_rejected() {
        let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let signature = sign("whsec_test", "12345", payload);
        let header = format!("t=12345,v1={signature}");
        let tampered = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_999"}}}"#;
        assert!(verify_signature("whsec_test", tampered, &header).is_err());
    }

    #[test]
    fn a_missing_v1_component_is_rejected() {
        assert!(verify_signature("whsec_test", b"{}", "t=12345").is_err());
    }

    #[test]
    fn parses_a_payment_intent_succeeded_event() {
        let provider = StripePaymentsProvider::new("sk_test", Some("whsec_test".to_string()));
        let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let signature = sign("whsec_test", "12345", payload);
        let header = format!("t=12345,v1={signature}");

        let event = provider.verify_and_parse_webhook(payload, &header).unwrap();
        match event {
            WebhookEvent::PaymentIntentSucceeded { payment_intent_handle } => {
                assert_eq!(payment_intent_handle, "pi_123");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
