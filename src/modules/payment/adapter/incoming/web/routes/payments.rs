use actix_web::{get, post, web, HttpRequest, Responder};
use serde::Deserialize;

use crate::modules::payment::application::ports::incoming::use_cases::create_checkout::{
    CreateCheckoutError, CreateCheckoutInput,
};
use crate::modules::payment::application::ports::incoming::use_cases::create_payment_intent::{
    CreatePaymentIntentError, CreatePaymentIntentInput,
};
use crate::modules::payment::application::ports::incoming::use_cases::handle_webhook::{
    HandleWebhookError, ReconcileOutcome,
};
use crate::modules::principal::adapter::incoming::web::extractors::verified_identity::VerifiedIdentity;
use crate::shared::api::response::ApiResponse;
use crate::AppState;

#[get("/payments/packages")]
pub async fn list_packages_handler(data: web::Data<AppState>) -> impl Responder {
    let packages = data.list_packages_use_case.execute().await;
    ApiResponse::success(packages)
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub package_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[post("/payments/checkout")]
pub async fn create_checkout_handler(
    identity: VerifiedIdentity,
    body: web::Json<CheckoutRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    let input = CreateCheckoutInput {
        package_id: body.package_id,
        success_url: body.success_url,
        cancel_url: body.cancel_url,
    };

    match data.create_checkout_use_case.execute(identity, input).await {
        Ok(output) => ApiResponse::success(output),
        Err(CreateCheckoutError::UnknownPackage) => {
            ApiResponse::<()>::bad_request("UNKNOWN_PACKAGE", "unknown credit package")
        }
        Err(CreateCheckoutError::PrincipalError(msg))
        | Err(CreateCheckoutError::RepositoryError(msg))
        | Err(CreateCheckoutError::ProviderError(msg)) => {
            tracing::error!("create_checkout failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[derive(Deserialize)]
pub struct PaymentIntentRequest {
    pub package_id: String,
}

#[post("/payments/payment-intent")]
pub async fn create_payment_intent_handler(
    identity: VerifiedIdentity,
    body: web::Json<PaymentIntentRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let input = CreatePaymentIntentInput { package_id: body.into_inner().package_id };

    match data.create_payment_intent_use_case.execute(identity, input).await {
        Ok(output) => ApiResponse::success(output),
        Err(CreatePaymentIntentError::UnknownPackage) => {
            ApiResponse::<()>::bad_request("UNKNOWN_PACKAGE", "unknown credit package")
        }
        Err(CreatePaymentIntentError::PrincipalError(msg))
        | Err(CreatePaymentIntentError::RepositoryError(msg))
        | Err(CreatePaymentIntentError::ProviderError(msg)) => {
            tracing::error!("create_payment_intent failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[post("/webhooks/{provider}")]
pub async fn webhook_handler(
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let provider = path.into_inner();
    let signature = req
        .headers()
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match data.handle_webhook_use_case.execute(&provider, &body, signature).await {
        Ok(ReconcileOutcome::AlreadyProcessed) => {
            ApiResponse::success(serde_json::json!({ "status": "already_processed" }))
        }
        Ok(_) => ApiResponse::success(serde_json::json!({ "status": "ok" })),
        Err(HandleWebhookError::UnknownProvider) => {
            ApiResponse::<()>::bad_request("UNKNOWN_PROVIDER", "unsupported payments provider")
        }
        Err(HandleWebhookError::BadSignature) => {
            ApiResponse::<()>::bad_request("BAD_SIGNATURE", "webhook signature verification failed")
        }
        Err(HandleWebhookError::MissingSecret) => {
            tracing::error!("webhook secret not configured");
            ApiResponse::<()>::internal_error()
        }
        Err(HandleWebhookError::RepositoryError(msg)) | Err(HandleWebhookError::LedgerError(msg)) => {
            tracing::error!("webhook reconciliation failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}
