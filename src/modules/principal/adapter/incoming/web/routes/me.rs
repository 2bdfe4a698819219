use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::principal::adapter::incoming::web::extractors::verified_identity::VerifiedIdentity;
use crate::modules::principal::application::ports::incoming::use_cases::get_me::GetMeError;
use crate::modules::principal::application::ports::incoming::use_cases::set_preferred_language::SetPreferredLanguageError;
use crate::modules::principal::application::ports::incoming::use_cases::set_push_token::SetPushTokenError;
use crate::shared::api::response::ApiResponse;
use crate::AppState;

#[derive(Serialize)]
struct CreditsResponse {
    credits: i32,
}

#[get("/me/credits")]
pub async fn get_credits_handler(
    identity: VerifiedIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.get_me_use_case.execute(identity).await {
        Ok(output) => ApiResponse::success(CreditsResponse {
            credits: output.credits,
        }),
        Err(GetMeError::RepositoryError(msg)) => {
            tracing::error!("get_me failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[derive(Deserialize)]
pub struct SetPushTokenRequest {
    pub token: String,
}

#[post("/me/fcm-token")]
pub async fn set_push_token_handler(
    identity: VerifiedIdentity,
    body: web::Json<SetPushTokenRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .set_push_token_use_case
        .execute(identity, body.into_inner().token)
        .await
    {
        Ok(()) => ApiResponse::success(()),
        Err(SetPushTokenError::RepositoryError(msg)) => {
            tracing::error!("set_push_token failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[derive(Deserialize)]
pub struct SetPreferredLanguageRequest {
    pub language: String,
}

#[post("/me/preferred-language")]
pub async fn set_preferred_language_handler(
    identity: VerifiedIdentity,
    body: web::Json<SetPreferredLanguageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .set_preferred_language_use_case
        .execute(identity, body.into_inner().language)
        .await
    {
        Ok(()) => ApiResponse::success(()),
        Err(SetPreferredLanguageError::UnsupportedLanguage(lang)) => ApiResponse::<()>::bad_request(
            "UNSUPPORTED_LANGUAGE",
            &format!("unsupported language: {lang}"),
        ),
        Err(SetPreferredLanguageError::RepositoryError(msg)) => {
            tracing::error!("set_preferred_language failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}
