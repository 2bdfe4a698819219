use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::principal::adapter::incoming::web::extractors::verified_identity::VerifiedIdentity;
use crate::modules::session::application::domain::entities::BlockType;
use crate::modules::session::application::ports::incoming::use_cases::append_block::{
    AppendBlockError, AppendBlockInput,
};
use crate::modules::session::application::ports::incoming::use_cases::create_session::CreateSessionError;
use crate::modules::session::application::ports::incoming::use_cases::delete_session::DeleteSessionError;
use crate::modules::session::application::ports::incoming::use_cases::finalize_session::FinalizeSessionError;
use crate::modules::session::application::ports::incoming::use_cases::get_session::GetSessionError;
use crate::shared::api::response::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub session_type: String,
    pub language: Option<String>,
}

#[post("/sessions")]
pub async fn create_session_handler(
    identity: VerifiedIdentity,
    body: web::Json<CreateSessionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    match data
        .create_session_use_case
        .execute(identity, body.session_type, body.language)
        .await
    {
        Ok(session) => ApiResponse::created(session),
        Err(CreateSessionError::PrincipalError(msg)) | Err(CreateSessionError::RepositoryError(msg)) => {
            tracing::error!("create_session failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[derive(Deserialize)]
pub struct AppendBlockRequest {
    pub block_type: String,
    pub text_content: Option<String>,
    pub media_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[post("/sessions/{id}/blocks")]
pub async fn append_block_handler(
    identity: VerifiedIdentity,
    path: web::Path<Uuid>,
    body: web::Json<AppendBlockRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    let block_type = match BlockType::from_db_str(&body.block_type) {
        Some(bt) => bt,
        None => {
            return ApiResponse::<()>::bad_request(
                "UNKNOWN_BLOCK_TYPE",
                &format!("unknown block type: {}", body.block_type),
            )
        }
    };

    let input = AppendBlockInput {
        block_type,
        text_content: body.text_content,
        media_object_key: body.media_url,
        metadata: body.metadata,
    };

    match data
        .append_block_use_case
        .execute(identity, path.into_inner(), input)
        .await
    {
        Ok(block) => ApiResponse::created(block),
        Err(AppendBlockError::ClientCannotAppendType(_)) => {
            ApiResponse::<()>::bad_request("BLOCK_TYPE_NOT_CLIENT_APPENDABLE", "this block type is pipeline-only")
        }
        Err(AppendBlockError::NotFoundOrAccessDenied) => {
            ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found")
        }
        Err(AppendBlockError::StateConflict) => {
            ApiResponse::<()>::bad_request("SESSION_NOT_OPEN", "session is not open")
        }
        Err(AppendBlockError::PrincipalError(msg)) | Err(AppendBlockError::RepositoryError(msg)) => {
            tracing::error!("append_block failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[post("/sessions/{id}/finalize")]
pub async fn finalize_session_handler(
    identity: VerifiedIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .finalize_session_use_case
        .execute(identity, path.into_inner())
        .await
    {
        Ok(output) => HttpResponse::Accepted().json(ApiResponse {
            success: true,
            data: Some(output),
            error: None,
        }),
        Err(FinalizeSessionError::NotFoundOrAccessDenied) => {
            ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found")
        }
        Err(FinalizeSessionError::StateConflict) => {
            ApiResponse::<()>::conflict("SESSION_NOT_OPEN", "session is not open")
        }
        Err(FinalizeSessionError::NoBlocks) => {
            ApiResponse::<()>::bad_request("SESSION_HAS_NO_BLOCKS", "session has no blocks to finalize")
        }
        Err(FinalizeSessionError::PrincipalError(msg)) | Err(FinalizeSessionError::RepositoryError(msg)) => {
            tracing::error!("finalize_session failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[get("/sessions/{id}")]
pub async fn get_session_handler(
    identity: VerifiedIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.get_session_use_case.execute(identity, path.into_inner()).await {
        Ok(session) => ApiResponse::success(session),
        Err(GetSessionError::NotFound) => ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found"),
        Err(GetSessionError::PrincipalError(msg)) | Err(GetSessionError::RepositoryError(msg)) => {
            tracing::error!("get_session failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[get("/sessions/{id}/blocks")]
pub async fn list_blocks_handler(
    identity: VerifiedIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.list_blocks_use_case.execute(identity, path.into_inner()).await {
        Ok(blocks) => ApiResponse::success(blocks),
        Err(GetSessionError::NotFound) => ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found"),
        Err(GetSessionError::PrincipalError(msg)) | Err(GetSessionError::RepositoryError(msg)) => {
            tracing::error!("list_blocks failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[delete("/sessions/{id}")]
pub async fn delete_session_handler(
    identity: VerifiedIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .delete_session_use_case
        .execute(identity, path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::<()>::no_content(),
        Err(DeleteSessionError::NotFound) => ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found"),
        Err(DeleteSessionError::PrincipalError(msg)) | Err(DeleteSessionError::RepositoryError(msg)) => {
            tracing::error!("delete_session failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}
