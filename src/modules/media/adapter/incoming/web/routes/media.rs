use actix_web::{delete, post, web, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaKind;
use crate::modules::media::application::ports::incoming::use_cases::commit_media::CommitMediaError;
use crate::modules::media::application::ports::incoming::use_cases::delete_media::DeleteMediaError;
use crate::modules::media::application::ports::incoming::use_cases::presign_media::{
    PresignMediaError, PresignMediaInput,
};
use crate::modules::principal::adapter::incoming::web::extractors::verified_identity::VerifiedIdentity;
use crate::shared::api::response::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct PresignRequest {
    pub session_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub content_type: String,
}

#[post("/uploads/presign")]
pub async fn presign_handler(
    identity: VerifiedIdentity,
    body: web::Json<PresignRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    let kind = match MediaKind::from_db_str(&body.kind) {
        Some(k) => k,
        None => {
            return ApiResponse::<()>::bad_request(
                "UNKNOWN_MEDIA_KIND",
                &format!("unknown media kind: {}", body.kind),
            )
        }
    };

    let input = PresignMediaInput { session_id: body.session_id, kind, content_type: body.content_type };

    match data.presign_media_use_case.execute(identity, input).await {
        Ok(output) => ApiResponse::success(output),
        Err(PresignMediaError::SessionNotFoundOrAccessDenied) => {
            ApiResponse::<()>::not_found("SESSION_NOT_FOUND", "session not found")
        }
        Err(PresignMediaError::ContentTypeNotAllowed) => {
            ApiResponse::<()>::bad_request("CONTENT_TYPE_NOT_ALLOWED", "content type not allowed for this media kind")
        }
        Err(PresignMediaError::PrincipalError(msg))
        | Err(PresignMediaError::RepositoryError(msg))
        | Err(PresignMediaError::GatewayError(msg)) => {
            tracing::error!("presign failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[derive(Deserialize)]
pub struct CommitRequest {
    pub media_id: Uuid,
    pub size_bytes: Option<i64>,
}

#[post("/uploads/commit")]
pub async fn commit_handler(
    identity: VerifiedIdentity,
    body: web::Json<CommitRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    match data.commit_media_use_case.execute(identity, body.media_id, body.size_bytes).await {
        Ok(media) => ApiResponse::success(media),
        Err(CommitMediaError::NotFoundOrAccessDenied) => {
            ApiResponse::<()>::not_found("MEDIA_NOT_FOUND", "media not found")
        }
        Err(CommitMediaError::PrincipalError(msg)) | Err(CommitMediaError::RepositoryError(msg)) => {
            tracing::error!("commit_media failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}

#[delete("/sessions/{session_id}/media/{media_id}")]
pub async fn delete_media_handler(
    identity: VerifiedIdentity,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (session_id, media_id) = path.into_inner();
    match data.delete_media_use_case.execute(identity, session_id, media_id).await {
        Ok(()) => ApiResponse::<()>::no_content(),
        Err(DeleteMediaError::NotFound) => ApiResponse::<()>::not_found("MEDIA_NOT_FOUND", "media not found"),
        Err(DeleteMediaError::PrincipalError(msg)) | Err(DeleteMediaError::RepositoryError(msg)) => {
            tracing::error!("delete_media failed: {msg}");
            ApiResponse::<()>::internal_error()
        }
    }
}
