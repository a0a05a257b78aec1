//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::extract::extract_text;
use crate::generation::generator::{generate_documents, GenerationContext};
use crate::models::resume::{GenerationRequest, GenerationResponse};
use crate::state::AppState;

/// Multipart field carrying the uploaded PDF.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub file_name: String,
    pub text: String,
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// POST /generate
///
/// Full pipeline: model call (retried) → parse → normalize → render → publish.
/// Returns the two public PDF URLs plus the normalized text forms.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    require_text(&request.full_name, "full_name")?;
    require_text(&request.resume_text, "resume_text")?;
    require_text(&request.job_desc, "job_desc")?;

    let ctx = GenerationContext {
        model: state.model.as_ref(),
        retry: state.retry,
        publisher: &state.publisher,
        output_dir: &state.config.output_dir,
    };
    let response = generate_documents(&ctx, &request).await?;

    Ok(Json(response))
}

/// POST /extract
///
/// Accepts `multipart/form-data` with a `file` part holding a PDF and returns
/// its plain text, ready to be sent back as `resume_text`.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let text = extract_text(data.to_vec())
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
        info!(
            "Extracted {} chars from '{file_name}' ({} bytes)",
            text.chars().count(),
            data.len()
        );

        return Ok(Json(ExtractResponse { file_name, text }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}
