//! Generation Orchestrator: model call → parse → normalize → render → publish.
//!
//! The model call runs under a [`RetryPolicy`]. Rendering is CPU-bound and
//! runs on `spawn_blocking`, writing each PDF to a transient file in the
//! output directory. The transient files are removed once both documents are
//! published; if publication fails they are kept on disk for inspection.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::normalizer::normalize;
use crate::generation::parser::extract_json;
use crate::generation::retry::RetryPolicy;
use crate::llm_client::prompts::{build_generation_prompt, GENERATION_SYSTEM};
use crate::llm_client::CompletionModel;
use crate::models::resume::{GenerationRequest, GenerationResponse};
use crate::render::cover_letter::{render_cover_letter, CoverLetterInput};
use crate::render::flow::RenderedDocument;
use crate::render::pdf::write_pdf;
use crate::render::resume::{render_resume, ResumeHeader};
use crate::render::RenderError;
use crate::storage::{Publisher, StorageError};

pub const RESUME_PREFIX: &str = "resume";
pub const COVER_LETTER_PREFIX: &str = "cover_letter";

/// Everything the pipeline needs besides the request itself.
pub struct GenerationContext<'a> {
    pub model: &'a dyn CompletionModel,
    pub retry: RetryPolicy,
    pub publisher: &'a Publisher,
    pub output_dir: &'a Path,
}

/// Full name lower-cased with spaces replaced by `_`.
pub fn user_slug(full_name: &str) -> String {
    full_name.trim().to_lowercase().replace(' ', "_")
}

/// `{prefix}_{YYYYMMDD_HHMMSS}_{request-id}` (no extension).
pub fn document_stem(prefix: &str, stamp: &str, request_id: Uuid) -> String {
    format!("{prefix}_{stamp}_{request_id}")
}

/// Object key for a published document: `{prefix}/{user_slug}_{file_name}`.
pub fn remote_key(prefix: &str, user_slug: &str, file_name: &str) -> String {
    format!("{prefix}/{user_slug}_{file_name}")
}

/// A rendered PDF waiting in the output directory.
struct TransientPdf {
    file: NamedTempFile,
    file_name: String,
}

/// Renders on a blocking thread and writes the PDF to
/// `{output_dir}/{stem}.pdf`.
async fn render_to_file<F>(
    output_dir: &Path,
    stem: String,
    title: String,
    build: F,
) -> Result<TransientPdf, AppError>
where
    F: FnOnce() -> RenderedDocument + Send + 'static,
{
    let dir: PathBuf = output_dir.to_path_buf();
    let file_name = format!("{stem}.pdf");

    let file = tokio::task::spawn_blocking(move || -> Result<NamedTempFile, RenderError> {
        let document = build();
        let mut file = tempfile::Builder::new()
            .prefix(&stem)
            .suffix(".pdf")
            .rand_bytes(0)
            .tempfile_in(&dir)?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            write_pdf(&document, &title, &mut writer)?;
            writer.flush()?;
        }
        Ok(file)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    Ok(TransientPdf { file, file_name })
}

/// Keeps a transient file on disk after a failed publication.
fn retain(pdf: TransientPdf) {
    match pdf.file.keep() {
        Ok((_, path)) => warn!("Publication failed; kept {} on disk", path.display()),
        Err(e) => warn!("Publication failed and {} could not be kept: {e}", pdf.file_name),
    }
}

/// Removes a transient file after successful publication.
fn discard(pdf: TransientPdf) {
    let path = pdf.file.path().to_path_buf();
    if let Err(e) = pdf.file.close() {
        warn!("Failed to remove transient file {}: {e}", path.display());
    }
}

/// Runs the whole pipeline for one request.
pub async fn generate_documents(
    ctx: &GenerationContext<'_>,
    request: &GenerationRequest,
) -> Result<GenerationResponse, AppError> {
    let request_id = Uuid::new_v4();
    info!("Generation {request_id}: requesting tailored documents");

    // Step 1: model call under retry
    let prompt = build_generation_prompt(&request.resume_text, &request.job_desc);
    let model = ctx.model;
    let prompt_ref = prompt.as_str();
    let raw = ctx
        .retry
        .run(move || model.complete(GENERATION_SYSTEM, prompt_ref))
        .await?;
    info!(
        "Generation {request_id}: model returned {} chars",
        raw.chars().count()
    );

    // Step 2: parse + normalize
    let parsed = extract_json(&raw);
    if parsed.is_none() {
        warn!("Generation {request_id}: no JSON object in model output, degrading to summary");
    }
    let content = normalize(parsed.as_ref(), &raw);
    let text_resume = serde_json::to_string_pretty(&content.resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume serialization failed: {e}")))?;

    // Step 3: render both documents
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let today = Local::now().date_naive();

    let resume_pdf = {
        let record = content.resume.clone();
        let full_name = request.full_name.clone();
        let email = request.email.clone();
        let phone = request.phone.clone();
        render_to_file(
            ctx.output_dir,
            document_stem(RESUME_PREFIX, &stamp, request_id),
            format!("{full_name} \u{2014} Resume"),
            move || {
                let header = ResumeHeader {
                    full_name: &full_name,
                    email: email.as_deref(),
                    phone: phone.as_deref(),
                };
                render_resume(&header, &record)
            },
        )
        .await?
    };

    let cover_pdf = {
        let body = content.cover_letter.clone();
        let request = request.clone();
        render_to_file(
            ctx.output_dir,
            document_stem(COVER_LETTER_PREFIX, &stamp, request_id),
            format!("{} \u{2014} Cover Letter", request.full_name),
            move || {
                render_cover_letter(&CoverLetterInput {
                    full_name: &request.full_name,
                    body: &body,
                    job_desc: &request.job_desc,
                    email: request.email.as_deref(),
                    phone: request.phone.as_deref(),
                    company: request.company_name.as_deref(),
                    location: request.city_state.as_deref(),
                    date: today,
                })
            },
        )
        .await?
    };

    // Step 4: publish
    let slug = user_slug(&request.full_name);
    let resume_key = remote_key(RESUME_PREFIX, &slug, &resume_pdf.file_name);
    let cover_key = remote_key(COVER_LETTER_PREFIX, &slug, &cover_pdf.file_name);

    let published: Result<(String, String), StorageError> = async {
        let resume_url = ctx
            .publisher
            .publish(resume_pdf.file.path(), &resume_key)
            .await?;
        let cover_url = ctx
            .publisher
            .publish(cover_pdf.file.path(), &cover_key)
            .await?;
        Ok((resume_url, cover_url))
    }
    .await;

    let (resume_url, cover_url) = match published {
        Ok(urls) => urls,
        Err(e) => {
            retain(resume_pdf);
            retain(cover_pdf);
            return Err(e.into());
        }
    };

    // Step 5: cleanup
    discard(resume_pdf);
    discard(cover_pdf);

    info!("Generation {request_id}: published {resume_key} and {cover_key}");

    Ok(GenerationResponse {
        resume_pdf: resume_url,
        cover_pdf: cover_url,
        text_resume,
        text_cover: content.cover_letter,
    })
}
