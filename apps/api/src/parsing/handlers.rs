use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::resume::{ParsedResume, RawDocument};
use crate::parsing::parse_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// A resume file plus any extra form fields sent alongside it.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub top_n: Option<usize>,
}

/// Reads the `resume` file field and an optional `top_n` field from a form.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut top_n = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::Validation("resume field has no file name".into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            Some("top_n") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read top_n: {e}")))?;
                top_n = Some(raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation(format!("top_n must be a non-negative integer, got '{raw}'"))
                })?);
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'resume' file field".into()))?;
    Ok(ResumeUpload {
        file_name,
        bytes,
        top_n,
    })
}

/// Extracts text off the async runtime and splits it into lines.
pub async fn document_from_upload(upload: ResumeUpload) -> Result<RawDocument, AppError> {
    let ResumeUpload {
        file_name, bytes, ..
    } = upload;
    let (file_name, text) = tokio::task::spawn_blocking(move || {
        extract_text(&file_name, &bytes).map(|text| (file_name, text))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;
    info!(file_name = %file_name, chars = text.len(), "Resume text extracted");
    non_blank(RawDocument::from_text(&text))
}

pub fn non_blank(doc: RawDocument) -> Result<RawDocument, AppError> {
    if doc.is_blank() {
        return Err(AppError::Validation("Resume text is empty".into()));
    }
    Ok(doc)
}

pub fn parse_with_state(state: &AppState, doc: &RawDocument) -> ParsedResume {
    parse_resume(doc, &state.classifier, &state.skills)
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let upload = read_resume_upload(multipart).await?;
    let doc = document_from_upload(upload).await?;
    Ok(Json(parse_with_state(&state, &doc)))
}

/// POST /api/v1/resumes/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    let doc = non_blank(RawDocument::from_text(&req.text))?;
    Ok(Json(parse_with_state(&state, &doc)))
}
