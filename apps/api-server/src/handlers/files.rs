//! Lead upload endpoint.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use futures::future::ready;
use futures::stream::once;
use multer::Multipart;

use glimpse_core::import::parse_lead_csv;
use glimpse_shared::dto::UploadResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    Csv,
    Json,
    Unsupported,
}

/// Classify a part by the essence of its content type.
fn classify(essence: Option<&str>) -> UploadKind {
    match essence {
        Some("text/csv") => UploadKind::Csv,
        Some("application/json") => UploadKind::Json,
        _ => UploadKind::Unsupported,
    }
}

struct UploadedFile {
    filename: Option<String>,
    essence: Option<String>,
    contents: web::Bytes,
}

/// Pull the `file` part out of a buffered multipart body.
async fn read_file_part(req: &HttpRequest, body: web::Bytes) -> AppResult<UploadedFile> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Expected multipart/form-data".to_string()))?;
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e)))?;

    let stream = once(ready(Ok::<_, std::io::Error>(body)));
    let mut multipart = Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let essence = field.content_type().map(|m| m.essence_str().to_string());
        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?;
        return Ok(UploadedFile {
            filename,
            essence,
            contents,
        });
    }

    Err(AppError::BadRequest(format!("Missing '{}' field", FILE_FIELD)))
}

/// Import leads from an uploaded CSV file.
///
/// POST /files/
pub async fn upload_file(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let file = read_file_part(&req, body).await?;

    match classify(file.essence.as_deref()) {
        UploadKind::Csv => {}
        UploadKind::Json => {
            tracing::warn!(
                filename = ?file.filename,
                "JSON uploads are not supported, nothing imported"
            );
            return Ok(HttpResponse::Ok().json(UploadResponse {
                filename: file.filename,
                processed_count: 0,
                status: "unsupported".to_string(),
            }));
        }
        UploadKind::Unsupported => {
            return Err(AppError::BadRequest("Unsupported file type".to_string()));
        }
    }

    let text = std::str::from_utf8(&file.contents)
        .map_err(|e| AppError::BadRequest(format!("File is not valid UTF-8: {}", e)))?;

    let import = parse_lead_csv(text);
    for rejected in &import.rejected {
        tracing::warn!(line = rejected.line, reason = %rejected.reason, "Skipping CSV row");
    }

    let processed_count = state
        .leads
        .upsert_batch(import.leads)
        .await
        .map_err(|e| AppError::Failure(format!("Failed to process file: {}", e)))?;

    tracing::info!(
        filename = ?file.filename,
        processed_count,
        skipped = import.rejected.len(),
        "Lead file imported"
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        filename: file.filename,
        processed_count,
        status: "success".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_essence() {
        assert_eq!(classify(Some("text/csv")), UploadKind::Csv);
        assert_eq!(classify(Some("application/json")), UploadKind::Json);
        assert_eq!(classify(Some("text/plain")), UploadKind::Unsupported);
        assert_eq!(classify(None), UploadKind::Unsupported);
    }
}
