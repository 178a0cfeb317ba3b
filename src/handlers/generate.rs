//! Book generation handlers
//!
//! HTTP handlers for turning a repository URL into a downloadable PDF.

use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::error::AppError;
use crate::models::GenerateRequest;
use crate::services::book::BookError;
use crate::services::converter::ConvertError;
use crate::services::github::GithubError;

/// POST /generate
///
/// Generate a PDF book from the top-level Markdown files of the repository
/// named in the request body and return it as a download.
pub async fn generate_book(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    let book = state
        .books
        .generate(&request.repo_url)
        .await
        .map_err(map_book_error)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}-book.pdf\"", book.project),
        ))
        .body(book.pdf))
}

/// JSON extractor configuration that reports body problems in the standard
/// error envelope instead of actix's plain-text default
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Map book pipeline errors to application errors
fn map_book_error(e: BookError) -> AppError {
    match e {
        BookError::InvalidUrl(err) => AppError::InvalidInput(err.to_string()),
        BookError::NoContent(msg) => AppError::NoContent(msg),
        BookError::Github(err) => map_github_error(err),
        BookError::Workspace(err) => AppError::Workspace(err.to_string()),
        BookError::Convert(err) => map_convert_error(err),
    }
}

fn map_github_error(e: GithubError) -> AppError {
    match e {
        GithubError::RateLimited { message, reset_at } => {
            AppError::RateLimited { message, reset_at }
        }
        GithubError::Parse(err) => AppError::UpstreamParse(err.to_string()),
        GithubError::Upstream { .. } | GithubError::Network(_) | GithubError::Download { .. } => {
            AppError::Upstream(e.to_string())
        }
    }
}

fn map_convert_error(e: ConvertError) -> AppError {
    match e {
        ConvertError::Failed { detail } => AppError::Conversion(detail),
        ConvertError::Launch { .. } => AppError::Conversion(e.to_string()),
        ConvertError::Workspace(err) => AppError::Workspace(err.to_string()),
    }
}

pub fn configure_generate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/generate").route(web::post().to(generate_book)));
}
