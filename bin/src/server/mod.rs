//! HTTP front end: an upload form and an endpoint converting an uploaded
//! schedule into CSV.
//!
//! ## Endpoints
//! - `GET /` - upload form
//! - `POST /convert` - multipart upload with a `pdfFile` field, answered with
//!   `text/csv`


use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result, anyhow};
use axum::{
    Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use extraction::Extractor;

use crate::{
    output::{self, Document},
    textsource::TextSource,
};

const UPLOAD_FIELD: &str = "pdfFile";
const UPLOAD_FORM: &str = include_str!("upload.html");

struct AppState {
    extractor: Extractor,
    source: Box<dyn TextSource>,
}

/// Builds the application router. Uploads larger than `max_upload_bytes` are
/// refused.
pub fn router(
    extractor: Extractor,
    source: Box<dyn TextSource>,
    max_upload_bytes: usize,
) -> Router {
    let state = Arc::new(AppState { extractor, source });

    Router::new()
        .route("/", get(upload_form))
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Serves `app` on `addr` until Ctrl-C is received.
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    let local_addr = listener.local_addr().context("reading bound address")?;
    log::info!("Server started on http://{local_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("Server shutting down");
}

async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// Failures of a conversion request, each mapped to a plain text response.
enum ConvertError {
    NoFile,
    Upload(MultipartError),
    NoTable,
    Processing(anyhow::Error),
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        match self {
            ConvertError::NoFile => (StatusCode::BAD_REQUEST, "No file uploaded.").into_response(),
            ConvertError::Upload(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                log::warn!("Rejected upload: {err}");
                (err.status(), err.body_text()).into_response()
            }
            ConvertError::Upload(err) => {
                log::error!("Error reading upload: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error processing PDF.").into_response()
            }
            ConvertError::NoTable => {
                (StatusCode::BAD_REQUEST, "No table data found in the PDF.").into_response()
            }
            ConvertError::Processing(err) => {
                log::error!("Error processing PDF: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error processing PDF.").into_response()
            }
        }
    }
}

async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Response, ConvertError> {
    let multipart = multipart.map_err(|_| ConvertError::NoFile)?;
    let upload = read_upload(multipart).await?.ok_or(ConvertError::NoFile)?;

    let doc = tokio::task::spawn_blocking(move || extract_document(&state, &upload))
        .await
        .map_err(|err| ConvertError::Processing(anyhow!("extraction task failed: {err}")))?
        .map_err(ConvertError::Processing)?;

    if doc.table.is_empty() {
        return Err(ConvertError::NoTable);
    }

    let mut body = Vec::new();
    output::write_csv(&doc.table, &mut body).map_err(ConvertError::Processing)?;
    let disposition = format!(
        "attachment; filename={}.csv",
        output::file_stem(doc.title.as_deref())
    );

    log::info!("Converted upload into {} rows", doc.table.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Returns the contents of the upload field, or `None` if it is absent or
/// empty.
async fn read_upload(
    mut multipart: Multipart,
) -> std::result::Result<Option<Bytes>, ConvertError> {
    while let Some(field) = multipart.next_field().await.map_err(ConvertError::Upload)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let data = field.bytes().await.map_err(ConvertError::Upload)?;
        return Ok((!data.is_empty()).then_some(data));
    }
    Ok(None)
}

fn extract_document(state: &AppState, data: &[u8]) -> Result<Document> {
    let text = state.source.read_text(data)?;
    log::trace!("Raw document text:\n{text}");

    let lines: Vec<&str> = text.lines().collect();
    let table = state.extractor.extract(&lines);
    let title = state.extractor.find_title(&lines);

    if log::log_enabled!(log::Level::Debug) {
        let rendered = serde_json::to_string_pretty(&table).context("rendering table")?;
        log::debug!("Parsed table data:\n{rendered}");
    }

    Ok(Document { title, table })
}
