//! Read-only HTTP note viewer.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | HTML index of all notes |
//! | `GET`  | `/notes` | JSON listing of current revisions |
//! | `GET`  | `/note/{id}` | One note's current revision, rendered |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! The viewer never writes; edits still go through the CLI. One repository
//! handle is shared behind a mutex since rusqlite connections are not `Sync`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::NoteId;
use crate::infra::{first_line, markdown_to_html, PREVIEW_FETCH_LEN};
use crate::store::{Repository, StoreError};

#[derive(Clone)]
struct AppState {
    repo: Arc<Mutex<Repository>>,
}

/// Starts the viewer on `addr` and serves until the process is terminated.
pub async fn run_server(repo: Repository, addr: &str) -> anyhow::Result<()> {
    let state = AppState {
        repo: Arc::new(Mutex::new(repo)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_index))
        .route("/notes", get(handle_notes))
        .route("/note/{id}", get(handle_note))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    info!(%addr, "note viewer listening");
    println!("note viewer listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error body: `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

fn classify_store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NoteNotFound { .. }
        | StoreError::BlobNotFound { .. }
        | StoreError::RevisionNotFound { .. } => not_found(err.to_string()),
        _ => internal(err.to_string()),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /notes ============

/// One entry in the JSON listing.
#[derive(Serialize)]
struct NoteSummary {
    id: i64,
    sha256: String,
    modified: String,
    preview: String,
}

async fn handle_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteSummary>>, AppError> {
    let repo = state.repo.lock().map_err(|_| internal("state poisoned"))?;
    summaries(&repo).map(Json)
}

fn summaries(repo: &Repository) -> Result<Vec<NoteSummary>, AppError> {
    let revs = repo.list_current_revisions().map_err(classify_store_error)?;

    let mut out = Vec::with_capacity(revs.len());
    for rev in revs {
        let head = repo
            .blob_head(&rev.sha256, PREVIEW_FETCH_LEN)
            .map_err(classify_store_error)?;
        out.push(NoteSummary {
            id: rev.note_id.as_i64(),
            sha256: rev.sha256.as_str().to_string(),
            modified: rev.timestamp.to_rfc3339(),
            preview: first_line(&head),
        });
    }
    Ok(out)
}

// ============ GET / ============

async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let repo = state.repo.lock().map_err(|_| internal("state poisoned"))?;
    let notes = summaries(&repo)?;

    let mut items = String::new();
    for n in &notes {
        items.push_str(&format!(
            "<li><a href=\"/note/{id}\">[{id}] {preview}</a> <small>{modified}</small></li>\n",
            id = n.id,
            preview = escape_html(&n.preview),
            modified = n.modified,
        ));
    }

    Ok(Html(page("Notes", &format!("<ul>\n{items}</ul>"))))
}

// ============ GET /note/{id} ============

async fn handle_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let repo = state.repo.lock().map_err(|_| internal("state poisoned"))?;

    let rev = repo
        .current_revision(NoteId::new(id))
        .map_err(classify_store_error)?;
    let body = repo.blob_body(&rev.sha256).map_err(classify_store_error)?;

    let content = markdown_to_html(&String::from_utf8_lossy(&body));
    let meta = format!(
        "<p><small>note {id} · revision {seq} · {ts}</small></p>",
        id = rev.note_id,
        seq = rev.seq,
        ts = rev.timestamp.to_rfc3339(),
    );

    Ok(Html(page(
        &format!("Note {id}"),
        &format!("{meta}\n{content}\n<p><a href=\"/\">all notes</a></p>"),
    )))
}

// ============ Page shell ============

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>body {{ max-width: 46rem; margin: 2rem auto; font-family: sans-serif; line-height: 1.5; padding: 0 1rem; }}</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_follow_listing_order() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.create_note(b"first note\nbody").unwrap();
        repo.create_note(b"second note\nbody").unwrap();

        let notes = summaries(&repo).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].preview, "second note");
        assert_eq!(notes[1].preview, "first note");
    }

    #[test]
    fn page_escapes_title() {
        let html = page("a < b", "");
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn store_errors_map_to_status() {
        let err = classify_store_error(StoreError::NoteNotFound {
            id: NoteId::new(3),
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_body_serializes_code_and_message() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "not_found".to_string(),
                message: "note not found: 3".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "note not found: 3");
    }
}
