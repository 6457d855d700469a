//! JSON API over posts, projects and the author
//!
//! Handlers rebuild nothing themselves: every request goes straight to the
//! repository or the catalog, which reread the content from disk. That work
//! is blocking, so it runs on tokio's blocking pool.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{self, PostRepository};
use crate::error::ContentError;
use crate::portfolio::{Author, ProjectCatalog};
use crate::Folio;

/// Server state
pub struct AppState {
    posts: PostRepository,
    projects: ProjectCatalog,
    author: Author,
}

impl AppState {
    pub fn new(folio: &Folio) -> Self {
        Self {
            posts: folio.posts(),
            projects: folio.projects(),
            author: folio.author().clone(),
        }
    }
}

/// Build the router; static files from `public_dir` are the fallback
pub fn router(folio: &Folio) -> Router {
    let state = Arc::new(AppState::new(folio));

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/tags", get(list_tags))
        .route("/api/tags/:tag", get(posts_by_tag))
        .route("/api/search", get(search_posts))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/:id", get(get_project))
        .route("/api/author", get(get_author))
        .route("/assets/highlight.css", get(highlight_css))
        .fallback_service(ServeDir::new(&folio.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Error body returned by every failing endpoint
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        if err.is_not_found() {
            return Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            };
        }
        tracing::error!("Request failed: {}", err);
        Self::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Run blocking content work off the async runtime
async fn blocking<T, F>(state: &Arc<AppState>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, ContentError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            tracing::error!("Content task panicked: {}", e);
            ApiError::internal("internal error")
        })?
        .map_err(ApiError::from)
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Response {
    match blocking(&state, |s| s.posts.list_summaries()).await {
        Ok(posts) => Json(posts).into_response(),
        Err(_) => ApiError::internal("Failed to fetch posts").into_response(),
    }
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let post = blocking(&state, move |s| {
        s.posts
            .get_by_slug(&slug)?
            .ok_or_else(|| ContentError::not_found("post", slug))
    })
    .await?;
    Ok(Json(post))
}

async fn list_tags(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let tags = blocking(&state, |s| s.posts.list_tags()).await?;
    Ok(Json(tags))
}

async fn posts_by_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let posts = blocking(&state, move |s| s.posts.list_by_tag(&tag)).await?;
    let summaries: Vec<content::PostSummary> = posts.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let summaries = blocking(&state, |s| s.posts.list_summaries()).await?;
    Ok(Json(content::search(&summaries, &params.q)))
}

#[derive(Debug, Deserialize)]
struct ProjectParams {
    #[serde(default)]
    featured: bool,
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProjectParams>,
) -> ApiResult<impl IntoResponse> {
    let projects = blocking(&state, move |s| {
        if params.featured {
            s.projects.list_featured()
        } else {
            s.projects.list_all()
        }
    })
    .await?;
    Ok(Json(projects))
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let project = blocking(&state, move |s| {
        s.projects
            .find_by_id(&id)?
            .ok_or_else(|| ContentError::not_found("project", id))
    })
    .await?;
    Ok(Json(project))
}

async fn get_author(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.author.clone())
}

async fn highlight_css(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let css = state.posts.renderer().stylesheet()?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css))
}
