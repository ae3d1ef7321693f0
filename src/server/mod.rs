//! HTTP server
//!
//! Each request performs its own synchronous sequence of file reads over
//! immutable shared state; the runtime multiplexes concurrent requests.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{ContentStore, StoreError};
use crate::helpers::date::display_date;
use crate::templates::{PostItem, TemplateRenderer};
use crate::Site;

/// Server state shared across requests
struct ServerState {
    store: ContentStore,
    templates: TemplateRenderer,
    public_dir: PathBuf,
    date_format: String,
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        store: site.store(),
        templates: TemplateRenderer::new()?,
        public_dir: site.public_dir.clone(),
        date_format: site.config.date_format.clone(),
    });

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(show_post))
        .route("/search", get(search))
        .fallback(show_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /posts - rendered list of all posts, newest first
async fn list_posts(State(state): State<Arc<ServerState>>) -> Response {
    let posts = match state.store.list_posts() {
        Ok(posts) => posts,
        Err(err) => return store_error_response(err),
    };

    let items: Vec<PostItem> = posts
        .iter()
        .map(|post| PostItem {
            title: post.title.clone(),
            date: display_date(post.date.as_deref(), &state.date_format),
            url: post.url(),
        })
        .collect();

    match state
        .templates
        .post_list(&items)
        .and_then(|body| state.templates.layout("Posts", &body))
    {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(err),
    }
}

/// GET /posts/:slug - rendered single post, 404 if the file is absent
async fn show_post(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    match state.store.get_post(&slug) {
        Ok(post) => render_layout(&state, StatusCode::OK, &post.title, &post.content),
        Err(StoreError::PostNotFound(_)) => {
            render_layout(&state, StatusCode::NOT_FOUND, "404", "Post not found")
        }
        Err(err) => store_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

/// GET /search?query=... - rendered search results
async fn search(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing required query parameter: query",
        )
            .into_response();
    };

    let posts = match state.store.search(&query) {
        Ok(posts) => posts,
        Err(err) => return store_error_response(err),
    };

    let items: Vec<PostItem> = posts
        .iter()
        .map(|post| PostItem {
            title: post.title.clone(),
            date: display_date(post.date.as_deref(), &state.date_format),
            url: post.url(),
        })
        .collect();

    let title = format!("Search Results for \"{}\"", query);
    match state
        .templates
        .search_results(&query, &items)
        .and_then(|body| state.templates.layout(&title, &body))
    {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(err),
    }
}

/// Fallback handler: static assets first, then top-level markdown pages
/// (`/` maps to the `index` page)
async fn show_page(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    let path = request.uri().path().trim_matches('/').to_string();

    // Static assets take priority over markdown pages
    if !path.is_empty() && state.public_dir.join(&path).is_file() {
        let mut service = ServeDir::new(&state.public_dir);
        return match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        };
    }

    let name = if path.is_empty() { "index" } else { path.as_str() };

    // Only single-segment paths name pages
    if name.contains('/') {
        return render_layout(&state, StatusCode::NOT_FOUND, "404", "Page not found");
    }

    match state.store.get_page(name) {
        Ok(page) => render_layout(&state, StatusCode::OK, &page.title(), &page.content),
        Err(StoreError::PageNotFound(_)) => {
            render_layout(&state, StatusCode::NOT_FOUND, "404", "Page not found")
        }
        Err(err) => store_error_response(err),
    }
}

/// Render content through the shared layout with the given status
fn render_layout(state: &ServerState, status: StatusCode, title: &str, content: &str) -> Response {
    match state.templates.layout(title, content) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => internal_error(err),
    }
}

/// Map repository failures onto responses; no error terminates the process
fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::DirectoryRead { .. } => {
            tracing::error!("posts directory unreadable: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading posts directory",
            )
                .into_response()
        }
        other => internal_error(other),
    }
}

fn internal_error<E: std::fmt::Display>(err: E) -> Response {
    tracing::error!("request failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
