use std::{net::SocketAddr, path::Path as FsPath, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    routing::{delete, get, post, put},
    Json, Router,
};
use shared::{
    domain::BookRecord,
    error::ApiError,
    protocol::{
        add_route, delete_route_template, get_route_template, list_route, update_route_template,
    },
};
use tracing::info;

mod api;
mod app_state;
mod config;
mod repository;

use api::{
    add_book, delete_book, get_book, invalid_book_body, list_books, route_not_found, update_book,
    ApiContext,
};
use app_state::AppState;
use config::{load_seed_books, load_settings};
use repository::BookRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let books = match settings.seed_path.as_deref() {
        Some(path) => {
            let seed = load_seed_books(FsPath::new(path))?;
            info!(path, count = seed.len(), "seeded book table");
            BookRepository::with_books(seed)
        }
        None => BookRepository::default(),
    };

    let state = AppState {
        api: ApiContext { books },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "bookapi listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(list_route(), get(http_list_books))
        .route(add_route(), post(http_add_book))
        .route(update_route_template(), put(http_update_book))
        .route(delete_route_template(), delete(http_delete_book))
        .route(get_route_template(), get(http_get_book))
        .fallback(not_found)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookRecord>> {
    Json(list_books(&state.api).await)
}

async fn http_get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<Option<BookRecord>> {
    Json(get_book(&state.api, &id).await)
}

type ApiFailure = (StatusCode, Json<ApiError>);

async fn http_add_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRecord>, JsonRejection>,
) -> Result<Json<BookRecord>, ApiFailure> {
    let Json(book) = payload.map_err(rejected_body)?;
    Ok(Json(add_book(&state.api, book).await))
}

async fn http_update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<BookRecord>, JsonRejection>,
) -> Result<Json<Option<BookRecord>>, ApiFailure> {
    let Json(details) = payload.map_err(rejected_body)?;
    Ok(Json(update_book(&state.api, &id, details).await))
}

fn rejected_body(rejection: JsonRejection) -> ApiFailure {
    (rejection.status(), Json(invalid_book_body(rejection.body_text())))
}

async fn http_delete_book(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> String {
    delete_book(&state.api, &id).await
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (StatusCode::NOT_FOUND, Json(route_not_found(uri.path())))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
