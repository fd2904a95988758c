//! Manga HTTP Routes
//!
//! CRUD endpoints over the manga collection. The same router is mounted
//! under `/records` and `/api/v1/manga`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use super::errors::{ApiError, ApiResult};
use crate::domain::{Manga, MangaCreateDto, MangaDto, MangaId};
use crate::observability::Logger;
use crate::repository::RepositoryResult;
use crate::service::MangaService;

// ==================
// Shared State
// ==================

/// Manga state shared across handlers
pub struct MangaState {
    pub service: MangaService,
}

impl MangaState {
    pub fn new(service: MangaService) -> Self {
        Self { service }
    }
}

// ==================
// Manga Routes
// ==================

/// Create manga routes
pub fn manga_routes(state: Arc<MangaState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_handler(State(state): State<Arc<MangaState>>) -> Json<Vec<MangaDto>> {
    let mangas = state.service.get_all();
    Json(mangas.iter().map(MangaDto::from).collect())
}

async fn get_handler(
    State(state): State<Arc<MangaState>>,
    Path(id): Path<MangaId>,
) -> ApiResult<Json<MangaDto>> {
    state
        .service
        .get_by_id(id)
        .map(|manga| Json(MangaDto::from(manga)))
        .ok_or(ApiError::NotFound(id))
}

async fn create_handler(
    State(state): State<Arc<MangaState>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<MangaCreateDto>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    payload.validate().map_err(ApiError::InvalidBody)?;

    let new_manga = payload.into_new_manga(Utc::now());
    let service = state.service.clone();
    let created = run_blocking(move || service.create(new_manga)).await?;
    let id = created.id.to_string();
    Logger::info(
        "RECORD_CREATED",
        &[("id", id.as_str()), ("title", created.title.as_str())],
    );

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MangaDto::from(created)),
    ))
}

async fn update_handler(
    State(state): State<Arc<MangaState>>,
    Path(id): Path<MangaId>,
    body: Result<Json<Manga>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(manga) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    if manga.id != id {
        return Err(ApiError::IdMismatch {
            route: id,
            body: manga.id,
        });
    }
    manga.validate().map_err(ApiError::InvalidBody)?;

    let service = state.service.clone();
    run_blocking(move || service.update(manga)).await?;
    Logger::info("RECORD_UPDATED", &[("id", id.to_string().as_str())]);

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_handler(
    State(state): State<Arc<MangaState>>,
    Path(id): Path<MangaId>,
) -> ApiResult<StatusCode> {
    let service = state.service.clone();
    run_blocking(move || service.delete(id)).await?;
    Logger::info("RECORD_DELETED", &[("id", id.to_string().as_str())]);

    Ok(StatusCode::NO_CONTENT)
}

/// Run a mutation on the blocking pool; writes fsync and rename the data bank
async fn run_blocking<T, F>(mutation: F) -> ApiResult<T>
where
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(mutation).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(err) => {
            let reason = err.to_string();
            Logger::error("STORAGE_TASK_FAILED", &[("reason", reason.as_str())]);
            Err(ApiError::Internal(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MangaRepository;

    #[test]
    fn test_manga_state_creation() {
        let service = MangaService::new(Arc::new(MangaRepository::unbacked()));
        let state = MangaState::new(service);
        assert!(state.service.get_all().is_empty());
    }

    #[tokio::test]
    async fn test_run_blocking_maps_results() {
        let ok = run_blocking(|| Ok(7)).await.unwrap();
        assert_eq!(ok, 7);

        let err = run_blocking(|| -> RepositoryResult<()> {
            Err(crate::repository::RepositoryError::NotFound(4))
        })
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_blocking_reports_panicked_task() {
        let err = run_blocking(|| -> RepositoryResult<()> { panic!("writer crashed") })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
