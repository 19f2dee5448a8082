// HTTP request handlers
use crate::domain::analysis::Scope;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    /// `all` or a phase index; absent means the remembered scope
    pub phase: Option<String>,
}

impl ScopeQuery {
    fn scope(&self) -> Result<Option<Scope>, ApiError> {
        Ok(self.phase.as_deref().map(str::parse::<Scope>).transpose()?)
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Upload a raw CSV log
pub async fn upload_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content = String::from_utf8(body.to_vec())
        .map_err(|_| ApiError::BadRequest("log must be UTF-8 text".to_string()))?;
    let name = query.name.unwrap_or_default();

    let uploaded = state.session_service.upload(&name, content).await?;
    Ok(json_response(&uploaded, StatusCode::CREATED, accepts_brotli(&headers)).await?)
}

/// List uploaded logs
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let sessions = state.session_service.list().await?;
    Ok(json_response(&sessions, StatusCode::OK, accepts_brotli(&headers)).await?)
}

/// Full analysis of one log
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ScopeQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let scope = query.scope()?;
    let analysis = state.session_service.analyze(&id, scope).await?;
    Ok(json_response(&analysis, StatusCode::OK, accepts_brotli(&headers)).await?)
}

/// Stream the analysis of one log (progressive loading)
pub async fn stream_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ScopeQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let scope = query.scope()?;
    let rx = state.streaming_service.stream_analysis(&id, scope).await?;
    Ok(stream_from_receiver(rx, accepts_brotli(&headers))
        .await
        .into_response())
}

pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.session_service.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
