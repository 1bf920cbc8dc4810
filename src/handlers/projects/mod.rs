use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::database::models::Project;
use crate::database::repository::ProjectRepository;
use crate::error::ApiError;
use crate::handlers::db_error;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectPayload {
    pub video: Option<String>,
    pub audio: Option<String>,
}

/// GET /api/projects/
pub async fn list_projects(State(state): State<AppState>) -> ApiResult {
    let projects = ProjectRepository::new(&state.db)
        .find_all()
        .await
        .map_err(db_error("Error al obtener proyectos"))?;

    let data: Vec<_> = projects.iter().map(Project::to_response).collect();

    Ok(ApiResponse::success(
        "Proyectos obtenidos exitosamente",
        json!({ "projects": data, "count": data.len() }),
    ))
}

/// GET /api/projects/:project_id
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult {
    let project = ProjectRepository::new(&state.db)
        .find_by_id(&project_id)
        .await
        .map_err(db_error("Error al obtener proyecto"))?
        .ok_or_else(|| ApiError::not_found("Proyecto no encontrado"))?;

    Ok(ApiResponse::success(
        "Proyecto obtenido exitosamente",
        json!({ "project": project.to_response() }),
    ))
}

/// POST /api/projects/
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> ApiResult {
    // Checked before any persistence attempt
    let video = payload
        .video
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("La URL del video es requerida"))?;

    let mut project = Project::new(video, payload.audio.filter(|a| !a.is_empty()));
    ProjectRepository::new(&state.db)
        .save(&mut project)
        .await
        .map_err(db_error("Error al crear proyecto"))?;

    tracing::info!(project_id = ?project.id, "proyecto creado");

    Ok(ApiResponse::created(
        "Proyecto creado exitosamente",
        json!({ "project": project.to_response() }),
    ))
}

/// PUT /api/projects/:project_id
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<ProjectPayload>,
) -> ApiResult {
    let repo = ProjectRepository::new(&state.db);

    // A missing record wins over validation of the payload
    let mut project = repo
        .find_by_id(&project_id)
        .await
        .map_err(db_error("Error al actualizar proyecto"))?
        .ok_or_else(|| ApiError::not_found("Proyecto no encontrado"))?;

    let video = payload
        .video
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("La URL del video es requerida"))?;

    project.video = video;
    if let Some(audio) = payload.audio {
        project.audio = if audio.is_empty() { None } else { Some(audio) };
    }

    repo.save(&mut project)
        .await
        .map_err(db_error("Error al actualizar proyecto"))?;

    Ok(ApiResponse::success(
        "Proyecto actualizado exitosamente",
        json!({ "project": project.to_response() }),
    ))
}

/// DELETE /api/projects/:project_id
///
/// Segments referencing the project are left in place; there is no cascade.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult {
    let repo = ProjectRepository::new(&state.db);

    repo.find_by_id(&project_id)
        .await
        .map_err(db_error("Error al eliminar proyecto"))?
        .ok_or_else(|| ApiError::not_found("Proyecto no encontrado"))?;

    repo.delete(&project_id)
        .await
        .map_err(db_error("Error al eliminar proyecto"))?;

    tracing::info!(%project_id, "proyecto eliminado");

    Ok(ApiResponse::success(
        "Proyecto eliminado exitosamente",
        json!({ "project_id": project_id }),
    ))
}
