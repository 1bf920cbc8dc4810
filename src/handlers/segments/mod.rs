use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Segment;
use crate::database::repository::{ProjectRepository, SegmentRepository};
use crate::error::ApiError;
use crate::handlers::db_error;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Segment creation payload in the external API vocabulary. The storage
/// schema uses different names; the repository layer owns that mapping.
#[derive(Debug, Deserialize)]
pub struct CreateSegmentRequest {
    #[serde(rename = "startTime")]
    pub start_time: Option<f64>,
    #[serde(rename = "endTime")]
    pub end_time: Option<f64>,
    #[serde(rename = "projectid")]
    pub project_id: Option<String>,
    pub prosody: Option<String>,
    pub prosody2: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "Descriptions_prosody")]
    pub descriptions_prosody: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSegmentRequest {
    #[serde(rename = "startTime")]
    pub start_time: Option<f64>,
    #[serde(rename = "endTime")]
    pub end_time: Option<f64>,
    pub prosody: Option<String>,
    pub prosody2: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "Descriptions_prosody")]
    pub descriptions_prosody: Option<Vec<Value>>,
}

/// Joint rules for a complete time range. Order matters: the sign check
/// fires before the ordering check, and only the first violation is
/// reported.
fn validate_time_range(start_time: f64, end_time: f64) -> Result<(), ApiError> {
    if start_time < 0.0 || end_time < 0.0 {
        return Err(ApiError::bad_request(
            "Los tiempos deben ser mayores o iguales a 0",
        ));
    }
    if start_time >= end_time {
        return Err(ApiError::bad_request(
            "El tiempo de inicio debe ser menor al tiempo de fin",
        ));
    }
    Ok(())
}

/// GET /api/segments/
pub async fn list_segments(State(state): State<AppState>) -> ApiResult {
    let segments = SegmentRepository::new(&state.db)
        .find_all()
        .await
        .map_err(db_error("Error al obtener segmentos"))?;

    let data: Vec<_> = segments.iter().map(Segment::to_response).collect();

    Ok(ApiResponse::success(
        "Segmentos obtenidos exitosamente",
        json!({ "segments": data, "count": data.len() }),
    ))
}

/// GET /api/segments/:segment_id
pub async fn get_segment(
    State(state): State<AppState>,
    Path(segment_id): Path<String>,
) -> ApiResult {
    let segment = SegmentRepository::new(&state.db)
        .find_by_id(&segment_id)
        .await
        .map_err(db_error("Error al obtener segmento"))?
        .ok_or_else(|| ApiError::not_found("Segmento no encontrado"))?;

    Ok(ApiResponse::success(
        "Segmento obtenido exitosamente",
        json!({ "segment": segment.to_response() }),
    ))
}

/// GET /api/segments/project/:project_id
pub async fn get_segments_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult {
    if project_id.trim().is_empty() {
        return Err(ApiError::bad_request("ID de proyecto requerido"));
    }

    ProjectRepository::new(&state.db)
        .find_by_id(&project_id)
        .await
        .map_err(db_error("Error al obtener segmentos del proyecto"))?
        .ok_or_else(|| ApiError::not_found("Proyecto no encontrado"))?;

    let segments = SegmentRepository::new(&state.db)
        .find_by_project(&project_id)
        .await
        .map_err(db_error("Error al obtener segmentos del proyecto"))?;

    let data: Vec<_> = segments.iter().map(Segment::to_response).collect();

    Ok(ApiResponse::success(
        "Segmentos obtenidos exitosamente",
        json!({ "segments": data, "count": data.len(), "project_id": project_id }),
    ))
}

/// POST /api/segments/
pub async fn create_segment(
    State(state): State<AppState>,
    Json(payload): Json<CreateSegmentRequest>,
) -> ApiResult {
    // Validation order is part of the API contract: presence, then sign,
    // then ordering, then project existence
    let (start_time, end_time, project_id) = match (
        payload.start_time,
        payload.end_time,
        payload.project_id.filter(|p| !p.is_empty()),
    ) {
        (Some(start), Some(end), Some(pid)) => (start, end, pid),
        _ => {
            return Err(ApiError::bad_request(
                "startTime, endTime y projectid son requeridos",
            ))
        }
    };
    validate_time_range(start_time, end_time)?;

    // A malformed project id is indistinguishable from an unknown one
    let project = ProjectRepository::new(&state.db)
        .find_by_id(&project_id)
        .await
        .map_err(db_error("Error al crear segmento"))?
        .ok_or_else(|| ApiError::not_found("Proyecto no encontrado"))?;

    let Some(project_oid) = project.id else {
        return Err(ApiError::internal_server_error("Error al crear segmento"));
    };

    let mut segment = Segment::new(
        start_time,
        end_time,
        project_oid,
        payload.prosody,
        payload.prosody2,
        payload.description,
        payload.descriptions_prosody.unwrap_or_default(),
    );
    SegmentRepository::new(&state.db)
        .save(&mut segment)
        .await
        .map_err(db_error("Error al crear segmento"))?;

    tracing::info!(segment_id = ?segment.id, %project_id, "segmento creado");

    Ok(ApiResponse::created(
        "Segmento creado exitosamente",
        json!({ "segment": segment.to_response() }),
    ))
}

/// PUT /api/segments/:segment_id
pub async fn update_segment(
    State(state): State<AppState>,
    Path(segment_id): Path<String>,
    Json(payload): Json<UpdateSegmentRequest>,
) -> ApiResult {
    let repo = SegmentRepository::new(&state.db);

    // A missing record wins over validation of the payload
    let mut segment = repo
        .find_by_id(&segment_id)
        .await
        .map_err(db_error("Error al actualizar segmento"))?
        .ok_or_else(|| ApiError::not_found("Segmento no encontrado"))?;

    if let Some(start_time) = payload.start_time {
        if start_time < 0.0 {
            return Err(ApiError::bad_request(
                "El tiempo de inicio debe ser mayor o igual a 0",
            ));
        }
        segment.start_time = start_time;
    }
    if let Some(end_time) = payload.end_time {
        if end_time < 0.0 {
            return Err(ApiError::bad_request(
                "El tiempo de fin debe ser mayor o igual a 0",
            ));
        }
        segment.end_time = end_time;
    }
    // The pair is re-checked whenever either side moved
    if (payload.start_time.is_some() || payload.end_time.is_some())
        && segment.start_time >= segment.end_time
    {
        return Err(ApiError::bad_request(
            "El tiempo de inicio debe ser menor al tiempo de fin",
        ));
    }

    if let Some(prosody) = payload.prosody {
        segment.prosody = Some(prosody);
    }
    if let Some(prosody2) = payload.prosody2 {
        segment.prosody2 = Some(prosody2);
    }
    if let Some(description) = payload.description {
        segment.description = Some(description);
    }
    if let Some(descriptions_prosody) = payload.descriptions_prosody {
        segment.descriptions_prosody = descriptions_prosody;
    }

    repo.save(&mut segment)
        .await
        .map_err(db_error("Error al actualizar segmento"))?;

    Ok(ApiResponse::success(
        "Segmento actualizado exitosamente",
        json!({ "segment": segment.to_response() }),
    ))
}

/// DELETE /api/segments/:segment_id
pub async fn delete_segment(
    State(state): State<AppState>,
    Path(segment_id): Path<String>,
) -> ApiResult {
    let repo = SegmentRepository::new(&state.db);

    repo.find_by_id(&segment_id)
        .await
        .map_err(db_error("Error al eliminar segmento"))?
        .ok_or_else(|| ApiError::not_found("Segmento no encontrado"))?;

    repo.delete(&segment_id)
        .await
        .map_err(db_error("Error al eliminar segmento"))?;

    tracing::info!(%segment_id, "segmento eliminado");

    Ok(ApiResponse::success(
        "Segmento eliminado exitosamente",
        json!({ "segment_id": segment_id }),
    ))
}

/// POST /api/segments/:segment_id/views
pub async fn increment_views(
    State(state): State<AppState>,
    Path(segment_id): Path<String>,
) -> ApiResult {
    let repo = SegmentRepository::new(&state.db);

    let segment = repo
        .find_by_id(&segment_id)
        .await
        .map_err(db_error("Error al incrementar vistas"))?
        .ok_or_else(|| ApiError::not_found("Segmento no encontrado"))?;

    repo.increment_views(&segment_id)
        .await
        .map_err(db_error("Error al incrementar vistas"))?;

    Ok(ApiResponse::success(
        "Vistas incrementadas exitosamente",
        json!({ "segment_id": segment_id, "views": segment.views + 1 }),
    ))
}

/// POST /api/segments/:segment_id/likes
pub async fn increment_likes(
    State(state): State<AppState>,
    Path(segment_id): Path<String>,
) -> ApiResult {
    let repo = SegmentRepository::new(&state.db);

    let segment = repo
        .find_by_id(&segment_id)
        .await
        .map_err(db_error("Error al incrementar likes"))?
        .ok_or_else(|| ApiError::not_found("Segmento no encontrado"))?;

    repo.increment_likes(&segment_id)
        .await
        .map_err(db_error("Error al incrementar likes"))?;

    Ok(ApiResponse::success(
        "Likes incrementados exitosamente",
        json!({ "segment_id": segment_id, "likes": segment.likes + 1 }),
    ))
}
