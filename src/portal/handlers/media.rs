//! Evidence operations: AddImage, AddVideo, GetWorkRequestImages, GetWorkRequestVideos

use crate::portal::config::PortalConfig;
use crate::portal::handlers::geotag::{encode_submitted_coordinates, invalid_coordinates, resolve_geo_tag, GeoTagView};
use crate::portal::handlers::{parse_params, store_error_response};
use crate::portal::protocol::{error_codes, Response};
use crate::portal::state::PortalState;
use crate::portal::store::{MediaKind, MediaPhase, MediaRow, NewMedia, StoreResult};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info};

/// A photo or video row with its geo-tag resolved for clients
#[derive(Debug, Serialize)]
pub struct MediaView {
    #[serde(flatten)]
    pub row: MediaRow,
    pub geo_tag: Option<GeoTagView>,
}

impl MediaView {
    pub fn new(row: MediaRow, config: &PortalConfig) -> Self {
        let _span = debug_span!("media", id = row.id, work_request_id = row.work_request_id).entered();
        let geo_tag = resolve_geo_tag(config, row.geo_tag_hex.as_deref());
        MediaView { row, geo_tag }
    }
}

/// Load and resolve all media of one kind for a work request
pub fn media_views(state: &PortalState, kind: MediaKind, work_request_id: i64) -> StoreResult<Vec<MediaView>> {
    let rows = state.store.list_media(kind, work_request_id)?;
    Ok(rows.into_iter().map(|row| MediaView::new(row, &state.config)).collect())
}

/// Handle AddImage request
pub fn handle_add_image(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    add_media(state, MediaKind::Image, id, params)
}

/// Handle AddVideo request
pub fn handle_add_video(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    add_media(state, MediaKind::Video, id, params)
}

fn add_media(
    state: &PortalState,
    kind: MediaKind,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct AddMediaParams {
        work_request_id: i64,
        phase: MediaPhase,
        file_name: String,
        description: Option<String>,
        uploaded_by: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    }

    let params: AddMediaParams = match parse_params(&id, params,
        "{work_request_id: number, phase: before|during|after, file_name: string, ...}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    if params.file_name.trim().is_empty() {
        return Response::error(id, error_codes::INVALID_PARAMS,
            "Invalid params: file_name must not be empty".to_string());
    }

    let geo_tag_hex = match encode_submitted_coordinates(params.latitude, params.longitude) {
        Ok(hex) => hex,
        Err(reason) => return invalid_coordinates(id, reason),
    };

    let new = NewMedia {
        work_request_id: params.work_request_id,
        phase: params.phase,
        file_name: params.file_name,
        description: params.description,
        uploaded_by: params.uploaded_by,
        geo_tag_hex,
    };

    match state.store.add_media(kind, &new) {
        Ok(new_id) => {
            info!(id = new_id, ?kind, work_request_id = new.work_request_id, phase = new.phase.as_str(),
                "media added");
            Response::success(id, serde_json::json!({"id": new_id}))
        }
        Err(e) => store_error_response(id, e),
    }
}

/// Handle GetWorkRequestImages request
pub fn handle_get_work_request_images(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    list_media(state, MediaKind::Image, id, params)
}

/// Handle GetWorkRequestVideos request
pub fn handle_get_work_request_videos(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    list_media(state, MediaKind::Video, id, params)
}

fn list_media(
    state: &PortalState,
    kind: MediaKind,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ListMediaParams {
        work_request_id: i64,
    }

    let params: ListMediaParams = match parse_params(&id, params, "{work_request_id: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match media_views(state, kind, params.work_request_id) {
        Ok(views) => Response::typed(id, &views),
        Err(e) => store_error_response(id, e),
    }
}
