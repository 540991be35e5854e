//! Work request operations: Create, List, Get, UpdateStatus, Delete

use crate::portal::config::PortalConfig;
use crate::portal::handlers::geotag::{encode_submitted_coordinates, invalid_coordinates, resolve_geo_tag, GeoTagView};
use crate::portal::handlers::{parse_params, store_error_response};
use crate::portal::protocol::{error_codes, Response};
use crate::portal::state::PortalState;
use crate::portal::store::{NewWorkRequest, WorkRequestFilter, WorkRequestRow, WorkRequestStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info};

/// A work request row with its geo-tag resolved for clients
#[derive(Debug, Serialize)]
pub struct WorkRequestView {
    #[serde(flatten)]
    pub row: WorkRequestRow,
    pub geo_tag: Option<GeoTagView>,
}

impl WorkRequestView {
    pub fn new(row: WorkRequestRow, config: &PortalConfig) -> Self {
        let _span = debug_span!("work_request", id = row.id).entered();
        let geo_tag = resolve_geo_tag(config, row.geo_tag_hex.as_deref());
        WorkRequestView { row, geo_tag }
    }
}

#[derive(Deserialize)]
struct IdParams {
    id: i64,
}

/// Handle CreateWorkRequest request - validates references and coordinates
pub fn handle_create_work_request(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct CreateParams {
        address: String,
        description: Option<String>,
        district_id: i64,
        town_id: Option<i64>,
        complaint_type_id: i64,
        submitted_by: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    }

    let params: CreateParams = match parse_params(&id, params,
        "{address: string, district_id: number, complaint_type_id: number, ...}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    if params.address.trim().is_empty() {
        return Response::error(id, error_codes::INVALID_PARAMS,
            "Invalid params: address must not be empty".to_string());
    }

    let geo_tag_hex = match encode_submitted_coordinates(params.latitude, params.longitude) {
        Ok(hex) => hex,
        Err(reason) => return invalid_coordinates(id, reason),
    };

    let new = NewWorkRequest {
        address: params.address.trim().to_string(),
        description: params.description,
        district_id: params.district_id,
        town_id: params.town_id,
        complaint_type_id: params.complaint_type_id,
        submitted_by: params.submitted_by,
        geo_tag_hex,
    };

    match state.store.create_work_request(&new) {
        Ok(new_id) => {
            info!(id = new_id, district_id = new.district_id, geo_tagged = new.geo_tag_hex.is_some(),
                "work request created");
            Response::success(id, serde_json::json!({"id": new_id}))
        }
        Err(e) => store_error_response(id, e),
    }
}

/// Handle ListWorkRequests request - filtered, paginated, newest first
pub fn handle_list_work_requests(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ListParams {
        page: Option<u32>,
        page_size: Option<u32>,
        status: Option<WorkRequestStatus>,
        district_id: Option<i64>,
    }

    let params: ListParams = match parse_params(&id, params,
        "{page?: number, page_size?: number, status?: string, district_id?: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let filter = WorkRequestFilter { status: params.status, district_id: params.district_id };
    let page = params.page.unwrap_or(1).max(1);
    let page_size = state.config.page_size(params.page_size);

    let page = match state.store.list_work_requests(&filter, page, page_size) {
        Ok(page) => page,
        Err(e) => return store_error_response(id, e),
    };

    let total_pages = page.total_pages();
    let items: Vec<WorkRequestView> = page.items.into_iter()
        .map(|row| WorkRequestView::new(row, &state.config))
        .collect();

    Response::success(id, serde_json::json!({
        "items": items,
        "page": page.page,
        "page_size": page.page_size,
        "total": page.total,
        "total_pages": total_pages,
    }))
}

/// Handle GetWorkRequest request
pub fn handle_get_work_request(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: IdParams = match parse_params(&id, params, "{id: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.store.get_work_request(params.id) {
        Ok(row) => Response::typed(id, &WorkRequestView::new(row, &state.config)),
        Err(e) => store_error_response(id, e),
    }
}

/// Handle UpdateWorkRequestStatus request
pub fn handle_update_work_request_status(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct StatusParams {
        id: i64,
        status: WorkRequestStatus,
    }

    let params: StatusParams = match parse_params(&id, params,
        "{id: number, status: pending|in_progress|completed|cancelled}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.store.update_work_request_status(params.id, params.status) {
        Ok(()) => {
            info!(id = params.id, status = params.status.as_str(), "work request status updated");
            Response::success(id, serde_json::json!({"status": "ok"}))
        }
        Err(e) => store_error_response(id, e),
    }
}

/// Handle DeleteWorkRequest request - media rows go with it
pub fn handle_delete_work_request(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: IdParams = match parse_params(&id, params, "{id: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.store.delete_work_request(params.id) {
        Ok(()) => {
            info!(id = params.id, "work request deleted");
            Response::success(id, serde_json::json!({"status": "ok"}))
        }
        Err(e) => store_error_response(id, e),
    }
}
