//! Lookup tables: ListLookups, CreateDistrict, CreateTown, CreateComplaintType

use crate::portal::handlers::{parse_params, store_error_response};
use crate::portal::protocol::{error_codes, Response};
use crate::portal::state::PortalState;
use crate::portal::store::StoreResult;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
struct NameParams {
    name: String,
}

/// Handle ListLookups request - districts, towns and complaint types in one call
pub fn handle_list_lookups(state: &PortalState, id: Option<serde_json::Value>) -> Response {
    let lookups = collect_lookups(state);

    match lookups {
        Ok(value) => Response::success(id, value),
        Err(e) => store_error_response(id, e),
    }
}

/// Handle CreateDistrict request
pub fn handle_create_district(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: NameParams = match parse_params(&id, params, "{name: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };
    if let Some(response) = reject_blank(&id, &params.name) {
        return response;
    }

    match state.store.insert_district(params.name.trim()) {
        Ok(new_id) => {
            info!(id = new_id, name = %params.name, "district created");
            Response::success(id, serde_json::json!({"id": new_id}))
        }
        Err(e) => store_error_response(id, e),
    }
}

/// Handle CreateTown request - the district must exist
pub fn handle_create_town(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct TownParams {
        name: String,
        district_id: i64,
    }

    let params: TownParams = match parse_params(&id, params, "{name: string, district_id: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };
    if let Some(response) = reject_blank(&id, &params.name) {
        return response;
    }

    match state.store.insert_town(params.name.trim(), params.district_id) {
        Ok(new_id) => {
            info!(id = new_id, district_id = params.district_id, "town created");
            Response::success(id, serde_json::json!({"id": new_id}))
        }
        Err(e) => store_error_response(id, e),
    }
}

/// Handle CreateComplaintType request
pub fn handle_create_complaint_type(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: NameParams = match parse_params(&id, params, "{name: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };
    if let Some(response) = reject_blank(&id, &params.name) {
        return response;
    }

    match state.store.insert_complaint_type(params.name.trim()) {
        Ok(new_id) => Response::success(id, serde_json::json!({"id": new_id})),
        Err(e) => store_error_response(id, e),
    }
}

fn collect_lookups(state: &PortalState) -> StoreResult<serde_json::Value> {
    Ok(serde_json::json!({
        "districts": state.store.list_districts()?,
        "towns": state.store.list_towns()?,
        "complaint_types": state.store.list_complaint_types()?,
    }))
}

fn reject_blank(id: &Option<serde_json::Value>, name: &str) -> Option<Response> {
    if name.trim().is_empty() {
        return Some(Response::error(id.clone(), error_codes::INVALID_PARAMS,
            "Invalid params: name must not be empty".to_string()));
    }
    None
}
