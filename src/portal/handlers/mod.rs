//! Handler module declarations, request dispatch and shared helpers

pub mod geotag;
pub mod lookups;
pub mod media;
pub mod performa;
pub mod work_requests;

// Re-export all handlers for convenient access
pub use geotag::*;
pub use lookups::*;
pub use media::*;
pub use performa::*;
pub use work_requests::*;

use crate::portal::protocol::{error_codes, Request, Response};
use crate::portal::state::PortalState;
use crate::portal::store::StoreError;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Route a request to its handler
pub fn dispatch(state: &PortalState, request: Request) -> Response {
    let Request { id, method, params } = request;
    debug!(method = %method, "dispatching request");

    match method.as_str() {
        "DecodeGeoTag" => handle_decode_geo_tag(state, id, params),
        "ListLookups" => handle_list_lookups(state, id),
        "CreateDistrict" => handle_create_district(state, id, params),
        "CreateTown" => handle_create_town(state, id, params),
        "CreateComplaintType" => handle_create_complaint_type(state, id, params),
        "CreateWorkRequest" => handle_create_work_request(state, id, params),
        "ListWorkRequests" => handle_list_work_requests(state, id, params),
        "GetWorkRequest" => handle_get_work_request(state, id, params),
        "UpdateWorkRequestStatus" => handle_update_work_request_status(state, id, params),
        "DeleteWorkRequest" => handle_delete_work_request(state, id, params),
        "AddImage" => handle_add_image(state, id, params),
        "AddVideo" => handle_add_video(state, id, params),
        "GetWorkRequestImages" => handle_get_work_request_images(state, id, params),
        "GetWorkRequestVideos" => handle_get_work_request_videos(state, id, params),
        "GetPerforma" => handle_get_performa(state, id, params),
        _ => Response::error(id, error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method)),
    }
}

/// Handle one line of input from the wire
///
/// Blank lines produce no response. A line that is not JSON answers
/// PARSE_ERROR; JSON that is not a request answers INVALID_REQUEST.
pub fn handle_line(state: &PortalState, line: &str) -> Option<Response> {
    if line.trim().is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            let method = request.method.clone();
            let start = Instant::now();
            let response = dispatch(state, request);
            debug!(method = %method, error = response.is_error(), elapsed = ?start.elapsed(), "request handled");
            response
        }
        Err(e) => {
            warn!(error = %e, "failed to parse request");
            match serde_json::from_str::<serde_json::Value>(line) {
                Ok(_) => Response::error(None, error_codes::INVALID_REQUEST, format!("Invalid request: {}", e)),
                Err(_) => Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e)),
            }
        }
    };
    Some(response)
}

/// Deserialize request params, answering INVALID_PARAMS on failure
///
/// Missing params are read as an empty object so handlers whose fields are
/// all optional accept a bare request.
pub(crate) fn parse_params<T: DeserializeOwned>(
    id: &Option<serde_json::Value>,
    params: Option<serde_json::Value>,
    expected: &str,
) -> Result<T, Response> {
    let value = params.unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(value).map_err(|e| {
        Response::error(id.clone(), error_codes::INVALID_PARAMS,
            format!("Invalid params: expected {}: {}", expected, e))
    })
}

/// Map a store failure onto a JSON-RPC error
pub(crate) fn store_error_response(id: Option<serde_json::Value>, err: StoreError) -> Response {
    match err {
        StoreError::NotFound { .. } => Response::error(id, error_codes::NOT_FOUND, err.to_string()),
        StoreError::InvalidReference { .. } => Response::error(id, error_codes::INVALID_REFERENCE, err.to_string()),
        StoreError::Duplicate { .. } => Response::error(id, error_codes::ALREADY_EXISTS, err.to_string()),
        StoreError::Database(ref e) => {
            error!(error = %e, "database failure");
            Response::error(id, error_codes::INTERNAL_ERROR, err.to_string())
        }
    }
}
