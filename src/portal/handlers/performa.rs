//! Performa report: GetPerforma
//!
//! The printable summary of a work request: its details, the photo evidence
//! grouped by phase (before, during, after), the videos, and how much of the
//! evidence carries a usable geo-tag.

use crate::portal::handlers::media::{media_views, MediaView};
use crate::portal::handlers::work_requests::WorkRequestView;
use crate::portal::handlers::{parse_params, store_error_response};
use crate::portal::protocol::Response;
use crate::portal::state::PortalState;
use crate::portal::store::{MediaKind, MediaPhase, StoreResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct Performa {
    pub work_request: WorkRequestView,
    /// Keyed by phase name, always holding all three phases in report order
    pub images: IndexMap<&'static str, Vec<MediaView>>,
    pub videos: Vec<MediaView>,
    pub geo_tagged_media: usize,
    pub untagged_media: usize,
}

/// Assemble the performa for one work request
pub fn build_performa(state: &PortalState, work_request_id: i64) -> StoreResult<Performa> {
    let row = state.store.get_work_request(work_request_id)?;
    let work_request = WorkRequestView::new(row, &state.config);

    let mut images: IndexMap<&'static str, Vec<MediaView>> = MediaPhase::ALL
        .iter()
        .map(|phase| (phase.as_str(), Vec::new()))
        .collect();
    for view in media_views(state, MediaKind::Image, work_request_id)? {
        images.entry(view.row.phase.as_str()).or_default().push(view);
    }

    let videos = media_views(state, MediaKind::Video, work_request_id)?;

    let (geo_tagged_media, untagged_media) = images
        .values()
        .flatten()
        .chain(videos.iter())
        .fold((0, 0), |(tagged, untagged), view| {
            if view.geo_tag.is_some() {
                (tagged + 1, untagged)
            } else {
                (tagged, untagged + 1)
            }
        });

    Ok(Performa { work_request, images, videos, geo_tagged_media, untagged_media })
}

/// Handle GetPerforma request
pub fn handle_get_performa(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct PerformaParams {
        id: i64,
    }

    let params: PerformaParams = match parse_params(&id, params, "{id: number}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match build_performa(state, params.id) {
        Ok(performa) => {
            info!(id = params.id, tagged = performa.geo_tagged_media, untagged = performa.untagged_media,
                "performa generated");
            Response::typed(id, &performa)
        }
        Err(e) => store_error_response(id, e),
    }
}
