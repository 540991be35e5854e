//! Geo-tag handlers: DecodeGeoTag, plus the view every listing embeds

use crate::geo::{
    encode_point_hex, parse_wkb_point, try_decode_geo_tag, Endianness, GeoTag, GeometryDecodeError, WGS84_SRID,
};
use crate::portal::config::PortalConfig;
use crate::portal::handlers::parse_params;
use crate::portal::protocol::{error_codes, Response};
use crate::portal::state::PortalState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// SRID stamped on geo-tags the portal encodes itself (WGS 84)
pub const PORTAL_SRID: u32 = WGS84_SRID;

/// A decoded geo-tag as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTagView {
    pub latitude: f64,
    pub longitude: f64,
    /// `lat, lon` rounded to the configured precision
    pub display: String,
    pub map_url: String,
}

impl GeoTagView {
    pub fn new(tag: GeoTag, config: &PortalConfig) -> Self {
        let p = config.coordinate_precision;
        GeoTagView {
            latitude: tag.latitude,
            longitude: tag.longitude,
            display: format!("{:.*}, {:.*}", p, tag.latitude, p, tag.longitude),
            map_url: format!("{}{:.*},{:.*}", config.map_link_base, p, tag.latitude, p, tag.longitude),
        }
    }
}

/// Resolve a stored geo-tag column for a response; failures become `None`
pub fn resolve_geo_tag(config: &PortalConfig, hex: Option<&str>) -> Option<GeoTagView> {
    try_decode_geo_tag(hex).map(|tag| GeoTagView::new(tag, config))
}

/// Turn optional submitted coordinates into the hex stored in `geo_tag`
///
/// Both coordinates or neither must be given.
pub fn encode_submitted_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<String>, String> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => {
            let tag = GeoTag::new(latitude, longitude).map_err(|e| e.to_string())?;
            Ok(Some(encode_point_hex(&tag, Endianness::LittleEndian, Some(PORTAL_SRID))))
        }
        _ => Err("latitude and longitude must be given together".to_string()),
    }
}

/// Shared INVALID_COORDINATES answer for create handlers
pub(crate) fn invalid_coordinates(id: Option<serde_json::Value>, reason: String) -> Response {
    Response::error(id, error_codes::INVALID_COORDINATES, format!("Invalid coordinates: {}", reason))
}

/// Handle DecodeGeoTag request - decodes a raw hex WKB point
pub fn handle_decode_geo_tag(
    state: &PortalState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct DecodeParams {
        hex: String,
    }

    let params: DecodeParams = match parse_params(&id, params, "{hex: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let bytes = match hex::decode(&params.hex) {
        Ok(bytes) => bytes,
        Err(e) => return decode_failure(id, e.into()),
    };
    let point = match parse_wkb_point(&bytes) {
        Ok(point) => point,
        Err(e) => return decode_failure(id, e),
    };
    let tag = match point.to_geo_tag() {
        Ok(tag) => tag,
        Err(e) => return decode_failure(id, e),
    };
    let srid = point.srid;

    debug!(latitude = tag.latitude, longitude = tag.longitude, ?srid, "decoded geo-tag");

    let view = GeoTagView::new(tag, &state.config);
    Response::success(id, serde_json::json!({
        "latitude": view.latitude,
        "longitude": view.longitude,
        "srid": srid,
        "display": view.display,
        "map_url": view.map_url,
    }))
}

fn decode_failure(id: Option<serde_json::Value>, err: GeometryDecodeError) -> Response {
    Response::error(id, error_codes::GEOMETRY_DECODE_FAILED, format!("{}: {}", err.kind(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::decode_point;

    #[test]
    fn test_view_formatting() {
        let config = PortalConfig { coordinate_precision: 4, ..PortalConfig::default() };
        let view = GeoTagView::new(GeoTag { latitude: 24.8607, longitude: 67.0011 }, &config);
        assert_eq!(view.display, "24.8607, 67.0011");
        assert_eq!(view.map_url, "https://www.google.com/maps?q=24.8607,67.0011");
    }

    #[test]
    fn test_submitted_coordinates() {
        assert_eq!(encode_submitted_coordinates(None, None), Ok(None));
        assert!(encode_submitted_coordinates(Some(1.0), None).is_err());
        assert!(encode_submitted_coordinates(Some(91.0), Some(0.0)).is_err());

        let hex = encode_submitted_coordinates(Some(24.8607), Some(67.0011)).unwrap().unwrap();
        assert!(hex.starts_with("0101000020E6100000"));
        assert_eq!(decode_point(&hex).unwrap(), GeoTag { latitude: 24.8607, longitude: 67.0011 });
    }

    #[test]
    fn test_resolve_discards_malformed() {
        let config = PortalConfig::default();
        assert!(resolve_geo_tag(&config, Some("0102000000")).is_none());
        assert!(resolve_geo_tag(&config, None).is_none());
        assert!(resolve_geo_tag(&config, Some("0101000000000000000000F03F000000000000F03F")).is_some());
        // Web Mercator metres never become a map link
        assert!(resolve_geo_tag(&config, Some("0101000020110F000000000000000024400000000000003440")).is_none());
    }
}
