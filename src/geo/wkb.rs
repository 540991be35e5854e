//! WKB point decoding
//!
//! Layout of a 2D point (offsets in bytes):
//!
//! ```text
//! [0]      byte order (0 = big-endian, 1 = little-endian)
//! [1..5]   geometry type u32 (1 = Point)
//! [5..13]  x f64 (longitude)
//! [13..21] y f64 (latitude)
//! ```
//!
//! The extended variant sets `EWKB_SRID_FLAG` in the type word and inserts a
//! u32 SRID at [5..9], shifting both coordinates by four bytes.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use thiserror::Error;
use tracing::warn;

use super::types::{Endianness, GeoTag};

/// Geometry type code for Point
pub(crate) const WKB_POINT: u32 = 1;

pub(crate) const EWKB_Z_FLAG: u32 = 0x8000_0000;
pub(crate) const EWKB_M_FLAG: u32 = 0x4000_0000;
pub(crate) const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// SRID of WGS 84 longitude/latitude, the only tagged reference system decoded
pub const WGS84_SRID: u32 = 4326;

pub(crate) const HEADER_LEN: usize = 5;
pub(crate) const SRID_LEN: usize = 4;
pub(crate) const COORDS_LEN: usize = 16;

/// Byte length of a plain WKB point
pub const WKB_POINT_LEN: usize = HEADER_LEN + COORDS_LEN;

/// Byte length of an SRID-tagged EWKB point
pub const EWKB_POINT_LEN: usize = HEADER_LEN + SRID_LEN + COORDS_LEN;

/// Reasons a stored geometry cannot become a geo-tag
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryDecodeError {
    #[error("geometry is not valid hex: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),

    #[error("geometry truncated: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },

    #[error("invalid byte order marker {0:#04x}")]
    InvalidByteOrder(u8),

    #[error("unsupported geometry type {0:#010x}, expected Point")]
    UnsupportedGeometryType(u32),

    #[error("coordinates out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("point geometry is empty")]
    EmptyPoint,

    #[error("unsupported SRID {0}, expected 4326 or none")]
    UnsupportedSrid(u32),
}

impl GeometryDecodeError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryDecodeError::InvalidEncoding(_) => "invalid_encoding",
            GeometryDecodeError::TruncatedInput { .. } => "truncated_input",
            GeometryDecodeError::InvalidByteOrder(_) => "invalid_byte_order",
            GeometryDecodeError::UnsupportedGeometryType(_) => "unsupported_geometry_type",
            GeometryDecodeError::CoordinateOutOfRange { .. } => "coordinate_out_of_range",
            GeometryDecodeError::EmptyPoint => "empty_point",
            GeometryDecodeError::UnsupportedSrid(_) => "unsupported_srid",
        }
    }
}

/// A parsed point before geographic validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WkbPoint {
    pub x: f64,
    pub y: f64,
    pub byte_order: Endianness,
    pub srid: Option<u32>,
}

impl WkbPoint {
    /// Interpret x/y as longitude/latitude and validate them
    ///
    /// Only untagged points, SRID 0 and WGS 84 carry degrees; any other
    /// reference system is rejected rather than read as latitude/longitude.
    pub fn to_geo_tag(&self) -> Result<GeoTag, GeometryDecodeError> {
        match self.srid {
            None | Some(0) | Some(WGS84_SRID) => {}
            Some(other) => return Err(GeometryDecodeError::UnsupportedSrid(other)),
        }
        if self.x.is_nan() && self.y.is_nan() {
            return Err(GeometryDecodeError::EmptyPoint);
        }
        GeoTag::new(self.y, self.x)
    }
}

/// Decode a hex WKB point into a geo-tag
///
/// # Example
/// ```
/// use works_portal::geo::decode_point;
///
/// let tag = decode_point("0101000000000000000000F03F000000000000F03F").unwrap();
/// assert_eq!((tag.latitude, tag.longitude), (1.0, 1.0));
/// ```
pub fn decode_point(hex: &str) -> Result<GeoTag, GeometryDecodeError> {
    let bytes = hex::decode(hex)?;
    decode_point_bytes(&bytes)
}

/// Decode raw WKB bytes into a geo-tag
pub fn decode_point_bytes(bytes: &[u8]) -> Result<GeoTag, GeometryDecodeError> {
    parse_wkb_point(bytes)?.to_geo_tag()
}

/// Parse the header and coordinates of a WKB point
///
/// Trailing bytes after the point are ignored.
pub fn parse_wkb_point(bytes: &[u8]) -> Result<WkbPoint, GeometryDecodeError> {
    let marker = match bytes.first() {
        Some(&m) => m,
        None => {
            return Err(GeometryDecodeError::TruncatedInput { needed: WKB_POINT_LEN, actual: 0 });
        }
    };

    match Endianness::from_marker(marker) {
        Some(Endianness::BigEndian) => read_point::<BigEndian>(bytes, Endianness::BigEndian),
        Some(Endianness::LittleEndian) => read_point::<LittleEndian>(bytes, Endianness::LittleEndian),
        None => Err(GeometryDecodeError::InvalidByteOrder(marker)),
    }
}

fn read_point<B: ByteOrder>(bytes: &[u8], byte_order: Endianness) -> Result<WkbPoint, GeometryDecodeError> {
    ensure_len(bytes, HEADER_LEN, WKB_POINT_LEN)?;

    let type_word = B::read_u32(&bytes[1..HEADER_LEN]);
    if type_word & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 || type_word & !EWKB_SRID_FLAG != WKB_POINT {
        return Err(GeometryDecodeError::UnsupportedGeometryType(type_word));
    }

    let (srid, offset) = if type_word & EWKB_SRID_FLAG != 0 {
        ensure_len(bytes, HEADER_LEN + SRID_LEN, EWKB_POINT_LEN)?;
        (Some(B::read_u32(&bytes[HEADER_LEN..HEADER_LEN + SRID_LEN])), HEADER_LEN + SRID_LEN)
    } else {
        (None, HEADER_LEN)
    };

    ensure_len(bytes, offset + COORDS_LEN, offset + COORDS_LEN)?;
    let x = B::read_f64(&bytes[offset..offset + 8]);
    let y = B::read_f64(&bytes[offset + 8..offset + COORDS_LEN]);

    Ok(WkbPoint { x, y, byte_order, srid })
}

/// Fail with `TruncatedInput` reporting the full layout size when fewer than
/// `required` bytes are present
fn ensure_len(bytes: &[u8], required: usize, layout_len: usize) -> Result<(), GeometryDecodeError> {
    if bytes.len() < required {
        return Err(GeometryDecodeError::TruncatedInput { needed: layout_len, actual: bytes.len() });
    }
    Ok(())
}

/// Resolve an optional geo-tag column, treating any decode failure as absent
///
/// A missing or empty column yields `None` silently. A malformed one yields
/// `None` and a warning carrying the failure kind.
pub fn try_decode_geo_tag(hex: Option<&str>) -> Option<GeoTag> {
    let hex = hex.filter(|h| !h.is_empty())?;
    match decode_point(hex) {
        Ok(tag) => Some(tag),
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "discarding undecodable geo-tag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ONE_LE: &str = "0101000000000000000000F03F000000000000F03F";

    #[test]
    fn test_decode_one_one() {
        let tag = decode_point(ONE_ONE_LE).unwrap();
        assert_eq!(tag.longitude, 1.0);
        assert_eq!(tag.latitude, 1.0);
    }

    #[test]
    fn test_lowercase_hex_accepted() {
        let tag = decode_point(&ONE_ONE_LE.to_lowercase()).unwrap();
        assert_eq!(tag, GeoTag { latitude: 1.0, longitude: 1.0 });
    }

    #[test]
    fn test_x_is_longitude() {
        // x = 2.0, y = 1.0
        let tag = decode_point("01010000000000000000000040000000000000F03F").unwrap();
        assert_eq!(tag.longitude, 2.0);
        assert_eq!(tag.latitude, 1.0);
    }

    #[test]
    fn test_big_endian_header() {
        let point = parse_wkb_point(&hex::decode("00000000013FF00000000000004000000000000000").unwrap()).unwrap();
        assert_eq!(point.byte_order, Endianness::BigEndian);
        assert_eq!(point.x, 1.0);
        assert_eq!(point.y, 2.0);
        assert_eq!(point.srid, None);
    }

    #[test]
    fn test_srid_tagged_point() {
        // SRID 4326, x = 1.0, y = 1.0
        let point = parse_wkb_point(&hex::decode("0101000020E6100000000000000000F03F000000000000F03F").unwrap()).unwrap();
        assert_eq!(point.srid, Some(4326));
        assert_eq!((point.x, point.y), (1.0, 1.0));
    }

    #[test]
    fn test_web_mercator_srid_rejected() {
        // SRID 3857, x = 10.0, y = 20.0 in metres
        let bytes = hex::decode("0101000020110F000000000000000024400000000000003440").unwrap();
        let point = parse_wkb_point(&bytes).unwrap();
        assert_eq!(point.srid, Some(3857));
        assert_eq!(point.to_geo_tag(), Err(GeometryDecodeError::UnsupportedSrid(3857)));
        assert_eq!(decode_point_bytes(&bytes).unwrap_err().kind(), "unsupported_srid");
        assert_eq!(try_decode_geo_tag(Some(&hex::encode(&bytes))), None);
    }

    #[test]
    fn test_srid_zero_is_untagged() {
        let tag = decode_point("010100002000000000000000000000F03F000000000000F03F").unwrap();
        assert_eq!(tag, GeoTag { latitude: 1.0, longitude: 1.0 });
    }

    #[test]
    fn test_srid_tagged_truncated_reports_extended_length() {
        let bytes = hex::decode("0101000020E6100000000000000000F03F").unwrap();
        assert_eq!(
            parse_wkb_point(&bytes),
            Err(GeometryDecodeError::TruncatedInput { needed: EWKB_POINT_LEN, actual: 17 })
        );
    }

    #[test]
    fn test_z_flag_rejected() {
        let err = decode_point("0101000080000000000000F03F000000000000F03F0000000000000000").unwrap_err();
        assert_eq!(err, GeometryDecodeError::UnsupportedGeometryType(0x8000_0001));
    }

    #[test]
    fn test_iso_point_z_rejected() {
        // type 1001 (PointZ) little-endian
        let err = decode_point("01E9030000000000000000F03F000000000000F03F0000000000000000").unwrap_err();
        assert_eq!(err, GeometryDecodeError::UnsupportedGeometryType(1001));
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert_eq!(
            decode_point(""),
            Err(GeometryDecodeError::TruncatedInput { needed: WKB_POINT_LEN, actual: 0 })
        );
    }

    #[test]
    fn test_invalid_byte_order() {
        assert_eq!(
            decode_point("0201000000000000000000F03F000000000000F03F"),
            Err(GeometryDecodeError::InvalidByteOrder(2))
        );
    }

    #[test]
    fn test_empty_point() {
        // POINT EMPTY is encoded as NaN, NaN
        let err = decode_point("0101000000000000000000F87F000000000000F87F").unwrap_err();
        assert_eq!(err, GeometryDecodeError::EmptyPoint);
    }

    #[test]
    fn test_single_nan_is_out_of_range() {
        let err = decode_point("0101000000000000000000F87F000000000000F03F").unwrap_err();
        assert_eq!(err.kind(), "coordinate_out_of_range");
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let tag = decode_point(&format!("{}FFFF", ONE_ONE_LE)).unwrap();
        assert_eq!(tag, GeoTag { latitude: 1.0, longitude: 1.0 });
    }

    #[test]
    fn test_try_decode_geo_tag() {
        assert_eq!(try_decode_geo_tag(None), None);
        assert_eq!(try_decode_geo_tag(Some("")), None);
        assert_eq!(try_decode_geo_tag(Some("zz")), None);
        assert_eq!(
            try_decode_geo_tag(Some(ONE_ONE_LE)),
            Some(GeoTag { latitude: 1.0, longitude: 1.0 })
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(decode_point("0").unwrap_err().kind(), "invalid_encoding");
        assert_eq!(decode_point("0101").unwrap_err().kind(), "truncated_input");
        assert_eq!(GeometryDecodeError::EmptyPoint.kind(), "empty_point");
    }
}
