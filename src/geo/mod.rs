//! Geo-tag module for the works portal
//!
//! Decodes the hex WKB point geometries stored against work requests,
//! images and videos into latitude/longitude pairs, and encodes them back
//! when a client submits raw coordinates.
//!
//! # Submodules
//! - `types` - Validated geo-tag value and byte order marker
//! - `wkb` - WKB/EWKB point decoder and its error type
//! - `encode` - WKB point encoder

mod types;
mod wkb;
mod encode;

pub use types::{
    GeoTag,
    Endianness,
    LATITUDE_RANGE,
    LONGITUDE_RANGE,
};

pub use wkb::{
    GeometryDecodeError,
    WkbPoint,
    decode_point,
    decode_point_bytes,
    parse_wkb_point,
    try_decode_geo_tag,
    WKB_POINT_LEN,
    EWKB_POINT_LEN,
    WGS84_SRID,
};

pub use encode::{
    encode_point,
    encode_point_hex,
};
