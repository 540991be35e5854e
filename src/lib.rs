//! Works management portal: geo-tag decoding and the request service
//! that serves work requests, their evidence and performa reports.
//!
//! - [`geo`]: hex WKB point decoder ([`geo::decode_point`]) and encoder
//! - [`portal`]: JSON-RPC handlers over an SQLite store

pub mod geo;
pub mod portal;

pub use geo::{decode_point, GeoTag, GeometryDecodeError};
