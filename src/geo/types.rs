//! Core geo-tag types
//!
//! A geo-tag is the latitude/longitude pair attached to a work request or
//! to a piece of photo/video evidence.

use serde::Serialize;
use std::ops::RangeInclusive;

use super::wkb::GeometryDecodeError;

/// Valid latitude values in degrees
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude values in degrees
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A validated latitude/longitude pair
///
/// Construct through [`GeoTag::new`] so both coordinates are finite and in
/// range. Field order follows how the portal presents locations
/// (latitude first), not the x/y order of the binary encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoTag {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoTag {
    /// Create a geo-tag, rejecting NaN and out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryDecodeError> {
        // RangeInclusive::contains is false for NaN
        if !LATITUDE_RANGE.contains(&latitude) || !LONGITUDE_RANGE.contains(&longitude) {
            return Err(GeometryDecodeError::CoordinateOutOfRange { latitude, longitude });
        }
        Ok(GeoTag { latitude, longitude })
    }
}

/// Byte order marker of a WKB header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl Endianness {
    /// Header byte value for this byte order
    pub fn marker(self) -> u8 {
        match self {
            Endianness::BigEndian => 0,
            Endianness::LittleEndian => 1,
        }
    }

    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0 => Some(Endianness::BigEndian),
            1 => Some(Endianness::LittleEndian),
            _ => None,
        }
    }
}
