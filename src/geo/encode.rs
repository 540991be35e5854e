//! Binary encoding of geo-tags
//!
//! Produces the same WKB/EWKB layout a spatial database returns, so tags
//! submitted as raw coordinates can be stored next to database-produced ones.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::types::{Endianness, GeoTag};
use super::wkb::{EWKB_SRID_FLAG, HEADER_LEN, SRID_LEN, WKB_POINT, WKB_POINT_LEN};

/// Encode a geo-tag as a WKB point
/// Format: [byte_order: u8][type: u32][srid: u32, if tagged][x: f64][y: f64]
/// x carries the longitude and y the latitude
pub fn encode_point(tag: &GeoTag, byte_order: Endianness, srid: Option<u32>) -> Vec<u8> {
    match byte_order {
        Endianness::BigEndian => write_point::<BigEndian>(tag, byte_order, srid),
        Endianness::LittleEndian => write_point::<LittleEndian>(tag, byte_order, srid),
    }
}

/// Encode a geo-tag as uppercase hex WKB
pub fn encode_point_hex(tag: &GeoTag, byte_order: Endianness, srid: Option<u32>) -> String {
    hex::encode_upper(encode_point(tag, byte_order, srid))
}

fn write_point<B: ByteOrder>(tag: &GeoTag, byte_order: Endianness, srid: Option<u32>) -> Vec<u8> {
    let srid_len = if srid.is_some() { SRID_LEN } else { 0 };
    let mut buffer = vec![0u8; WKB_POINT_LEN + srid_len];

    buffer[0] = byte_order.marker();

    let type_word = match srid {
        Some(_) => WKB_POINT | EWKB_SRID_FLAG,
        None => WKB_POINT,
    };
    B::write_u32(&mut buffer[1..HEADER_LEN], type_word);

    let mut offset = HEADER_LEN;
    if let Some(srid) = srid {
        B::write_u32(&mut buffer[offset..offset + SRID_LEN], srid);
        offset += SRID_LEN;
    }

    B::write_f64(&mut buffer[offset..offset + 8], tag.longitude);
    B::write_f64(&mut buffer[offset + 8..offset + 16], tag.latitude);

    buffer
}
