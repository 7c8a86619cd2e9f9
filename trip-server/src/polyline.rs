//! Encoded polyline decoding.
//!
//! The provider returns route geometry in its "encoded polyline" format:
//! each coordinate is a delta from the previous one, scaled by 1e5, zig-zag
//! encoded and split into 5-bit chunks offset into printable ASCII.

use crate::domain::LatLng;

/// Error returned when decoding a malformed polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// A byte outside the encoding's alphabet ('?' to '~')
    #[error("invalid byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    /// Input ended in the middle of a value or between lat and lng
    #[error("truncated polyline")]
    Truncated,

    /// A value too long to fit in 32 bits
    #[error("value overflow at offset {0}")]
    Overflow(usize),

    /// Accumulated coordinates left the valid lat/lng range
    #[error("coordinate out of range at offset {0}")]
    OutOfRange(usize),
}

/// Decode an encoded polyline at 5-decimal precision.
///
/// # Examples
///
/// ```
/// use trip_server::polyline::decode;
///
/// let path = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0].lat(), 38.5);
/// assert_eq!(path[0].lng(), -120.2);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while offset < bytes.len() {
        let (dlat, next) = next_value(bytes, offset)?;
        if next >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        let (dlng, next) = next_value(bytes, next)?;

        lat += dlat;
        lng += dlng;

        let point = LatLng::new(lat as f64 / 1e5, lng as f64 / 1e5)
            .map_err(|_| PolylineError::OutOfRange(offset))?;
        points.push(point);
        offset = next;
    }

    Ok(points)
}

/// Read one zig-zag encoded value starting at `offset`.
///
/// Returns the value and the offset just past it.
fn next_value(bytes: &[u8], mut offset: usize) -> Result<(i64, usize), PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(offset).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte { byte, offset });
        }
        if shift > 30 {
            return Err(PolylineError::Overflow(offset));
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        offset += 1;

        if chunk < 0x20 {
            break;
        }
    }

    let value = if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Ok((value, offset))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn encode_value(v: i64, out: &mut String) {
        let mut v = if v < 0 { !(v << 1) } else { v << 1 };
        while v >= 0x20 {
            out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
            v >>= 5;
        }
        out.push(char::from(v as u8 + 63));
    }

    proptest! {
        /// Any path encoded at 5-decimal precision decodes to the same integers
        #[test]
        fn decodes_what_was_encoded(
            path in proptest::collection::vec((-9_000_000i64..=9_000_000, -18_000_000i64..=18_000_000), 0..20)
        ) {
            let mut encoded = String::new();
            let (mut plat, mut plng) = (0, 0);
            for &(lat, lng) in &path {
                encode_value(lat - plat, &mut encoded);
                encode_value(lng - plng, &mut encoded);
                plat = lat;
                plng = lng;
            }

            let decoded = decode(&encoded).unwrap();
            prop_assert_eq!(decoded.len(), path.len());
            for (p, &(lat, lng)) in decoded.iter().zip(&path) {
                prop_assert_eq!((p.lat() * 1e5).round() as i64, lat);
                prop_assert_eq!((p.lng() * 1e5).round() as i64, lng);
            }
        }

        /// Arbitrary input never panics
        #[test]
        fn never_panics(s in "\\PC{0,40}") {
            let _ = decode(&s);
        }
    }
}
