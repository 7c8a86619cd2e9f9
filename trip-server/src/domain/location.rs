//! Geographic coordinates.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidLatLng {
    reason: &'static str,
}

impl InvalidLatLng {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Create a coordinate pair, validating the ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidLatLng> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidLatLng::new("must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidLatLng::new("latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidLatLng::new("longitude must be between -180 and 180"));
        }
        Ok(Self { lat, lng })
    }

    /// Parse a `"lat,lng"` string, as typed into an address field.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::domain::LatLng;
    ///
    /// let p = LatLng::parse("33.77, -118.19").unwrap();
    /// assert_eq!(p.lat(), 33.77);
    /// assert!(LatLng::parse("Long Beach").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidLatLng> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| InvalidLatLng::new("expected \"lat,lng\""))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidLatLng::new("latitude is not a number"))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidLatLng::new("longitude is not a number"))?;
        Self::new(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Coordinates rounded to 5 decimal places (about 1 m), as integers.
    ///
    /// Used as a hashable key; nearby fixes from the same spot collapse.
    pub fn rounded_e5(&self) -> (i64, i64) {
        (
            (self.lat * 1e5).round() as i64,
            (self.lng * 1e5).round() as i64,
        )
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let p = LatLng::parse("33.77,-118.19").unwrap();
        assert_eq!(p.lat(), 33.77);
        assert_eq!(p.lng(), -118.19);
    }

    #[test]
    fn parse_with_spaces() {
        let p = LatLng::parse(" 33.77 ,  -118.19 ").unwrap();
        assert_eq!(p.lat(), 33.77);
    }

    #[test]
    fn reject_out_of_range() {
        assert!(LatLng::new(90.1, 0.0).is_err());
        assert!(LatLng::new(-90.1, 0.0).is_err());
        assert!(LatLng::new(0.0, 180.5).is_err());
        assert!(LatLng::new(f64::NAN, 0.0).is_err());
        assert!(LatLng::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn reject_garbage() {
        assert!(LatLng::parse("").is_err());
        assert!(LatLng::parse("33.77").is_err());
        assert!(LatLng::parse("north,west").is_err());
        assert!(LatLng::parse("100 Main St, Long Beach").is_err());
    }

    #[test]
    fn display_roundtrip() {
        let p = LatLng::new(33.77, -118.19).unwrap();
        assert_eq!(p.to_string(), "33.77,-118.19");
        assert_eq!(LatLng::parse(&p.to_string()).unwrap(), p);
    }

    #[test]
    fn rounding_key() {
        let a = LatLng::new(33.770001, -118.190001).unwrap();
        let b = LatLng::new(33.770002, -118.190002).unwrap();
        assert_eq!(a.rounded_e5(), b.rounded_e5());
        assert_eq!(a.rounded_e5(), (3_377_000, -11_819_000));
    }
}
