use geo::Coord;
use serde::{Deserialize, Serialize};

/// A geographic observation in decimal degrees
///
/// Geographic order is (latitude, longitude). Planar geometry inside the
/// pipeline uses x = longitude, y = latitude; `to_coord` and `from_coord`
/// are the only places that swap the axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Planar coordinate with x = longitude, y = latitude
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    pub fn from_coord(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

impl From<(f64, f64)> for LatLng {
    /// Builds from a `(lat, lng)` pair
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}
