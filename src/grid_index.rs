//! Point-to-cell indexing seam
//!
//! The pipeline never computes cell ids itself. It asks a [`GridIndex`] for
//! the cell of a point and for that cell's boundary ring. [`H3Index`] is the
//! implementation backed by the H3 hexagonal grid.

use crate::error::{OutlineError, Result};
use crate::point::LatLng;
use h3o::{CellIndex, Resolution};
use std::fmt;
use std::hash::Hash;

/// A hexagonal grid able to locate points and describe cells
///
/// Both operations must be pure and deterministic for a fixed resolution.
pub trait GridIndex {
    /// Opaque cell identifier
    type Id: Clone + Ord + Hash + fmt::Display + Send + Sync;

    /// Cell containing `point` at `resolution`
    fn cell_for(&self, point: LatLng, resolution: u8) -> Result<Self::Id>;

    /// Boundary ring of `id` as (lat, lng) pairs, closing point optional
    fn boundary_of(&self, id: &Self::Id) -> Vec<LatLng>;
}

/// Uber H3 grid
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Index;

impl GridIndex for H3Index {
    type Id = CellIndex;

    fn cell_for(&self, point: LatLng, resolution: u8) -> Result<CellIndex> {
        let resolution = Resolution::try_from(resolution)
            .map_err(|e| OutlineError::GridIndex(format!("resolution {}: {}", resolution, e)))?;
        let ll = h3o::LatLng::new(point.latitude, point.longitude).map_err(|e| {
            OutlineError::GridIndex(format!(
                "({}, {}): {}",
                point.latitude, point.longitude, e
            ))
        })?;
        Ok(ll.to_cell(resolution))
    }

    fn boundary_of(&self, id: &CellIndex) -> Vec<LatLng> {
        id.boundary()
            .iter()
            .map(|ll| LatLng::new(ll.lat_radians().to_degrees(), ll.lng_radians().to_degrees()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h3_cell_is_deterministic() {
        let index = H3Index;
        let p = LatLng::new(37.7749, -122.4194);
        let a = index.cell_for(p, 8).unwrap();
        let b = index.cell_for(p, 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_h3_boundary_is_hexagon() {
        let index = H3Index;
        let cell = index.cell_for(LatLng::new(43.65, -79.38), 8).unwrap();
        let boundary = index.boundary_of(&cell);
        assert!(boundary.len() >= 6);
        for p in &boundary {
            assert!((p.latitude - 43.65).abs() < 0.02);
            assert!((p.longitude + 79.38).abs() < 0.02);
        }
    }

    #[test]
    fn test_h3_rejects_bad_input() {
        let index = H3Index;
        assert!(index.cell_for(LatLng::new(f64::NAN, 0.0), 8).is_err());
        assert!(index.cell_for(LatLng::new(10.0, 10.0), 16).is_err());
    }
}
