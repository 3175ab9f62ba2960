//! Cell aggregation
//!
//! Groups raw points by the cell the grid index assigns them to and counts
//! how many points fell into each cell.

use crate::error::OutlineError;
use crate::grid_index::GridIndex;
use crate::point::LatLng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A non-empty grid cell
///
/// `boundary` is implicitly closed; it may or may not repeat its first point.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<I> {
    pub id: I,
    pub boundary: Vec<LatLng>,
    pub count: usize,
}

impl<I> Cell<I> {
    pub fn new(id: I, boundary: Vec<LatLng>, count: usize) -> Self {
        Self { id, boundary, count }
    }
}

/// Result of aggregating a batch of points
#[derive(Debug)]
pub struct Aggregation<I> {
    /// Cells ordered by id
    pub cells: Vec<Cell<I>>,

    /// Points the grid index rejected
    pub rejected: Vec<OutlineError>,
}

/// Bucket points into cells, counting occurrences per cell
///
/// The boundary of each cell is fetched once, the first time its id is seen.
pub fn aggregate_points<G: GridIndex>(
    points: &[LatLng],
    index: &G,
    resolution: u8,
) -> Aggregation<G::Id> {
    let mut cells: BTreeMap<G::Id, Cell<G::Id>> = BTreeMap::new();
    let mut rejected = Vec::new();

    for &point in points {
        let id = match index.cell_for(point, resolution) {
            Ok(id) => id,
            Err(err) => {
                warn!("skipping point ({}, {}): {}", point.latitude, point.longitude, err);
                rejected.push(err);
                continue;
            }
        };

        cells
            .entry(id)
            .and_modify(|cell| cell.count += 1)
            .or_insert_with_key(|id| Cell::new(id.clone(), index.boundary_of(id), 1));
    }

    debug!(
        "aggregated {} points into {} cells ({} rejected)",
        points.len(),
        cells.len(),
        rejected.len()
    );

    Aggregation {
        cells: cells.into_values().collect(),
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::cell::Cell as Counter;

    /// Cell id of [`SquareGrid`]; `GridIndex::Id` requires `Display`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct SquareId(i64, i64);

    impl std::fmt::Display for SquareId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "({}, {})", self.0, self.1)
        }
    }

    impl PartialEq<(i64, i64)> for SquareId {
        fn eq(&self, other: &(i64, i64)) -> bool {
            (self.0, self.1) == *other
        }
    }

    /// Unit squares keyed by the floor of each coordinate
    struct SquareGrid {
        boundary_calls: Counter<usize>,
    }

    impl GridIndex for SquareGrid {
        type Id = SquareId;

        fn cell_for(&self, point: LatLng, _resolution: u8) -> Result<SquareId> {
            if !point.is_finite() {
                return Err(OutlineError::GridIndex("non-finite".to_string()));
            }
            Ok(SquareId(point.latitude.floor() as i64, point.longitude.floor() as i64))
        }

        fn boundary_of(&self, id: &SquareId) -> Vec<LatLng> {
            self.boundary_calls.set(self.boundary_calls.get() + 1);
            let (lat, lng) = (id.0 as f64, id.1 as f64);
            vec![
                LatLng::new(lat, lng),
                LatLng::new(lat, lng + 1.0),
                LatLng::new(lat + 1.0, lng + 1.0),
                LatLng::new(lat + 1.0, lng),
            ]
        }
    }

    #[test]
    fn test_counts_per_cell() {
        let grid = SquareGrid { boundary_calls: Counter::new(0) };
        let points = vec![
            LatLng::new(0.5, 0.5),
            LatLng::new(0.2, 0.9),
            LatLng::new(3.5, 1.5),
            LatLng::new(0.1, 0.1),
        ];

        let agg = aggregate_points(&points, &grid, 0);

        assert_eq!(agg.cells.len(), 2);
        assert!(agg.rejected.is_empty());
        assert_eq!(agg.cells[0].id, (0, 0));
        assert_eq!(agg.cells[0].count, 3);
        assert_eq!(agg.cells[1].id, (3, 1));
        assert_eq!(agg.cells[1].count, 1);
        // one boundary lookup per distinct id
        assert_eq!(grid.boundary_calls.get(), 2);
    }

    #[test]
    fn test_rejected_points_are_reported() {
        let grid = SquareGrid { boundary_calls: Counter::new(0) };
        let points = vec![LatLng::new(f64::NAN, 0.0), LatLng::new(1.5, 1.5)];

        let agg = aggregate_points(&points, &grid, 0);

        assert_eq!(agg.cells.len(), 1);
        assert_eq!(agg.rejected.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let grid = SquareGrid { boundary_calls: Counter::new(0) };
        let agg = aggregate_points(&[], &grid, 0);
        assert!(agg.cells.is_empty());
    }
}
