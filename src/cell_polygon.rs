//! Cell polygon construction
//!
//! Turns a cell's (lat, lng) boundary into a planar polygon with
//! x = longitude, y = latitude.

use crate::cell::Cell;
use crate::error::{OutlineError, Result};
use crate::geometry::{distinct_vertex_count, open_ring, ring_signed_area2, BBox};
use geo::{Coord, LineString, Polygon, Validation};
use std::fmt;
use tracing::warn;

/// Planar polygon derived from one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellPolygon {
    /// Index of the source cell in the input slice
    pub cell: usize,
    pub polygon: Polygon<f64>,
    pub bbox: BBox,
}

impl CellPolygon {
    /// Open exterior ring (no closing duplicate)
    pub fn ring(&self) -> &[Coord<f64>] {
        open_ring(&self.polygon.exterior().0)
    }
}

/// Build the planar polygon of `cell`, stored at position `index` of its batch
pub fn build_cell_polygon<I: fmt::Display>(index: usize, cell: &Cell<I>) -> Result<CellPolygon> {
    let coords: Vec<Coord<f64>> = cell.boundary.iter().map(|p| p.to_coord()).collect();
    let ring = open_ring(&coords);

    let degenerate = |reason: String| OutlineError::DegenerateCellGeometry {
        cell: cell.id.to_string(),
        reason,
    };

    if ring.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(degenerate("non-finite coordinate".to_string()));
    }
    let distinct = distinct_vertex_count(ring);
    if distinct < 3 {
        return Err(degenerate(format!("{} distinct vertices", distinct)));
    }
    if ring_signed_area2(ring) == 0.0 {
        return Err(degenerate("zero area".to_string()));
    }

    let polygon = Polygon::new(LineString::from(ring.to_vec()), vec![]);
    polygon
        .check_validation()
        .map_err(|reason| degenerate(reason.to_string()))?;

    Ok(CellPolygon {
        cell: index,
        polygon,
        bbox: BBox::from_ring(ring),
    })
}

/// Build polygons for a whole batch, dropping degenerate cells
///
/// The returned polygons keep input order; `cell` points back into `cells`.
pub fn build_cell_polygons<I: fmt::Display>(cells: &[Cell<I>]) -> (Vec<CellPolygon>, Vec<OutlineError>) {
    let mut polygons = Vec::with_capacity(cells.len());
    let mut dropped = Vec::new();

    for (i, cell) in cells.iter().enumerate() {
        match build_cell_polygon(i, cell) {
            Ok(polygon) => polygons.push(polygon),
            Err(err) => {
                warn!("dropping cell from adjacency graph: {}", err);
                dropped.push(err);
            }
        }
    }

    (polygons, dropped)
}
