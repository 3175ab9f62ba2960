//! Region merging: union, topology-preserving simplification, buffering
//!
//! Each group of cell polygons is unioned into one shape, simplified with a
//! Douglas–Peucker pass per ring and optionally dilated by a small margin to
//! close hairline gaps between neighbouring hexagons.

use crate::cell_polygon::CellPolygon;
use crate::config::OutlineConfig;
use crate::error::{OutlineError, Result};
use crate::partition::Group;
use geo::{unary_union, Area, Buffer, MultiPolygon, Polygon, Simplify, Validation};
use tracing::debug;

/// Union of one group's cells after simplification and buffering
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRegion {
    pub group_index: usize,
    pub geometry: MultiPolygon<f64>,
}

impl MergedRegion {
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }

    pub fn hole_count(&self) -> usize {
        self.geometry.0.iter().map(|p| p.interiors().len()).sum()
    }
}

/// Merge all cells of `group` into a single region
///
/// `polygons` is the node arena the group's members index into.
pub fn merge_group(group: &Group, polygons: &[CellPolygon], config: &OutlineConfig) -> Result<MergedRegion> {
    let invalid = |reason: String| OutlineError::InvalidMergeResult {
        group: group.index,
        reason,
    };

    if group.is_empty() {
        return Err(invalid("group has no cells".to_string()));
    }

    let union = union_polygons(group.members.iter().map(|&m| &polygons[m].polygon));
    check_geometry(&union).map_err(|reason| invalid(format!("union: {}", reason)))?;

    let simplified = simplify_multipolygon(&union, config.simplify_tolerance);

    let geometry = if config.buffer_margin > 0.0 {
        let buffered = simplified.buffer(config.buffer_margin);
        check_geometry(&buffered).map_err(|reason| invalid(format!("buffer: {}", reason)))?;
        buffered
    } else {
        simplified
    };

    debug!(
        "group {}: {} cells merged into {} part(s), {} vertices",
        group.index,
        group.len(),
        geometry.0.len(),
        vertex_count(&geometry)
    );

    Ok(MergedRegion {
        group_index: group.index,
        geometry,
    })
}

/// Union a set of polygons into one (possibly multi-part) shape
pub fn union_polygons<'a>(polygons: impl IntoIterator<Item = &'a Polygon<f64>>) -> MultiPolygon<f64> {
    unary_union(polygons)
}

fn check_geometry(geometry: &MultiPolygon<f64>) -> std::result::Result<(), String> {
    if geometry.0.is_empty() {
        return Err("empty geometry".to_string());
    }
    let finite = geometry.0.iter().all(|p| {
        std::iter::once(p.exterior())
            .chain(p.interiors())
            .flat_map(|ring| ring.0.iter())
            .all(|c| c.x.is_finite() && c.y.is_finite())
    });
    if !finite {
        return Err("non-finite coordinate".to_string());
    }
    let area = geometry.unsigned_area();
    if !(area > 0.0) {
        return Err(format!("zero area ({})", area));
    }
    Ok(())
}

fn vertex_count(geometry: &MultiPolygon<f64>) -> usize {
    geometry
        .0
        .iter()
        .map(|p| p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>())
        .sum()
}

/// Douglas–Peucker simplification that keeps the region's topology
///
/// Each part is simplified on its own and falls back to its unsimplified
/// rings if the result is not a valid polygon. If the simplified parts
/// overlap or share an edge the whole region is left as it was.
pub fn simplify_multipolygon(geometry: &MultiPolygon<f64>, tolerance: f64) -> MultiPolygon<f64> {
    if tolerance <= 0.0 {
        return geometry.clone();
    }

    let simplified = MultiPolygon::new(geometry.0.iter().map(|p| simplify_polygon(p, tolerance)).collect());
    if simplified.is_valid() {
        simplified
    } else {
        debug!("simplified parts collide, keeping unsimplified region");
        geometry.clone()
    }
}

/// Simplify a polygon, keeping the input if the result would be invalid
///
/// Invalid covers rings with fewer than 3 distinct vertices, self-touching
/// rings and holes that cross or escape the exterior.
pub fn simplify_polygon(polygon: &Polygon<f64>, tolerance: f64) -> Polygon<f64> {
    let simplified = polygon.simplify(tolerance);
    match simplified.check_validation() {
        Ok(()) if simplified.unsigned_area() > 0.0 => simplified,
        Ok(()) => polygon.clone(),
        Err(reason) => {
            debug!("keeping unsimplified polygon: {}", reason);
            polygon.clone()
        }
    }
}
