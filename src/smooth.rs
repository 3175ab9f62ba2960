//! Chaikin corner-cutting smoothing
//!
//! Every pass replaces each edge `(p1, p2)` of a closed ring with the two
//! points `q = (1 - r)·p1 + r·p2` and `s = r·p1 + (1 - r)·p2`. After `k`
//! passes an `n`-vertex ring has `2^k · n` distinct vertices; the returned
//! ring also repeats its first vertex at the end.

use crate::config::OutlineConfig;
use crate::error::{OutlineError, Result};
use crate::geometry::{distinct_vertex_count, open_ring};
use crate::merge::MergedRegion;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use tracing::warn;

/// Default cut ratio
pub const DEFAULT_RATIO: f64 = 0.25;

/// The smoothed outline of one group
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedOutline {
    pub group_index: usize,
    pub geometry: MultiPolygon<f64>,

    /// Rings that were too degenerate to smooth and were copied unchanged
    pub passthrough_rings: usize,
}

/// Smooth a closed ring
///
/// The input may or may not repeat its first vertex. Fails with
/// `MalformedRing` if fewer than 3 distinct vertices remain.
pub fn smooth_ring(ring: &[Coord<f64>], iterations: u32, ratio: f64) -> Result<Vec<Coord<f64>>> {
    let open = open_ring(ring);
    let distinct = distinct_vertex_count(open);
    if distinct < 3 {
        return Err(OutlineError::MalformedRing { distinct });
    }

    let mut coords = open.to_vec();
    for _ in 0..iterations {
        coords = cut_corners(&coords, ratio);
    }
    coords.push(coords[0]);
    Ok(coords)
}

/// One corner-cutting pass over an open ring, result still open
fn cut_corners(ring: &[Coord<f64>], ratio: f64) -> Vec<Coord<f64>> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % n];
        out.push(p1 * (1.0 - ratio) + p2 * ratio);
        out.push(p1 * ratio + p2 * (1.0 - ratio));
    }
    out
}

/// Smooth every exterior and hole ring of a merged region
///
/// Ring structure is kept as is: hole `i` of part `j` stays hole `i` of part
/// `j`. A malformed ring passes through unsmoothed.
pub fn smooth_region(region: &MergedRegion, config: &OutlineConfig) -> SmoothedOutline {
    let mut passthrough_rings = 0;
    let mut smooth = |ring: &LineString<f64>| -> LineString<f64> {
        match smooth_ring(&ring.0, config.smooth_iterations, config.smooth_ratio) {
            Ok(coords) => LineString::from(coords),
            Err(err) => {
                warn!("group {}: leaving ring unsmoothed: {}", region.group_index, err);
                passthrough_rings += 1;
                ring.clone()
            }
        }
    };

    let parts: Vec<Polygon<f64>> = region
        .geometry
        .0
        .iter()
        .map(|polygon| {
            let exterior = smooth(polygon.exterior());
            let interiors = polygon.interiors().iter().map(&mut smooth).collect();
            Polygon::new(exterior, interiors)
        })
        .collect();

    SmoothedOutline {
        group_index: region.group_index,
        geometry: MultiPolygon::new(parts),
        passthrough_rings,
    }
}
