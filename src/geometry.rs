//! Planar ring helpers shared by the polygon builder, the adjacency
//! builder, the smoother and the exporter.

use geo::Coord;
use std::collections::HashSet;

/// Axis-aligned bounding box in planar (lng, lat) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BBox {
    /// Compute bounding box from a ring
    pub fn from_ring(ring: &[Coord<f64>]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for c in ring {
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_y = min_y.min(c.y);
            max_y = max_y.max(c.y);
        }

        Self { min_x, max_x, min_y, max_y }
    }

    /// Grow every side by `margin`
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if two bboxes don't overlap at all (shared sides overlap)
    pub fn disjoint(&self, other: &BBox) -> bool {
        self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y
    }
}

/// Drop a literal closing vertex if the ring repeats its first point
pub fn open_ring(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Number of distinct vertices, compared bit for bit
pub fn distinct_vertex_count(ring: &[Coord<f64>]) -> usize {
    ring.iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

/// Twice the signed area of an open ring (shoelace)
pub fn ring_signed_area2(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Round a coordinate value to specified decimal places
pub fn round_coord_with_precision(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}
