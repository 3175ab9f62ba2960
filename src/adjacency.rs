//! Adjacency graph over cell polygons
//!
//! Nodes are indices into the `CellPolygon` slice; edges connect polygons
//! that intersect or whose boundaries come within `epsilon` of each other.
//!
//! Candidate pairs come from a uniform bucket grid. The bucket size is the
//! largest epsilon-expanded bounding box extent in the batch, so every
//! expanded box covers at most 2x2 buckets and any two overlapping boxes
//! share at least one bucket. Pairs whose boxes are disjoint can never be
//! adjacent, so the bucketed edge set equals the exhaustive one.

use crate::cell_polygon::CellPolygon;
use crate::geometry::BBox;
use arrayvec::ArrayVec;
use geo::{Distance, Euclidean, Intersects};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

type BucketKey = (i64, i64);

/// Undirected graph stored as sorted adjacency lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Build from an undirected edge list; duplicates and self pairs are ignored
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut neighbors = vec![Vec::new(); node_count];
        for (a, b) in edges {
            if a == b {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors }
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Neighbors of `node`, ascending
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors
            .get(a)
            .is_some_and(|list| list.binary_search(&b).is_ok())
    }

    /// Each undirected edge once, as `(low, high)`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(a, list)| list.iter().filter(move |&&b| b > a).map(move |&b| (a, b)))
    }
}

/// Test whether two cell polygons touch or overlap
pub fn polygons_adjacent(a: &CellPolygon, b: &CellPolygon, epsilon: f64) -> bool {
    if a.bbox.expand(epsilon).disjoint(&b.bbox) {
        return false;
    }
    if a.polygon.intersects(&b.polygon) {
        return true;
    }
    Euclidean.distance(a.polygon.exterior(), b.polygon.exterior()) <= epsilon
}

/// Build the adjacency graph using spatial bucketing
pub fn build_adjacency_graph(polygons: &[CellPolygon], epsilon: f64) -> AdjacencyGraph {
    let start = Instant::now();
    let n = polygons.len();
    if n == 0 {
        return AdjacencyGraph::from_edges(0, std::iter::empty());
    }

    let expanded: Vec<BBox> = polygons.iter().map(|p| p.bbox.expand(epsilon)).collect();
    let bucket_size = expanded
        .iter()
        .map(|b| b.width().max(b.height()))
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE)
        * (1.0 + 1e-6);

    let mut buckets: HashMap<BucketKey, Vec<usize>> = HashMap::new();
    let node_buckets: Vec<ArrayVec<BucketKey, 4>> = expanded
        .iter()
        .map(|bbox| buckets_for(bbox, bucket_size))
        .collect();
    for (i, keys) in node_buckets.iter().enumerate() {
        for key in keys {
            buckets.entry(*key).or_default().push(i);
        }
    }

    // Each node tests only higher-indexed candidates, so every pair is tested once
    let edges: Vec<(usize, usize)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut candidates: Vec<usize> = node_buckets[i]
                .iter()
                .filter_map(|key| buckets.get(key))
                .flatten()
                .copied()
                .filter(|&j| j > i)
                .collect();
            candidates.sort_unstable();
            candidates.dedup();

            candidates
                .into_iter()
                .filter(move |&j| polygons_adjacent(&polygons[i], &polygons[j], epsilon))
                .map(move |j| (i, j))
        })
        .collect();

    let graph = AdjacencyGraph::from_edges(n, edges);
    debug!(
        "adjacency graph: {} nodes, {} edges, {} buckets in {:?}",
        graph.node_count(),
        graph.edge_count(),
        buckets.len(),
        start.elapsed()
    );
    graph
}

/// Build the adjacency graph by testing every unordered pair
pub fn build_adjacency_graph_exhaustive(polygons: &[CellPolygon], epsilon: f64) -> AdjacencyGraph {
    let n = polygons.len();
    let edges = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j)));
    let edges: Vec<(usize, usize)> = edges
        .filter(|&(i, j)| polygons_adjacent(&polygons[i], &polygons[j], epsilon))
        .collect();
    AdjacencyGraph::from_edges(n, edges)
}

/// Buckets covered by a box narrower and shorter than `size`
fn buckets_for(bbox: &BBox, size: f64) -> ArrayVec<BucketKey, 4> {
    let x0 = (bbox.min_x / size).floor() as i64;
    let x1 = (bbox.max_x / size).floor() as i64;
    let y0 = (bbox.min_y / size).floor() as i64;
    let y1 = (bbox.max_y / size).floor() as i64;

    let mut keys = ArrayVec::new();
    for x in x0..=x1.min(x0 + 1) {
        for y in y0..=y1.min(y0 + 1) {
            keys.push((x, y));
        }
    }
    keys
}
