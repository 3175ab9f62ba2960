//! End-to-end outline pipeline
//!
//! cells → cell polygons → adjacency graph → groups → merged regions →
//! smoothed outlines. Groups are independent once partitioned, so merging
//! and smoothing fan out over rayon; collecting the indexed parallel
//! iterator keeps partition order.

use crate::adjacency::{build_adjacency_graph, AdjacencyGraph};
use crate::cell::{aggregate_points, Cell};
use crate::cell_polygon::{build_cell_polygons, CellPolygon};
use crate::config::OutlineConfig;
use crate::error::OutlineError;
use crate::grid_index::GridIndex;
use crate::merge::{merge_group, MergedRegion};
use crate::partition::{connected_components, Group};
use crate::point::LatLng;
use crate::smooth::{smooth_region, SmoothedOutline};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub points: usize,
    pub points_rejected: usize,
    pub cells: usize,
    pub cells_dropped: usize,
    pub edges: usize,
    pub groups: usize,
    pub groups_skipped: usize,
    pub outlines: usize,
    pub passthrough_rings: usize,
    pub exported: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points > 0 {
            write!(f, "{} points ({} rejected), ", self.points, self.points_rejected)?;
        }
        write!(
            f,
            "{} cells ({} dropped), {} adjacencies, {} groups processed, {} skipped, {} outlines ({} rings unsmoothed), {} exported",
            self.cells,
            self.cells_dropped,
            self.edges,
            self.groups,
            self.groups_skipped,
            self.outlines,
            self.passthrough_rings,
            self.exported
        )
    }
}

/// Everything one run produces
#[derive(Debug)]
pub struct OutlineBatch {
    pub polygons: Vec<CellPolygon>,
    pub graph: AdjacencyGraph,
    pub groups: Vec<Group>,
    pub regions: Vec<MergedRegion>,
    pub outlines: Vec<SmoothedOutline>,
    pub errors: Vec<OutlineError>,
    pub report: BatchReport,
}

/// Run the outline pipeline over aggregated cells
pub fn process_cells<I: fmt::Display>(cells: &[Cell<I>], config: &OutlineConfig) -> OutlineBatch {
    let start = Instant::now();
    let mut report = BatchReport {
        cells: cells.len(),
        ..BatchReport::default()
    };

    let (polygons, mut errors) = build_cell_polygons(cells);
    report.cells_dropped = errors.len();

    let graph = build_adjacency_graph(&polygons, config.adjacency_epsilon);
    report.edges = graph.edge_count();

    let groups = connected_components(&graph);
    report.groups = groups.len();
    debug!("partitioned {} cell polygons into {} groups", polygons.len(), groups.len());

    let results: Vec<Result<(MergedRegion, SmoothedOutline), OutlineError>> = groups
        .par_iter()
        .map(|group| {
            let region = merge_group(group, &polygons, config)?;
            let outline = smooth_region(&region, config);
            Ok((region, outline))
        })
        .collect();

    let mut regions = Vec::with_capacity(results.len());
    let mut outlines = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok((region, outline)) => {
                report.passthrough_rings += outline.passthrough_rings;
                regions.push(region);
                outlines.push(outline);
            }
            Err(err) => {
                warn!("skipping group: {}", err);
                report.groups_skipped += 1;
                errors.push(err);
            }
        }
    }
    report.outlines = outlines.len();

    info!("outline pipeline finished in {:?}: {}", start.elapsed(), report);

    OutlineBatch {
        polygons,
        graph,
        groups,
        regions,
        outlines,
        errors,
        report,
    }
}

/// Aggregate raw points through `index`, then run the pipeline
///
/// Returns the aggregated cells alongside the batch so callers can render
/// them.
pub fn process_points<G: GridIndex>(
    points: &[LatLng],
    index: &G,
    config: &OutlineConfig,
) -> (Vec<Cell<G::Id>>, OutlineBatch) {
    let aggregation = aggregate_points(points, index, config.resolution);
    let mut batch = process_cells(&aggregation.cells, config);

    batch.report.points = points.len();
    batch.report.points_rejected = aggregation.rejected.len();
    batch.errors.extend(aggregation.rejected);

    (aggregation.cells, batch)
}
