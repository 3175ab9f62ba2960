//! # geo-hex-outline
//!
//! Turns point observations bucketed into hexagonal grid cells into smoothed
//! outline polygons, one per spatially connected cluster of cells.
//!
//! ## Pipeline
//!
//! 1. **Aggregate** points into cells through a [`GridIndex`] (H3 via [`H3Index`])
//! 2. **Build** a planar polygon per cell (x = longitude, y = latitude)
//! 3. **Connect** touching or overlapping cells in an [`AdjacencyGraph`]
//! 4. **Partition** the graph into connected [`Group`]s
//! 5. **Merge** each group: union, topology-preserving simplification, buffer
//! 6. **Smooth** every ring with Chaikin corner cutting
//! 7. **Export** one GeoJSON FeatureCollection per group (`{index}.geojson`)
//!
//! Cells and groups that fail (degenerate boundaries, empty merges) are
//! skipped and counted in the [`BatchReport`]; they never abort a run.
//!
//! ## Examples
//!
//! ### From raw points
//!
//! ```rust,ignore
//! use geo_hex_outline::{process_points, write_outlines, H3Index, LatLng, OutlineConfig};
//!
//! let points: Vec<LatLng> = load_points();
//! let config = OutlineConfig::default();
//!
//! let (cells, mut batch) = process_points(&points, &H3Index, &config);
//! let files = write_outlines("output".as_ref(), &batch.outlines, config.precision)?;
//! batch.report.exported = files.len();
//!
//! println!("{}", batch.report);
//! ```
//!
//! ### From cells you already have
//!
//! ```rust
//! use geo_hex_outline::{process_cells, Cell, LatLng, OutlineConfig};
//!
//! let square = |lat: f64, lng: f64| {
//!     Cell::new(
//!         format!("{lat},{lng}"),
//!         vec![
//!             LatLng::new(lat, lng),
//!             LatLng::new(lat, lng + 0.01),
//!             LatLng::new(lat + 0.01, lng + 0.01),
//!             LatLng::new(lat + 0.01, lng),
//!         ],
//!         1,
//!     )
//! };
//! let cells = vec![square(0.0, 0.0), square(0.0, 0.01), square(1.0, 1.0)];
//!
//! let batch = process_cells(&cells, &OutlineConfig::default());
//! assert_eq!(batch.groups.len(), 2);
//! assert_eq!(batch.outlines.len(), 2);
//! ```
//!
//! ## Performance
//!
//! - Adjacency candidates come from a uniform bucket grid, not all pairs
//! - Candidate tests and per-group merge/smooth run on Rayon's thread pool
//! - Output order always follows partition order

pub mod adjacency;
mod cell;
pub mod cell_polygon;
pub mod config;
mod error;
pub mod export;
pub mod geometry;
mod grid_index;
pub mod ingest;
pub mod merge;
pub mod partition;
mod pipeline;
mod point;
pub mod smooth;

pub use adjacency::{build_adjacency_graph, build_adjacency_graph_exhaustive, polygons_adjacent, AdjacencyGraph};
pub use cell::{aggregate_points, Aggregation, Cell};
pub use cell_polygon::{build_cell_polygon, build_cell_polygons, CellPolygon};
pub use config::OutlineConfig;
pub use error::{OutlineError, Result};
pub use export::{
    cells_to_collection,
    outline_to_collection,
    outline_to_feature,
    read_outline,
    write_outline,
    write_outlines,
};
pub use grid_index::{GridIndex, H3Index};
pub use ingest::{points_from_geojson, read_points, PropertyFilter};
pub use merge::{merge_group, MergedRegion};
pub use partition::{connected_components, Group};
pub use pipeline::{process_cells, process_points, BatchReport, OutlineBatch};
pub use point::LatLng;
pub use smooth::{smooth_region, smooth_ring, SmoothedOutline};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_outputs_cross_threads() {
        // merge and smooth run on the rayon pool; results and errors move back
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CellPolygon>();
        assert_send_sync::<Group>();
        assert_send_sync::<MergedRegion>();
        assert_send_sync::<SmoothedOutline>();
        assert_send_sync::<OutlineError>();
        assert_send_sync::<OutlineConfig>();
        assert_send_sync::<Cell<<H3Index as GridIndex>::Id>>();
    }

    #[test]
    fn test_default_config_round_trips_through_json() {
        let config = OutlineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(OutlineConfig::from_json_str(&json).unwrap(), config);
    }
}
