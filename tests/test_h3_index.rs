use geo_hex_outline::{aggregate_points, process_points, GridIndex, H3Index, LatLng, OutlineConfig};
use h3o::{CellIndex, Resolution};

fn center_of(cell: CellIndex) -> LatLng {
    let ll = h3o::LatLng::from(cell);
    LatLng::new(ll.lat(), ll.lng())
}

/// Cell centers of a res-8 disk of radius `k` around downtown Toronto
fn disk_points(k: u32) -> Vec<LatLng> {
    let origin = h3o::LatLng::new(43.6532, -79.3832).unwrap().to_cell(Resolution::Eight);
    origin.grid_disk::<Vec<_>>(k).into_iter().map(center_of).collect()
}

#[test]
fn test_points_in_same_cell_are_counted_once() {
    let p = LatLng::new(43.6532, -79.3832);
    let points = vec![p, p, LatLng::new(43.6533, -79.3831), p];

    let aggregation = aggregate_points(&points, &H3Index, 8);

    assert_eq!(aggregation.cells.len(), 1);
    assert_eq!(aggregation.cells[0].count, 4);
    assert_eq!(aggregation.cells[0].id, H3Index.cell_for(p, 8).unwrap());
}

#[test]
fn test_neighbouring_h3_cells_form_one_group() {
    let points = disk_points(1);
    assert_eq!(points.len(), 7);

    let (cells, batch) = process_points(&points, &H3Index, &OutlineConfig::default());

    assert_eq!(cells.len(), 7);
    assert_eq!(batch.report.cells_dropped, 0);
    assert_eq!(batch.groups.len(), 1);
    assert_eq!(batch.groups[0].len(), 7);
    // the center cell touches all six of its neighbours
    assert!(batch.graph.edge_count() >= 12);

    assert_eq!(batch.outlines.len(), 1);
    let outline = &batch.outlines[0];
    assert_eq!(outline.geometry.0.len(), 1);
    assert_eq!(outline.geometry.0[0].interiors().len(), 0);
}

#[test]
fn test_distant_clusters_stay_apart() {
    let mut points = disk_points(1);
    points.push(LatLng::new(45.5017, -73.5673));
    points.push(LatLng::new(45.5017, -73.5673));
    points.push(LatLng::new(f64::NAN, -73.5673));

    let (cells, batch) = process_points(&points, &H3Index, &OutlineConfig::default());

    assert_eq!(cells.len(), 8);
    assert_eq!(batch.report.points, 10);
    assert_eq!(batch.report.points_rejected, 1);
    assert_eq!(batch.groups.len(), 2);
    assert_eq!(batch.outlines.len(), 2);

    let sizes: Vec<usize> = batch.groups.iter().map(|g| g.len()).collect();
    assert!(sizes.contains(&7));
    assert!(sizes.contains(&1));
}

#[test]
fn test_ring_of_cells_keeps_its_hole() {
    let origin = h3o::LatLng::new(43.6532, -79.3832).unwrap().to_cell(Resolution::Eight);
    let points: Vec<LatLng> = origin
        .grid_disk::<Vec<_>>(1)
        .into_iter()
        .filter(|&cell| cell != origin)
        .map(center_of)
        .collect();
    let config = OutlineConfig {
        simplify_tolerance: 1e-5,
        ..OutlineConfig::default()
    };

    let (_, batch) = process_points(&points, &H3Index, &config);

    assert_eq!(batch.groups.len(), 1);
    assert_eq!(batch.regions[0].hole_count(), 1);
    assert_eq!(batch.outlines[0].geometry.0[0].interiors().len(), 1);
}

#[test]
fn test_ring_of_cells_keeps_its_hole_with_default_config() {
    let origin = h3o::LatLng::new(43.6532, -79.3832).unwrap().to_cell(Resolution::Eight);
    let points: Vec<LatLng> = origin
        .grid_disk::<Vec<_>>(1)
        .into_iter()
        .filter(|&cell| cell != origin)
        .map(center_of)
        .collect();
    let config = OutlineConfig::default();

    let (cells, batch) = process_points(&points, &H3Index, &config);

    assert_eq!(cells.len(), 6);
    assert_eq!(batch.groups.len(), 1);
    assert_eq!(batch.groups[0].len(), 6);
    assert_eq!(batch.regions[0].geometry.0.len(), 1);
    assert_eq!(batch.regions[0].hole_count(), 1);

    let polygon = &batch.outlines[0].geometry.0[0];
    assert_eq!(polygon.interiors().len(), 1);
    let hole = &polygon.interiors()[0].0;
    assert_eq!(hole.first(), hole.last());
    assert_eq!(batch.outlines[0].passthrough_rings, 0);
}
