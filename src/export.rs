//! GeoJSON output
//!
//! Outlines become one FeatureCollection per group, written to
//! `{group_index}.geojson`. Cells become one collection with a Polygon
//! feature per cell carrying its count and a fill color for rendering.
//! Coordinates are `[longitude, latitude]`, written at full precision
//! unless a number of decimals is requested.

use crate::cell::Cell;
use crate::error::{OutlineError, Result};
use crate::geometry::round_coord_with_precision;
use crate::smooth::SmoothedOutline;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Position, Value as GeoValue};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Low end of the cell color ramp
pub const RAMP_LOW: [u8; 3] = [0x7d, 0x9e, 0x96];

/// High end of the cell color ramp
pub const RAMP_HIGH: [u8; 3] = [0x01, 0x45, 0x34];

fn position(x: f64, y: f64, precision: Option<u32>) -> Position {
    match precision {
        Some(p) => vec![round_coord_with_precision(x, p), round_coord_with_precision(y, p)],
        None => vec![x, y],
    }
}

/// Ring positions; rounding may merge neighbouring vertices, so runs of
/// equal positions are collapsed
fn ring_positions(ring: &LineString<f64>, precision: Option<u32>) -> Vec<Position> {
    let mut positions: Vec<Position> = ring.0.iter().map(|c| position(c.x, c.y, precision)).collect();
    positions.dedup();
    positions
}

fn polygon_positions(polygon: &Polygon<f64>, precision: Option<u32>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring_positions(ring, precision))
        .collect()
}

/// GeoJSON geometry for a multi-polygon: `Polygon` if it has one part
///
/// `precision` rounds coordinates to that many decimals; `None` writes them
/// unchanged.
pub fn multipolygon_to_geometry(geometry: &MultiPolygon<f64>, precision: Option<u32>) -> Geometry {
    let value = match geometry.0.as_slice() {
        [single] => GeoValue::Polygon(polygon_positions(single, precision)),
        parts => GeoValue::MultiPolygon(parts.iter().map(|p| polygon_positions(p, precision)).collect()),
    };
    Geometry::new(value)
}

/// Feature for one outline; properties default to an empty map
pub fn outline_to_feature(outline: &SmoothedOutline, properties: Option<JsonObject>, precision: Option<u32>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(multipolygon_to_geometry(&outline.geometry, precision)),
        id: None,
        properties: Some(properties.unwrap_or_default()),
        foreign_members: None,
    }
}

/// Standalone collection holding a single outline feature
pub fn outline_to_collection(outline: &SmoothedOutline, precision: Option<u32>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![outline_to_feature(outline, None, precision)],
        foreign_members: None,
    }
}

/// File name an outline is written under
pub fn outline_file_name(group_index: usize) -> String {
    format!("{}.geojson", group_index)
}

/// Write one outline to `dir/{group_index}.geojson`
pub fn write_outline(dir: &Path, outline: &SmoothedOutline, precision: Option<u32>) -> Result<PathBuf> {
    let path = dir.join(outline_file_name(outline.group_index));
    let collection = outline_to_collection(outline, precision);
    std::fs::write(&path, serde_json::to_string_pretty(&collection)?)?;
    debug!("wrote outline {} to {}", outline.group_index, path.display());
    Ok(path)
}

/// Write every outline, creating `dir` if needed; returns the files written
pub fn write_outlines(dir: &Path, outlines: &[SmoothedOutline], precision: Option<u32>) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    outlines
        .iter()
        .map(|outline| write_outline(dir, outline, precision))
        .collect()
}

/// Read back an outline file written by [`write_outline`]
pub fn read_outline(path: &Path) -> Result<MultiPolygon<f64>> {
    let text = std::fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;
    let geometry = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .next()
            .and_then(|feature| feature.geometry),
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::Geometry(geometry) => Some(geometry),
    };
    let geometry = geometry.ok_or_else(|| OutlineError::UnsupportedGeometry("no geometry".to_string()))?;
    geometry_to_multipolygon(&geometry)
}

/// Convert a GeoJSON `Polygon` or `MultiPolygon` into planar geometry
pub fn geometry_to_multipolygon(geometry: &Geometry) -> Result<MultiPolygon<f64>> {
    match &geometry.value {
        GeoValue::Polygon(rings) => Ok(MultiPolygon::new(vec![positions_to_polygon(rings)?])),
        GeoValue::MultiPolygon(parts) => Ok(MultiPolygon::new(
            parts.iter().map(|rings| positions_to_polygon(rings)).collect::<Result<_>>()?,
        )),
        other => Err(OutlineError::UnsupportedGeometry(value_kind(other).to_string())),
    }
}

fn value_kind(value: &GeoValue) -> &'static str {
    match value {
        GeoValue::Point(_) => "Point",
        GeoValue::MultiPoint(_) => "MultiPoint",
        GeoValue::LineString(_) => "LineString",
        GeoValue::MultiLineString(_) => "MultiLineString",
        GeoValue::Polygon(_) => "Polygon",
        GeoValue::MultiPolygon(_) => "MultiPolygon",
        GeoValue::GeometryCollection(_) => "GeometryCollection",
    }
}

fn positions_to_polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.iter()
            .map(|p| match p.as_slice() {
                [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                _ => Err(OutlineError::UnsupportedGeometry("position with fewer than 2 values".to_string())),
            })
            .collect::<Result<Vec<_>>>()
            .map(LineString::from)
    });
    let exterior = rings
        .next()
        .ok_or_else(|| OutlineError::UnsupportedGeometry("polygon without rings".to_string()))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Hex color for `count` on the linear ramp between `min` and `max`
pub fn count_color(count: usize, min: usize, max: usize) -> String {
    let t = if max > min {
        (count.clamp(min, max) - min) as f64 / (max - min) as f64
    } else {
        0.0
    };
    let channel = |i: usize| {
        let low = RAMP_LOW[i] as f64;
        let high = RAMP_HIGH[i] as f64;
        (low + (high - low) * t).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}

/// One Polygon feature per cell with `cell`, `count` and `fill` properties
pub fn cells_to_collection<I: fmt::Display>(cells: &[Cell<I>], precision: Option<u32>) -> FeatureCollection {
    let min = cells.iter().map(|c| c.count).min().unwrap_or(0);
    let max = cells.iter().map(|c| c.count).max().unwrap_or(0);

    let features = cells
        .iter()
        .map(|cell| {
            let mut ring: Vec<Position> = cell
                .boundary
                .iter()
                .map(|p| position(p.longitude, p.latitude, precision))
                .collect();
            ring.dedup();
            if ring.first() != ring.last() {
                if let Some(first) = ring.first().cloned() {
                    ring.push(first);
                }
            }

            let mut properties = JsonObject::new();
            properties.insert("cell".to_string(), serde_json::json!(cell.id.to_string()));
            properties.insert("count".to_string(), serde_json::json!(cell.count));
            properties.insert("fill".to_string(), serde_json::json!(count_color(cell.count, min, max)));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(GeoValue::Polygon(vec![ring]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
