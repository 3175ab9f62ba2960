//! Point ingestion from GeoJSON
//!
//! Reads `Point` features, drops those without usable coordinates and keeps
//! only the category of interest when a property filter is given.

use crate::error::Result;
use crate::point::LatLng;
use geojson::{Feature, GeoJson, Value as GeoValue};
use std::path::Path;
use tracing::debug;

/// Keep features whose property `key` equals `value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    pub key: String,
    pub value: String,
}

impl PropertyFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Strings compare by content, other JSON values by their JSON text
    pub fn matches(&self, feature: &Feature) -> bool {
        match feature.property(&self.key) {
            Some(serde_json::Value::String(s)) => *s == self.value,
            Some(other) => other.to_string() == self.value,
            None => false,
        }
    }
}

/// Collect point observations from a GeoJSON document
pub fn points_from_geojson(geojson: &GeoJson, filter: Option<&PropertyFilter>) -> Vec<LatLng> {
    let features: Vec<&Feature> = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features.iter().collect(),
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => Vec::new(),
    };

    let total = features.len();
    let points: Vec<LatLng> = features
        .into_iter()
        .filter(|feature| filter.map_or(true, |f| f.matches(feature)))
        .filter_map(|feature| match feature.geometry.as_ref().map(|g| &g.value) {
            Some(GeoValue::Point(position)) if position.len() >= 2 => {
                Some(LatLng::new(position[1], position[0]))
            }
            _ => None,
        })
        .filter(LatLng::is_finite)
        .collect();

    debug!("ingested {} of {} features as points", points.len(), total);
    points
}

/// Read a GeoJSON file of point features
pub fn read_points(path: &Path, filter: Option<&PropertyFilter>) -> Result<Vec<LatLng>> {
    let text = std::fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;
    Ok(points_from_geojson(&geojson, filter))
}
