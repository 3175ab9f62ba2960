//! Error kinds produced by the outline pipeline
//!
//! Every variant except the I/O and serialization ones is local to a single
//! cell, group or ring. The pipeline records them in its batch report and
//! keeps going.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlineError {
    /// A cell boundary cannot form a simple polygon
    #[error("cell {cell} has degenerate boundary geometry: {reason}")]
    DegenerateCellGeometry { cell: String, reason: String },

    /// Union, simplification or buffering left nothing usable for a group
    #[error("group {group} produced an invalid merge result: {reason}")]
    InvalidMergeResult { group: usize, reason: String },

    /// A ring handed to the smoother has too few distinct vertices
    #[error("ring has {distinct} distinct vertices, at least 3 are required")]
    MalformedRing { distinct: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The grid index rejected a point
    #[error("grid index error: {0}")]
    GridIndex(String),

    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, OutlineError>;

impl OutlineError {
    /// True for the per-item kinds the pipeline tolerates without aborting
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OutlineError::DegenerateCellGeometry { .. }
                | OutlineError::InvalidMergeResult { .. }
                | OutlineError::MalformedRing { .. }
                | OutlineError::GridIndex(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OutlineError::MalformedRing { distinct: 2 };
        assert_eq!(
            err.to_string(),
            "ring has 2 distinct vertices, at least 3 are required"
        );

        let err = OutlineError::InvalidMergeResult {
            group: 4,
            reason: "zero area".to_string(),
        };
        assert_eq!(err.to_string(), "group 4 produced an invalid merge result: zero area");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(OutlineError::MalformedRing { distinct: 1 }.is_recoverable());
        assert!(OutlineError::GridIndex("bad".into()).is_recoverable());
        assert!(!OutlineError::InvalidConfig("bad".into()).is_recoverable());
    }
}
