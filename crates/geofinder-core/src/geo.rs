//! Geographic primitives shared across the SDK

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Axis-aligned geographic bounding box
///
/// `min` is the south-west corner, `max` the north-east corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    pub const fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }

    /// Geometric center of the box
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.max.latitude + self.min.latitude) / 2.0,
            (self.max.longitude + self.min.longitude) / 2.0,
        )
    }

    /// Approximate map zoom level for a viewport showing this box
    ///
    /// Derived from the longitude span: a full 360° span is zoom 0, each
    /// halving of the span adds one level. Clamped to the usual 0..=22
    /// slippy-map range.
    pub fn map_zoom(&self) -> f64 {
        let span = (self.max.longitude - self.min.longitude).abs();
        if span <= f64::EPSILON {
            return 22.0;
        }
        (360.0 / span).log2().clamp(0.0, 22.0)
    }
}
