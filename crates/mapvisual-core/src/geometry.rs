// crates/mapvisual-core/src/geometry.rs

//! # Geometry Utilities
//!
//! Areal GeoJSON geometries and the syntactic union used by aggregation and
//! overlay merging. Nothing here repairs, simplifies or reprojects: a union
//! is the concatenation of polygon coordinate-sets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `[longitude, latitude]`, optionally followed by an altitude.
pub type Position = Vec<f64>;
/// A closed linear ring. First and last position are equal.
pub type Ring = Vec<Position>;
/// Exterior ring followed by any holes.
pub type PolygonCoords = Vec<Ring>;

/// Polygon or MultiPolygon, tagged by `"type"` like GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: PolygonCoords },
    MultiPolygon { coordinates: Vec<PolygonCoords> },
}

impl Geometry {
    /// Builds the smallest geometry holding `polygons`.
    ///
    /// One coordinate-set gives a `Polygon`, more give a `MultiPolygon`,
    /// none gives `None`.
    pub fn from_polygons(mut polygons: Vec<PolygonCoords>) -> Option<Self> {
        match polygons.len() {
            0 => None,
            1 => polygons.pop().map(|coordinates| Geometry::Polygon { coordinates }),
            _ => Some(Geometry::MultiPolygon {
                coordinates: polygons,
            }),
        }
    }

    /// Iterates over the polygon coordinate-sets of this geometry.
    pub fn polygons(&self) -> Box<dyn Iterator<Item = &PolygonCoords> + '_> {
        match self {
            Geometry::Polygon { coordinates } => Box::new(std::iter::once(coordinates)),
            Geometry::MultiPolygon { coordinates } => Box::new(coordinates.iter()),
        }
    }

    pub fn into_polygons(self) -> Vec<PolygonCoords> {
        match self {
            Geometry::Polygon { coordinates } => vec![coordinates],
            Geometry::MultiPolygon { coordinates } => coordinates,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }

    /// Total number of rings across all polygons.
    pub fn ring_count(&self) -> usize {
        self.polygons().map(Vec::len).sum()
    }

    /// `true` when no polygon carries a ring.
    pub fn is_empty(&self) -> bool {
        self.polygons().all(Vec::is_empty)
    }

    /// `true` when `polygon` already appears verbatim in this geometry.
    pub fn contains_polygon(&self, polygon: &PolygonCoords) -> bool {
        self.polygons().any(|p| p == polygon)
    }
}

/// Geometry slot of a feature.
///
/// Providers ship all kinds of geometry, including `null`, points and objects
/// missing `coordinates`. Anything that is not a well-formed Polygon or
/// MultiPolygon is kept verbatim in `Other` so it survives a round trip, and
/// is ignored by every union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureGeometry {
    Area(Geometry),
    Other(Value),
}

impl FeatureGeometry {
    pub fn area(&self) -> Option<&Geometry> {
        match self {
            FeatureGeometry::Area(g) => Some(g),
            FeatureGeometry::Other(_) => None,
        }
    }
}

impl From<Geometry> for FeatureGeometry {
    fn from(g: Geometry) -> Self {
        FeatureGeometry::Area(g)
    }
}

/// Collects every polygon coordinate-set of `geometries` into one geometry.
///
/// Coordinate-sets without rings are dropped. Returns `None` when nothing is
/// left; callers must not emit a feature in that case.
pub fn union_coordinates<'a, I>(geometries: I) -> Option<Geometry>
where
    I: IntoIterator<Item = &'a Geometry>,
{
    let polygons: Vec<PolygonCoords> = geometries
        .into_iter()
        .flat_map(|g| g.polygons())
        .filter(|p| !p.is_empty())
        .cloned()
        .collect();
    Geometry::from_polygons(polygons)
}

/// Same as [`union_coordinates`], over optional feature geometries.
///
/// Degenerate entries (`None`, `Other`) are skipped silently.
pub fn union_feature_geometries<'a, I>(geometries: I) -> Option<Geometry>
where
    I: IntoIterator<Item = Option<&'a FeatureGeometry>>,
{
    union_coordinates(
        geometries
            .into_iter()
            .flatten()
            .filter_map(FeatureGeometry::area),
    )
}
