// crates/mapvisual-core/src/validate.rs

//! Data-quality checks for assembled or cached collections.
//!
//! Checks never modify the collection; they return every problem found so a
//! bootstrap run can report them all at once.

use crate::geometry::{FeatureGeometry, Geometry};
use crate::model::FeatureCollection;
use crate::traits::NameMatch;
use std::fmt;

/// Inclusive lng/lat rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const WORLD: BoundingBox = BoundingBox {
        min_lng: -180.0,
        max_lng: 180.0,
        min_lat: -90.0,
        max_lat: 90.0,
    };

    /// Generous box around India, including the disputed northern areas.
    pub const INDIA: BoundingBox = BoundingBox {
        min_lng: 65.0,
        max_lng: 100.0,
        min_lat: 5.0,
        max_lat: 40.0,
    };

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        (self.min_lng..=self.max_lng).contains(&lng) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    MissingGeometry,
    /// Geometry present but not Polygon/MultiPolygon.
    UnsupportedGeometry(String),
    EmptyCoordinates,
    MissingName,
    /// A linear ring with fewer than four positions.
    ShortRing { positions: usize },
    /// A linear ring whose last position differs from its first.
    OpenRing,
    /// A position with fewer than two numbers.
    ShortPosition,
    /// Outside WGS84 ranges.
    InvalidPosition { lng: f64, lat: f64 },
    OutsideBounds { lng: f64, lat: f64 },
}

/// One problem, tied to the feature index it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub feature: usize,
    pub name: Option<String>,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        write!(f, "feature #{} ({}): ", self.feature, name)?;
        match &self.kind {
            IssueKind::MissingGeometry => f.write_str("missing geometry"),
            IssueKind::UnsupportedGeometry(t) => write!(f, "unsupported geometry type {t}"),
            IssueKind::EmptyCoordinates => f.write_str("empty coordinates"),
            IssueKind::MissingName => f.write_str("no NAME_1/name property"),
            IssueKind::ShortRing { positions } => {
                write!(f, "ring with {positions} positions (needs at least 4)")
            }
            IssueKind::OpenRing => f.write_str("ring is not closed"),
            IssueKind::ShortPosition => f.write_str("position with fewer than 2 values"),
            IssueKind::InvalidPosition { lng, lat } => {
                write!(f, "invalid coordinate [{lng}, {lat}]")
            }
            IssueKind::OutsideBounds { lng, lat } => {
                write!(f, "coordinate [{lng}, {lat}] outside expected bounds")
            }
        }
    }
}

/// Checks every feature; only the first ring problem and the first position
/// problem per feature are reported.
pub fn check_collection(collection: &FeatureCollection, bounds: Option<BoundingBox>) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let name = feature.canonical_name().map(str::to_string);
        let mut push = |kind| {
            issues.push(Issue {
                feature: index,
                name: name.clone(),
                kind,
            })
        };

        if feature.name_str().is_empty() {
            push(IssueKind::MissingName);
        }

        let geometry = match &feature.geometry {
            None => {
                push(IssueKind::MissingGeometry);
                continue;
            }
            Some(FeatureGeometry::Other(value)) => {
                let kind = value
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                push(IssueKind::UnsupportedGeometry(kind));
                continue;
            }
            Some(FeatureGeometry::Area(g)) => g,
        };

        if geometry.is_empty() {
            push(IssueKind::EmptyCoordinates);
            continue;
        }
        if let Some(kind) = first_ring_issue(geometry) {
            push(kind);
        }
        if let Some(kind) = first_position_issue(geometry, bounds) {
            push(kind);
        }
    }

    issues
}

fn first_ring_issue(geometry: &Geometry) -> Option<IssueKind> {
    geometry.polygons().flatten().find_map(|ring| {
        if ring.len() < 4 {
            Some(IssueKind::ShortRing {
                positions: ring.len(),
            })
        } else if ring.first() != ring.last() {
            Some(IssueKind::OpenRing)
        } else {
            None
        }
    })
}

fn first_position_issue(geometry: &Geometry, bounds: Option<BoundingBox>) -> Option<IssueKind> {
    geometry
        .polygons()
        .flatten()
        .flatten()
        .find_map(|position| match position.as_slice() {
            [lng, lat, ..] if !BoundingBox::WORLD.contains(*lng, *lat) => {
                Some(IssueKind::InvalidPosition {
                    lng: *lng,
                    lat: *lat,
                })
            }
            [lng, lat, ..] => bounds
                .filter(|b| !b.contains(*lng, *lat))
                .map(|_| IssueKind::OutsideBounds {
                    lng: *lng,
                    lat: *lat,
                }),
            _ => Some(IssueKind::ShortPosition),
        })
}
