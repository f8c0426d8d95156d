// crates/mapvisual-core/src/topo.rs

//! TopoJSON documents.
//!
//! Topologies are served as-is. The only inspection done is the placeholder
//! guard (a real topology has arcs) and a stub conversion to GeoJSON that
//! keeps ids and properties but leaves coordinates empty.

use crate::geometry::{FeatureGeometry, Geometry};
use crate::model::{Feature, FeatureCollection, FeatureTag, Properties};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyTag {
    #[default]
    Topology,
}

/// A TopoJSON topology. Members other than `arcs` and `objects`
/// (`transform`, `bbox`, ...) are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub tag: TopologyTag,
    #[serde(default)]
    pub arcs: Vec<Value>,
    #[serde(default)]
    pub objects: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Topology {
    /// Placeholder files ship without arc data.
    pub fn is_placeholder(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Geometries of the named object (`objects.<name>.geometries`).
    pub fn object_geometries(&self, object: &str) -> &[Value] {
        self.objects
            .get(object)
            .and_then(|o| o.get("geometries"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Stub TopoJSON → GeoJSON conversion.
///
/// Emits one feature per geometry of `object`, carrying its `id` and
/// `properties` and a geometry of the declared type (default `Polygon`) with
/// an empty coordinate array. Arcs are not decoded.
pub fn stub_features(topology: &Topology, object: &str) -> FeatureCollection {
    let features = topology
        .object_geometries(object)
        .iter()
        .map(|geom| {
            let properties: Properties = geom
                .get("properties")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            let kind = geom.get("type").and_then(Value::as_str).unwrap_or("Polygon");
            let geometry = match kind {
                "Polygon" => FeatureGeometry::Area(Geometry::Polygon {
                    coordinates: Vec::new(),
                }),
                "MultiPolygon" => FeatureGeometry::Area(Geometry::MultiPolygon {
                    coordinates: Vec::new(),
                }),
                other => FeatureGeometry::Other(json!({ "type": other, "coordinates": [] })),
            };
            Feature {
                tag: FeatureTag::Feature,
                id: geom.get("id").cloned().filter(|v| !v.is_null()),
                properties,
                geometry: Some(geometry),
            }
        })
        .collect::<Vec<_>>();

    FeatureCollection::new(features)
}
