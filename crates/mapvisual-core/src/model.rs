// crates/mapvisual-core/src/model.rs
use crate::geometry::{FeatureGeometry, Geometry};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Property keys every normalized feature carries.
pub const NAME_KEY: &str = "NAME_1";
pub const SHORT_NAME_KEY: &str = "name";
/// State key used by census-style district files.
pub const STATE_KEY: &str = "st_nm";
/// Highcharts slug key (`"jammu-and-kashmir"`).
pub const HC_KEY: &str = "hc-key";

pub type Properties = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<FeatureGeometry>,
}

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub tag: CollectionTag,
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    pub fn new(properties: Properties, geometry: Option<Geometry>) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: None,
            properties,
            geometry: geometry.map(FeatureGeometry::Area),
        }
    }

    /// Feature whose canonical name is written under both name keys.
    pub fn named(name: &str, geometry: Geometry) -> Self {
        let mut properties = Properties::new();
        properties.insert(NAME_KEY.to_string(), Value::from(name));
        properties.insert(SHORT_NAME_KEY.to_string(), Value::from(name));
        Self::new(properties, Some(geometry))
    }

    /// Non-blank string property.
    pub fn text_property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Canonical name: `NAME_1`, falling back to `name`.
    pub fn canonical_name(&self) -> Option<&str> {
        self.text_property(NAME_KEY)
            .or_else(|| self.text_property(SHORT_NAME_KEY))
    }

    /// Areal geometry, if the feature has a well-formed one.
    pub fn area(&self) -> Option<&Geometry> {
        self.geometry.as_ref().and_then(FeatureGeometry::area)
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(FeatureGeometry::Area(geometry));
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Canonical names in feature order. Features without one are skipped.
    pub fn names(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter_map(Feature::canonical_name)
            .collect()
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}
