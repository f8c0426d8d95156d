#![allow(dead_code)]

use mapvisual_core::error::{BoundaryError, Result};
use mapvisual_core::geometry::PolygonCoords;
use mapvisual_core::{AliasTable, AssemblerConfig, BoundaryAssembler, Geometry, HttpClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Serves canned bodies by URL; anything else is a 404. Every request is
/// recorded.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    routes: HashMap<String, Vec<u8>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, body: &Value) -> Self {
        self.routes
            .insert(url.to_string(), serde_json::to_vec(body).unwrap());
        self
    }

    pub fn route_raw(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| BoundaryError::Http(format!("HTTP 404 Not Found from {url}")))
    }
}

pub fn assembler(data_dir: &Path, http: MockHttpClient) -> BoundaryAssembler {
    BoundaryAssembler::new(
        AssemblerConfig::default().with_data_dir(data_dir),
        AliasTable::with_defaults(),
        Box::new(http),
    )
}

pub fn square(x: f64, y: f64) -> PolygonCoords {
    vec![vec![
        vec![x, y],
        vec![x + 1.0, y],
        vec![x + 1.0, y + 1.0],
        vec![x, y + 1.0],
        vec![x, y],
    ]]
}

pub fn polygon(x: f64, y: f64) -> Geometry {
    Geometry::Polygon {
        coordinates: square(x, y),
    }
}

/// `{"type": "Feature", "properties": props, "geometry": Polygon at (x, y)}`
pub fn feature(props: Value, x: f64, y: f64) -> Value {
    json!({
        "type": "Feature",
        "properties": props,
        "geometry": { "type": "Polygon", "coordinates": square(x, y) }
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn write(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
}
