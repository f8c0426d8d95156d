// crates/mapvisual-core/src/loader/source.rs

//! # Source Selector
//!
//! Walks an ordered list of [`SourceDescriptor`]s until one yields a usable
//! document. Every attempt returns a plain `Result`; the chain inspects it
//! and moves on, so a failed source never aborts the request by itself.

use super::common_io;
use super::fetch::HttpClient;
use crate::aggregate::{aggregate_districts, merge_duplicate_names};
use crate::alias::AliasTable;
use crate::error::{BoundaryError, Result};
use crate::model::FeatureCollection;
use crate::normalize::NameNormalizer;
use crate::topo::Topology;
use std::fmt;
use std::path::PathBuf;

/// Where a source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    LocalFile(PathBuf),
    Remote(String),
}

impl Origin {
    pub fn is_remote(&self) -> bool {
        matches!(self, Origin::Remote(_))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::LocalFile(path) => write!(f, "{}", path.display()),
            Origin::Remote(url) => f.write_str(url),
        }
    }
}

/// Shape of the data a source serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSchema {
    /// One feature per state.
    StateLevel,
    /// One feature per district; `state_key` names the property holding the
    /// parent state.
    DistrictLevel { state_key: String },
    /// Raw TopoJSON, served untouched.
    Topology,
}

/// One entry of a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub label: String,
    pub origin: Origin,
    pub schema: SourceSchema,
    /// Lower runs first within the same origin class.
    pub priority: u8,
}

impl SourceDescriptor {
    pub fn local(label: &str, path: impl Into<PathBuf>, schema: SourceSchema) -> Self {
        Self {
            label: label.to_string(),
            origin: Origin::LocalFile(path.into()),
            schema,
            priority: 0,
        }
    }

    pub fn remote(label: &str, url: &str, schema: SourceSchema) -> Self {
        Self {
            label: label.to_string(),
            origin: Origin::Remote(url.to_string()),
            schema,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// How a chain orders its descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainOrder {
    /// Local files first, then remotes; priority breaks ties.
    #[default]
    OfflineFirst,
    /// Exactly as listed. Used where an authoritative remote must win over
    /// a bundled copy.
    AsListed,
}

/// Parsed, normalized output of a successful attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Features(FeatureCollection),
    Topology(Topology),
}

impl Payload {
    pub fn into_features(self) -> Option<FeatureCollection> {
        match self {
            Payload::Features(fc) => Some(fc),
            Payload::Topology(_) => None,
        }
    }
}

/// The winning source and what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub label: String,
    pub payload: Payload,
}

/// Reads raw bytes for a descriptor from disk or over HTTP.
#[derive(Clone, Copy)]
pub struct SourceReader<'a> {
    http: &'a dyn HttpClient,
    offline: bool,
}

impl<'a> SourceReader<'a> {
    pub fn new(http: &'a dyn HttpClient) -> Self {
        Self {
            http,
            offline: false,
        }
    }

    /// Skip every remote descriptor.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn read(&self, descriptor: &SourceDescriptor) -> Result<Vec<u8>> {
        match &descriptor.origin {
            Origin::LocalFile(path) => common_io::read_all(path)
                .map_err(|e| BoundaryError::unavailable(&descriptor.label, source_reason(e))),
            Origin::Remote(_) if self.offline => {
                Err(BoundaryError::unavailable(&descriptor.label, "offline mode"))
            }
            Origin::Remote(url) => self
                .http
                .get(url)
                .map_err(|e| BoundaryError::unavailable(&descriptor.label, e)),
        }
    }
}

fn source_reason(e: BoundaryError) -> String {
    match e {
        BoundaryError::SourceUnavailable { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// An ordered fallback chain for one boundary type or overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceChain {
    pub descriptors: Vec<SourceDescriptor>,
    pub order: ChainOrder,
}

impl SourceChain {
    pub fn offline_first(descriptors: Vec<SourceDescriptor>) -> Self {
        Self {
            descriptors,
            order: ChainOrder::OfflineFirst,
        }
    }

    pub fn as_listed(descriptors: Vec<SourceDescriptor>) -> Self {
        Self {
            descriptors,
            order: ChainOrder::AsListed,
        }
    }

    /// Descriptors in the order they will be attempted.
    pub fn attempt_order(&self) -> Vec<&SourceDescriptor> {
        let mut ordered: Vec<&SourceDescriptor> = self.descriptors.iter().collect();
        if self.order == ChainOrder::OfflineFirst {
            ordered.sort_by_key(|d| (d.origin.is_remote(), d.priority));
        }
        ordered
    }

    /// Returns the first usable source, normalized and (for district-level
    /// schemas) aggregated to states.
    ///
    /// When every descriptor fails the result is
    /// [`BoundaryError::NoUsableSource`] carrying the last failure.
    pub fn select(
        &self,
        boundary: &str,
        remediation: &str,
        reader: &SourceReader<'_>,
        aliases: &AliasTable,
    ) -> Result<Selected> {
        let mut last_error =
            BoundaryError::InvalidData(format!("no sources configured for {boundary}"));

        for descriptor in self.attempt_order() {
            match attempt(descriptor, reader, aliases) {
                Ok(payload) => {
                    tracing::info!(
                        boundary,
                        source = %descriptor.label,
                        origin = %descriptor.origin,
                        "boundary source selected"
                    );
                    return Ok(Selected {
                        label: descriptor.label.clone(),
                        payload,
                    });
                }
                Err(e) => {
                    if descriptor.origin.is_remote() {
                        tracing::warn!(boundary, source = %descriptor.label, error = %e, "source failed");
                    } else {
                        tracing::debug!(boundary, source = %descriptor.label, error = %e, "local source skipped");
                    }
                    last_error = e;
                }
            }
        }

        Err(BoundaryError::NoUsableSource {
            boundary: boundary.to_string(),
            remediation: remediation.to_string(),
            last_error: Box::new(last_error),
        })
    }
}

/// One read → parse → verify → normalize pass over a single descriptor.
pub fn attempt(
    descriptor: &SourceDescriptor,
    reader: &SourceReader<'_>,
    aliases: &AliasTable,
) -> Result<Payload> {
    let bytes = reader.read(descriptor)?;
    let label = descriptor.label.as_str();

    match &descriptor.schema {
        SourceSchema::Topology => {
            let topology: Topology = serde_json::from_slice(&bytes)
                .map_err(|e| BoundaryError::unavailable(label, format!("invalid TopoJSON: {e}")))?;
            if topology.is_placeholder() {
                return Err(BoundaryError::unavailable(
                    label,
                    "Placeholder TopoJSON detected - no arc data",
                ));
            }
            Ok(Payload::Topology(topology))
        }
        SourceSchema::StateLevel => {
            let mut collection = parse_collection(label, &bytes)?;
            NameNormalizer::new(aliases).normalize_collection(&mut collection);
            collection.features = merge_duplicate_names(collection.features);
            Ok(Payload::Features(collection))
        }
        SourceSchema::DistrictLevel { state_key } => {
            let districts = parse_collection(label, &bytes)?;
            let states = aggregate_districts(&districts.features, state_key, aliases);
            if states.is_empty() {
                return Err(BoundaryError::unavailable(
                    label,
                    format!("no district carries '{state_key}' with geometry"),
                ));
            }
            Ok(Payload::Features(FeatureCollection::new(states)))
        }
    }
}

fn parse_collection(label: &str, bytes: &[u8]) -> Result<FeatureCollection> {
    let collection: FeatureCollection = serde_json::from_slice(bytes)
        .map_err(|e| BoundaryError::unavailable(label, format!("invalid GeoJSON: {e}")))?;
    if collection.is_empty() {
        return Err(BoundaryError::unavailable(label, "FeatureCollection has no features"));
    }
    Ok(collection)
}
