// crates/mapvisual-core/src/pipeline.rs

//! # Boundary Assembly
//!
//! Source selection → (district aggregation) → overlays in configured order.
//!
//! [`BoundaryAssembler`] holds only immutable state, so one instance can
//! serve concurrent requests; every call builds its own working collection.

use crate::alias::AliasTable;
use crate::catalog::{BoundaryKind, BoundarySpec, Output};
use crate::config::AssemblerConfig;
use crate::error::{BoundaryError, Result};
use crate::loader::{HttpClient, NoNetwork, Payload, SourceReader};
use crate::model::FeatureCollection;
use crate::overlay::OverlayMerger;
use crate::topo::{stub_features, Topology};
use serde::Serialize;
#[cfg(feature = "json")]
use std::path::PathBuf;

/// An assembled boundary, ready to be serialized for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundaryDocument {
    Features(FeatureCollection),
    Topology(Topology),
}

impl BoundaryDocument {
    pub fn as_features(&self) -> Option<&FeatureCollection> {
        match self {
            BoundaryDocument::Features(fc) => Some(fc),
            BoundaryDocument::Topology(_) => None,
        }
    }

    pub fn into_features(self) -> Option<FeatureCollection> {
        match self {
            BoundaryDocument::Features(fc) => Some(fc),
            BoundaryDocument::Topology(_) => None,
        }
    }

    /// Feature count, or the number of arcs for a topology.
    pub fn len(&self) -> usize {
        match self {
            BoundaryDocument::Features(fc) => fc.len(),
            BoundaryDocument::Topology(t) => t.arcs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct BoundaryAssembler {
    config: AssemblerConfig,
    aliases: AliasTable,
    http: Box<dyn HttpClient>,
}

impl BoundaryAssembler {
    pub fn new(config: AssemblerConfig, aliases: AliasTable, http: Box<dyn HttpClient>) -> Self {
        Self {
            config,
            aliases,
            http,
        }
    }

    /// Builds the alias table and HTTP client described by `config`.
    ///
    /// Offline configurations (and builds without `fetch`) get a client that
    /// refuses every request.
    pub fn from_config(config: AssemblerConfig) -> Result<Self> {
        let aliases = config.alias_table()?;
        let http: Box<dyn HttpClient> = if config.offline {
            Box::new(NoNetwork)
        } else {
            default_client(&config)?
        };
        Ok(Self::new(config, aliases, http))
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Catalog entry for `kind`, rooted at the configured data directory.
    pub fn spec(&self, kind: BoundaryKind) -> BoundarySpec {
        kind.spec(&self.config.data_dir)
    }

    /// Entry point for string-addressed requests (`"in"`, `"option-b"`).
    pub fn assemble_for(&self, country: &str, boundary_type: &str) -> Result<BoundaryDocument> {
        self.assemble(BoundaryKind::parse(country, boundary_type)?)
    }

    pub fn assemble(&self, kind: BoundaryKind) -> Result<BoundaryDocument> {
        self.assemble_spec(&self.spec(kind))
    }

    /// Runs one spec end to end.
    ///
    /// Fails only when no base source is usable; overlay failures are logged
    /// and the base collection is returned without them.
    pub fn assemble_spec(&self, spec: &BoundarySpec) -> Result<BoundaryDocument> {
        let boundary = spec.kind.to_string();
        let reader = SourceReader::new(self.http.as_ref()).offline(self.config.offline);
        let selected =
            spec.sources
                .select(&boundary, &spec.remediation, &reader, &self.aliases)?;

        match (spec.output, selected.payload) {
            (Output::Topology, Payload::Topology(topology)) => {
                Ok(BoundaryDocument::Topology(topology))
            }
            (Output::StubFeatures { object }, Payload::Topology(topology)) => {
                let collection = stub_features(&topology, object);
                tracing::debug!(%boundary, object, features = collection.len(), "topology stub-converted");
                Ok(BoundaryDocument::Features(collection))
            }
            (Output::Features, Payload::Features(mut collection)) => {
                let merger = OverlayMerger::new(reader, &self.aliases);
                for overlay in &spec.overlays {
                    merger.apply_soft(overlay, &mut collection);
                }
                tracing::info!(
                    %boundary,
                    source = %selected.label,
                    features = collection.len(),
                    "boundary assembled"
                );
                Ok(BoundaryDocument::Features(collection))
            }
            (output, _) => Err(BoundaryError::InvalidData(format!(
                "source '{}' does not match output {output:?} of {boundary}",
                selected.label
            ))),
        }
    }

    /// Re-assembles `kind` without its own cache file and writes the result
    /// there, so later requests are served from disk.
    ///
    /// Stub-converted kinds share their cache with the topology they are
    /// derived from, so the topology itself is written, never the stub.
    #[cfg(feature = "json")]
    pub fn refresh(&self, kind: BoundaryKind) -> Result<PathBuf> {
        let spec = self.spec(kind);
        let cache = spec.cache_path().map(PathBuf::from).ok_or_else(|| {
            BoundaryError::InvalidData(format!("{kind} has no local cache path"))
        })?;
        let mut upstream = spec.without_cache();
        if matches!(upstream.output, Output::StubFeatures { .. }) {
            upstream.output = Output::Topology;
        }
        let document = self.assemble_spec(&upstream)?;
        crate::loader::common_io::write_json(&cache, &document)?;
        tracing::info!(boundary = %kind, path = %cache.display(), "boundary cache written");
        Ok(cache)
    }
}

#[cfg(feature = "fetch")]
fn default_client(config: &AssemblerConfig) -> Result<Box<dyn HttpClient>> {
    Ok(Box::new(crate::loader::ReqwestClient::with_timeout(
        config.fetch_timeout,
    )?))
}

#[cfg(not(feature = "fetch"))]
fn default_client(_config: &AssemblerConfig) -> Result<Box<dyn HttpClient>> {
    tracing::debug!("built without 'fetch', remote sources disabled");
    Ok(Box::new(NoNetwork))
}
