// crates/mapvisual-core/src/catalog.rs

//! # Boundary Catalog
//!
//! Every servable boundary type with its fallback chain, its overlays and
//! the hint shown when nothing could be loaded. Specs are plain values built
//! per request from the configured data directory.

use crate::error::{BoundaryError, Result};
use crate::loader::{Origin, SourceChain, SourceDescriptor, SourceSchema};
use crate::overlay::{AppendTemplate, MergePolicy, OverlaySpec};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const US_STATES_TOPO_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json";
pub const US_COUNTIES_TOPO_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/counties-10m.json";
/// Ladakh-inclusive state boundaries, names under `name` / `hc-key`.
pub const HIGHCHARTS_INDIA_URL: &str =
    "https://code.highcharts.com/mapdata/countries/in/in-all.geo.json";
/// Older GADM-derived states (`NAME_1`), without a separate Ladakh.
pub const GADM_INDIA_URL: &str =
    "https://raw.githubusercontent.com/Subhash9325/GeoJson-Data-of-Indian-States/master/Indian_States";
/// District polygons, parent state under `NAME_1`.
pub const INDIA_DISTRICTS_URL: &str =
    "https://raw.githubusercontent.com/geohacker/india/master/district/india_district.geojson";
/// State polygons keyed by `st_nm`, used as the second Ladakh source.
pub const INDIA_ST_NM_URL: &str =
    "https://raw.githubusercontent.com/udit-001/india-maps-data/main/geojson/india.geojson";
pub const POK_URL: &str =
    "https://raw.githubusercontent.com/datameet/maps/master/Country/disputed/pok-alhasan.geojson";

pub const KASHMIR_VARIANTS: &[&str] = &["Jammu and Kashmir", "Jammu & Kashmir"];
pub const LADAKH: &str = "Ladakh";

/// A servable boundary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// US states TopoJSON, served as-is.
    UsStatesTopo,
    /// US counties TopoJSON, served as-is.
    UsCountiesTopo,
    /// US states as GeoJSON (stub conversion of the TopoJSON).
    UsStates,
    /// India states TopoJSON, served as-is.
    IndiaStatesTopo,
    /// India states GeoJSON, normalized.
    IndiaStates,
    /// India states with Ladakh from an authoritative source and PoK
    /// spliced into Jammu and Kashmir.
    IndiaOptionB,
    /// India states with PoK districts appended as separate features.
    IndiaDisputed,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 7] = [
        BoundaryKind::UsStatesTopo,
        BoundaryKind::UsCountiesTopo,
        BoundaryKind::UsStates,
        BoundaryKind::IndiaStatesTopo,
        BoundaryKind::IndiaStates,
        BoundaryKind::IndiaOptionB,
        BoundaryKind::IndiaDisputed,
    ];

    pub fn country(&self) -> &'static str {
        match self {
            BoundaryKind::UsStatesTopo | BoundaryKind::UsCountiesTopo | BoundaryKind::UsStates => {
                "us"
            }
            _ => "in",
        }
    }

    pub fn boundary_type(&self) -> &'static str {
        match self {
            BoundaryKind::UsStatesTopo | BoundaryKind::IndiaStatesTopo => "states-topo",
            BoundaryKind::UsCountiesTopo => "counties-topo",
            BoundaryKind::UsStates | BoundaryKind::IndiaStates => "states",
            BoundaryKind::IndiaOptionB => "option-b",
            BoundaryKind::IndiaDisputed => "disputed",
        }
    }

    /// Looks up `(country, boundary type)`, case-insensitively.
    pub fn parse(country: &str, boundary_type: &str) -> Result<Self> {
        let country = country.trim().to_ascii_lowercase();
        let boundary_type = boundary_type.trim().to_ascii_lowercase();
        let country = match country.as_str() {
            "usa" => "us",
            "ind" | "india" => "in",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|k| k.country() == country && k.boundary_type() == boundary_type)
            .ok_or_else(|| BoundaryError::UnknownBoundary(format!("{country}/{boundary_type}")))
    }

    /// Full spec for this kind, with local paths under `data_dir`.
    pub fn spec(&self, data_dir: &Path) -> BoundarySpec {
        let topo_dir = data_dir.join("topojson");
        let india_dir = data_dir.join("india");
        let india_cache = india_dir.join("indian_states.geojson");

        match self {
            BoundaryKind::UsStatesTopo | BoundaryKind::UsStates => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![
                    SourceDescriptor::local(
                        "us-states-cache",
                        topo_dir.join("us_states.topo.json"),
                        SourceSchema::Topology,
                    ),
                    SourceDescriptor::remote("us-atlas", US_STATES_TOPO_URL, SourceSchema::Topology),
                ]),
                overlays: Vec::new(),
                output: if *self == BoundaryKind::UsStates {
                    Output::StubFeatures { object: "states" }
                } else {
                    Output::Topology
                },
                remediation: download_hint(*self),
            },
            BoundaryKind::UsCountiesTopo => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![
                    SourceDescriptor::local(
                        "us-counties-cache",
                        topo_dir.join("us_counties.topo.json"),
                        SourceSchema::Topology,
                    ),
                    SourceDescriptor::remote(
                        "us-atlas",
                        US_COUNTIES_TOPO_URL,
                        SourceSchema::Topology,
                    ),
                ]),
                overlays: Vec::new(),
                output: Output::Topology,
                remediation: download_hint(*self),
            },
            BoundaryKind::IndiaStatesTopo => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![SourceDescriptor::local(
                    "india-states-topo-cache",
                    topo_dir.join("india_states.topo.json"),
                    SourceSchema::Topology,
                )]),
                overlays: Vec::new(),
                output: Output::Topology,
                remediation: format!(
                    "Ensure {} exists and has valid geographic data",
                    topo_dir.join("india_states.topo.json").display()
                ),
            },
            BoundaryKind::IndiaStates => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![
                    SourceDescriptor::local("india-cache", &india_cache, SourceSchema::StateLevel),
                    SourceDescriptor::remote(
                        "highcharts",
                        HIGHCHARTS_INDIA_URL,
                        SourceSchema::StateLevel,
                    )
                    .with_priority(1),
                    SourceDescriptor::remote("gadm", GADM_INDIA_URL, SourceSchema::StateLevel)
                        .with_priority(2),
                ]),
                overlays: Vec::new(),
                output: Output::Features,
                remediation: download_hint(*self),
            },
            BoundaryKind::IndiaOptionB => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![
                    SourceDescriptor::local(
                        "option-b-cache",
                        india_dir.join("indian_states_option_b.geojson"),
                        SourceSchema::StateLevel,
                    ),
                    SourceDescriptor::local("india-cache", &india_cache, SourceSchema::StateLevel)
                        .with_priority(1),
                    SourceDescriptor::remote(
                        "highcharts",
                        HIGHCHARTS_INDIA_URL,
                        SourceSchema::StateLevel,
                    )
                    .with_priority(1),
                    SourceDescriptor::remote(
                        "india-districts",
                        INDIA_DISTRICTS_URL,
                        SourceSchema::DistrictLevel {
                            state_key: "NAME_1".into(),
                        },
                    )
                    .with_priority(2),
                ]),
                overlays: vec![ladakh_overlay(&india_dir), kashmir_splice(&india_dir)],
                output: Output::Features,
                remediation: download_hint(*self),
            },
            BoundaryKind::IndiaDisputed => BoundarySpec {
                kind: *self,
                sources: SourceChain::offline_first(vec![
                    SourceDescriptor::local(
                        "disputed-cache",
                        india_dir.join("indian_states_disputed.geojson"),
                        SourceSchema::StateLevel,
                    ),
                    SourceDescriptor::local("india-cache", &india_cache, SourceSchema::StateLevel)
                        .with_priority(1),
                    SourceDescriptor::remote("gadm", GADM_INDIA_URL, SourceSchema::StateLevel)
                        .with_priority(1),
                    SourceDescriptor::remote(
                        "highcharts",
                        HIGHCHARTS_INDIA_URL,
                        SourceSchema::StateLevel,
                    )
                    .with_priority(2),
                ]),
                overlays: vec![OverlaySpec {
                    label: "pok-append".into(),
                    sources: pok_sources(&india_dir),
                    policy: MergePolicy::Append(AppendTemplate::pok()),
                }],
                output: Output::Features,
                remediation: download_hint(*self),
            },
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.country(), self.boundary_type())
    }
}

impl FromStr for BoundaryKind {
    type Err = BoundaryError;

    /// Parses `"in/option-b"` style identifiers.
    fn from_str(s: &str) -> Result<Self> {
        let (country, boundary_type) = s
            .split_once('/')
            .ok_or_else(|| BoundaryError::UnknownBoundary(s.to_string()))?;
        Self::parse(country, boundary_type)
    }
}

/// What the orchestrator returns for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Features,
    Topology,
    /// Stub GeoJSON built from the named TopoJSON object.
    StubFeatures { object: &'static str },
}

/// Sources, overlays and output shape of one boundary type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySpec {
    pub kind: BoundaryKind,
    pub sources: SourceChain,
    /// Applied strictly in this order.
    pub overlays: Vec<OverlaySpec>,
    pub output: Output,
    pub remediation: String,
}

impl BoundarySpec {
    /// The kind's own cache file: its first local descriptor.
    pub fn cache_path(&self) -> Option<&Path> {
        self.sources
            .descriptors
            .iter()
            .find_map(|d| match &d.origin {
                Origin::LocalFile(path) => Some(path.as_path()),
                Origin::Remote(_) => None,
            })
    }

    /// Copy of this spec without its own cache file in the base chain, so
    /// a refresh re-derives the document from upstream data.
    pub fn without_cache(&self) -> BoundarySpec {
        let mut spec = self.clone();
        if let Some(cache) = self.cache_path().map(PathBuf::from) {
            spec.sources
                .descriptors
                .retain(|d| d.origin != Origin::LocalFile(cache.clone()));
        }
        spec
    }
}

fn download_hint(kind: BoundaryKind) -> String {
    format!(
        "Run: mapvisual fetch {} {} to download required map data",
        kind.country(),
        kind.boundary_type()
    )
}

fn pok_sources(india_dir: &Path) -> SourceChain {
    SourceChain::offline_first(vec![
        SourceDescriptor::local("pok-bundled", india_dir.join("pok.geojson"), SourceSchema::StateLevel),
        SourceDescriptor::remote("datameet-pok", POK_URL, SourceSchema::StateLevel),
    ])
}

/// Ladakh comes from the authoritative remotes first; the bundled file is
/// the last resort.
fn ladakh_overlay(india_dir: &Path) -> OverlaySpec {
    OverlaySpec {
        label: "ladakh-replace".into(),
        sources: SourceChain::as_listed(vec![
            SourceDescriptor::remote("highcharts", HIGHCHARTS_INDIA_URL, SourceSchema::StateLevel),
            SourceDescriptor::remote("st-nm-states", INDIA_ST_NM_URL, SourceSchema::StateLevel),
            SourceDescriptor::local(
                "ladakh-bundled",
                india_dir.join("ladakh.geojson"),
                SourceSchema::StateLevel,
            ),
        ]),
        policy: MergePolicy::Replace {
            target: LADAKH.into(),
        },
    }
}

fn kashmir_splice(india_dir: &Path) -> OverlaySpec {
    OverlaySpec {
        label: "pok-splice".into(),
        sources: pok_sources(india_dir),
        policy: MergePolicy::Splice {
            targets: KASHMIR_VARIANTS.iter().map(|s| s.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_and_type() {
        assert_eq!(
            BoundaryKind::parse("IN", "option-b").unwrap(),
            BoundaryKind::IndiaOptionB
        );
        assert_eq!(
            BoundaryKind::parse("usa", "states").unwrap(),
            BoundaryKind::UsStates
        );
        assert_eq!(
            "us/counties-topo".parse::<BoundaryKind>().unwrap(),
            BoundaryKind::UsCountiesTopo
        );
        assert!(matches!(
            BoundaryKind::parse("fr", "states"),
            Err(BoundaryError::UnknownBoundary(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for kind in BoundaryKind::ALL {
            assert_eq!(kind.to_string().parse::<BoundaryKind>().unwrap(), kind);
        }
    }

    #[test]
    fn option_b_applies_ladakh_before_kashmir() {
        let spec = BoundaryKind::IndiaOptionB.spec(Path::new("/data"));
        let labels: Vec<&str> = spec.overlays.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["ladakh-replace", "pok-splice"]);

        let ladakh = &spec.overlays[0];
        let order: Vec<&str> = ladakh
            .sources
            .attempt_order()
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(order, ["highcharts", "st-nm-states", "ladakh-bundled"]);
    }

    #[test]
    fn option_b_chain_is_local_then_primary_then_secondary() {
        let spec = BoundaryKind::IndiaOptionB.spec(Path::new("/data"));
        let order: Vec<&str> = spec
            .sources
            .attempt_order()
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(
            order,
            ["option-b-cache", "india-cache", "highcharts", "india-districts"]
        );
    }

    #[test]
    fn without_cache_drops_only_own_cache() {
        let spec = BoundaryKind::IndiaOptionB.spec(Path::new("/data"));
        assert_eq!(
            spec.cache_path(),
            Some(Path::new("/data/india/indian_states_option_b.geojson"))
        );
        let refreshed = spec.without_cache();
        assert_eq!(refreshed.sources.descriptors.len(), 3);
        assert_eq!(refreshed.sources.descriptors[0].label, "india-cache");
    }

    #[test]
    fn us_states_geojson_is_a_stub_of_the_topology() {
        let spec = BoundaryKind::UsStates.spec(Path::new("/data"));
        assert_eq!(spec.output, Output::StubFeatures { object: "states" });
        assert!(spec.remediation.contains("mapvisual fetch us states"));
    }
}
