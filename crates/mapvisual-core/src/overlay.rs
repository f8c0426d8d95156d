// crates/mapvisual-core/src/overlay.rs

//! # Disputed-Territory Merger
//!
//! Overlays add contested regions to an assembled collection. Three
//! policies exist:
//!
//! - **Append**: overlay features become new, marked features.
//! - **Splice**: overlay polygons are unioned into one existing feature.
//! - **Replace**: one feature is swapped for a copy built from an
//!   authoritative source.
//!
//! Every policy is idempotent. Results are computed before the collection is
//! touched, so a failed overlay leaves it exactly as it was.

use crate::aggregate::merge_duplicate_names;
use crate::alias::AliasTable;
use crate::error::{BoundaryError, Result};
use crate::geometry::{union_coordinates, union_feature_geometries, Geometry, PolygonCoords};
use crate::loader::{attempt, Payload, SourceChain, SourceReader};
use crate::model::{Feature, FeatureCollection, Properties, NAME_KEY, SHORT_NAME_KEY};
use crate::traits::NameMatch;
use serde_json::Value;

/// Properties synthesized for appended disputed-territory features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendTemplate {
    /// Name prefix marking appended features (`"POK"` → `"POK - ..."`).
    pub marker: String,
    pub province_key: String,
    pub district_key: String,
    /// Used when an overlay feature has no province.
    pub default_province: String,
    pub country_id: i64,
    pub iso: String,
    pub country_name: String,
}

impl AppendTemplate {
    /// Pakistan-administered Kashmir districts (datameet `pok-alhasan`).
    pub fn pok() -> Self {
        Self {
            marker: "POK".into(),
            province_key: "PROVINCE".into(),
            district_key: "DISTRICT".into(),
            default_province: "POK".into(),
            country_id: 105,
            iso: "IND".into(),
            country_name: "India".into(),
        }
    }

    pub fn marker_prefix(&self) -> String {
        format!("{} - ", self.marker)
    }

    /// `"POK - Gilgit-Baltistan (Skardu)"`, or without the district part.
    pub fn name_for(&self, overlay: &Feature) -> String {
        let province = overlay
            .text_property(&self.province_key)
            .unwrap_or(self.default_province.as_str());
        match overlay.text_property(&self.district_key) {
            Some(district) => format!("{}{} ({})", self.marker_prefix(), province, district),
            None => format!("{}{}", self.marker_prefix(), province),
        }
    }

    pub fn properties_for(&self, overlay: &Feature) -> Properties {
        let name = self.name_for(overlay);
        let mut props = Properties::new();
        props.insert("ID_0".into(), Value::from(self.country_id));
        props.insert("ISO".into(), Value::from(self.iso.as_str()));
        props.insert("NAME_0".into(), Value::from(self.country_name.as_str()));
        props.insert(NAME_KEY.into(), Value::from(name.as_str()));
        props.insert(SHORT_NAME_KEY.into(), Value::from(name));
        props.insert("TYPE_1".into(), Value::from("Disputed"));
        props.insert("ENGTYPE_1".into(), Value::from("Disputed Territory"));
        props
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergePolicy {
    Append(AppendTemplate),
    /// Union into the first feature named by one of `targets`.
    Splice { targets: Vec<String> },
    /// Swap `target` for the authoritative geometry.
    Replace { target: String },
}

/// An overlay: where its geometry comes from and how it is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    pub label: String,
    pub sources: SourceChain,
    pub policy: MergePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Appended(usize),
    Spliced { target: String, polygons: usize },
    Replaced { target: String, removed: usize },
    AlreadyApplied,
    TargetMissing,
}

/// Appends marked overlay features unless a marked feature already exists.
///
/// Overlay features that map to the same synthesized name become one
/// appended feature.
pub fn append_features(
    collection: &mut FeatureCollection,
    template: &AppendTemplate,
    overlay: &FeatureCollection,
) -> MergeOutcome {
    if has_marker(collection, template) {
        return MergeOutcome::AlreadyApplied;
    }
    let additions: Vec<Feature> = overlay
        .features
        .iter()
        .filter_map(|f| {
            let geometry = f.area()?.clone();
            Some(Feature::new(template.properties_for(f), Some(geometry)))
        })
        .collect();
    let additions = merge_duplicate_names(additions);
    let count = additions.len();
    collection.features.extend(additions);
    MergeOutcome::Appended(count)
}

fn has_marker(collection: &FeatureCollection, template: &AppendTemplate) -> bool {
    let prefix = template.marker_prefix();
    collection
        .features
        .iter()
        .any(|f| f.name_starts_with(&prefix))
}

/// Index of the first feature matching one of `targets`, trying the
/// variants in order.
pub fn find_target(collection: &FeatureCollection, targets: &[String]) -> Option<usize> {
    targets.iter().find_map(|variant| {
        collection
            .features
            .iter()
            .position(|f| f.is_named(variant))
    })
}

/// Unions the overlay polygons into the target feature's geometry.
///
/// Polygons already present verbatim are not added again. A target without
/// areal geometry counts as missing; its geometry is never replaced.
pub fn splice_into(
    collection: &mut FeatureCollection,
    targets: &[String],
    overlay: &FeatureCollection,
) -> MergeOutcome {
    let Some(index) = find_target(collection, targets) else {
        return MergeOutcome::TargetMissing;
    };
    let target = &collection.features[index];
    let Some(existing) = target.area() else {
        return MergeOutcome::TargetMissing;
    };

    let fresh: Vec<PolygonCoords> = overlay
        .features
        .iter()
        .filter_map(Feature::area)
        .flat_map(Geometry::polygons)
        .filter(|p| !p.is_empty())
        .filter(|p| !existing.contains_polygon(p))
        .cloned()
        .collect();

    let Some(addition) = Geometry::from_polygons(fresh) else {
        return MergeOutcome::AlreadyApplied;
    };
    let polygons = addition.polygons().count();
    let Some(merged) = union_coordinates([existing, &addition]) else {
        return MergeOutcome::AlreadyApplied;
    };

    let target = &mut collection.features[index];
    let name = target.name_str().to_string();
    target.set_geometry(merged);
    MergeOutcome::Spliced {
        target: name,
        polygons,
    }
}

/// Removes every feature named `target` and appends one with `geometry`.
pub fn replace_feature(
    collection: &mut FeatureCollection,
    target: &str,
    geometry: Geometry,
) -> MergeOutcome {
    let before = collection.len();
    collection.features.retain(|f| !f.is_named(target));
    let removed = before - collection.len();
    collection.features.push(Feature::named(target, geometry));
    MergeOutcome::Replaced {
        target: target.to_string(),
        removed,
    }
}

/// Fetches overlay sources and applies [`OverlaySpec`]s to a collection.
pub struct OverlayMerger<'a> {
    reader: SourceReader<'a>,
    aliases: &'a AliasTable,
}

impl<'a> OverlayMerger<'a> {
    pub fn new(reader: SourceReader<'a>, aliases: &'a AliasTable) -> Self {
        Self { reader, aliases }
    }

    /// Applies one overlay. On error the collection is unchanged.
    pub fn apply(
        &self,
        overlay: &OverlaySpec,
        collection: &mut FeatureCollection,
    ) -> Result<MergeOutcome> {
        match &overlay.policy {
            MergePolicy::Append(template) => {
                if has_marker(collection, template) {
                    return Ok(MergeOutcome::AlreadyApplied);
                }
                let features = self.fetch(overlay)?;
                Ok(append_features(collection, template, &features))
            }
            MergePolicy::Splice { targets } => {
                let Some(index) = find_target(collection, targets) else {
                    return Ok(MergeOutcome::TargetMissing);
                };
                let target = &collection.features[index];
                if target.area().is_none() {
                    return Err(BoundaryError::MalformedGeometry(format!(
                        "splice target '{}' has no polygon geometry",
                        target.name_str()
                    )));
                }
                let features = self.fetch(overlay)?;
                Ok(splice_into(collection, targets, &features))
            }
            MergePolicy::Replace { target } => {
                let geometry = self.authoritative_geometry(overlay, target)?;
                Ok(replace_feature(collection, target, geometry))
            }
        }
    }

    /// [`apply`](Self::apply), with failures logged and swallowed.
    pub fn apply_soft(
        &self,
        overlay: &OverlaySpec,
        collection: &mut FeatureCollection,
    ) -> Option<MergeOutcome> {
        match self.apply(overlay, collection) {
            Ok(outcome) => {
                tracing::info!(overlay = %overlay.label, ?outcome, "overlay applied");
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(overlay = %overlay.label, error = %e, "overlay skipped");
                None
            }
        }
    }

    fn fetch(&self, overlay: &OverlaySpec) -> Result<FeatureCollection> {
        let selected = overlay
            .sources
            .select(&overlay.label, "", &self.reader, self.aliases)
            .map_err(|e| BoundaryError::overlay(&overlay.label, overlay_reason(e)))?;
        selected.payload.into_features().ok_or_else(|| {
            BoundaryError::overlay(&overlay.label, "overlay source is a topology")
        })
    }

    /// First source, in listed order, whose features named `target` union
    /// to a non-empty geometry.
    fn authoritative_geometry(&self, overlay: &OverlaySpec, target: &str) -> Result<Geometry> {
        let mut last = String::from("no sources configured");
        for descriptor in overlay.sources.attempt_order() {
            let collection = match attempt(descriptor, &self.reader, self.aliases) {
                Ok(Payload::Features(fc)) => fc,
                Ok(Payload::Topology(_)) => {
                    last = format!("{} is a topology", descriptor.label);
                    continue;
                }
                Err(e) => {
                    tracing::debug!(overlay = %overlay.label, source = %descriptor.label, error = %e, "replace source failed");
                    last = e.to_string();
                    continue;
                }
            };
            let geometry = union_feature_geometries(
                collection
                    .features
                    .iter()
                    .filter(|f| f.is_named(target))
                    .map(|f| f.geometry.as_ref()),
            );
            match geometry {
                Some(g) if !g.is_empty() => {
                    tracing::debug!(overlay = %overlay.label, source = %descriptor.label, "authoritative geometry found");
                    return Ok(g);
                }
                _ => last = format!("{} has no geometry for {target}", descriptor.label),
            }
        }
        Err(BoundaryError::overlay(&overlay.label, last))
    }
}

fn overlay_reason(e: BoundaryError) -> String {
    match e {
        BoundaryError::NoUsableSource { last_error, .. } => last_error.to_string(),
        other => other.to_string(),
    }
}
