// crates/mapvisual-core/src/aggregate.rs

//! # District Aggregator
//!
//! Collapses district-level features into one feature per state, and
//! features that ended up sharing a canonical name into one.

use crate::alias::AliasTable;
use crate::geometry::{union_coordinates, Geometry};
use crate::model::{Feature, STATE_KEY};
use serde_json::Value;
use std::collections::HashMap;

/// Groups `districts` by their (alias-resolved) `state_key` property and
/// unions each group's geometry.
///
/// - Output order follows the first appearance of each state.
/// - Districts without the state property, or without areal geometry, are
///   skipped.
/// - States whose union is empty produce no feature.
///
/// Each output feature carries the state name under `NAME_1`, `name` and
/// `st_nm`.
pub fn aggregate_districts(
    districts: &[Feature],
    state_key: &str,
    aliases: &AliasTable,
) -> Vec<Feature> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Geometry>> = HashMap::new();
    let mut skipped = 0usize;

    for district in districts {
        let Some(raw) = district.text_property(state_key) else {
            skipped += 1;
            continue;
        };
        let state = aliases.resolve(raw);
        let members = groups.entry(state).or_insert_with(|| {
            order.push(state);
            Vec::new()
        });
        match district.area() {
            Some(geometry) => members.push(geometry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, state_key, "districts skipped during aggregation");
    }

    let states: Vec<Feature> = order
        .into_iter()
        .filter_map(|state| {
            let geometry = union_coordinates(groups.get(state)?.iter().copied())?;
            let mut feature = Feature::named(state, geometry);
            feature
                .properties
                .insert(STATE_KEY.to_string(), Value::from(state));
            Some(feature)
        })
        .collect();

    tracing::debug!(
        districts = districts.len(),
        states = states.len(),
        "aggregated districts"
    );
    states
}

/// Folds features sharing a canonical name into the first of them.
///
/// The first feature keeps its position and properties; its geometry becomes
/// the union of every duplicate's areal geometry. Unnamed features pass
/// through untouched.
pub fn merge_duplicate_names(features: Vec<Feature>) -> Vec<Feature> {
    let mut merged: Vec<Feature> = Vec::with_capacity(features.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut folded = 0usize;

    for feature in features {
        let Some(name) = feature.canonical_name().map(str::to_string) else {
            merged.push(feature);
            continue;
        };
        match seen.get(&name) {
            Some(&index) => {
                let kept = &mut merged[index];
                let union = union_coordinates(kept.area().into_iter().chain(feature.area()));
                if let Some(geometry) = union {
                    kept.set_geometry(geometry);
                }
                folded += 1;
            }
            None => {
                seen.insert(name, merged.len());
                merged.push(feature);
            }
        }
    }

    if folded > 0 {
        tracing::debug!(folded, "features with duplicate names merged");
    }
    merged
}
