// crates/mapvisual-core/src/normalize.rs

//! # Feature Name Normalizer
//!
//! Providers name the same concept differently: GADM-style files use
//! `NAME_1`, Natural Earth and most CDNs use `name`, census district files
//! use `st_nm` and Highcharts ships a slug under `hc-key`. Every source is
//! run through [`NameNormalizer`] right after parsing so the rest of the
//! pipeline only ever reads `NAME_1` / `name`.

use crate::alias::AliasTable;
use crate::model::{Feature, FeatureCollection, HC_KEY, NAME_KEY, SHORT_NAME_KEY, STATE_KEY};
use crate::text::title_case_slug;
use serde_json::Value;

/// Where a feature's raw name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Name1,
    Name,
    StateKey,
    HcKey,
}

/// Result of normalizing one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    Resolved { name: String, from: NameSource },
    Unresolved,
}

/// Counts produced by [`NameNormalizer::normalize_collection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub resolved: usize,
    pub aliased: usize,
    pub unresolved: usize,
}

/// Writes one canonical name into `NAME_1` and `name`.
#[derive(Debug, Clone, Copy)]
pub struct NameNormalizer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Raw (pre-alias) name following `NAME_1` > `name` > `st_nm` > `hc-key`.
    pub fn raw_name(feature: &Feature) -> Option<(String, NameSource)> {
        if let Some(n) = feature.text_property(NAME_KEY) {
            return Some((n.to_string(), NameSource::Name1));
        }
        if let Some(n) = feature.text_property(SHORT_NAME_KEY) {
            return Some((n.to_string(), NameSource::Name));
        }
        if let Some(n) = feature.text_property(STATE_KEY) {
            return Some((n.to_string(), NameSource::StateKey));
        }
        feature
            .text_property(HC_KEY)
            .map(title_case_slug)
            .filter(|n| !n.is_empty())
            .map(|n| (n, NameSource::HcKey))
    }

    /// Canonical spelling of `raw` after alias correction.
    pub fn canonical<'n>(&'n self, raw: &'n str) -> &'n str {
        self.aliases.resolve(raw.trim())
    }

    /// Normalizes a single feature in place.
    ///
    /// Features without any usable name are left untouched.
    pub fn normalize_feature(&self, feature: &mut Feature) -> NameResolution {
        let Some((raw, from)) = Self::raw_name(feature) else {
            return NameResolution::Unresolved;
        };
        let name = self.canonical(&raw).to_string();
        feature
            .properties
            .insert(NAME_KEY.to_string(), Value::from(name.as_str()));
        feature
            .properties
            .insert(SHORT_NAME_KEY.to_string(), Value::from(name.as_str()));
        NameResolution::Resolved { name, from }
    }

    /// Normalizes every feature of `collection` in place.
    pub fn normalize_collection(&self, collection: &mut FeatureCollection) -> NormalizeReport {
        let mut report = NormalizeReport::default();
        for (index, feature) in collection.features.iter_mut().enumerate() {
            let before = Self::raw_name(feature).map(|(raw, _)| raw);
            match self.normalize_feature(feature) {
                NameResolution::Resolved { name, .. } => {
                    report.resolved += 1;
                    if before.as_deref() != Some(name.as_str()) {
                        report.aliased += 1;
                    }
                }
                NameResolution::Unresolved => {
                    tracing::debug!(index, "feature has no resolvable name");
                    report.unresolved += 1;
                }
            }
        }
        if report.unresolved > 0 {
            tracing::warn!(
                unresolved = report.unresolved,
                total = collection.len(),
                "features without a name were left unnormalized"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Properties;
    use serde_json::json;

    fn feature(props: Value) -> Feature {
        let properties: Properties = serde_json::from_value(props).unwrap();
        Feature::new(properties, None)
    }

    #[test]
    fn prefers_name_1_over_everything() {
        let aliases = AliasTable::new();
        let n = NameNormalizer::new(&aliases);
        let mut f = feature(json!({ "NAME_1": "Kerala", "name": "KL", "st_nm": "X", "hc-key": "in-kl" }));
        assert_eq!(
            n.normalize_feature(&mut f),
            NameResolution::Resolved {
                name: "Kerala".into(),
                from: NameSource::Name1
            }
        );
        assert_eq!(f.properties["NAME_1"], "Kerala");
        assert_eq!(f.properties["name"], "Kerala");
        assert_eq!(f.properties["st_nm"], "X");
    }

    #[test]
    fn falls_back_through_name_and_st_nm() {
        let aliases = AliasTable::new();
        let n = NameNormalizer::new(&aliases);

        let mut by_name = feature(json!({ "name": "Goa" }));
        n.normalize_feature(&mut by_name);
        assert_eq!(by_name.properties["NAME_1"], "Goa");

        let mut by_state = feature(json!({ "st_nm": "Bihar", "name": "" }));
        let res = n.normalize_feature(&mut by_state);
        assert!(matches!(res, NameResolution::Resolved { from: NameSource::StateKey, .. }));
        assert_eq!(by_state.properties["name"], "Bihar");
    }

    #[test]
    fn derives_name_from_hc_key_slug() {
        let aliases = AliasTable::new();
        let n = NameNormalizer::new(&aliases);
        let mut f = feature(json!({ "hc-key": "madhya-pradesh" }));
        n.normalize_feature(&mut f);
        assert_eq!(f.properties["NAME_1"], "Madhya Pradesh");
        assert_eq!(f.properties["name"], "Madhya Pradesh");
    }

    #[test]
    fn applies_alias_after_resolution() {
        let aliases = AliasTable::with_defaults();
        let n = NameNormalizer::new(&aliases);
        let mut f = feature(json!({ "name": "Andaman and Nicobar Islands" }));
        n.normalize_feature(&mut f);
        assert_eq!(f.properties["NAME_1"], "Andaman and Nicobar");
        assert_eq!(f.properties["name"], "Andaman and Nicobar");
    }

    #[test]
    fn unresolvable_features_are_kept_unchanged() {
        let aliases = AliasTable::with_defaults();
        let n = NameNormalizer::new(&aliases);
        let original = feature(json!({ "ID_0": 105, "NAME_1": null }));
        let mut fc = FeatureCollection::new(vec![
            original.clone(),
            feature(json!({ "NAME_1": "Andaman and Nicobar Islands" })),
            feature(json!({ "name": "Assam" })),
        ]);

        let report = n.normalize_collection(&mut fc);

        assert_eq!(fc.len(), 3);
        assert_eq!(fc.features[0], original);
        assert_eq!(
            report,
            NormalizeReport {
                resolved: 2,
                aliased: 1,
                unresolved: 1
            }
        );
    }
}
