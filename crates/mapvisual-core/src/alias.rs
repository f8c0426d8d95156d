// crates/mapvisual-core/src/alias.rs
use crate::error::{BoundaryError, Result};
use crate::loader::common_io;
use std::collections::HashMap;
use std::path::Path;

/// Built-in corrections applied to every resolved feature name.
///
/// Providers spell a few regions in a longer form than the subscriber data
/// uses; the right-hand side is the name used everywhere else.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Andaman and Nicobar Islands", "Andaman and Nicobar"),
    ("Andaman & Nicobar Island", "Andaman and Nicobar"),
    ("Orissa", "Odisha"),
    ("Uttaranchal", "Uttarakhand"),
    ("Pondicherry", "Puducherry"),
    ("NCT of Delhi", "Delhi"),
];

/// Exact-match lookup table from provider spellings to canonical names.
///
/// Built once at process start and shared by reference with the normalizer,
/// the aggregator and the overlay merger.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// An empty table: every name maps to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with [`DEFAULT_ALIASES`].
    pub fn with_defaults() -> Self {
        DEFAULT_ALIASES.iter().copied().collect()
    }

    /// Loads extra aliases from a JSON object (`{"raw": "canonical", ...}`).
    ///
    /// `.gz` files are decompressed when the `compact` feature is enabled.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut table = Self::new();
        table.extend_from_path(path)?;
        Ok(table)
    }

    pub fn extend_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let map: HashMap<String, String> = serde_json::from_reader(reader).map_err(|e| {
            BoundaryError::InvalidData(format!("alias file {}: {e}", path.display()))
        })?;
        self.entries.extend(map);
        Ok(())
    }

    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(raw.into(), canonical.into());
    }

    /// Canonical spelling of `raw`; unknown names pass through unchanged.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.entries.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AliasTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
