// crates/mapvisual-core/src/config.rs
use crate::alias::AliasTable;
use crate::error::Result;
use crate::loader::DEFAULT_FETCH_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for [`BoundaryAssembler`](crate::pipeline::BoundaryAssembler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Root of the local boundary cache (`topojson/`, `india/`).
    pub data_dir: PathBuf,
    /// Per-request timeout for remote providers.
    pub fetch_timeout: Duration,
    /// Never touch the network; only local files are tried.
    pub offline: bool,
    /// Extra `{"raw": "canonical"}` aliases merged over the built-in table.
    pub alias_file: Option<PathBuf>,
}

impl AssemblerConfig {
    /// `data/` next to this crate's manifest, as shipped in the repository.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Built-in aliases, extended with `alias_file` when one is configured.
    ///
    /// Call once at start-up and share the table by reference.
    pub fn alias_table(&self) -> Result<AliasTable> {
        let mut table = AliasTable::with_defaults();
        if let Some(path) = &self.alias_file {
            table.extend_from_path(path)?;
        }
        Ok(table)
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            offline: false,
            alias_file: None,
        }
    }
}
