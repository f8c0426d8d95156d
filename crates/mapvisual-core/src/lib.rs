// crates/mapvisual-core/src/lib.rs

//! Boundary reconciliation for map visualization.
//!
//! Assembles one coherent country boundary document from several upstream
//! sources of uneven schema and availability: a local cache, CDNs, and
//! disputed-territory overlays.
//!
//! ```no_run
//! use mapvisual_core::{AssemblerConfig, BoundaryAssembler, BoundaryKind};
//!
//! let assembler = BoundaryAssembler::from_config(AssemblerConfig::default().offline(true))?;
//! let doc = assembler.assemble(BoundaryKind::IndiaOptionB)?;
//! println!("{}", serde_json::to_string(&doc)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod alias;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader; // Files, HTTP and the fallback chain
pub mod model;
pub mod normalize;
pub mod overlay;
pub mod pipeline;
pub mod text;
pub mod topo; // TopoJSON passthrough + stub conversion
pub mod traits;
pub mod validate;

// Re-exports
pub use crate::alias::AliasTable;
pub use crate::catalog::{BoundaryKind, BoundarySpec};
pub use crate::config::AssemblerConfig;
pub use crate::error::{BoundaryError, Result};
pub use crate::geometry::{union_coordinates, Geometry};
pub use crate::loader::{HttpClient, NoNetwork};
pub use crate::model::{Feature, FeatureCollection};
pub use crate::pipeline::{BoundaryAssembler, BoundaryDocument};
pub use crate::traits::NameMatch;
