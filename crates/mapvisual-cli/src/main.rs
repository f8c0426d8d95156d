//! mapvisual: Command-line driver for mapvisual-core
//!
//! - Print a boundary document
//!   $ mapvisual boundary in option-b
//!
//! - Bootstrap the local cache (one type, or everything)
//!   $ mapvisual fetch us states-topo
//!   $ mapvisual fetch
//!
//! - Validate what would be served
//!   $ mapvisual check in states
//!   $ mapvisual check in states --file data/india/indian_states.geojson
//!
//! Global flags (`--data-dir`, `--timeout`, `--offline`) can also be set via
//! `MAPVISUAL_DATA_DIR`, `MAPVISUAL_FETCH_TIMEOUT` and `MAPVISUAL_OFFLINE`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use mapvisual_core::catalog::Output;
use mapvisual_core::loader::common_io;
use mapvisual_core::validate::{check_collection, BoundingBox};
use mapvisual_core::{
    AssemblerConfig, BoundaryAssembler, BoundaryDocument, BoundaryKind, FeatureCollection,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AssemblerConfig::default().offline(args.offline);
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(secs) = args.timeout {
        config.fetch_timeout = Duration::from_secs(secs);
    }
    config.alias_file = args.aliases;

    let assembler = BoundaryAssembler::from_config(config)?;

    match args.command {
        Commands::Boundary {
            country,
            boundary_type,
            pretty,
        } => {
            let doc = assembler.assemble_for(&country, &boundary_type)?;
            let json = if pretty {
                serde_json::to_string_pretty(&doc)?
            } else {
                serde_json::to_string(&doc)?
            };
            println!("{json}");
        }

        Commands::Fetch {
            country,
            boundary_type,
        } => {
            let kinds = match (country, boundary_type) {
                (Some(c), Some(t)) => vec![BoundaryKind::parse(&c, &t)?],
                (None, None) => BoundaryKind::ALL.to_vec(),
                _ => bail!("give both <country> and <type>, or neither"),
            };
            fetch(&assembler, &kinds)?;
        }

        Commands::Check {
            country,
            boundary_type,
            file,
        } => {
            let kind = BoundaryKind::parse(&country, &boundary_type)?;
            let doc = match file {
                Some(path) => {
                    let bytes = common_io::read_all(&path)?;
                    let fc: FeatureCollection = serde_json::from_slice(&bytes)
                        .with_context(|| format!("{} is not a FeatureCollection", path.display()))?;
                    BoundaryDocument::Features(fc)
                }
                None => assembler.assemble(kind)?,
            };
            check(kind, assembler.spec(kind).output, &doc)?;
        }

        Commands::Sources => {
            for kind in BoundaryKind::ALL {
                let spec = assembler.spec(kind);
                println!("{kind}");
                for d in spec.sources.attempt_order() {
                    let class = if d.origin.is_remote() { "remote" } else { "local" };
                    println!("  - {} [{class}] {}", d.label, d.origin);
                }
                for overlay in &spec.overlays {
                    println!("  + overlay {}", overlay.label);
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "json")]
fn fetch(assembler: &BoundaryAssembler, kinds: &[BoundaryKind]) -> anyhow::Result<()> {
    let mut failed = 0;
    for &kind in kinds {
        match assembler.refresh(kind) {
            Ok(path) => println!("{kind}: wrote {}", path.display()),
            Err(e) => {
                failed += 1;
                tracing::error!(boundary = %kind, error = %e, "fetch failed");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} boundary types could not be fetched", kinds.len());
    }
    Ok(())
}

#[cfg(not(feature = "json"))]
fn fetch(_assembler: &BoundaryAssembler, _kinds: &[BoundaryKind]) -> anyhow::Result<()> {
    bail!("this build cannot write caches (enable the 'json' feature)")
}

fn check(kind: BoundaryKind, output: Output, doc: &BoundaryDocument) -> anyhow::Result<()> {
    let fc = match doc {
        BoundaryDocument::Topology(t) => {
            println!("{kind}: topology with {} arcs, {} objects", t.arcs.len(), t.objects.len());
            return Ok(());
        }
        BoundaryDocument::Features(fc) => fc,
    };

    // Stub conversions carry no coordinates by construction.
    if matches!(output, Output::StubFeatures { .. }) {
        println!("{kind}: {} stub features", fc.len());
        return Ok(());
    }

    let bounds = (kind.country() == "in").then_some(BoundingBox::INDIA);
    let issues = check_collection(fc, bounds);
    for issue in &issues {
        println!("  {issue}");
    }
    println!("{kind}: {} features, {} issues", fc.len(), issues.len());
    if !issues.is_empty() {
        bail!("{kind} failed validation");
    }
    Ok(())
}
