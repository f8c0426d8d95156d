//! mapvisual-cli
//! =============
//!
//! Command-line driver for the `mapvisual-core` boundary pipeline.
//!
//! The binary (`mapvisual`) is the deliverable; this library target only
//! carries the overview below.
//!
//! ```text
//! mapvisual boundary in option-b --pretty
//! mapvisual --offline boundary us states-topo
//! mapvisual fetch in states
//! mapvisual check in option-b
//! mapvisual sources
//! ```
//!
//! Logging goes to stderr and honors `RUST_LOG`; stdout only ever carries
//! the requested document.
#![cfg_attr(docsrs, feature(doc_cfg))]
