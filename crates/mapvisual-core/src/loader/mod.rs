// crates/mapvisual-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (local files, decompression, HTTP) and the
//! fallback chain that decides which source serves a request.

pub mod common_io;
pub mod fetch;
pub mod source;

pub use fetch::{HttpClient, NoNetwork, DEFAULT_FETCH_TIMEOUT};
#[cfg(feature = "fetch")]
pub use fetch::ReqwestClient;
pub use source::{
    attempt, ChainOrder, Origin, Payload, Selected, SourceChain, SourceDescriptor, SourceReader,
    SourceSchema,
};
