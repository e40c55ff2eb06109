// src/fetch/mod.rs
// =============================================================================
// The network side of the crawler.
//
// Submodules:
// - http: Transport trait, response/error types, reqwest-backed default
// - options: TransportOptions, passed through untouched to the transport
// =============================================================================

mod http;
mod options;

pub use http::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use options::TransportOptions;
