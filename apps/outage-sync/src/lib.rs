//! Outage synchronization pipeline.
//!
//! Fetches the full outage collection and one site's device registry from
//! the outage service, filters the outages down to those relevant to the
//! site, and submits the result back. One linear run per invocation; no
//! state survives the process.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod logging;
