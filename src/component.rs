//! Flow components and their arguments.

pub mod discovery;
pub mod exporter;
pub mod http;
mod registry;
pub mod scrape;

pub use registry::{BuildFn, Built, Options, RawArguments, Registration, Registry};
