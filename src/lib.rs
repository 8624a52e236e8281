pub mod component;
pub mod config;
pub mod convert;
mod error;
pub mod integrations;
pub mod prometheus;
pub mod secret;

pub use error::{Error, Result};
