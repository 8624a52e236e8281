//! Conversion of foreign configuration formats into flow components.

use crate::component::scrape;
use serde::Serialize;

pub mod flow;
pub mod prometheus;

/// A converted flow component: `<name> "<label>" { <arguments> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub label: String,
    pub arguments: scrape::Arguments,
}

impl Component {
    /// The id other components use to reference this one.
    pub fn id(&self) -> String {
        format!("{}.{}", self.name, self.label)
    }
}
