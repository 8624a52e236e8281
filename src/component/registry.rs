use crate::component::exporter::{self, Exports};
use crate::integrations::IntegrationConfig;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

/// Settings every component receives when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Fully qualified id, e.g. `prometheus.exporter.consul.default`.
    pub id: String,
    /// Address the agent's HTTP server listens on.
    pub http_listen: String,
}

/// Unparsed component arguments, as read from a file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArguments {
    Toml(toml::Value),
    Yaml(serde_yaml::Value),
}

impl RawArguments {
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(RawArguments::Toml(toml::from_str(input)?))
    }

    pub fn from_yaml(input: &str) -> Result<Self> {
        let value = match serde_yaml::from_str(input)? {
            // An empty document means "no overrides".
            serde_yaml::Value::Null => serde_yaml::Value::Mapping(Default::default()),
            value => value,
        };
        Ok(RawArguments::Yaml(value))
    }

    /// Reads arguments from `path`. Files ending in `.toml` are parsed as
    /// TOML, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&input),
            _ => Self::from_yaml(&input),
        }
    }

    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            RawArguments::Toml(value) => Ok(value.try_into()?),
            RawArguments::Yaml(value) => Ok(serde_yaml::from_value(value)?),
        }
    }
}

/// Result of building a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built {
    pub integration: IntegrationConfig,
    pub exports: Exports,
}

pub type BuildFn = fn(&Options, RawArguments) -> Result<Built>;

#[derive(Clone, Copy)]
pub struct Registration {
    /// Name the component is referenced by, e.g. `prometheus.exporter.consul`.
    pub name: &'static str,
    pub build: BuildFn,
}

/// The set of components that can be built.
///
/// Registration is explicit: nothing is registered until [`Registry::register`]
/// or [`Registry::with_builtin`] is called.
#[derive(Default)]
pub struct Registry {
    registrations: BTreeMap<&'static str, Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding all components shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(exporter::consul::registration());
        registry
    }

    /// Adds a component, replacing an earlier registration with the same name.
    pub fn register(&mut self, registration: Registration) {
        self.registrations.insert(registration.name, registration);
    }

    pub fn get(&self, name: &str) -> Result<&Registration> {
        self.registrations
            .get(name)
            .ok_or_else(|| Error::UnknownComponent(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registrations.keys().copied()
    }

    pub fn build(&self, name: &str, options: &Options, arguments: RawArguments) -> Result<Built> {
        let registration = self.get(name)?;
        (registration.build)(options, arguments)
    }
}
