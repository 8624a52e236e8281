use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML document")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML document")]
    Toml(#[from] toml::de::Error),

    #[error("unknown component {0:?}")]
    UnknownComponent(String),

    #[error("invalid exporter configuration: {0}")]
    InvalidExporterConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
