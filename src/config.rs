//! Configuration.

use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::source::ChainName;
use crate::source::DataDirectory;

/// The environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "CHAINLIFT_DATA_DIR";

/// The data directory, relative to the home directory, used when nothing else
/// is configured.
pub const DEFAULT_DATA_DIR: &str = ".local/share/chainlift";

/// Configuration for locating chain files.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// The directory chain files are looked up in.
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a [`Config`] from the environment.
    ///
    /// The data directory is taken from `CHAINLIFT_DATA_DIR` if it is set.
    /// Otherwise, `$HOME/.local/share/chainlift` is used.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var_os(key))
    }

    /// Creates a [`Config`] from a lookup of environment variables.
    fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| var(key).filter(|value| !value.is_empty());

        let data_dir = non_empty(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(DEFAULT_DATA_DIR)));

        debug!(data_dir = ?data_dir, "resolved configuration");
        Self { data_dir }
    }

    /// Sets the data directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use chainlift::config::Config;
    ///
    /// let config = Config::default().with_data_dir("/data/chains");
    /// assert_eq!(config.data_dir(), Some(Path::new("/data/chains")));
    /// ```
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Gets the data directory, if one is configured.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Gets the [`DataDirectory`] source for a chain name, if a data directory
    /// is configured.
    pub fn source(&self, name: ChainName) -> Option<DataDirectory> {
        self.data_dir
            .as_ref()
            .map(|directory| DataDirectory::new(directory, name))
    }
}
