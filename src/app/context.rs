use std::path::Path;

use crate::app::error::Result;
use crate::config::Config;
use crate::store::CsvRepository;

pub struct AppContext {
    pub config: Config,
    pub repository: CsvRepository,
}

impl AppContext {
    /// Build a context from the config file at `config_path`, or the default
    /// location when `None`.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            repository: CsvRepository::new(),
        }
    }
}
