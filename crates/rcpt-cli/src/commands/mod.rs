pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use tracing::debug;

use rcpt_core::RcptConfig;

/// Load the config given with `--config`, else the user config file if one
/// exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}
