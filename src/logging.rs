//! Log setup.
//!
//! The terminal belongs to the game screen, so records go to a file. With no
//! file configured no logger is installed and the `log` macros cost nothing.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::File;
use std::path::Path;

/// Install an `env_logger` writing to `log_file` at `level`.
///
/// `RUST_LOG` is applied on top of `level`, so per-module filters still work.
pub fn init_logger(log_file: Option<&Path>, level: LevelFilter) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}
