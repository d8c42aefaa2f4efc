//! Command implementations.

pub mod build;
pub mod chunk;
pub mod config;
pub mod graph;

pub use self::build::{build_with_provider, execute_build};
pub use self::chunk::execute_chunk;
pub use self::config::execute_config;
pub use self::graph::execute_graph;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
