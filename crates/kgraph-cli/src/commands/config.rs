//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `path` is the configuration file in effect, `config` what was loaded from it.
pub fn execute_config(
    args: ConfigArgs,
    path: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            if !path.exists() {
                eprintln!(
                    "{}",
                    formatter.info(&format!("{} not found, showing defaults", path.display()))
                );
            }
            println!("{}", formatter.format_config(config)?);
            Ok(())
        }
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Write the default configuration to `path`.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".kgraph").join("config.toml");

        init_config(&path, false, &formatter()).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chunking]\nchunk_size = 99\n").unwrap();

        assert!(matches!(
            init_config(&path, false, &formatter()),
            Err(CliError::Config(_))
        ));
        assert_eq!(Config::load_from(&path).unwrap().chunking.chunk_size, 99);

        init_config(&path, true, &formatter()).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().chunking.chunk_size, 150);
    }
}
