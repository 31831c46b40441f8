//! Init-config command implementation.

use anyhow::{Result, bail};
use std::path::Path;

use crate::config::Config;

/// Write the effective configuration, including command-line overrides
pub fn run(config: &Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config.save(path)?;
    println!("Config written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scry_core::ScreenSize;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_writes_effective_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scry.toml");
        let config =
            Config::default().with_overrides(Some(2560), Some(1440), Some("o.json".into()));

        run(&config, &path, false).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.screen, ScreenSize::new(2560, 1440));
        assert_eq!(loaded.offsets, Some(PathBuf::from("o.json")));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scry.toml");
        std::fs::write(&path, "[screen]\nwidth = 800\nheight = 600\n").unwrap();

        assert!(run(&Config::default(), &path, false).is_err());
        assert_eq!(Config::load(&path).unwrap().screen, ScreenSize::new(800, 600));

        run(&Config::default(), &path, true).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
