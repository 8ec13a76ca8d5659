//! Init command - write a default synthscan.toml

use crate::config::{CONFIG_FILENAME, DEFAULT_CONFIG_TEMPLATE};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_template_once() {
        let dir = TempDir::new().unwrap();
        run(dir.path()).unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);

        std::fs::write(&path, "# edited\n").unwrap();
        run(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");
    }
}
