//! Configuration inspection.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ConfigLoader;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// Print where configuration and cached embeddings live
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    match args.command {
        ConfigCommands::Show => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            let user = ConfigLoader::user_config_path();
            let project = ConfigLoader::project_config_path();
            match user {
                Some(path) => println!("User config:    {}", describe(&path)),
                None => println!("User config:    (no home directory)"),
            }
            println!("Project config: {}", describe(&project));
            println!("Embeddings:     {}", describe(&config.storage.embeddings_dir()));
        }
    }
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present)", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn describe_marks_missing_paths() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("config.toml");

        assert!(describe(&missing).ends_with("(not present)"));
        std::fs::write(&missing, "").unwrap();
        assert_eq!(describe(&missing), missing.display().to_string());
    }
}
