//! Implementation of the `docrag init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::setup::{create_config_dir, create_config_file, SetupPaths};
use crate::infrastructure::AppContext;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file with the default template
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
    pub config_written: bool,
    pub database_file: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {}", self.config_file.display()));
        } else {
            lines.push(format!("\nKept existing {}", self.config_file.display()));
        }
        lines.push(format!("Database ready at {}", self.database_file.display()));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let paths = SetupPaths::in_dir(&target_path);
    let was_initialized = paths.is_initialized();

    create_config_dir(&paths)?;
    let config_written = create_config_file(&paths, args.force)?;

    // The database path is taken from the file just written or kept
    let mut config = ConfigLoader::load_from_file(&paths.config_file)?;
    if config.database.path == ".docrag/docrag.db" {
        config.database.path = paths.database_file.display().to_string();
    }
    let database_file = PathBuf::from(&config.database.path);

    // Creates the database, applies migrations and records the dimension
    let ctx = AppContext::open(config)
        .await
        .context("Failed to initialize database")?;
    ctx.close().await;

    let message = if was_initialized && !args.force {
        "Project already initialized. Use --force to rewrite the config file.".to_string()
    } else {
        "Project initialized successfully.".to_string()
    };

    output(
        &InitOutput {
            success: true,
            message,
            config_file: paths.config_file,
            config_written,
            database_file,
        },
        json_mode,
    );
    Ok(())
}
