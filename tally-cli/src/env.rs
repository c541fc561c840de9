//! `.env` loading
//!
//! Search order:
//! 1. Current directory .env
//! 2. ~/.tally/.env
//! 3. Environment variables already set win over both
//!
//! Loading runs before tracing is initialised so that `RUST_LOG` can come
//! from a `.env` file. The outcome is logged afterwards via [`DotenvReport::log`].

use std::path::PathBuf;

use tracing::{debug, info};

/// Directory holding the user-wide `.env`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tally"))
}

/// What [`load_dotenv`] found
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub cwd: Option<PathBuf>,
    pub user: Option<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    pub fn log(&self) {
        if let Some(path) = &self.cwd {
            debug!("Loaded .env from current directory: {}", path.display());
        }
        if let Some(path) = &self.user {
            debug!("Loaded .env from ~/.tally: {}", path.display());
        }
        for (path, err) in &self.failures {
            debug!("Failed to load {}: {}", path.display(), err);
        }

        let loaded: Vec<String> = self
            .cwd
            .iter()
            .chain(self.user.iter())
            .map(|path| path.display().to_string())
            .collect();
        if loaded.is_empty() {
            debug!("No .env files found (current dir or ~/.tally)");
        } else {
            info!("Loaded configuration from: {}", loaded.join(", "));
        }
    }
}

/// Load `.env` files without overriding variables that are already set.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport {
        cwd: dotenvy::dotenv().ok(),
        ..Default::default()
    };

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => report.user = Some(env_file),
                Err(e) => report.failures.push((env_file, e.to_string())),
            }
        }
    }

    report
}
