use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::error::AppResult;

/// Loads the existing changelog.
///
/// A missing file is a fresh start and any other read failure is downgraded to
/// a warning, so this never fails the run.
pub async fn read_changelog(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            info!("Read existing changelog from {}", path.display());
            content
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("No existing changelog found, will create new one");
            String::new()
        }
        Err(err) => {
            warn!("Error reading changelog {}: {err}", path.display());
            String::new()
        }
    }
}

pub async fn write_changelog(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    info!("Wrote changelog to {}", path.display());
    Ok(())
}
