use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;

use crate::data::create_id;

/// Thin wrapper over the upload directory. Stored paths are relative to the
/// root so the directory can be moved without rewriting rows.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &str) -> Self {
        return Self {
            root: PathBuf::from(root),
        };
    }

    pub async fn save(&self, subdir: &str, original_name: &str, bytes: &[u8]) -> Result<String> {
        // keep only the final path segment of whatever the client sent
        let name = original_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or("file");

        let relative = format!("{subdir}/{id}_{name}", id = create_id());
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("error creating upload dir")?;
        }

        fs::write(&path, bytes)
            .await
            .context("error writing upload")?;

        return Ok(relative);
    }

    /// Best effort: a row without its file is recoverable, a failed request
    /// over a missing file is not.
    pub async fn remove(&self, relative: &str) {
        if let Err(err) = fs::remove_file(self.root.join(relative)).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("error removing upload {relative}: {err}");
            }
        }
    }
}
