//! Source image discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// List the image files in `source_dir`, preserving filesystem enumeration
/// order.
///
/// A missing source directory is created empty and yields zero items: the
/// bootstrap run succeeds and the user can drop images in afterwards.
/// Subdirectories and files whose extension is not in the allow-list are
/// skipped.
pub fn discover_images(source_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !source_dir.exists() {
        tracing::warn!(
            "source directory {} does not exist, creating it",
            source_dir.display()
        );
        std::fs::create_dir_all(source_dir).with_context(|| {
            format!("failed to create source directory {}", source_dir.display())
        })?;
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(source_dir)
        .with_context(|| format!("failed to read source directory {}", source_dir.display()))?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", source_dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_allowed_extension(&path, extensions) {
            items.push(path);
        }
    }
    Ok(items)
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
