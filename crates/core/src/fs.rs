//! Filesystem utilities

use std::fs;
use std::path::Path;

use log::info;

/// Ensure the parent directory of a file path exists before writing to it
pub fn ensure_parent_exists(file_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}
