use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};

/// Creates the log directory if needed and returns its canonical path.
pub fn ensure_log_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o755);
            let _ = fs::set_permissions(path, perms);
        }
    }

    let probe_file = path.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("log directory {} is not writable", path.display()))?;
    fs::remove_file(&probe_file)?;

    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
