use std::path::PathBuf;

/// Returns the default path of the solarops database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/solarops/solarops.db`
/// - **Linux**: `~/.local/share/solarops/solarops.db`
/// - **Windows**: `%LOCALAPPDATA%\solarops\solarops.db`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("solarops").join("solarops.db"))
}

/// Open the database at the configured path, or the per-user default
pub fn initialize_database(
    configured_path: Option<PathBuf>,
) -> anyhow::Result<(std::sync::Arc<crate::database::Database>, PathBuf)> {
    let db_path = match configured_path {
        Some(path) => path,
        None => get_db_path()?,
    };

    let db = crate::database::Database::new(&db_path)?;
    Ok((std::sync::Arc::new(db), db_path))
}
