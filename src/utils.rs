use crate::constants::TIMEZONE_SWITZERLAND;
use chrono::{NaiveDateTime, Utc};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "meteoshrooms";
pub const DATA_DIR_ENV: &str = "METEOSHROOMS_DATA_PATH";

/// Resolves the data directory: `$METEOSHROOMS_DATA_PATH` if set, else the user's data
/// directory joined with `meteoshrooms`.
pub fn get_data_dir() -> io::Result<PathBuf> {
    if let Some(path) = env::var_os(DATA_DIR_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::data_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Could not determine system data directory"))
}

/// Checks that `path` is an existing directory. The data is deployed alongside the
/// dashboard, so a missing directory is an error rather than something to create.
pub async fn ensure_data_dir_exists(path: &Path) -> io::Result<()> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Data path exists but is not a directory: {}", path.display()),
        ));
    }
    Ok(())
}

/// Current wall-clock time in Switzerland, without offset.
pub fn zurich_now() -> NaiveDateTime {
    Utc::now().with_timezone(&TIMEZONE_SWITZERLAND).naive_local()
}
