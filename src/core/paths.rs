use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base renumber config directory (~/.config/renumber/ on Unix, %APPDATA%\renumber on Windows)
pub fn renumber() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("renumber"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("renumber"))
    }
}

/// Global renumber.json config file path
pub fn renumber_json() -> Result<PathBuf> {
    Ok(renumber()?.join("renumber.json"))
}
