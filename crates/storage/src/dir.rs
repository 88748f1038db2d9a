use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use tempdir::TempDir;

/// Resolve and create the directory the application stores its data in.
///
/// With `ephemeral`, a fresh directory is created under `data_dir` (or the OS temporary
/// directory) and left in place after the process exits.
pub fn setup_data_dir(
    app_name: &str,
    data_dir: Option<PathBuf>,
    ephemeral: bool,
) -> io::Result<PathBuf> {
    let dir = if ephemeral {
        let temp_dir = match data_dir {
            Some(parent) => {
                fs::create_dir_all(&parent)?;
                TempDir::new_in(parent, app_name)?
            }
            None => TempDir::new(app_name)?,
        };
        temp_dir.into_path()
    } else {
        match data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", app_name)
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "No home directory for data")
                })?,
        }
    };

    fs::create_dir_all(&dir)?;
    Ok(dir)
}
