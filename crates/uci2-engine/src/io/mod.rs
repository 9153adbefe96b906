use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::Result;

/// Directory searched for bare config names.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/config";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    fn at(path: &Path) -> impl FnOnce(std::io::Error) -> IoError + '_ {
        move |source| IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where config `name` lives: absolute names are used as they are, others
/// are looked up in `dir`.
pub fn config_path(name: &str, dir: &Path) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

/// Read a config file. An empty file is valid and reads as `""`.
pub fn read_config(path: &Path) -> Result<String, IoError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(IoError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(IoError::at(path)(err)),
    };
    if !metadata.is_file() {
        return Err(IoError::NotAFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::at(path))
}

/// Replace the contents of a config file and flush it to disk.
pub fn write_config(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::at(parent))?;
    }

    let mut file = File::create(path).map_err(IoError::at(path))?;
    file.write_all(content.as_bytes())
        .map_err(IoError::at(path))?;
    file.flush().map_err(IoError::at(path))?;
    file.sync_all().map_err(IoError::at(path))
}

/// Delete a config file.
pub fn remove_config(path: &Path) -> Result<(), IoError> {
    if path.is_dir() {
        return Err(IoError::NotAFile(path.to_path_buf()));
    }
    fs::remove_file(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => IoError::NotFound(path.to_path_buf()),
        _ => IoError::at(path)(err),
    })
}

/// Delete config `name` from `dir`.
pub fn remove(name: &str, dir: &Path) -> Result<()> {
    let path = config_path(name, dir);
    log::debug!("removing {}", path.display());
    Ok(remove_config(&path)?)
}

impl Document {
    /// Read and parse config `name` from `dir`.
    pub fn load(name: &str, dir: &Path) -> Result<Document> {
        let path = config_path(name, dir);
        log::debug!("loading {}", path.display());
        let text = read_config(&path)?;
        Document::parse(&text)
    }

    /// Serialize into config `name` in `dir`, replacing the file.
    pub fn sync(&self, name: &str, dir: &Path) -> Result<()> {
        let path = config_path(name, dir);
        log::debug!("writing {}", path.display());
        Ok(write_config(&path, &self.serialize())?)
    }
}
