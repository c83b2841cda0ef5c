//! Whole-file JSON persistence for the catalog and the transaction log

use crate::core::{InventoryError, Result};
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

const INDENT: &[u8] = b"    ";

/// Reads `path` as JSON, or hands back `default` untouched when the file does not exist.
///
/// The default is never written to disk here. Any other failure (unreadable
/// file, malformed JSON) is returned as an error.
pub fn load<T, P>(path: P, default: T) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("'{}' not found, starting from defaults", path.display());
            return Ok(default);
        }
        Err(e) => {
            return Err(InventoryError::Io(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            )));
        }
    };

    let value = serde_json::from_slice(&data).map_err(|e| {
        InventoryError::Serialization(format!("Failed to parse '{}': {}", path.display(), e))
    })?;
    debug!("loaded {} bytes from '{}'", data.len(), path.display());
    Ok(value)
}

/// Serializes `data` with a four-space indent and replaces `path` in full.
///
/// The bytes land in a temporary sibling file first and are renamed over the
/// target, so a crash mid-write leaves the previous file intact. The two data
/// files are still written independently of each other.
pub fn save<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = temp_sibling(dir, path).map_err(|e| {
        InventoryError::Io(format!("Failed to create temp file in '{}': {}", dir.display(), e))
    })?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        data.serialize(&mut serializer).map_err(|e| {
            InventoryError::Serialization(format!("Failed to serialize '{}': {}", path.display(), e))
        })?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| {
        InventoryError::Io(format!("Failed to replace '{}': {}", path.display(), e.error))
    })?;

    debug!("saved '{}'", path.display());
    Ok(())
}

/// Creates the temporary file that will be renamed over `target`.
///
/// It takes the target's permissions when the target exists. A new file gets
/// the usual `0o666` minus umask instead of the owner-only default.
fn temp_sibling(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    match fs::metadata(target) {
        Ok(meta) => {
            let temp = NamedTempFile::new_in(dir)?;
            temp.as_file().set_permissions(meta.permissions())?;
            Ok(temp)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let mut builder = Builder::new();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                builder.permissions(fs::Permissions::from_mode(0o666));
            }
            builder.tempfile_in(dir)
        }
        Err(e) => Err(e),
    }
}

/// A JSON document bound to one path.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load_or(&self, default: T) -> Result<T> {
        load(&self.path, default)
    }

    pub fn save(&self, data: &T) -> Result<()> {
        save(data, &self.path)
    }
}
