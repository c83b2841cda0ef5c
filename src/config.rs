use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "inventory_data.json";
pub const DEFAULT_LOG_FILE: &str = "transaction_log.json";

/// Where a session keeps its two data files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Catalog file (`inventory_data.json`)
    pub data_file: PathBuf,

    /// Transaction log file (`transaction_log.json`)
    pub log_file: PathBuf,
}

impl SessionConfig {
    /// Both files in the current working directory
    pub fn new() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// Both files, with their default names, inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DEFAULT_DATA_FILE),
            log_file: dir.join(DEFAULT_LOG_FILE),
        }
    }

    /// Set the catalog file
    pub fn data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set the transaction log file
    pub fn log_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_file = path.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = SessionConfig::default();
        assert_eq!(config.data_file, PathBuf::from("inventory_data.json"));
        assert_eq!(config.log_file, PathBuf::from("transaction_log.json"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::in_dir("/var/lib/stock").log_file("/tmp/ledger.json");

        assert_eq!(
            config.data_file,
            PathBuf::from("/var/lib/stock/inventory_data.json")
        );
        assert_eq!(config.log_file, PathBuf::from("/tmp/ledger.json"));
    }
}
