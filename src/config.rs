//! Configuration for fileshare
//!
//! Centralized configuration with sensible defaults. Everything here is fixed
//! at process start; there is no runtime reconfiguration.

use std::path::PathBuf;

/// Main configuration for a fileshare instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Content directory, one blob per identifier:
    ///   {storage_dir}/
    ///     ├── 3f2b...-uuid     (raw bytes, no extension)
    ///     └── ...
    pub storage_dir: PathBuf,

    /// Metadata document (JSON array of file records)
    pub metadata_path: PathBuf,

    // -------------------------------------------------------------------------
    // Upload Configuration
    // -------------------------------------------------------------------------
    /// Maximum accepted upload size (in bytes)
    pub max_upload_size: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./storage/files"),
            metadata_path: PathBuf::from("./storage/metadata.json"),
            max_upload_size: 20 * 1024 * 1024, // 20 MB
            listen_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the content directory
    pub fn storage_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_dir = path.into();
        self
    }

    /// Set the metadata document path
    pub fn metadata_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.metadata_path = path.into();
        self
    }

    /// Set both paths under one root: `{root}/files` and `{root}/metadata.json`
    pub fn data_root(self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.storage_dir(root.join("files"))
            .metadata_path(root.join("metadata.json"))
    }

    /// Set the maximum upload size (in bytes)
    pub fn max_upload_size(mut self, bytes: usize) -> Self {
        self.config.max_upload_size = bytes;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
