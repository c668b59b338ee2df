//! Configuration for XML-backed stores.

use std::path::PathBuf;

/// Folder used when nothing else is configured.
pub const DEFAULT_DATA_FOLDER: &str = "./";

/// Configuration shared by every XML store in an application.
///
/// Passed explicitly to [`XmlStore::setup`](crate::XmlStore::setup); a
/// per-store folder in [`XmlSetup`](crate::XmlSetup) overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlConfig {
    /// Folder containing the XML documents.
    pub data_folder: PathBuf,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
        }
    }
}

impl XmlConfig {
    /// Use `folder` as the data folder.
    pub fn with_data_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.data_folder = folder.into();
        self
    }
}
