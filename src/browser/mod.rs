pub mod webdriver;

pub use webdriver::WebDriverPage;

use crate::dom::{PageCapture, PageSnapshot};
use crate::error::{Result, ScrapeError};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Something that can hand over a snapshot of a rendered page
pub trait PageSource {
    /// Capture the page as it is currently rendered
    fn capture(&self) -> impl Future<Output = Result<PageSnapshot>> + Send;
}

/// A page snapshot previously stored as JSON
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw capture without rebuilding the tree
    pub async fn read_capture(&self) -> Result<PageCapture> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ScrapeError::InvalidSnapshot(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ScrapeError::InvalidSnapshot(format!("{}: {}", self.path.display(), e)))
    }
}

impl PageSource for SnapshotFile {
    async fn capture(&self) -> Result<PageSnapshot> {
        let capture = self.read_capture().await?;
        ::log::debug!(
            "Loaded snapshot of {} ({} nodes) from {}",
            capture.url,
            capture.nodes.len(),
            self.path.display()
        );
        PageSnapshot::from_capture(capture)
    }
}

/// Store a capture as pretty-printed JSON, creating parent directories
pub async fn store_capture(path: &Path, capture: &PageCapture) -> Result<()> {
    let json = serde_json::to_string_pretty(capture)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| write_failure(parent, source))?;
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|source| write_failure(path, source))
}

fn write_failure(path: &Path, source: std::io::Error) -> ScrapeError {
    ScrapeError::WriteFailure {
        path: path.display().to_string(),
        source,
    }
}
