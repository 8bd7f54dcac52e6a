use crate::error::{Result, ScrapeError};
use crate::utils::{filename_timestamp, sanitize_filename};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use url::Url;

/// Where a formatted document is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    /// Save directory, possibly empty
    pub directory: String,

    /// File name, `<name>_<timestamp>.txt`
    pub filename: String,
}

impl SaveTarget {
    /// Derive the target for a page saved at `saved_at`
    ///
    /// The name comes from the title, or from the URL host when the title is
    /// empty. A URL without a host (`file:`, `about:`) gives an empty name.
    pub fn for_page(directory: &str, title: &str, url: &str, saved_at: DateTime<Utc>) -> Result<Self> {
        let name = if title.is_empty() {
            let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{url}: {e}")))?;
            sanitize_filename(parsed.host_str().unwrap_or_default())
        } else {
            sanitize_filename(title).to_lowercase()
        };

        Ok(Self {
            directory: directory.to_string(),
            filename: format!("{}_{}.txt", name, filename_timestamp(saved_at)),
        })
    }

    /// Path relative to the writer's root
    pub fn path(&self) -> String {
        if self.directory.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.directory, self.filename)
        }
    }
}

/// Destination for formatted documents
pub trait TextWriter {
    /// Write `text` as UTF-8 to `path`
    fn write_text(&self, path: &str, text: &str) -> impl Future<Output = std::io::Result<()>> + Send;
}

/// Writes documents below a root directory, creating directories as needed
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextWriter for FsWriter {
    async fn write_text(&self, path: &str, text: &str) -> std::io::Result<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, text.as_bytes()).await?;
        ::log::debug!("Wrote {} bytes to {}", text.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_target_from_title() {
        let target = SaveTarget::for_page("out", "Hello, World!", "https://example.com/", fixed_time()).unwrap();
        assert_eq!(target.filename, "hello__world__2024-01-15T10-30-00-000Z.txt");
        assert_eq!(target.path(), "out/hello__world__2024-01-15T10-30-00-000Z.txt");
    }

    #[test]
    fn test_target_from_url_host() {
        let target = SaveTarget::for_page("", "", "https://docs.example.com/a/b?c=d", fixed_time()).unwrap();
        assert_eq!(target.path(), "docs_example_com_2024-01-15T10-30-00-000Z.txt");
    }

    #[test]
    fn test_target_from_url_without_host() {
        let target = SaveTarget::for_page("out", "", "file:///tmp/page.html", fixed_time()).unwrap();
        assert_eq!(target.path(), "out/_2024-01-15T10-30-00-000Z.txt");

        let target = SaveTarget::for_page("", "", "about:blank", fixed_time()).unwrap();
        assert_eq!(target.filename, "_2024-01-15T10-30-00-000Z.txt");
    }

    #[test]
    fn test_target_without_title_needs_a_valid_url() {
        let result = SaveTarget::for_page("out", "", "not a url", fixed_time());
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fs_writer_creates_directories() {
        let root = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(root.path());

        writer.write_text("Scraper/Output/page.txt", "Title: é\n").await.unwrap();

        let written = std::fs::read_to_string(root.path().join("Scraper/Output/page.txt")).unwrap();
        assert_eq!(written, "Title: é\n");
    }
}
