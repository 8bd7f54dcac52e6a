use crate::browser::{PageSource, SnapshotFile, WebDriverPage, store_capture};
use crate::config::{BrowserConfig, Settings};
use crate::error::Result;
use crate::formatter::TextFormatter;
use crate::messages::{SaveHandler, SaveResponse};
use crate::results::ExtractionRecord;
use crate::save::FsWriter;
use crate::triggers;
use std::path::{Path, PathBuf};

/// Builder tying settings, browser configuration and the output location
/// together for the capture and save flows
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    browser: BrowserConfig,
    output_root: PathBuf,
    formatter: TextFormatter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Default settings, default browser configuration (with `WEBDRIVER_URL`
    /// applied), saving below the current directory
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            browser: BrowserConfig::default().with_env_overrides(),
            output_root: PathBuf::from("."),
            formatter: TextFormatter::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_browser_config(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    /// Override the WebDriver URL
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.browser.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Directory that relative save paths are resolved against
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn with_formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn browser_config(&self) -> &BrowserConfig {
        &self.browser
    }

    fn handler(&self) -> SaveHandler<FsWriter> {
        SaveHandler::new(self.settings.clone(), FsWriter::new(&self.output_root))
            .with_formatter(self.formatter.clone())
    }

    fn page(&self, url: &str) -> WebDriverPage {
        WebDriverPage::new(url, self.browser.clone())
    }

    /// Load a page and save its text, as the on-load trigger does
    pub async fn save(&self, url: &str) -> Result<SaveResponse> {
        self.save_from(&self.page(url)).await
    }

    /// Load a page and extract its text without saving
    pub async fn extract(&self, url: &str) -> Result<ExtractionRecord> {
        Ok(triggers::answer_get_text(&self.page(url)).await?.text)
    }

    /// Manual save, reported as a status line
    pub async fn save_now(&self, url: &str) -> String {
        triggers::save_now(&self.page(url), &self.handler()).await
    }

    /// Load a page and store its raw snapshot as JSON
    pub async fn capture(&self, url: &str, output: &Path) -> Result<()> {
        let capture = self.page(url).capture_raw().await?;
        store_capture(output, &capture).await?;
        ::log::info!("Stored snapshot of {} in {}", capture.url, output.display());
        Ok(())
    }

    /// Extract and save from a stored snapshot
    pub async fn save_snapshot(&self, path: &Path) -> Result<SaveResponse> {
        self.save_from(&SnapshotFile::new(path)).await
    }

    /// Extract and save from any page source
    pub async fn save_from<S: PageSource>(&self, source: &S) -> Result<SaveResponse> {
        triggers::auto_save(source, &self.handler()).await
    }
}
