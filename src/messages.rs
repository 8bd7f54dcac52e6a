use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::formatter::TextFormatter;
use crate::results::ExtractionRecord;
use crate::save::{SaveTarget, TextWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requests exchanged between the page side and the save handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Format and store a record
    SaveText {
        text: ExtractionRecord,
        url: String,
        title: String,
    },
    /// Ask the page for a fresh record
    GetText,
}

/// Answer to a `saveText` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,

    /// Saved path, `<saveDirectory>/<filename>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn saved(filename: impl Into<String>) -> Self {
        Self {
            success: true,
            filename: Some(filename.into()),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            filename: None,
            error: Some(error.to_string()),
        }
    }
}

/// Answer to a `getText` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: ExtractionRecord,
}

/// Receives `saveText` requests, formats the record and writes it out
pub struct SaveHandler<W> {
    settings: Settings,
    writer: W,
    formatter: TextFormatter,
}

impl<W: TextWriter> SaveHandler<W> {
    pub fn new(settings: Settings, writer: W) -> Self {
        Self {
            settings,
            writer,
            formatter: TextFormatter::default(),
        }
    }

    pub fn with_formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Answer a `saveText` request; any other action is rejected
    pub async fn handle(&self, request: Request) -> SaveResponse {
        match request {
            Request::SaveText { text, url, title } => self.handle_save(&text, &url, &title).await,
            Request::GetText => SaveResponse::failed("getText must be answered by the page"),
        }
    }

    /// Save a record and report the outcome as a response envelope
    pub async fn handle_save(&self, record: &ExtractionRecord, url: &str, title: &str) -> SaveResponse {
        match self.save(record, url, title, Utc::now()).await {
            Ok(path) => {
                ::log::info!("Saved text for {} as {}", url, path);
                SaveResponse::saved(path)
            }
            Err(e) => {
                ::log::error!("Error saving text for {}: {}", url, e);
                SaveResponse::failed(e)
            }
        }
    }

    /// Format and write a record, returning the saved path
    ///
    /// Checks `isEnabled` before anything else, so a disabled store never
    /// reaches the writer. One write attempt, no retry.
    pub async fn save(
        &self,
        record: &ExtractionRecord,
        url: &str,
        title: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<String> {
        if !self.settings.is_enabled {
            return Err(ScrapeError::Disabled);
        }

        if record.is_empty() {
            ::log::warn!("Extraction yielded nothing for {}, saving header only", url);
        }

        let target = SaveTarget::for_page(&self.settings.save_directory, title, url, saved_at)?;
        let path = target.path();
        let document = self.formatter.format(record);

        self.writer
            .write_text(&path, &document)
            .await
            .map_err(|source| ScrapeError::WriteFailure {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
