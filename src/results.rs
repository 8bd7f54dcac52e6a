use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One table: rows of positional cell strings
pub type TableRecord = Vec<Vec<String>>;

/// Order kind of an extracted list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list (`ol`)
    #[serde(alias = "ol")]
    Ordered,
    /// Bulleted list (`ul`)
    #[serde(alias = "ul")]
    Unordered,
}

impl ListKind {
    /// Maps a list element tag name to its kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ol" => Some(ListKind::Ordered),
            "ul" => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

/// A list harvested from the page, with at least one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    /// Whether the list is ordered or unordered
    #[serde(rename = "type")]
    pub kind: ListKind,

    /// Item texts in document order
    pub items: Vec<String>,
}

impl ListRecord {
    /// Create a new list record
    pub fn new(kind: ListKind, items: Vec<String>) -> Self {
        Self { kind, items }
    }
}

/// Visible text extracted from a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Document title
    pub title: String,

    /// Page URL at extraction time
    pub url: String,

    /// ISO-8601 instant of extraction
    pub timestamp: String,

    /// Paragraph texts, deduplicated, in document order
    #[serde(default)]
    pub paragraphs: Vec<String>,

    /// Non-empty lists in document order
    #[serde(default)]
    pub lists: Vec<ListRecord>,

    /// Non-empty tables in document order
    #[serde(default)]
    pub tables: Vec<TableRecord>,
}

impl ExtractionRecord {
    /// Create an empty record stamped with the given instant
    pub fn new(title: &str, url: &str, extracted_at: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            timestamp: iso_timestamp(extracted_at),
            paragraphs: Vec::new(),
            lists: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Appends a paragraph unless it is empty or already present
    ///
    /// Returns whether the paragraph was added.
    pub fn push_paragraph(&mut self, text: String) -> bool {
        if text.is_empty() || self.paragraphs.contains(&text) {
            return false;
        }
        self.paragraphs.push(text);
        true
    }

    /// True when no paragraphs, lists or tables were found
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.lists.is_empty() && self.tables.is_empty()
    }
}

/// Formats an instant like `2024-01-15T10:30:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_has_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_push_paragraph_dedupes_and_skips_empty() {
        let mut record = ExtractionRecord::new("T", "https://example.com", Utc::now());
        assert!(record.push_paragraph("First".to_string()));
        assert!(!record.push_paragraph("First".to_string()));
        assert!(!record.push_paragraph(String::new()));
        assert_eq!(record.paragraphs, vec!["First"]);
    }

    #[test]
    fn test_list_kind_accepts_tag_names() {
        let list: ListRecord = serde_json::from_str(r#"{"type":"ol","items":["a"]}"#).unwrap();
        assert_eq!(list.kind, ListKind::Ordered);

        let list: ListRecord =
            serde_json::from_str(r#"{"type":"unordered","items":["a"]}"#).unwrap();
        assert_eq!(list.kind, ListKind::Unordered);

        let json = serde_json::to_string(&ListRecord::new(ListKind::Ordered, vec![])).unwrap();
        assert_eq!(json, r#"{"type":"ordered","items":[]}"#);
    }

    #[test]
    fn test_record_missing_sections_default_to_empty() {
        let record: ExtractionRecord = serde_json::from_str(
            r#"{"title":"T","url":"https://example.com","timestamp":"2024-01-15T10:30:00.000Z"}"#,
        )
        .unwrap();
        assert!(record.is_empty());
    }
}
