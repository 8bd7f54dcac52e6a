use crate::filter::is_text_content;
use crate::results::{ExtractionRecord, ListKind, ListRecord, TableRecord};
use chrono::{DateTime, FixedOffset, Local};

/// Timestamp layout of the `Extracted on:` header line, e.g. `1/15/2024, 10:30:00 AM`
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Padding added after the widest cell of each column
const COLUMN_GAP: usize = 2;

/// Time zone used to display the extraction timestamp
#[derive(Debug, Clone, Copy, Default)]
pub enum DisplayZone {
    /// The machine's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

/// Renders extraction records as plain-text documents
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    zone: DisplayZone,
}

impl TextFormatter {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// Render the header, content, lists and tables sections of a record
    pub fn format(&self, record: &ExtractionRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!("Title: {}\n", record.title));
        output.push_str(&format!("URL: {}\n", record.url));
        output.push_str(&format!(
            "Extracted on: {}\n\n",
            self.display_timestamp(&record.timestamp)
        ));

        if !record.paragraphs.is_empty() {
            output.push_str("=== CONTENT ===\n\n");
            for paragraph in &record.paragraphs {
                output.push_str(paragraph);
                output.push_str("\n\n");
            }
        }

        let lists = filter_lists(&record.lists);
        if !lists.is_empty() {
            output.push_str("=== LISTS ===\n\n");
            for list in &lists {
                output.push_str(&render_list(list));
                output.push('\n');
            }
        }

        if !record.tables.is_empty() {
            output.push_str("=== TABLES ===\n\n");
            for table in &record.tables {
                output.push_str(&render_table(table));
                output.push('\n');
            }
        }

        output
    }

    /// Render an ISO-8601 timestamp in the display zone, or verbatim if it
    /// does not parse
    pub fn display_timestamp(&self, timestamp: &str) -> String {
        let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) else {
            ::log::debug!("Unparseable timestamp {:?}, printing as is", timestamp);
            return timestamp.to_string();
        };

        match self.zone {
            DisplayZone::Local => instant.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
            DisplayZone::Fixed(offset) => instant.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Format a record with the local time zone
pub fn format_record(record: &ExtractionRecord) -> String {
    TextFormatter::default().format(record)
}

/// Drop list items that look like markup or code, then drop emptied lists
fn filter_lists(lists: &[ListRecord]) -> Vec<ListRecord> {
    lists
        .iter()
        .map(|list| {
            let items = list
                .items
                .iter()
                .filter(|item| is_text_content(item))
                .cloned()
                .collect();
            ListRecord::new(list.kind, items)
        })
        .filter(|list| !list.items.is_empty())
        .collect()
}

/// One line per item, numbered or bulleted
fn render_list(list: &ListRecord) -> String {
    list.items
        .iter()
        .enumerate()
        .map(|(index, item)| match list.kind {
            ListKind::Ordered => format!("{}. {}\n", index + 1, item),
            ListKind::Unordered => format!("• {}\n", item),
        })
        .collect()
}

/// Widest cell per column, in characters
pub fn column_widths(table: &TableRecord) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in table {
        for (column, cell) in row.iter().enumerate() {
            let length = cell.chars().count();
            match widths.get_mut(column) {
                Some(width) => *width = (*width).max(length),
                None => widths.push(length),
            }
        }
    }
    widths
}

/// Left-aligned columns with a dashed rule under the first row
///
/// Row lines are only right-trimmed so empty leading cells keep the columns
/// aligned; the rule is trimmed on both sides.
fn render_table(table: &TableRecord) -> String {
    let widths = column_widths(table);
    let mut output = String::new();

    for (index, row) in table.iter().enumerate() {
        let line: String = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<pad$}", cell, pad = width + COLUMN_GAP))
            .collect();
        output.push_str(line.trim_end());
        output.push('\n');

        if index == 0 {
            let separator = widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  ");
            output.push_str(separator.trim());
            output.push('\n');
        }
    }

    output
}
