//! Visible text extraction from a page snapshot.
//!
//! Passes run in a fixed order, each adding to the same record:
//! paragraphs, lists, tables, loose text inside content containers, and a
//! text-node fallback that only runs when everything else found nothing.

pub mod containers;
pub mod fallback;
pub mod harvest;

#[cfg(test)]
pub(crate) mod tests;

use crate::dom::{ComputedLayout, NodeId, PageSnapshot, Visibility};
use crate::filter::is_text_content;
use crate::results::{ExtractionRecord, ListKind, ListRecord};
use chrono::{DateTime, Utc};

/// Tags whose content is collected by their own pass
const STRUCTURED_TAGS: [&str; 4] = ["p", "table", "ul", "ol"];

/// Container candidates must be longer than this many characters
const MIN_CONTAINER_TEXT_LENGTH: usize = 3;

/// Walks a page snapshot and collects its visible text
pub struct Extractor<'a, V> {
    page: &'a PageSnapshot,
    visibility: V,
}

impl<'a, V: Visibility> Extractor<'a, V> {
    /// Create an extractor for a page using the given visibility test
    pub fn new(page: &'a PageSnapshot, visibility: V) -> Self {
        Self { page, visibility }
    }

    /// Extract the page, stamping the record with the current time
    pub fn extract(&self) -> ExtractionRecord {
        self.extract_at(Utc::now())
    }

    /// Extract the page, stamping the record with `extracted_at`
    pub fn extract_at(&self, extracted_at: DateTime<Utc>) -> ExtractionRecord {
        let mut record = ExtractionRecord::new(self.page.title(), self.page.url(), extracted_at);

        let Some(root) = self.page.root() else {
            ::log::warn!("Snapshot of {} has no document element", self.page.url());
            return record;
        };

        self.collect_paragraphs(root, &mut record);
        self.collect_lists(root, &mut record);
        self.collect_tables(root, &mut record);
        self.collect_container_text(root, &mut record);

        if record.is_empty() {
            ::log::debug!("No structured content found, falling back to text nodes");
            self.collect_fallback(&mut record);
        }

        ::log::debug!(
            "Extracted {} paragraphs, {} lists, {} tables from {}",
            record.paragraphs.len(),
            record.lists.len(),
            record.tables.len(),
            record.url
        );
        record
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.visibility.is_visible(self.page, node)
    }

    /// Every visible `p` with some text
    fn collect_paragraphs(&self, root: NodeId, record: &mut ExtractionRecord) {
        for paragraph in self.page.select_tags(root, &["p"]) {
            if !self.is_visible(paragraph) || self.page.text_content(paragraph).trim().is_empty() {
                continue;
            }
            record.push_paragraph(self.harvest(paragraph));
        }
    }

    /// Every visible `ul`/`ol` with at least one non-empty visible item
    fn collect_lists(&self, root: NodeId, record: &mut ExtractionRecord) {
        for list in self.page.select_tags(root, &["ul", "ol"]) {
            if !self.is_visible(list) {
                continue;
            }
            let Some(kind) = self.page.tag(list).and_then(ListKind::from_tag) else {
                continue;
            };

            let items: Vec<String> = self
                .page
                .select_tags(list, &["li"])
                .filter(|&item| self.is_visible(item))
                .map(|item| self.harvest(item))
                .filter(|text| !text.is_empty())
                .collect();

            if !items.is_empty() {
                record.lists.push(ListRecord::new(kind, items));
            }
        }
    }

    /// Every visible table, keeping empty cells so columns stay aligned
    fn collect_tables(&self, root: NodeId, record: &mut ExtractionRecord) {
        for table in self.page.select_tags(root, &["table"]) {
            if !self.is_visible(table) {
                continue;
            }

            let mut rows = Vec::new();
            for row in self.page.select_tags(table, &["tr"]) {
                if !self.is_visible(row) {
                    continue;
                }
                let cells: Vec<String> = self
                    .page
                    .select_tags(row, &["th", "td"])
                    .filter(|&cell| self.is_visible(cell))
                    .map(|cell| self.harvest(cell))
                    .collect();

                if !cells.is_empty() {
                    rows.push(cells);
                }
            }

            if !rows.is_empty() {
                record.tables.push(rows);
            }
        }
    }

    /// Loose text directly inside content containers that the structured
    /// passes do not cover
    fn collect_container_text(&self, root: NodeId, record: &mut ExtractionRecord) {
        let candidates = self.page.descendants(root).filter(|&node| {
            self.page
                .element(node)
                .is_some_and(containers::is_content_container)
        });

        for container in candidates {
            if !self.is_visible(container) || self.is_structured(container) {
                continue;
            }

            for child in self.page.child_elements(container) {
                if self.is_structured(child) || !self.is_visible(child) {
                    continue;
                }
                let text = self.harvest(child);
                if text.chars().count() > MIN_CONTAINER_TEXT_LENGTH
                    && is_text_content(&text)
                    && record.push_paragraph(text)
                {
                    ::log::trace!("Added container text from node {}", child);
                }
            }
        }
    }

    fn is_structured(&self, node: NodeId) -> bool {
        self.page
            .tag(node)
            .is_some_and(|tag| STRUCTURED_TAGS.contains(&tag))
    }
}

/// Extract a page using the layout captured in the snapshot
pub fn extract_visible_text(page: &PageSnapshot) -> ExtractionRecord {
    Extractor::new(page, ComputedLayout).extract()
}
