use crate::dom::{ComputedLayout, ElementData, Layout, NodeId, PageSnapshot, Visibility};
use crate::extract::Extractor;
use crate::extract::tests::fixtures::{page_from_body, page_from_html};
use crate::results::{ExtractionRecord, ListKind, ListRecord};
use chrono::{TimeZone, Utc};

fn extract(body: &str) -> ExtractionRecord {
    let page = page_from_body(body);
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    Extractor::new(&page, ComputedLayout).extract_at(at)
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_record_metadata() {
        let page = page_from_html(
            "https://example.com/post",
            "<html><head><title> My Post </title></head><body><p>Body text.</p></body></html>",
        );
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let record = Extractor::new(&page, ComputedLayout).extract_at(at);

        assert_eq!(record.title, "My Post");
        assert_eq!(record.url, "https://example.com/post");
        assert_eq!(record.timestamp, "2024-01-15T10:30:00.000Z");
        assert_eq!(record.paragraphs, vec!["Body text."]);
    }

    #[test]
    fn test_empty_snapshot_gives_empty_record() {
        let page = PageSnapshot::new("Empty", "https://example.com/");
        let record = Extractor::new(&page, ComputedLayout).extract();
        assert!(record.is_empty());
        assert_eq!(record.title, "Empty");
    }

    #[test]
    fn test_only_hidden_content_gives_empty_record() {
        let record = extract(
            "<div style=\"display:none\"><p>Secret</p><ul><li>Item</li></ul>\
             <table><tr><td>Cell</td></tr></table>Loose text.</div>",
        );
        assert!(record.is_empty());
    }
}

#[cfg(test)]
mod paragraph_tests {
    use super::*;

    #[test]
    fn test_visible_paragraphs_in_document_order() {
        let record = extract("<p>First.</p><div><p>Second.</p></div><p>Third.</p>");
        assert_eq!(record.paragraphs, vec!["First.", "Second.", "Third."]);
    }

    #[test]
    fn test_hidden_and_blank_paragraphs_are_skipped() {
        let record = extract(
            "<p style=\"display:none\">Secret</p><p>   </p><p hidden>Also secret</p>\
             <p style=\"width: 0\">Collapsed</p><p>Shown text.</p>",
        );
        assert_eq!(record.paragraphs, vec!["Shown text."]);
    }

    #[test]
    fn test_own_text_comes_before_child_text() {
        let record = extract("<p>Hello <em>big</em> world</p>");
        assert_eq!(record.paragraphs, vec!["Hello  worldbig"]);
    }

    #[test]
    fn test_hidden_inline_child_is_dropped() {
        let record = extract("<p>Price <span style=\"display:none\">$0.00</span></p>");
        assert_eq!(record.paragraphs, vec!["Price"]);
    }

    #[test]
    fn test_visible_child_of_hidden_parent() {
        let record = extract(
            "<div style=\"visibility:hidden\"><p style=\"visibility: visible\">Peek.</p>\
             <p>Not shown.</p></div>",
        );
        assert_eq!(record.paragraphs, vec!["Peek."]);
    }

    #[test]
    fn test_hidden_paragraph_hides_visible_child() {
        let record = extract(
            "<p style=\"visibility:hidden\">Gone <b style=\"visibility:visible\">bold</b></p>\
             <p>Kept.</p>",
        );
        assert_eq!(record.paragraphs, vec!["Kept."]);
    }

    #[test]
    fn test_duplicate_paragraphs_are_suppressed() {
        let record = extract("<p>Same text.</p><p>Other.</p><p>Same text.</p>");
        assert_eq!(record.paragraphs, vec!["Same text.", "Other."]);
    }
}

#[cfg(test)]
mod list_tests {
    use super::*;

    #[test]
    fn test_lists_keep_kind_and_visible_items() {
        let record = extract(
            "<ul><li>One</li><li style=\"display:none\">Two</li><li></li><li>Three</li></ul>\
             <ol><li>First</li></ol>",
        );
        assert_eq!(
            record.lists,
            vec![
                ListRecord::new(ListKind::Unordered, vec!["One".into(), "Three".into()]),
                ListRecord::new(ListKind::Ordered, vec!["First".into()]),
            ]
        );
    }

    #[test]
    fn test_lists_without_visible_items_are_dropped() {
        let record = extract(
            "<ul><li style=\"display:none\">x</li></ul><ol style=\"display:none\"><li>y</li></ol>\
             <ul><li>z</li></ul>",
        );
        assert_eq!(record.lists.len(), 1);
        assert_eq!(record.lists[0].items, vec!["z"]);
    }

    #[test]
    fn test_items_keep_inline_markup_text() {
        let record = extract("<ul><li><a href=\"/a\">Link text</a></li></ul>");
        assert_eq!(record.lists[0].items, vec!["Link text"]);
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn test_table_rows_and_cells() {
        let record = extract(
            "<table><tr><th>Name</th><th>Qty</th></tr><tr><td>Apple</td><td></td></tr>\
             <tr style=\"display:none\"><td>Hidden</td><td>1</td></tr></table>",
        );
        assert_eq!(
            record.tables,
            vec![vec![
                vec!["Name".to_string(), "Qty".to_string()],
                vec!["Apple".to_string(), String::new()],
            ]]
        );
    }

    #[test]
    fn test_rows_without_visible_cells_and_empty_tables_are_dropped() {
        let record = extract(
            "<table><tr><td style=\"display:none\">a</td></tr><tr><td>b</td></tr></table>\
             <table><tr><td hidden>c</td></tr></table>\
             <table style=\"display:none\"><tr><td>d</td></tr></table>",
        );
        assert_eq!(record.tables, vec![vec![vec!["b".to_string()]]]);
    }

    #[test]
    fn test_hidden_cell_shifts_row() {
        let record = extract("<table><tr><td>a</td><td style=\"display:none\">b</td><td>c</td></tr></table>");
        assert_eq!(record.tables[0], vec![vec!["a".to_string(), "c".to_string()]]);
    }
}

#[cfg(test)]
mod container_tests {
    use super::*;

    #[test]
    fn test_loose_container_text_becomes_paragraphs() {
        let record = extract(
            "<article><p>Intro paragraph.</p><div>Container text that is long enough.</div>\
             <div>abc</div><div>var x = 1; code</div><span>Intro paragraph.</span></article>",
        );
        assert_eq!(
            record.paragraphs,
            vec!["Intro paragraph.", "Container text that is long enough."]
        );
    }

    #[test]
    fn test_class_and_role_containers() {
        let record = extract(
            "<div class=\"post-content\"><span>Styled content block here</span></div>\
             <div role=\"main\"><div>Main region text</div></div>\
             <div class=\"sidebar\"><div>Sidebar text ignored</div></div>",
        );
        assert_eq!(
            record.paragraphs,
            vec!["Styled content block here", "Main region text"]
        );
    }

    #[test]
    fn test_structured_children_are_not_repeated() {
        let record = extract(
            "<section><ul><li>Item one</li></ul><table><tr><td>Cell</td></tr></table>\
             <div style=\"display:none\">Hidden loose text</div></section>",
        );
        assert!(record.paragraphs.is_empty());
        assert_eq!(record.lists.len(), 1);
        assert_eq!(record.tables.len(), 1);
    }

    #[test]
    fn test_list_matching_container_rule_is_skipped() {
        let record = extract("<ul class=\"a-section\"><li>Only item</li></ul>");
        assert!(record.paragraphs.is_empty());
        assert_eq!(record.lists[0].items, vec!["Only item"]);
    }

    #[test]
    fn test_hidden_container_is_skipped() {
        let record = extract(
            "<main style=\"visibility:hidden\"><div style=\"visibility:visible\">Peeking text</div></main>\
             <p>Para.</p>",
        );
        assert_eq!(record.paragraphs, vec!["Para."]);
    }
}

#[cfg(test)]
mod visibility_injection_tests {
    use super::*;

    /// Treats every element as visible except those with a given tag
    struct HideTag(&'static str);

    impl Visibility for HideTag {
        fn is_visible(&self, page: &PageSnapshot, node: NodeId) -> bool {
            page.tag(node).is_some_and(|tag| tag != self.0)
        }
    }

    fn synthetic_page() -> PageSnapshot {
        // No layout at all: ComputedLayout would consider everything hidden
        let mut page = PageSnapshot::new("Synthetic", "https://example.com/");
        let html = page.push_element(None, ElementData::new("html", Layout::default()));
        let body = page.push_element(Some(html), ElementData::new("body", Layout::default()));
        let p = page.push_element(Some(body), ElementData::new("p", Layout::default()));
        page.push_text(p, "Visible to the fake.");
        let aside = page.push_element(Some(body), ElementData::new("aside", Layout::default()));
        page.push_text(aside, "Aside note.");
        let p = page.push_element(Some(aside), ElementData::new("p", Layout::default()));
        page.push_text(p, "Inside aside.");
        page
    }

    #[test]
    fn test_injected_visibility_is_used() {
        let page = synthetic_page();

        let record = Extractor::new(&page, HideTag("aside")).extract();
        assert_eq!(record.paragraphs, vec!["Visible to the fake.", "Inside aside."]);

        let record = Extractor::new(&page, HideTag("p")).extract();
        assert_eq!(record.paragraphs, vec!["Aside note."]);

        let record = Extractor::new(&page, ComputedLayout).extract();
        assert!(record.is_empty());
    }

    #[test]
    fn test_visibility_by_reference() {
        let page = synthetic_page();
        let fake = HideTag("aside");
        let record = Extractor::new(&page, &fake).extract();
        assert_eq!(record.paragraphs.len(), 2);
    }
}
