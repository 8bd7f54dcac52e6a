use super::Extractor;
use crate::dom::Visibility;
use crate::results::ExtractionRecord;

/// Texts longer than this close the paragraph they belong to
const LONG_TEXT_LENGTH: usize = 50;

/// Sentence-ending characters that also close a paragraph
const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

impl<V: Visibility> Extractor<'_, V> {
    /// Collect paragraphs from raw text nodes under `body`
    ///
    /// Only used when the structured passes found nothing at all.
    pub(super) fn collect_fallback(&self, record: &mut ExtractionRecord) {
        let Some(body) = self.page.body() else {
            ::log::debug!("No body element, nothing to fall back on");
            return;
        };

        let texts: Vec<&str> = self
            .page
            .descendants(body)
            .filter(|&node| {
                self.page.text(node).is_some()
                    && self
                        .page
                        .parent_element(node)
                        .is_some_and(|parent| self.is_visible(parent))
            })
            .filter_map(|node| self.page.text(node))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();

        ::log::debug!("Fallback found {} visible text nodes", texts.len());

        for paragraph in group_into_paragraphs(&texts) {
            record.push_paragraph(paragraph);
        }
    }
}

/// Join consecutive text fragments into paragraphs
///
/// A fragment closes the current paragraph when it is long or ends a
/// sentence; whatever remains at the end forms the last paragraph.
pub fn group_into_paragraphs(texts: &[&str]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for text in texts {
        current.push(' ');
        current.push_str(text);

        if text.chars().count() > LONG_TEXT_LENGTH || text.ends_with(SENTENCE_ENDINGS) {
            let paragraph = current.trim();
            if !paragraph.is_empty() {
                paragraphs.push(paragraph.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        paragraphs.push(rest.to_string());
    }

    paragraphs
}
