use super::Extractor;
use crate::dom::{NodeId, Visibility};

impl<V: Visibility> Extractor<'_, V> {
    /// Visible text of an element without counting nested text twice
    ///
    /// A leaf element yields its whole text. Otherwise the element's own text
    /// nodes come first, followed by the harvest of each child element in
    /// document order. Invisible elements yield an empty string, and so do
    /// their subtrees, even if a descendant would be visible on its own.
    pub fn harvest(&self, node: NodeId) -> String {
        if !self.is_visible(node) {
            return String::new();
        }

        if self.page.child_elements(node).next().is_none() {
            return self.page.text_content(node).trim().to_string();
        }

        let mut text: String = self
            .page
            .children(node)
            .iter()
            .filter_map(|&child| self.page.text(child))
            .collect();

        for child in self.page.child_elements(node) {
            text.push_str(&self.harvest(child));
        }

        text.trim().to_string()
    }
}
