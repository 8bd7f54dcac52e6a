use super::{NodeId, PageSnapshot};

/// Decides whether a node is rendered visibly
///
/// The extractor calls this once per element it is about to read, so a child
/// may be visible under an invisible parent (e.g. `visibility: visible` inside
/// `visibility: hidden`).
pub trait Visibility {
    /// Whether `node` is a visible element
    fn is_visible(&self, page: &PageSnapshot, node: NodeId) -> bool;
}

/// Visibility from the computed style and box size captured by the host
///
/// An element is visible when its display is not `none`, its visibility is
/// not `hidden` and its box has positive width and height.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputedLayout;

impl Visibility for ComputedLayout {
    fn is_visible(&self, page: &PageSnapshot, node: NodeId) -> bool {
        let Some(element) = page.element(node) else {
            return false;
        };
        let layout = &element.layout;

        layout.display != "none"
            && layout.visibility != "hidden"
            && layout.width > 0.0
            && layout.height > 0.0
    }
}

impl<V: Visibility + ?Sized> Visibility for &V {
    fn is_visible(&self, page: &PageSnapshot, node: NodeId) -> bool {
        (**self).is_visible(page, node)
    }
}
