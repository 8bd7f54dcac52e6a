use crate::dom::ElementData;

/// A simple selector for a semantic content container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRule {
    /// Any element with this tag (`article`)
    Tag(&'static str),
    /// A tag carrying a class (`div.content`)
    TagWithClass(&'static str, &'static str),
    /// A tag carrying a `role` attribute value (`div[role="main"]`)
    TagWithRole(&'static str, &'static str),
    /// Any element carrying a class (`.post-content`)
    Class(&'static str),
}

impl ContainerRule {
    /// Check if an element matches this rule
    pub fn matches(&self, element: &ElementData) -> bool {
        match *self {
            ContainerRule::Tag(tag) => element.tag == tag,
            ContainerRule::TagWithClass(tag, class) => element.tag == tag && element.has_class(class),
            ContainerRule::TagWithRole(tag, role) => {
                element.tag == tag && element.role.as_deref() == Some(role)
            }
            ContainerRule::Class(class) => element.has_class(class),
        }
    }
}

/// Containers whose loose children are scanned for extra paragraph text
pub const CONTENT_CONTAINERS: [ContainerRule; 10] = [
    ContainerRule::Tag("article"),
    ContainerRule::Tag("section"),
    ContainerRule::TagWithClass("div", "content"),
    ContainerRule::TagWithClass("div", "main"),
    ContainerRule::TagWithRole("div", "main"),
    ContainerRule::Tag("main"),
    ContainerRule::Class("main-content"),
    ContainerRule::Class("article-content"),
    ContainerRule::Class("post-content"),
    // Amazon product pages
    ContainerRule::Class("a-section"),
];

/// Whether an element matches any of the content container rules
pub fn is_content_container(element: &ElementData) -> bool {
    CONTENT_CONTAINERS.iter().any(|rule| rule.matches(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Layout;

    fn element(tag: &str) -> ElementData {
        ElementData::new(tag, Layout::default())
    }

    #[test]
    fn test_tag_rules() {
        assert!(is_content_container(&element("article")));
        assert!(is_content_container(&element("SECTION")));
        assert!(is_content_container(&element("main")));
        assert!(!is_content_container(&element("div")));
        assert!(!is_content_container(&element("aside")));
    }

    #[test]
    fn test_class_and_role_rules() {
        assert!(is_content_container(&element("div").with_class("content")));
        assert!(!is_content_container(&element("span").with_class("content")));
        assert!(is_content_container(&element("div").with_role("main")));
        assert!(!is_content_container(&element("nav").with_role("main")));
        assert!(is_content_container(&element("span").with_class("post-content")));
        assert!(is_content_container(&element("ul").with_class("a-section")));
    }
}
