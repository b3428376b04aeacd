//! Flex layout over a styled document.
//!
//! Only flex containers are laid out; everything else keeps whatever geometry
//! it already has. Containers are processed children-first, so a nested
//! container's resolved size is what its parent sees.

pub mod flex;

use css::computed;
use html::{Document, Id, traverse};

pub use flex::{FlexSummary, layout_container};

#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Run layout at all. Off leaves every element without geometry.
    pub enabled: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Counts from one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub containers: usize,
    pub items: usize,
    pub lines: usize,
    pub shrunk_containers: usize,
}

pub fn layout_document(document: &mut Document) -> LayoutStats {
    layout_document_with(document, &LayoutConfig::default())
}

pub fn layout_document_with(document: &mut Document, config: &LayoutConfig) -> LayoutStats {
    let mut stats = LayoutStats::default();
    if !config.enabled {
        return stats;
    }

    for id in flex_containers(document) {
        let Some(summary) = layout_container(document, id) else {
            continue;
        };
        stats.containers += 1;
        stats.items += summary.items;
        stats.lines += summary.lines;
        if summary.shrunk {
            stats.shrunk_containers += 1;
        }
    }

    log::debug!(
        target: "layout.flex",
        "laid out {} container(s), {} item(s), {} line(s)",
        stats.containers,
        stats.items,
        stats.lines
    );
    stats
}

/// Flex containers, every descendant before its ancestors.
pub fn flex_containers(document: &Document) -> Vec<Id> {
    traverse::post_order(document, document.root())
        .into_iter()
        .filter(|&id| {
            document
                .element(id)
                .is_some_and(|element| computed::display(&element.style).is_flex_container())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Specificity;
    use html::{Element, NodeData};

    fn styled(name: &str, decls: &[(&str, &str)]) -> NodeData {
        let mut element = Element::new(name, Vec::new());
        for (k, v) in decls {
            element.style.apply(k, v, Specificity::ZERO);
        }
        NodeData::Element(element)
    }

    #[test]
    fn nested_container_is_sized_before_its_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append(root, styled("div", &[("display", "flex"), ("width", "500px")]));
        let inner = doc.append(outer, styled("div", &[("display", "flex")]));
        doc.append(inner, styled("span", &[("width", "30px"), ("height", "10px")]));
        doc.append(inner, styled("span", &[("width", "20px"), ("height", "15px")]));
        let sibling = doc.append(outer, styled("p", &[("width", "40px")]));

        assert_eq!(flex_containers(&doc), vec![inner, outer]);
        let stats = layout_document(&mut doc);
        assert_eq!(stats.containers, 2);
        assert_eq!(stats.items, 4);

        let inner_box = doc.element(inner).expect("inner").style.layout;
        assert_eq!(inner_box.width, Some(50));
        assert_eq!(inner_box.left, Some(0));
        assert_eq!(inner_box.right, Some(50));
        // Keeps its own resolved cross size; the parent reads it as explicit.
        assert_eq!(inner_box.height, Some(15));

        let sibling_box = doc.element(sibling).expect("p").style.layout;
        assert_eq!(sibling_box.left, Some(50));
        assert_eq!(sibling_box.width, Some(40));
        assert_eq!(sibling_box.height, Some(15));
    }

    #[test]
    fn disabled_layout_writes_nothing() {
        let mut doc = Document::new();
        let root = doc.root();
        let container = doc.append(root, styled("div", &[("display", "flex"), ("width", "10px")]));
        let child = doc.append(container, styled("span", &[("width", "5px")]));

        let stats = layout_document_with(&mut doc, &LayoutConfig { enabled: false });
        assert_eq!(stats, LayoutStats::default());
        assert!(doc.element(container).expect("div").style.layout.is_empty());
        assert!(doc.element(child).expect("span").style.layout.is_empty());
    }

    #[test]
    fn non_flex_elements_are_not_containers() {
        let mut doc = Document::new();
        let root = doc.root();
        let block = doc.append(root, styled("div", &[("display", "block")]));
        doc.append(block, styled("span", &[("width", "5px")]));
        assert!(flex_containers(&doc).is_empty());
        assert_eq!(layout_document(&mut doc).containers, 0);
    }
}
