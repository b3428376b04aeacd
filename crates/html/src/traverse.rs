use crate::types::{Document, Element, Id};

/// Node ids in document (pre-)order, starting at `from`.
pub fn pre_order(document: &Document, from: Id) -> Vec<Id> {
    let mut out = Vec::new();
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(document.children(id).iter().rev().copied());
    }
    out
}

/// Node ids with every child before its parent, starting at `from`.
///
/// Iterative so arbitrarily deep trees do not exhaust the call stack.
pub fn post_order(document: &Document, from: Id) -> Vec<Id> {
    let mut out = Vec::with_capacity(document.len());
    let mut stack: Vec<(Id, bool)> = vec![(from, false)];
    while let Some((id, visited)) = stack.pop() {
        if visited {
            out.push(id);
            continue;
        }
        stack.push((id, true));
        for &child in document.children(id).iter().rev() {
            stack.push((child, false));
        }
    }
    out
}

/// First element in document order whose `id` attribute equals `id`.
pub fn find_element_by_id(document: &Document, id: &str) -> Option<Id> {
    pre_order(document, document.root())
        .into_iter()
        .find(|&node| document.element(node).and_then(Element::id) == Some(id))
}

/// Elements named `name`, in document order.
pub fn elements_by_tag_name(document: &Document, name: &str) -> Vec<Id> {
    pre_order(document, document.root())
        .into_iter()
        .filter(|&node| {
            document
                .element(node)
                .is_some_and(|element| element.name.eq_ignore_ascii_case(name))
        })
        .collect()
}
