use std::fmt::Write;

use core_types::{ComputedStyle, LayoutBox};

use crate::types::{Document, Id, NodeData};

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;
const STYLE_PREVIEW: usize = 3;

pub fn first_styles(style: &ComputedStyle) -> String {
    let mut out = String::new();
    for (i, (k, entry)) in style.iter().take(STYLE_PREVIEW).enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "{k}: {};", entry.value);
    }
    out
}

fn geometry(layout: &LayoutBox) -> Option<String> {
    if layout.is_empty() {
        return None;
    }
    let px = |v: Option<i32>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
    Some(format!(
        "[{},{} {}x{}]",
        px(layout.left),
        px(layout.top),
        px(layout.width),
        px(layout.height)
    ))
}

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// One line per node, indented by depth, at most `cap` lines.
///
/// Whitespace-only text nodes are skipped.
pub fn outline(document: &Document, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![(document.root(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if out.len() == cap {
            break;
        }
        if let Some(line) = outline_line(document, id, depth) {
            out.push(line);
        }
        for &child in document.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}

fn outline_line(document: &Document, id: Id, depth: usize) -> Option<String> {
    let mut line = INDENT_STEP.repeat(depth);
    match &document.node(id).data {
        NodeData::Document => line.push_str("#document"),
        NodeData::Element(element) => {
            line.push('<');
            line.push_str(&element.name);
            if let Some(id) = element.id().filter(|v| !v.is_empty()) {
                let _ = write!(line, r#" id="{id}""#);
            }
            if let Some(class) = element.attribute("class").filter(|v| !v.is_empty()) {
                let _ = write!(line, r#" class="{class}""#);
            }
            line.push('>');
            if let Some(geometry) = geometry(&element.style.layout) {
                line.push(' ');
                line.push_str(&geometry);
            }
            let styles = first_styles(&element.style);
            if !styles.is_empty() {
                let _ = write!(line, "  /* {styles} */");
            }
        }
        NodeData::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            line.push('"');
            push_preview(&mut line, trimmed);
            line.push('"');
        }
    }
    Some(line)
}
