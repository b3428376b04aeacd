use std::fmt::Write;

use html::{Document, Id, NodeData, Token};

use crate::escape_text;

#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotOptions {
    /// Emit a `style:` line under every element that has cascade entries.
    pub styles: bool,
    /// Emit a `box:` line under every element that has layout geometry.
    pub layout: bool,
}

pub fn format_tokens(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

/// Deterministic line-oriented rendering of a whole document.
pub fn snapshot_document(document: &Document, options: SnapshotOptions) -> Vec<String> {
    let mut out = Vec::with_capacity(document.len());
    let mut stack: Vec<(Id, usize)> = vec![(document.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match &document.node(id).data {
            NodeData::Document => out.push("#document".to_string()),
            NodeData::Text(text) => out.push(format!("{indent}\"{}\"", escape_text(text))),
            NodeData::Element(element) => {
                let mut line = format!("{indent}<{}", element.name);
                for attr in &element.attributes {
                    let _ = write!(line, " {}=\"{}\"", attr.name, escape_text(&attr.value));
                }
                line.push('>');
                out.push(line);
                if options.styles && !element.style.is_empty() {
                    let entries: Vec<String> = element
                        .style
                        .iter()
                        .map(|(name, entry)| format!("{name}: {}", entry.value))
                        .collect();
                    out.push(format!("{indent}  style: {}", entries.join("; ")));
                }
                let geometry = &element.style.layout;
                if options.layout && !geometry.is_empty() {
                    let px = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
                    out.push(format!(
                        "{indent}  box: left={} top={} right={} bottom={} width={} height={}",
                        px(geometry.left),
                        px(geometry.top),
                        px(geometry.right),
                        px(geometry.bottom),
                        px(geometry.width),
                        px(geometry.height)
                    ));
                }
            }
        }
        for &child in document.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
