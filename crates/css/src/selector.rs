//! Descendant selectors built from tag / `.class` / `#id` compounds.
//!
//! Matching is right to left. The rightmost compound must match the element;
//! the others are matched greedily against the ancestors, nearest first,
//! without backtracking.

use core_types::Specificity;
use html::{Ancestors, Element};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    ids: Vec<String>,
    /// Set when the text contains syntax outside tag/class/id/`*`.
    unsupported: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Part {
    Tag,
    Class,
    Id,
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

impl Compound {
    pub fn parse(text: &str) -> Self {
        let mut compound = Compound::default();
        let mut rest = text;

        if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        }

        while let Some(first) = rest.chars().next() {
            let (part, body) = match first {
                '.' => (Part::Class, &rest[1..]),
                '#' => (Part::Id, &rest[1..]),
                ch if is_name_char(ch) && compound.is_empty() && rest.len() == text.len() => {
                    (Part::Tag, rest)
                }
                _ => {
                    compound.unsupported = true;
                    break;
                }
            };
            let end = body.find(|ch: char| !is_name_char(ch)).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                compound.unsupported = true;
                break;
            }
            match part {
                Part::Tag => compound.tag = Some(name.to_ascii_lowercase()),
                Part::Class => compound.classes.push(name.to_string()),
                Part::Id => compound.ids.push(name.to_string()),
            }
            rest = &body[end..];
        }
        compound
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty() && self.ids.is_empty()
    }

    pub fn is_supported(&self) -> bool {
        !self.unsupported
    }

    /// `(0, ids, classes, types)`.
    pub fn specificity(&self) -> Specificity {
        Specificity(
            0,
            count(self.ids.len()),
            count(self.classes.len()),
            u16::from(self.tag.is_some()),
        )
    }

    pub fn matches(&self, element: &Element) -> bool {
        if self.unsupported {
            return false;
        }
        if let Some(tag) = &self.tag
            && element.name != *tag
        {
            return false;
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.ids.iter().all(|id| element.id() == Some(id.as_str()))
    }
}

fn count(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Compounds joined by descendant whitespace, stored left to right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(text: &str) -> Self {
        Self {
            compounds: text.split_whitespace().map(Compound::parse).collect(),
        }
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn is_supported(&self) -> bool {
        !self.compounds.is_empty() && self.compounds.iter().all(Compound::is_supported)
    }

    /// Sum of the compound specificities.
    pub fn specificity(&self) -> Specificity {
        self.compounds
            .iter()
            .map(Compound::specificity)
            .fold(Specificity::ZERO, |acc, s| acc + s)
    }

    pub fn matches(&self, element: &Element, ancestors: Ancestors<'_>) -> bool {
        let mut remaining = self.compounds.iter().rev();
        let Some(subject) = remaining.next() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        let mut pending = remaining.peekable();
        for ancestor in ancestors.iter() {
            let Some(compound) = pending.peek() else {
                break;
            };
            if compound.matches(ancestor) {
                pending.next();
            }
        }
        pending.peek().is_none()
    }
}
