//! Style and geometry types shared by the DOM, cascade and layout crates.

use std::cmp::Ordering;
use std::ops::Add;

/// Cascade rank of a declaration: `(inline, id, class, type)`.
///
/// Field order is the comparison order, so the derived `Ord` is the
/// lexicographic cascade comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16, pub u16);

impl Specificity {
    pub const ZERO: Specificity = Specificity(0, 0, 0, 0);
    /// Rank of declarations coming from an element's `style` attribute.
    pub const INLINE: Specificity = Specificity(1, 0, 0, 0);

    pub fn is_inline(self) -> bool {
        self.0 > 0
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(
            self.0.saturating_add(rhs.0),
            self.1.saturating_add(rhs.1),
            self.2.saturating_add(rhs.2),
            self.3.saturating_add(rhs.3),
        )
    }
}

/// The declaration currently winning a property, and the rank that won it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleEntry {
    pub value: String,
    pub specificity: Specificity,
}

/// One axis-independent size of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

/// One edge coordinate of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Pixel geometry written by the layout engine.
///
/// `right` and `bottom` are far-edge coordinates (`left + width`, `top + height`
/// on a forward axis), not inset offsets. Fields stay `None` until layout
/// assigns them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutBox {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl LayoutBox {
    pub fn size(&self, dimension: Dimension) -> Option<i32> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn set_size(&mut self, dimension: Dimension, px: i32) {
        match dimension {
            Dimension::Width => self.width = Some(px),
            Dimension::Height => self.height = Some(px),
        }
    }

    pub fn edge(&self, edge: Edge) -> Option<i32> {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set_edge(&mut self, edge: Edge, px: i32) {
        match edge {
            Edge::Left => self.left = Some(px),
            Edge::Top => self.top = Some(px),
            Edge::Right => self.right = Some(px),
            Edge::Bottom => self.bottom = Some(px),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == LayoutBox::default()
    }
}

/// Per-element cascade result plus the geometry layout attaches to it.
///
/// Entries keep first-insertion order so debug output is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    entries: Vec<(String, StyleEntry)>,
    pub layout: LayoutBox,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a declaration to the cascade.
    ///
    /// The stored winner is replaced only by a strictly higher specificity, so
    /// among equal ranks the first declaration applied keeps the property.
    /// Returns whether the declaration now holds the property.
    pub fn apply(&mut self, property: &str, value: &str, specificity: Specificity) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == property) {
            Some((_, entry)) => match specificity.cmp(&entry.specificity) {
                Ordering::Greater => {
                    entry.value = value.to_string();
                    entry.specificity = specificity;
                    true
                }
                Ordering::Equal | Ordering::Less => false,
            },
            None => {
                self.entries.push((
                    property.to_string(),
                    StyleEntry {
                        value: value.to_string(),
                        specificity,
                    },
                ));
                true
            }
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entry(property).map(|entry| entry.value.as_str())
    }

    pub fn entry(&self, property: &str) -> Option<&StyleEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> + '_ {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
