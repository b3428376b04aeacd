//! Typed views over a cascade result, as consumed by layout.

use core_types::{ComputedStyle, Dimension};

use crate::values::{
    AlignContent, AlignItems, Display, FlexDirection, FlexWrap, JustifyContent, coerce_px,
    leading_integer, leading_number,
};

pub fn display(style: &ComputedStyle) -> Display {
    Display::from_value(style.get("display"))
}

/// Pixel size on one dimension.
///
/// Geometry already written by layout wins over the declared value, so the
/// auto size of a laid-out nested container is seen by its parent.
/// `None` means auto.
pub fn size(style: &ComputedStyle, dimension: Dimension) -> Option<i32> {
    style.layout.size(dimension).or_else(|| {
        let property = match dimension {
            Dimension::Width => "width",
            Dimension::Height => "height",
        };
        style.get(property).and_then(coerce_px)
    })
}

/// Flex grow factor: the first number of `flex`, else `flex-grow`.
/// Zero, negative or non-numeric factors mean the item is not flexible.
pub fn flex_grow(style: &ComputedStyle) -> Option<f64> {
    style
        .get("flex")
        .and_then(leading_number)
        .or_else(|| style.get("flex-grow").and_then(leading_number))
        .filter(|grow| *grow > 0.0)
}

pub fn order(style: &ComputedStyle) -> i32 {
    style.get("order").and_then(leading_integer).unwrap_or(0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlexContainerStyle {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
}

impl FlexContainerStyle {
    pub fn from_style(style: &ComputedStyle) -> Self {
        Self {
            direction: FlexDirection::from_value(style.get("flex-direction")),
            wrap: FlexWrap::from_value(style.get("flex-wrap")),
            justify_content: JustifyContent::from_value(style.get("justify-content")),
            align_items: AlignItems::from_value(style.get("align-items")),
            align_content: AlignContent::from_value(style.get("align-content")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexItemStyle {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub grow: Option<f64>,
    /// `align-self` override; `auto` and unknown values defer to the container.
    pub align_self: Option<AlignItems>,
    pub order: i32,
}

impl FlexItemStyle {
    pub fn from_style(style: &ComputedStyle) -> Self {
        Self {
            width: size(style, Dimension::Width),
            height: size(style, Dimension::Height),
            grow: flex_grow(style),
            align_self: style.get("align-self").and_then(AlignItems::parse),
            order: order(style),
        }
    }

    pub fn size(&self, dimension: Dimension) -> Option<i32> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}
