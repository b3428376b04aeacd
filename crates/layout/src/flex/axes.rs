use core_types::{Dimension, Edge};
use css::{FlexDirection, FlexWrap};

/// Binding of the abstract main/cross axes to concrete box fields.
///
/// A sign of `-1` means positions grow toward the start edge: the start edge
/// is the far coordinate and `end = start - size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Axes {
    pub main_size: Dimension,
    pub main_start: Edge,
    pub main_end: Edge,
    pub main_sign: f64,
    pub cross_size: Dimension,
    pub cross_start: Edge,
    pub cross_end: Edge,
    pub cross_sign: f64,
}

impl Axes {
    pub fn new(direction: FlexDirection, wrap: FlexWrap) -> Self {
        let (main_size, main_start, main_end, main_sign, cross_size, cross_start, cross_end) =
            match direction {
                FlexDirection::Row => (
                    Dimension::Width,
                    Edge::Left,
                    Edge::Right,
                    1.0,
                    Dimension::Height,
                    Edge::Top,
                    Edge::Bottom,
                ),
                FlexDirection::RowReverse => (
                    Dimension::Width,
                    Edge::Right,
                    Edge::Left,
                    -1.0,
                    Dimension::Height,
                    Edge::Top,
                    Edge::Bottom,
                ),
                FlexDirection::Column => (
                    Dimension::Height,
                    Edge::Top,
                    Edge::Bottom,
                    1.0,
                    Dimension::Width,
                    Edge::Left,
                    Edge::Right,
                ),
                FlexDirection::ColumnReverse => (
                    Dimension::Height,
                    Edge::Bottom,
                    Edge::Top,
                    -1.0,
                    Dimension::Width,
                    Edge::Left,
                    Edge::Right,
                ),
            };

        // The cross sign is set on every path, not only for wrap-reverse.
        let (cross_start, cross_end, cross_sign) = match wrap {
            FlexWrap::WrapReverse => (cross_end, cross_start, -1.0),
            FlexWrap::NoWrap | FlexWrap::Wrap => (cross_start, cross_end, 1.0),
        };

        Self {
            main_size,
            main_start,
            main_end,
            main_sign,
            cross_size,
            cross_start,
            cross_end,
            cross_sign,
        }
    }

    pub fn is_main_reversed(&self) -> bool {
        self.main_sign < 0.0
    }

    pub fn is_cross_reversed(&self) -> bool {
        self.cross_sign < 0.0
    }
}
