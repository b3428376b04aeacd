//! Single-pass flex layout of one container's direct element children.
//!
//! Arithmetic runs in `f64`; geometry is rounded to whole pixels only when it
//! is written back into the element styles. Coordinates are relative to the
//! container's own origin.

mod axes;

use core_types::LayoutBox;
use css::{
    AlignContent, AlignItems, FlexContainerStyle, FlexItemStyle, FlexWrap, JustifyContent,
    computed,
};
use html::{Document, Id};

pub(crate) use axes::Axes;

/// Working state for one child.
#[derive(Clone, Debug)]
struct FlexItem {
    id: Id,
    style: FlexItemStyle,
    main: f64,
    cross: Option<f64>,
    main_pos: f64,
    cross_pos: f64,
}

impl FlexItem {
    fn is_flexible(&self) -> bool {
        self.style.grow.is_some()
    }
}

#[derive(Clone, Debug, Default)]
struct FlexLine {
    /// Indices into the ordered item list.
    items: Vec<usize>,
    main_space: f64,
    cross_space: f64,
}

/// Outcome of laying out one container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlexSummary {
    pub items: usize,
    pub lines: usize,
    pub shrunk: bool,
}

/// Lay out the element children of `container`.
///
/// Returns `None` if `container` is not an element. Otherwise the container
/// always receives its resolved main and cross sizes, even with no items.
pub fn layout_container(document: &mut Document, container: Id) -> Option<FlexSummary> {
    let container_style = document.element(container)?.style.clone();
    let flex = FlexContainerStyle::from_style(&container_style);
    let axes = Axes::new(flex.direction, flex.wrap);

    let mut items: Vec<FlexItem> = document
        .element_children(container)
        .filter_map(|id| {
            let element = document.element(id)?;
            let style = FlexItemStyle::from_style(&element.style);
            Some(FlexItem {
                id,
                main: 0.0,
                cross: style.size(axes.cross_size).map(f64::from),
                style,
                main_pos: 0.0,
                cross_pos: 0.0,
            })
        })
        .collect();
    // Stable, so equal `order` keeps document order.
    items.sort_by_key(|item| item.style.order);
    for item in &mut items {
        item.main = item.style.size(axes.main_size).map(f64::from).unwrap_or(0.0);
    }

    let declared_main = computed::size(&container_style, axes.main_size).map(f64::from);
    let declared_cross = computed::size(&container_style, axes.cross_size).map(f64::from);
    let auto_main = declared_main.is_none();
    let container_main =
        declared_main.unwrap_or_else(|| items.iter().map(|item| item.main).sum());

    let mut lines = collect_lines(&mut items, flex.wrap, auto_main, container_main, declared_cross);

    let main_base = if axes.is_main_reversed() {
        container_main
    } else {
        0.0
    };
    let remaining = lines.last().map_or(0.0, |line| line.main_space);
    let shrunk = remaining < 0.0;
    if shrunk {
        shrink_items(&mut items, &axes, container_main, remaining, main_base);
    } else {
        for line in &lines {
            distribute_line(&mut items, line, &axes, flex.justify_content, main_base);
        }
    }

    let container_cross = place_cross(&mut items, &mut lines, &axes, &flex, declared_cross);

    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(
        target: "layout.flex",
        "container {:?}: {} item(s) on {} line(s), main={container_main} cross={container_cross}{}",
        container,
        items.len(),
        lines.len(),
        if shrunk { " (shrunk)" } else { "" }
    );

    if let Some(element) = document.element_mut(container) {
        element.style.layout.set_size(axes.main_size, to_px(container_main));
        element.style.layout.set_size(axes.cross_size, to_px(container_cross));
    }
    for item in &items {
        let Some(element) = document.element_mut(item.id) else {
            continue;
        };
        write_geometry(&mut element.style.layout, item, &axes);
    }

    Some(FlexSummary {
        items: items.len(),
        lines: lines.len(),
        shrunk,
    })
}

fn collect_lines(
    items: &mut [FlexItem],
    wrap: FlexWrap,
    auto_main: bool,
    container_main: f64,
    declared_cross: Option<f64>,
) -> Vec<FlexLine> {
    let single_line = wrap == FlexWrap::NoWrap || auto_main;
    let mut lines = Vec::new();
    let mut line = FlexLine {
        main_space: container_main,
        ..FlexLine::default()
    };

    for (index, item) in items.iter_mut().enumerate() {
        if item.is_flexible() {
            // Flexible items claim space later from whatever the line has left.
            if let Some(cross) = item.cross {
                line.cross_space = line.cross_space.max(cross);
            }
            line.items.push(index);
            continue;
        }

        if !single_line {
            item.main = item.main.min(container_main);
            if line.main_space < item.main && !line.items.is_empty() {
                let next = FlexLine {
                    main_space: container_main,
                    ..FlexLine::default()
                };
                lines.push(std::mem::replace(&mut line, next));
            }
        }

        if let Some(cross) = item.cross {
            line.cross_space = line.cross_space.max(cross);
        }
        line.main_space -= item.main;
        line.items.push(index);
    }

    if single_line && let Some(cross) = declared_cross {
        line.cross_space = cross;
    }
    lines.push(line);
    lines
}

/// Overflowing single line: flexible items collapse to zero and every item
/// scales by `container / natural`.
fn shrink_items(
    items: &mut [FlexItem],
    axes: &Axes,
    container_main: f64,
    remaining: f64,
    main_base: f64,
) {
    let natural = container_main - remaining;
    let scale = if natural > 0.0 {
        container_main / natural
    } else {
        1.0
    };
    let mut current = main_base;
    for item in items.iter_mut() {
        if item.is_flexible() {
            item.main = 0.0;
        }
        item.main *= scale;
        item.main_pos = current;
        current += axes.main_sign * item.main;
    }
}

fn distribute_line(
    items: &mut [FlexItem],
    line: &FlexLine,
    axes: &Axes,
    justify: JustifyContent,
    main_base: f64,
) {
    let space = line.main_space;
    let flex_total: f64 = line
        .items
        .iter()
        .filter_map(|&index| items[index].style.grow)
        .sum();

    let (mut current, step) = if flex_total > 0.0 {
        for &index in &line.items {
            if let Some(grow) = items[index].style.grow {
                items[index].main = space / flex_total * grow;
            }
        }
        (main_base, 0.0)
    } else {
        let count = line.items.len() as f64;
        let sign = axes.main_sign;
        match justify {
            JustifyContent::FlexStart => (main_base, 0.0),
            JustifyContent::FlexEnd => (main_base + sign * space, 0.0),
            JustifyContent::Center => (main_base + sign * space / 2.0, 0.0),
            JustifyContent::SpaceBetween => {
                let step = if count > 1.0 {
                    sign * space / (count - 1.0)
                } else {
                    0.0
                };
                (main_base, step)
            }
            JustifyContent::SpaceAround => {
                let step = if count > 0.0 { sign * space / count } else { 0.0 };
                (main_base + step / 2.0, step)
            }
        }
    };

    for &index in &line.items {
        let item = &mut items[index];
        item.main_pos = current;
        current += axes.main_sign * item.main + step;
    }
}

/// Position every line and item on the cross axis. Returns the container's
/// resolved cross size.
fn place_cross(
    items: &mut [FlexItem],
    lines: &mut [FlexLine],
    axes: &Axes,
    flex: &FlexContainerStyle,
    declared_cross: Option<f64>,
) -> f64 {
    let used: f64 = lines.iter().map(|line| line.cross_space).sum();
    let (container_cross, free) = match declared_cross {
        Some(cross) => (cross, cross - used),
        None => (used, 0.0),
    };

    let sign = axes.cross_sign;
    let line_count = lines.len() as f64;
    let mut base = if axes.is_cross_reversed() {
        container_cross
    } else {
        0.0
    };
    let mut step = 0.0;
    match flex.align_content {
        AlignContent::FlexStart | AlignContent::Stretch => {}
        AlignContent::FlexEnd => base += sign * free,
        AlignContent::Center => base += sign * free / 2.0,
        AlignContent::SpaceBetween => {
            if line_count > 1.0 {
                step = free / (line_count - 1.0);
            }
        }
        AlignContent::SpaceAround => {
            if line_count > 0.0 {
                step = free / line_count;
            }
            base += sign * step / 2.0;
        }
    }

    for line in lines.iter_mut() {
        if flex.align_content == AlignContent::Stretch && line_count > 0.0 {
            line.cross_space += free / line_count;
        }
        let line_cross = line.cross_space;

        for &index in &line.items {
            let item = &mut items[index];
            let align = match item.style.align_self.unwrap_or(flex.align_items) {
                AlignItems::Baseline => AlignItems::FlexStart,
                align => align,
            };
            let size = match (item.cross, align) {
                (Some(size), _) => size,
                (None, AlignItems::Stretch) => line_cross,
                (None, _) => 0.0,
            };
            item.cross = Some(size);
            item.cross_pos = match align {
                AlignItems::FlexEnd => base + sign * line_cross - sign * size,
                AlignItems::Center => base + sign * (line_cross - size) / 2.0,
                AlignItems::FlexStart | AlignItems::Stretch | AlignItems::Baseline => base,
            };
        }

        base += sign * (line_cross + step);
    }

    container_cross
}

fn write_geometry(layout: &mut LayoutBox, item: &FlexItem, axes: &Axes) {
    let main_end = item.main_pos + axes.main_sign * item.main;
    layout.set_size(axes.main_size, to_px(item.main));
    layout.set_edge(axes.main_start, to_px(item.main_pos));
    layout.set_edge(axes.main_end, to_px(main_end));

    let cross = item.cross.unwrap_or(0.0);
    let cross_end = item.cross_pos + axes.cross_sign * cross;
    layout.set_size(axes.cross_size, to_px(cross));
    layout.set_edge(axes.cross_start, to_px(item.cross_pos));
    layout.set_edge(axes.cross_end, to_px(cross_end));
}

fn to_px(value: f64) -> i32 {
    // `as` saturates, and NaN becomes 0.
    value.round() as i32
}
