use std::fmt;

/// Coerce a size value to whole pixels.
///
/// Values ending in `px`, and values made only of digits and dots, are read
/// up to their first non-digit after an optional sign: `"12.7px"` is 12,
/// `"40"` is 40. Anything else (`"auto"`, `"50%"`, `"px"`) is `None`.
pub fn coerce_px(value: &str) -> Option<i32> {
    let v = value.trim();
    let numeric = v.ends_with("px")
        || (!v.is_empty() && v.chars().all(|c| c.is_ascii_digit() || c == '.'));
    if !numeric {
        return None;
    }
    leading_integer(v)
}

/// Leading signed integer of `value`, ignoring any tail.
pub fn leading_integer(value: &str) -> Option<i32> {
    let v = value.trim_start();
    let (negative, digits) = match v.as_bytes().first() {
        Some(b'-') => (true, &v[1..]),
        Some(b'+') => (false, &v[1..]),
        _ => (false, v),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    let signed = if negative { -magnitude } else { magnitude };
    Some(signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Leading number of `value`, e.g. the grow factor in `flex: 2 1 auto`.
pub fn leading_number(value: &str) -> Option<f64> {
    let first = value.split_whitespace().next()?;
    let number = first.strip_suffix("px").unwrap_or(first);
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident default $default:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parse a keyword, ASCII case-insensitively.
            pub fn parse(value: &str) -> Option<Self> {
                let v = value.trim().to_ascii_lowercase();
                match v.as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Parse a possibly absent value, falling back to the initial value.
            pub fn from_value(value: Option<&str>) -> Self {
                value.and_then(Self::parse).unwrap_or_default()
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// CSS `display` value.
    pub enum Display default Inline {
        Block => "block",
        Inline => "inline",
        InlineBlock => "inline-block",
        ListItem => "list-item",
        Flex => "flex",
        InlineFlex => "inline-flex",
        None => "none",
    }
}

impl Display {
    /// Whether the element lays out its children as flex items.
    pub fn is_flex_container(self) -> bool {
        matches!(self, Display::Flex | Display::InlineFlex)
    }
}

keyword_enum! {
    pub enum FlexDirection default Row {
        Row => "row",
        RowReverse => "row-reverse",
        Column => "column",
        ColumnReverse => "column-reverse",
    }
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

keyword_enum! {
    pub enum FlexWrap default NoWrap {
        NoWrap => "nowrap",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",
    }
}

keyword_enum! {
    /// Main-axis distribution of items within a line.
    pub enum JustifyContent default FlexStart {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }
}

keyword_enum! {
    /// Cross-axis placement of an item within its line. `baseline` is
    /// accepted and placed like `flex-start`.
    pub enum AlignItems default Stretch {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        Stretch => "stretch",
        Baseline => "baseline",
    }
}

keyword_enum! {
    /// Cross-axis distribution of whole lines.
    pub enum AlignContent default Stretch {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        Stretch => "stretch",
    }
}
