//! BoxStyle -> taffy Style conversion.

use taffy::style::{Dimension, Display, FlexDirection, LengthPercentage, LengthPercentageAuto, Position};

use super::style::{BoxStyle, FlowDirection};

/// Convert an optional pixel size to a taffy [`Dimension`]; `None` is auto.
fn resolve_dimension(px: Option<f32>) -> Dimension {
    match px {
        Some(v) => Dimension::length(v),
        None => Dimension::auto(),
    }
}

/// Convert a [`BoxStyle`] into a [`taffy::Style`].
///
/// Mapping summary:
/// - every element is a flex container; `direction` picks the flex axis
/// - `width/height` -> `size`, fixed boxes do not shrink
/// - `gap` -> gap on both axes, `padding` -> padding on all sides
/// - `absolute` -> `position: absolute` with the `top` inset (auto when unset)
pub fn resolve_style(style: &BoxStyle) -> taffy::Style {
    let mut out = taffy::Style::default();

    out.display = Display::Flex;
    out.flex_direction = match style.direction {
        FlowDirection::Column => FlexDirection::Column,
        FlowDirection::Row => FlexDirection::Row,
    };

    out.size.width = resolve_dimension(style.width);
    out.size.height = resolve_dimension(style.height);
    if style.width.is_some() || style.height.is_some() {
        out.flex_shrink = 0.0;
    }

    out.gap.width = LengthPercentage::length(style.gap);
    out.gap.height = LengthPercentage::length(style.gap);

    let pad = LengthPercentage::length(style.padding);
    out.padding = taffy::geometry::Rect {
        top: pad,
        right: pad,
        bottom: pad,
        left: pad,
    };

    if style.absolute {
        out.position = Position::Absolute;
        out.inset.top = match style.top {
            Some(top) => LengthPercentageAuto::length(top),
            None => LengthPercentageAuto::auto(),
        };
        out.inset.left = LengthPercentageAuto::length(0.0);
    }

    out
}
