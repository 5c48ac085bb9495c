//! Box style: the subset of CSS the host page needs.

/// Main axis for laying out children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    /// Children stack top to bottom.
    #[default]
    Column,
    /// Children sit side by side.
    Row,
}

/// Sizing and positioning for one element, in pixels.
///
/// An element with `absolute` set is taken out of flow and placed at `top`
/// inside its parent, the way a slider handle is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub direction: FlowDirection,
    pub gap: f32,
    pub padding: f32,
    pub absolute: bool,
    pub top: Option<f32>,
}

impl BoxStyle {
    /// A fixed-size box in normal flow.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A flow container laying children along `direction`.
    pub fn flow(direction: FlowDirection, gap: f32, padding: f32) -> Self {
        Self {
            direction,
            gap,
            padding,
            ..Self::default()
        }
    }

    /// Take the box out of flow and pin it at `top` inside its parent (builder).
    pub fn absolute_at(mut self, top: f32) -> Self {
        self.absolute = true;
        self.top = Some(top);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_column_flow_without_size() {
        let s = BoxStyle::default();
        assert_eq!(s.direction, FlowDirection::Column);
        assert!(s.width.is_none() && s.height.is_none());
        assert!(!s.absolute);
    }

    #[test]
    fn sized_and_absolute() {
        let s = BoxStyle::sized(40.0, 20.0).absolute_at(0.0);
        assert_eq!(s.width, Some(40.0));
        assert_eq!(s.height, Some(20.0));
        assert!(s.absolute);
        assert_eq!(s.top, Some(0.0));
    }
}
