//! Inline style properties
//!
//! [`StyleProps`] is a partial set of the properties the motion engine is
//! allowed to touch. The same type describes an element's inline style (what
//! has been written on top of its natural style) and the from/to states of a
//! tween. A property that is `None` is not set: for an inline style that means
//! the element shows its natural value.

/// A length that may be left to layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Fixed pixel length
    Px(f32),
    /// Resolved by layout (the element's content height)
    Auto,
}

impl Length {
    /// Resolve to pixels given the layout's automatic value
    pub fn resolve(self, auto: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Auto => auto,
        }
    }
}

/// Animatable style property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    Height,
}

/// Partial set of animatable style properties
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleProps {
    pub opacity: Option<f32>,
    pub translate_x: Option<f32>,
    pub translate_y: Option<f32>,
    pub scale: Option<f32>,
    pub height: Option<Length>,
}

impl StyleProps {
    /// Empty property set
    pub const fn new() -> Self {
        Self {
            opacity: None,
            translate_x: None,
            translate_y: None,
            scale: None,
            height: None,
        }
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Horizontal offset in pixels
    pub fn x(mut self, value: f32) -> Self {
        self.translate_x = Some(value);
        self
    }

    /// Vertical offset in pixels
    pub fn y(mut self, value: f32) -> Self {
        self.translate_y = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn height(mut self, value: f32) -> Self {
        self.height = Some(Length::Px(value));
        self
    }

    pub fn height_auto(mut self) -> Self {
        self.height = Some(Length::Auto);
        self
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.translate_x.is_none()
            && self.translate_y.is_none()
            && self.scale.is_none()
            && self.height.is_none()
    }

    /// Overlay `other` on top of `self`: properties set in `other` win
    pub fn merge(&mut self, other: &StyleProps) {
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        if other.translate_x.is_some() {
            self.translate_x = other.translate_x;
        }
        if other.translate_y.is_some() {
            self.translate_y = other.translate_y;
        }
        if other.scale.is_some() {
            self.scale = other.scale;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
    }

    /// Properties set in this partial style
    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        [
            (self.opacity.is_some(), StyleProperty::Opacity),
            (self.translate_x.is_some(), StyleProperty::TranslateX),
            (self.translate_y.is_some(), StyleProperty::TranslateY),
            (self.scale.is_some(), StyleProperty::Scale),
            (self.height.is_some(), StyleProperty::Height),
        ]
        .into_iter()
        .filter_map(|(set, prop)| set.then_some(prop))
    }

    /// Computed opacity (natural value is fully opaque)
    pub fn computed_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn computed_x(&self) -> f32 {
        self.translate_x.unwrap_or(0.0)
    }

    pub fn computed_y(&self) -> f32 {
        self.translate_y.unwrap_or(0.0)
    }

    pub fn computed_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Computed height in pixels given the element's content height
    pub fn computed_height(&self, content_height: f32) -> f32 {
        self.height.unwrap_or(Length::Auto).resolve(content_height)
    }

    /// Whether the computed values of `self` equal those of `other`
    ///
    /// Compares what an observer would see, so an unset property equals the
    /// same property explicitly set to its natural value.
    pub fn visually_eq(&self, other: &StyleProps, content_height: f32) -> bool {
        const EPS: f32 = 1e-4;
        (self.computed_opacity() - other.computed_opacity()).abs() < EPS
            && (self.computed_x() - other.computed_x()).abs() < EPS
            && (self.computed_y() - other.computed_y()).abs() < EPS
            && (self.computed_scale() - other.computed_scale()).abs() < EPS
            && (self.computed_height(content_height) - other.computed_height(content_height))
                .abs()
                < EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_merge() {
        let mut base = StyleProps::new().opacity(0.0).y(16.0);
        base.merge(&StyleProps::new().y(0.0).scale(0.96));

        assert_eq!(base.opacity, Some(0.0));
        assert_eq!(base.translate_y, Some(0.0));
        assert_eq!(base.scale, Some(0.96));
        assert_eq!(base.properties().count(), 3);
    }

    #[test]
    fn test_computed_defaults() {
        let empty = StyleProps::new();
        assert!(empty.is_empty());
        assert_eq!(empty.computed_opacity(), 1.0);
        assert_eq!(empty.computed_scale(), 1.0);
        assert_eq!(empty.computed_height(120.0), 120.0);
        assert_eq!(StyleProps::new().height(0.0).computed_height(120.0), 0.0);
    }

    #[test]
    fn test_visual_equality_ignores_explicit_naturals() {
        let explicit = StyleProps::new().opacity(1.0).y(0.0).height_auto();
        assert!(explicit.visually_eq(&StyleProps::new(), 80.0));
        assert!(!StyleProps::new().opacity(0.5).visually_eq(&StyleProps::new(), 80.0));
    }
}
