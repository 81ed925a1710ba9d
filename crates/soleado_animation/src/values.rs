//! Animatable value types
//!
//! Linear interpolation for scalars and the resolution of partial styles into
//! per-property tracks a tween can sample.

use smallvec::SmallVec;
use soleado_core::{Length, StyleProperty, StyleProps};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// One property animating between two pixel/unit values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleTrack {
    pub property: StyleProperty,
    pub from: f32,
    pub to: f32,
}

/// A from/to pair resolved against an element's current style
///
/// `end` is what gets written when the transition completes. It keeps
/// `Length::Auto` so an element animated to `height: auto` follows later
/// layout changes instead of freezing at the measured height.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTransition {
    tracks: SmallVec<[StyleTrack; 4]>,
    end: StyleProps,
}

fn current_value(style: &StyleProps, property: StyleProperty, content_height: f32) -> f32 {
    match property {
        StyleProperty::Opacity => style.computed_opacity(),
        StyleProperty::TranslateX => style.computed_x(),
        StyleProperty::TranslateY => style.computed_y(),
        StyleProperty::Scale => style.computed_scale(),
        StyleProperty::Height => style.computed_height(content_height),
    }
}

fn write_value(style: &mut StyleProps, property: StyleProperty, value: f32) {
    match property {
        StyleProperty::Opacity => style.opacity = Some(value),
        StyleProperty::TranslateX => style.translate_x = Some(value),
        StyleProperty::TranslateY => style.translate_y = Some(value),
        StyleProperty::Scale => style.scale = Some(value),
        StyleProperty::Height => style.height = Some(Length::Px(value)),
    }
}

impl ResolvedTransition {
    /// Resolve `to` against `current`, with `from` overriding start values
    pub fn resolve(
        current: &StyleProps,
        from: Option<&StyleProps>,
        to: &StyleProps,
        content_height: f32,
    ) -> Self {
        let mut start = *current;
        if let Some(from) = from {
            start.merge(from);
        }

        let tracks = to
            .properties()
            .map(|property| StyleTrack {
                property,
                from: current_value(&start, property, content_height),
                to: current_value(to, property, content_height),
            })
            .collect();

        Self { tracks, end: *to }
    }

    pub fn tracks(&self) -> &[StyleTrack] {
        &self.tracks
    }

    /// Style at eased progress `t`
    pub fn sample(&self, t: f32) -> StyleProps {
        let mut out = StyleProps::new();
        for track in &self.tracks {
            write_value(&mut out, track.property, track.from.lerp(&track.to, t));
        }
        out
    }

    /// Style written at the start of the transition
    pub fn start(&self) -> StyleProps {
        self.sample(0.0)
    }

    /// Style written on completion
    pub fn end(&self) -> StyleProps {
        self.end
    }
}
