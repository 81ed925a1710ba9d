//! Scroll-linked parallax
//!
//! Maps the trigger element's passage through the viewport onto a vertical
//! offset of a target element. Progress runs from 0 when the trigger's top
//! meets the viewport bottom to 1 when its bottom meets the viewport top.
//! Outside that window the offset holds at the nearer bound.

use soleado_core::{ElementId, Rect, Result, StyleProps};

use crate::scope::Scope;
use crate::viewport::{scroll_progress, Edge, ObserverId, TriggerLine, Viewport};

/// Offset range and trigger window of a parallax binding
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxOptions {
    /// Offset in pixels at progress 0
    pub from: f32,
    /// Offset in pixels at progress 1
    pub to: f32,
    pub start: TriggerLine,
    pub end: TriggerLine,
}

impl ParallaxOptions {
    pub fn new(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            start: TriggerLine::new(Edge::Top, 1.0),
            end: TriggerLine::new(Edge::Bottom, 0.0),
        }
    }

    /// Offset for the trigger at `rect` with the given viewport
    pub fn offset(&self, rect: &Rect, viewport: &Viewport) -> f32 {
        let progress = scroll_progress(rect, viewport, self.start, self.end);
        self.from + (self.to - self.from) * progress
    }
}

/// Pure offset for a trigger rect in a viewport
pub fn parallax_offset(rect: &Rect, viewport: &Viewport, from: f32, to: f32) -> f32 {
    ParallaxOptions::new(from, to).offset(rect, viewport)
}

/// Drive `target`'s vertical offset from `trigger`'s scroll position
///
/// Reduced motion: no binding and no style written. Returns `None` then.
pub fn bind(scope: &Scope, trigger: ElementId, target: ElementId, options: ParallaxOptions) -> Result<Option<ObserverId>> {
    if scope.reduced_motion() {
        return Ok(None);
    }

    let weak = scope.downgrade();
    let ParallaxOptions { from, to, .. } = options;
    let id = scope.observe_progress(trigger, options.start, options.end, move |progress| {
        let Some(scope) = weak.upgrade() else {
            return;
        };
        let offset = from + (to - from) * progress;
        if let Err(err) = scope.set(&[target], &StyleProps::new().y(offset)) {
            tracing::debug!("parallax: skipped write: {}", err);
        }
    })?;
    Ok(Some(id))
}
