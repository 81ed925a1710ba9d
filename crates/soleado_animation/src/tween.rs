//! Tweens
//!
//! A tween moves one element's inline style from a start state to a target
//! state over a fixed duration. Tweens are plain descriptions until they are
//! handed to the [`AnimationScheduler`](crate::AnimationScheduler).
//!
//! ```ignore
//! let id = scheduler.add(
//!     Tween::to(card, StyleProps::new().opacity(1.0).y(0.0), TweenOptions::new(750.0))
//!         .on_complete(|| tracing::debug!("card revealed")),
//! );
//! ```

use std::fmt;

use soleado_core::{ElementId, StyleProps};

use crate::easing::{EaseDirection, Easing};
use crate::values::ResolvedTransition;

/// Ease applied when none is given
pub const DEFAULT_EASE: Easing = Easing::Power(1, EaseDirection::Out);

/// Callback fired once when a tween reaches its end state
///
/// Killed tweens never fire their callback.
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Timing options shared by tweens, batches and timeline steps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenOptions {
    /// Duration in milliseconds
    pub duration_ms: f32,
    /// Delay before the tween starts, in milliseconds
    pub delay_ms: f32,
    /// Ease curve (falls back to [`DEFAULT_EASE`] or a timeline default)
    pub easing: Option<Easing>,
    /// Extra delay per element when applied to a list
    pub stagger_ms: f32,
}

impl TweenOptions {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            easing: None,
            stagger_ms: 0.0,
        }
    }

    /// Zero duration: jump straight to the end state
    pub fn instant() -> Self {
        Self::new(0.0)
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms.max(0.0);
        self
    }

    /// Delay of the element at `index` when applied to a list
    pub fn delay_for_index(&self, index: usize) -> f32 {
        self.delay_ms + self.stagger_ms * index as f32
    }

    /// Time from the first element starting to the last one finishing
    pub fn total_duration(&self, count: usize) -> f32 {
        self.duration_ms + self.stagger_ms * count.saturating_sub(1) as f32
    }

    pub fn resolved_ease(&self) -> Easing {
        self.easing.unwrap_or(DEFAULT_EASE)
    }
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self::new(500.0)
    }
}

/// Lifecycle of a registered tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenPhase {
    /// Waiting for its delay to elapse
    Delayed,
    /// Writing interpolated styles each frame
    Running,
    /// End state written; removed from the scheduler on the same frame
    Finished,
}

/// A single element tween
pub struct Tween {
    pub(crate) element: ElementId,
    pub(crate) from: Option<StyleProps>,
    pub(crate) to: StyleProps,
    pub(crate) options: TweenOptions,
    pub(crate) on_complete: Option<CompletionCallback>,
    pub(crate) elapsed_ms: f32,
    pub(crate) transition: Option<ResolvedTransition>,
    pub(crate) phase: TweenPhase,
    pub(crate) order: u64,
}

impl Tween {
    /// Animate from the element's current style to `to`
    pub fn to(element: ElementId, to: StyleProps, options: TweenOptions) -> Self {
        Self {
            element,
            from: None,
            to,
            options,
            on_complete: None,
            elapsed_ms: 0.0,
            transition: None,
            phase: TweenPhase::Delayed,
            order: 0,
        }
    }

    /// Animate from `from` to `to`; `from` is written as soon as the tween is added
    pub fn from_to(
        element: ElementId,
        from: StyleProps,
        to: StyleProps,
        options: TweenOptions,
    ) -> Self {
        Self {
            from: Some(from),
            ..Self::to(element, to, options)
        }
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn target(&self) -> &StyleProps {
        &self.to
    }

    pub fn options(&self) -> &TweenOptions {
        &self.options
    }

    pub fn phase(&self) -> TweenPhase {
        self.phase
    }

    /// Linear progress through the active part of the tween
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.options.delay_ms;
        if active < 0.0 {
            return 0.0;
        }
        if self.options.duration_ms <= 0.0 {
            return 1.0;
        }
        (active / self.options.duration_ms).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("element", &self.element)
            .field("to", &self.to)
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("elapsed_ms", &self.elapsed_ms)
            .finish_non_exhaustive()
    }
}
