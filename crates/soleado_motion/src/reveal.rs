//! Scroll-triggered reveals
//!
//! Elements start hidden in their `from` style and tween to their `to` style
//! the first time they cross the trigger line. Elements that cross during the
//! same scroll update form one group and are staggered inside it, so a row
//! of cards scrolled into view together cascades while a card reached on its
//! own animates straight away.
//!
//! Under reduced motion nothing is observed: every element is written to its
//! target style immediately.

use soleado_animation::{Easing, TweenOptions};
use soleado_core::{ElementId, Result, StyleProps};

use crate::scope::Scope;
use crate::viewport::{ObserverId, TriggerLine};

/// How a batch of elements reveals
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    pub start: TriggerLine,
    pub from: StyleProps,
    pub to: StyleProps,
    /// Duration, ease, per-element stagger and delay after the crossing
    pub tween: TweenOptions,
}

impl RevealOptions {
    pub fn new(start: TriggerLine, from: StyleProps, to: StyleProps, tween: TweenOptions) -> Self {
        Self {
            start,
            from,
            to,
            tween,
        }
    }

    /// Fade in while rising `distance` pixels
    pub fn fade_up(distance: f32, duration_ms: f32) -> Self {
        Self::new(
            TriggerLine::top_at(0.88),
            StyleProps::new().opacity(0.0).y(distance),
            StyleProps::new().opacity(1.0).y(0.0),
            TweenOptions::new(duration_ms).ease(Easing::POWER3_OUT),
        )
    }

    /// Fade in while sliding back `distance` pixels from the right
    pub fn fade_in_x(distance: f32, duration_ms: f32) -> Self {
        Self::new(
            TriggerLine::top_at(0.88),
            StyleProps::new().opacity(0.0).x(distance),
            StyleProps::new().opacity(1.0).x(0.0),
            TweenOptions::new(duration_ms).ease(Easing::POWER3_OUT),
        )
    }

    pub fn start(mut self, start: TriggerLine) -> Self {
        self.start = start;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.tween = self.tween.stagger(stagger_ms);
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.tween = self.tween.delay(delay_ms);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.tween = self.tween.ease(easing);
        self
    }
}

/// Reveal `elements` as they scroll past `options.start`
///
/// Returns the observer, or `None` when there was nothing left to watch
/// (empty input, reduced motion, or every element already revealed).
pub fn batch(scope: &Scope, elements: &[ElementId], options: &RevealOptions) -> Result<Option<ObserverId>> {
    let RevealOptions { to, tween, .. } = *options;
    batch_with(scope, elements, options, move |scope, group| {
        scope.to(group, to, tween).map(drop)
    })
}

/// [`batch`] over every match of `selector` in the scope
pub fn batch_selector(scope: &Scope, selector: &str, options: &RevealOptions) -> Result<Option<ObserverId>> {
    let elements = scope.select(selector)?;
    batch(scope, &elements, options)
}

/// Like [`batch`], but `on_enter` decides what to animate for each group
///
/// `options.from` is still written up front and `options.to` is still what
/// reduced motion snaps to.
pub fn batch_with<F>(
    scope: &Scope,
    elements: &[ElementId],
    options: &RevealOptions,
    on_enter: F,
) -> Result<Option<ObserverId>>
where
    F: FnMut(&Scope, &[ElementId]) -> Result<()> + 'static,
{
    if elements.is_empty() {
        return Ok(None);
    }

    if scope.reduced_motion() {
        scope.set(elements, &options.to)?;
        return Ok(None);
    }

    scope.set(elements, &options.from)?;
    on_enter_batch(scope, elements, options.start, on_enter)
}

/// Call `on_enter` with each group of `elements` that crosses `start`
///
/// Writes no styles of its own. Each element is delivered once.
pub fn on_enter_batch<F>(
    scope: &Scope,
    elements: &[ElementId],
    start: TriggerLine,
    mut on_enter: F,
) -> Result<Option<ObserverId>>
where
    F: FnMut(&Scope, &[ElementId]) -> Result<()> + 'static,
{
    if elements.is_empty() {
        return Ok(None);
    }

    let weak = scope.downgrade();
    let id = scope.observe_crossing(elements, start, move |group| {
        let Some(scope) = weak.upgrade() else {
            return;
        };
        tracing::trace!("reveal: {} element(s) entered", group.len());
        if let Err(err) = on_enter(&scope, group) {
            tracing::warn!("reveal: failed to start group: {}", err);
        }
    })?;

    Ok(scope.viewport().is_observing(id).then_some(id))
}

/// Run `on_enter` once when `trigger` crosses `start`
///
/// Used for sections that animate several child groups from a single
/// trigger. Returns `None` if the trigger was already crossed.
pub fn once<F>(scope: &Scope, trigger: ElementId, start: TriggerLine, mut on_enter: F) -> Result<Option<ObserverId>>
where
    F: FnMut(&Scope) -> Result<()> + 'static,
{
    on_enter_batch(scope, &[trigger], start, move |scope, _| on_enter(scope))
}
