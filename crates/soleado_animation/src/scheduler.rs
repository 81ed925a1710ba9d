//! Animation scheduler
//!
//! Owns every live tween of a page and advances them frame by frame, writing
//! interpolated inline styles into the shared [`Document`]. Components hold a
//! [`SchedulerHandle`] (a weak reference) so a page teardown that drops the
//! scheduler turns every outstanding handle call into a no-op.
//!
//! The scheduler runs on the UI thread. The host calls [`AnimationScheduler::tick`]
//! once per frame, or [`AnimationScheduler::advance`] with an explicit delta
//! when it wants deterministic time (tests, headless previews).
//!
//! [`Document`]: soleado_core::Document

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use soleado_core::{ElementId, SharedDocument, StyleProps};

use crate::tween::{CompletionCallback, Tween, TweenOptions, TweenPhase};
use crate::values::ResolvedTransition;

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    document: SharedDocument,
    /// Milliseconds advanced since creation
    clock_ms: f64,
    last_frame: Instant,
    next_order: u64,
}

impl SchedulerInner {
    fn insert(&mut self, mut tween: Tween) -> TweenId {
        tween.order = self.next_order;
        self.next_order += 1;

        if let Some(from) = tween.from {
            // fromTo renders its start state immediately, even while delayed
            self.document
                .borrow_mut()
                .apply_style(tween.element, &from);
        }

        let id = self.tweens.insert(tween);
        tracing::trace!("scheduler: added tween {:?}", id);
        id
    }

    /// Advance every tween by `dt_ms`, returning completions in creation order
    fn step(&mut self, dt_ms: f32) -> Vec<(u64, CompletionCallback)> {
        self.clock_ms += f64::from(dt_ms);

        let mut ids: Vec<(u64, TweenId)> = self.tweens.iter().map(|(id, t)| (t.order, id)).collect();
        ids.sort_unstable_by_key(|(order, _)| *order);

        let mut completions = Vec::new();
        let mut finished = Vec::new();
        let mut document = self.document.borrow_mut();

        for (_, id) in ids {
            let Some(tween) = self.tweens.get_mut(id) else {
                continue;
            };

            if !document.contains(tween.element) {
                // Element left the tree: drop silently
                finished.push(id);
                continue;
            }

            tween.elapsed_ms += dt_ms;
            if tween.elapsed_ms < tween.options.delay_ms {
                continue;
            }

            if tween.transition.is_none() {
                let current = document.inline_style(tween.element).unwrap_or_default();
                let content_height = document.content_height(tween.element).unwrap_or(0.0);
                tween.transition = Some(ResolvedTransition::resolve(
                    &current,
                    tween.from.as_ref(),
                    &tween.to,
                    content_height,
                ));
                tween.phase = TweenPhase::Running;
            }

            let progress = tween.progress();
            let Some(transition) = tween.transition.as_ref() else {
                continue;
            };

            if progress >= 1.0 {
                document.apply_style(tween.element, &transition.end());
                tween.phase = TweenPhase::Finished;
                finished.push(id);
                if let Some(callback) = tween.on_complete.take() {
                    completions.push((tween.order, callback));
                }
            } else {
                let eased = tween.options.resolved_ease().apply(progress);
                document.apply_style(tween.element, &transition.sample(eased));
            }
        }
        drop(document);

        for id in finished {
            self.tweens.remove(id);
        }

        completions
    }
}

/// The animation scheduler that advances all active tweens
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                document,
                clock_ms: 0.0,
                last_frame: Instant::now(),
                next_order: 0,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn document(&self) -> SharedDocument {
        Rc::clone(&self.inner.borrow().document)
    }

    /// Milliseconds of animation time advanced so far
    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().clock_ms
    }

    /// Write `props` onto the element immediately
    pub fn set(&self, element: ElementId, props: &StyleProps) {
        let document = Rc::clone(&self.inner.borrow().document);
        document.borrow_mut().apply_style(element, props);
    }

    /// Register a tween
    pub fn add(&self, tween: Tween) -> TweenId {
        self.inner.borrow_mut().insert(tween)
    }

    pub fn to(&self, element: ElementId, to: StyleProps, options: TweenOptions) -> TweenId {
        self.add(Tween::to(element, to, options))
    }

    pub fn from_to(
        &self,
        element: ElementId,
        from: StyleProps,
        to: StyleProps,
        options: TweenOptions,
    ) -> TweenId {
        self.add(Tween::from_to(element, from, to, options))
    }

    /// Stop a tween where it is; its completion callback never fires
    pub fn kill(&self, id: TweenId) -> bool {
        self.inner.borrow_mut().tweens.remove(id).is_some()
    }

    /// Stop every tween targeting `element`
    pub fn kill_tweens_of(&self, element: ElementId) -> usize {
        let mut inner = self.inner.borrow_mut();
        let before = inner.tweens.len();
        inner.tweens.retain(|_, t| t.element != element);
        before - inner.tweens.len()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.inner.borrow().tweens.contains_key(id)
    }

    pub fn tween_count(&self) -> usize {
        self.inner.borrow().tweens.len()
    }

    pub fn has_active_animations(&self) -> bool {
        !self.inner.borrow().tweens.is_empty()
    }

    /// Advance all tweens by an explicit delta
    ///
    /// Completion callbacks run after the scheduler's state is released, in
    /// the order their tweens were created, so a callback may start new
    /// tweens. Those start counting on the next advance.
    ///
    /// Returns true if any tweens are still active.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let completions = self.inner.borrow_mut().step(dt_ms.max(0.0));
        if !completions.is_empty() {
            tracing::trace!("scheduler: {} tween(s) completed", completions.len());
        }
        for (_, callback) in completions {
            callback();
        }
        self.has_active_animations()
    }

    /// Advance by the wall-clock time since the previous tick
    pub fn tick(&self) -> bool {
        let dt_ms = {
            let mut inner = self.inner.borrow_mut();
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f32() * 1000.0;
            inner.last_frame = now;
            dt
        };
        self.advance(dt_ms)
    }

    /// Advance in fixed frames until idle or `max_ms` has elapsed
    ///
    /// Returns the time actually advanced.
    pub fn run_until_idle(&self, frame_ms: f32, max_ms: f32) -> f32 {
        let frame_ms = frame_ms.max(1.0);
        let mut elapsed = 0.0;
        while self.has_active_animations() && elapsed < max_ms {
            self.advance(frame_ms);
            elapsed += frame_ms;
        }
        elapsed
    }
}

/// Weak handle to the scheduler
///
/// Every operation silently no-ops once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    fn upgrade(&self) -> Option<AnimationScheduler> {
        self.inner.upgrade().map(|inner| AnimationScheduler { inner })
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn document(&self) -> Option<SharedDocument> {
        self.upgrade().map(|s| s.document())
    }

    pub fn now_ms(&self) -> f64 {
        self.upgrade().map(|s| s.now_ms()).unwrap_or(0.0)
    }

    pub fn set(&self, element: ElementId, props: &StyleProps) {
        if let Some(scheduler) = self.upgrade() {
            scheduler.set(element, props);
        }
    }

    pub fn add(&self, tween: Tween) -> Option<TweenId> {
        self.upgrade().map(|s| s.add(tween))
    }

    pub fn kill(&self, id: TweenId) -> bool {
        self.upgrade().is_some_and(|s| s.kill(id))
    }

    pub fn kill_tweens_of(&self, element: ElementId) -> usize {
        self.upgrade().map(|s| s.kill_tweens_of(element)).unwrap_or(0)
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.upgrade().is_some_and(|s| s.is_active(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use soleado_core::{Document, Length, NewElement, Rect};
    use std::cell::Cell;

    fn setup() -> (AnimationScheduler, SharedDocument, ElementId) {
        let mut doc = Document::new();
        let el = doc.append(
            doc.root(),
            NewElement::new()
                .bounds(Rect::new(0.0, 0.0, 100.0, 50.0))
                .content_height(120.0),
        );
        let doc = doc.shared();
        (AnimationScheduler::new(Rc::clone(&doc)), doc, el)
    }

    #[test]
    fn test_tween_writes_and_completes() {
        let (scheduler, doc, el) = setup();
        scheduler.set(el, &StyleProps::new().opacity(0.0));

        let id = scheduler.to(
            el,
            StyleProps::new().opacity(1.0),
            TweenOptions::new(100.0).ease(Easing::Linear),
        );
        assert!(scheduler.advance(50.0));
        let mid = doc.borrow().inline_style(el).unwrap();
        assert!((mid.opacity.unwrap() - 0.5).abs() < 1e-4);

        assert!(!scheduler.advance(50.0));
        assert!(!scheduler.is_active(id));
        assert_eq!(doc.borrow().inline_style(el).unwrap().opacity, Some(1.0));
    }

    #[test]
    fn test_from_to_renders_immediately() {
        let (scheduler, doc, el) = setup();
        scheduler.from_to(
            el,
            StyleProps::new().opacity(0.0).y(10.0),
            StyleProps::new().opacity(1.0).y(0.0),
            TweenOptions::new(600.0).delay(200.0),
        );
        let style = doc.borrow().inline_style(el).unwrap();
        assert_eq!(style.opacity, Some(0.0));
        assert_eq!(style.translate_y, Some(10.0));

        // Still delayed: nothing moves
        scheduler.advance(100.0);
        assert_eq!(doc.borrow().inline_style(el).unwrap().opacity, Some(0.0));
    }

    #[test]
    fn test_kill_skips_completion() {
        let (scheduler, _doc, el) = setup();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        scheduler.add(
            Tween::to(el, StyleProps::new().opacity(0.0), TweenOptions::new(100.0))
                .on_complete(move || flag.set(true)),
        );
        scheduler.advance(40.0);
        assert_eq!(scheduler.kill_tweens_of(el), 1);
        scheduler.advance(100.0);
        assert!(!fired.get());
    }

    #[test]
    fn test_completion_can_chain() {
        let (scheduler, doc, el) = setup();
        let handle = scheduler.handle();
        scheduler.add(
            Tween::to(el, StyleProps::new().height(0.0), TweenOptions::new(100.0)).on_complete(
                move || {
                    handle.add(Tween::to(
                        el,
                        StyleProps::new().height_auto(),
                        TweenOptions::new(100.0),
                    ));
                },
            ),
        );
        scheduler.advance(100.0);
        assert_eq!(scheduler.tween_count(), 1);
        assert_eq!(
            doc.borrow().inline_style(el).unwrap().height,
            Some(Length::Px(0.0))
        );
        scheduler.run_until_idle(16.0, 1000.0);
        assert_eq!(
            doc.borrow().inline_style(el).unwrap().height,
            Some(Length::Auto)
        );
    }

    #[test]
    fn test_zero_duration_completes_on_next_advance() {
        let (scheduler, doc, el) = setup();
        scheduler.to(el, StyleProps::new().scale(0.5), TweenOptions::instant());
        assert!(!scheduler.advance(0.0));
        assert_eq!(doc.borrow().inline_style(el).unwrap().scale, Some(0.5));
    }

    #[test]
    fn test_removed_element_drops_tween() {
        let (scheduler, doc, el) = setup();
        scheduler.to(el, StyleProps::new().opacity(0.0), TweenOptions::new(100.0));
        doc.borrow_mut().remove(el);
        assert!(!scheduler.advance(16.0));
    }

    #[test]
    fn test_handle_weak_reference() {
        let (handle, el) = {
            let (scheduler, _doc, el) = setup();
            (scheduler.handle(), el)
        };

        assert!(!handle.is_alive());
        assert!(handle
            .add(Tween::to(el, StyleProps::new(), TweenOptions::instant()))
            .is_none());
        assert_eq!(handle.kill_tweens_of(el), 0);
    }
}
