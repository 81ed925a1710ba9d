//! Animation scopes
//!
//! A scope ties every animation side effect created while a page section is
//! mounted to that section's lifetime. Tweens, viewport observers, inline
//! style snapshots and custom teardown hooks are registered as
//! [`Cancellable`]s in an arena owned by the scope. Releasing the scope
//! cancels all of them and restores every inline style the scope touched.
//!
//! ```ignore
//! let handle = stage.activate(section, |scope| {
//!     let cards = scope.select("[data-reveal='card']")?;
//!     reveal::batch(scope, &cards, &RevealOptions::fade_up(16.0, 750.0))?;
//!     Ok(())
//! })?;
//! // section unmounts
//! handle.release();
//! ```
//!
//! Callbacks created inside a scope hold a [`WeakScope`]; once the scope is
//! released they upgrade to a dead scope and return without touching the
//! document.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use soleado_animation::{SchedulerHandle, Timeline, Tween, TweenId, TweenOptions};
use soleado_core::{
    Document, ElementId, MotionError, MotionPreference, Result, SharedDocument, StyleProps,
};
use thiserror::Error;

use crate::viewport::{ObserverId, TriggerLine, ViewportHandle};

new_key_type! {
    /// Handle to an entry in a scope's cancellable arena
    pub struct CancellableId;
}

/// A side effect that can be undone when its scope is released
pub trait Cancellable {
    /// Undo the effect. Failures are logged by the scope and do not stop
    /// the remaining cancellables from running.
    fn cancel(&mut self) -> Result<()>;

    /// Whether the effect already finished on its own and can be dropped
    /// from the arena without cancelling
    fn is_settled(&self) -> bool {
        false
    }

    fn describe(&self) -> &'static str;
}

/// Kills a tween that is still running
struct TweenCancel {
    scheduler: SchedulerHandle,
    id: TweenId,
}

impl Cancellable for TweenCancel {
    fn cancel(&mut self) -> Result<()> {
        self.scheduler.kill(self.id);
        Ok(())
    }

    fn is_settled(&self) -> bool {
        !self.scheduler.is_active(self.id)
    }

    fn describe(&self) -> &'static str {
        "tween"
    }
}

/// Removes a viewport observer
struct ObserverCancel {
    viewport: ViewportHandle,
    id: ObserverId,
}

impl Cancellable for ObserverCancel {
    fn cancel(&mut self) -> Result<()> {
        self.viewport.unobserve(self.id);
        Ok(())
    }

    fn is_settled(&self) -> bool {
        !self.viewport.is_observing(self.id)
    }

    fn describe(&self) -> &'static str {
        "viewport observer"
    }
}

/// Restores the inline style an element had before the scope touched it
struct StyleSnapshot {
    document: Weak<RefCell<Document>>,
    element: ElementId,
    original: StyleProps,
}

impl Cancellable for StyleSnapshot {
    fn cancel(&mut self) -> Result<()> {
        let document = self
            .document
            .upgrade()
            .ok_or_else(|| MotionError::Cancel("document dropped before style restore".into()))?;
        let mut document = document.borrow_mut();
        if document.contains(self.element) {
            document.set_inline_style(self.element, self.original);
        }
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "style snapshot"
    }
}

/// Runs a closure once on release
pub struct OnRelease<F: FnOnce() -> Result<()>> {
    hook: Option<F>,
    name: &'static str,
}

impl<F: FnOnce() -> Result<()>> OnRelease<F> {
    pub fn new(name: &'static str, hook: F) -> Self {
        Self {
            hook: Some(hook),
            name,
        }
    }
}

impl<F: FnOnce() -> Result<()>> Cancellable for OnRelease<F> {
    fn cancel(&mut self) -> Result<()> {
        match self.hook.take() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }

    fn describe(&self) -> &'static str {
        self.name
    }
}

/// Services a scope drives, shared by every scope on a page
#[derive(Clone)]
pub(crate) struct Services {
    pub document: SharedDocument,
    pub scheduler: SchedulerHandle,
    pub viewport: ViewportHandle,
}

struct ScopeInner {
    root: ElementId,
    preference: MotionPreference,
    alive: bool,
    items: SlotMap<CancellableId, Box<dyn Cancellable>>,
    /// Elements whose original inline style has been snapshotted
    touched: FxHashSet<ElementId>,
}

/// Live view of an activated scope
///
/// Cheap to clone; every clone refers to the same arena.
#[derive(Clone)]
pub struct Scope {
    inner: Rc<RefCell<ScopeInner>>,
    services: Services,
}

impl Scope {
    pub(crate) fn new(root: ElementId, preference: MotionPreference, services: Services) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScopeInner {
                root,
                preference,
                alive: true,
                items: SlotMap::with_key(),
                touched: FxHashSet::default(),
            })),
            services,
        }
    }

    pub fn downgrade(&self) -> WeakScope {
        WeakScope {
            inner: Rc::downgrade(&self.inner),
            services: self.services.clone(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.inner.borrow().root
    }

    /// Motion preference captured when the scope was activated
    pub fn preference(&self) -> MotionPreference {
        self.inner.borrow().preference
    }

    pub fn reduced_motion(&self) -> bool {
        self.preference().is_reduced()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.borrow().alive
    }

    pub fn document(&self) -> SharedDocument {
        Rc::clone(&self.services.document)
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.services.scheduler
    }

    pub fn viewport(&self) -> &ViewportHandle {
        &self.services.viewport
    }

    /// Scheduler clock in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.services.scheduler.now_ms()
    }

    /// Number of cancellables still held
    pub fn pending(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// All matches of `selector` inside the scope root, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<ElementId>> {
        let root = self.root();
        self.services.document.borrow().select(root, selector)
    }

    pub fn select_one(&self, selector: &str) -> Result<Option<ElementId>> {
        let root = self.root();
        self.services.document.borrow().select_one(root, selector)
    }

    /// Take ownership of a cancellable
    ///
    /// On a released scope the cancellable is cancelled straight away and
    /// `None` is returned.
    pub fn register(&self, cancellable: Box<dyn Cancellable>) -> Option<CancellableId> {
        let mut cancellable = cancellable;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.alive {
                inner.items.retain(|_, item| !item.is_settled());
                return Some(inner.items.insert(cancellable));
            }
        }

        tracing::debug!(
            "scope: {} registered after release, cancelling",
            cancellable.describe()
        );
        if let Err(err) = cancellable.cancel() {
            tracing::warn!("scope: late {} failed to cancel: {}", cancellable.describe(), err);
        }
        None
    }

    /// Register a hook that runs when the scope is released
    pub fn on_release<F>(&self, name: &'static str, hook: F) -> Option<CancellableId>
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.register(Box::new(OnRelease::new(name, hook)))
    }

    /// Remember the element's inline style the first time the scope writes it
    fn snapshot(&self, element: ElementId) {
        let first_touch = {
            let mut inner = self.inner.borrow_mut();
            inner.alive && inner.touched.insert(element)
        };
        if !first_touch {
            return;
        }
        let Some(original) = self.services.document.borrow().inline_style(element) else {
            return;
        };
        self.register(Box::new(StyleSnapshot {
            document: Rc::downgrade(&self.services.document),
            element,
            original,
        }));
    }

    /// Write `props` onto each element immediately
    pub fn set(&self, elements: &[ElementId], props: &StyleProps) -> Result<()> {
        self.ensure_alive()?;
        for element in elements {
            self.snapshot(*element);
            self.services.scheduler.set(*element, props);
        }
        Ok(())
    }

    /// Hand a tween to the scheduler and track it
    ///
    /// The completion callback is dropped if the scope is released before
    /// the tween finishes.
    pub fn tween(&self, tween: Tween) -> Result<TweenId> {
        self.ensure_alive()?;
        self.snapshot(tween.element());
        let id = self
            .services
            .scheduler
            .add(tween)
            .ok_or(MotionError::ScopeReleased)?;
        self.register(Box::new(TweenCancel {
            scheduler: self.services.scheduler.clone(),
            id,
        }));
        Ok(id)
    }

    /// Tween each element to `to`, staggered by `options.stagger_ms`
    pub fn to(&self, elements: &[ElementId], to: StyleProps, options: TweenOptions) -> Result<Vec<TweenId>> {
        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let options = options.delay(options.delay_for_index(index));
                self.tween(Tween::to(*element, to, options))
            })
            .collect()
    }

    /// Tween each element from `from` to `to`, staggered by `options.stagger_ms`
    pub fn from_to(
        &self,
        elements: &[ElementId],
        from: StyleProps,
        to: StyleProps,
        options: TweenOptions,
    ) -> Result<Vec<TweenId>> {
        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let options = options.delay(options.delay_for_index(index));
                self.tween(Tween::from_to(*element, from, to, options))
            })
            .collect()
    }

    /// Play every step of a timeline inside this scope
    pub fn play(&self, timeline: &Timeline) -> Result<Vec<TweenId>> {
        timeline
            .tweens()
            .into_iter()
            .map(|tween| self.tween(tween))
            .collect()
    }

    /// Observe elements crossing `line`; removed on release
    pub fn observe_crossing<F>(&self, elements: &[ElementId], line: TriggerLine, on_enter: F) -> Result<ObserverId>
    where
        F: FnMut(&[ElementId]) + 'static,
    {
        self.ensure_alive()?;
        let id = self
            .services
            .viewport
            .observe_crossing(elements, line, on_enter)
            .ok_or(MotionError::ScopeReleased)?;
        self.track_observer(id);
        Ok(id)
    }

    /// Observe scroll progress of `trigger`; removed on release
    pub fn observe_progress<F>(
        &self,
        trigger: ElementId,
        start: TriggerLine,
        end: TriggerLine,
        on_update: F,
    ) -> Result<ObserverId>
    where
        F: FnMut(f32) + 'static,
    {
        self.ensure_alive()?;
        let id = self
            .services
            .viewport
            .observe_progress(trigger, start, end, on_update)
            .ok_or(MotionError::ScopeReleased)?;
        self.track_observer(id);
        Ok(id)
    }

    fn track_observer(&self, id: ObserverId) {
        // One-shot observers may already be spent by the immediate check
        if self.services.viewport.is_observing(id) {
            self.register(Box::new(ObserverCancel {
                viewport: self.services.viewport.clone(),
                id,
            }));
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(MotionError::ScopeReleased)
        }
    }

    /// Cancel everything and mark the scope dead. Idempotent.
    fn release(&self) -> ReleaseSummary {
        let items: Vec<Box<dyn Cancellable>> = {
            let mut inner = self.inner.borrow_mut();
            if !inner.alive {
                return ReleaseSummary::default();
            }
            inner.alive = false;
            inner.touched.clear();
            inner.items.drain().map(|(_, item)| item).collect()
        };

        let mut summary = ReleaseSummary::default();
        for mut item in items {
            match item.cancel() {
                Ok(()) => summary.cancelled += 1,
                Err(err) => {
                    tracing::warn!("scope: failed to cancel {}: {}", item.describe(), err);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scope")
            .field("root", &inner.root)
            .field("preference", &inner.preference)
            .field("alive", &inner.alive)
            .field("pending", &inner.items.len())
            .finish()
    }
}

/// Non-owning reference held by callbacks
#[derive(Clone)]
pub struct WeakScope {
    inner: Weak<RefCell<ScopeInner>>,
    services: Services,
}

impl WeakScope {
    /// The scope, if it still exists and has not been released
    pub fn upgrade(&self) -> Option<Scope> {
        let inner = self.inner.upgrade()?;
        if !inner.borrow().alive {
            return None;
        }
        Some(Scope {
            inner,
            services: self.services.clone(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.upgrade().is_some_and(|inner| inner.borrow().alive)
    }
}

/// Outcome of releasing a scope
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub cancelled: usize,
    pub failed: usize,
}

/// Owning handle returned by activation
///
/// Dropping the handle releases the scope.
pub struct ScopeHandle {
    scope: Scope,
}

impl ScopeHandle {
    pub(crate) fn new(scope: Scope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_alive(&self) -> bool {
        self.scope.is_alive()
    }

    /// Revert every side effect the scope created
    ///
    /// Individual cancel failures are logged and counted; the rest still run.
    /// Calling this again does nothing.
    pub fn release(&self) -> ReleaseSummary {
        let summary = self.scope.release();
        if summary.cancelled + summary.failed > 0 {
            tracing::debug!(
                "scope: released {:?} ({} cancelled, {} failed)",
                self.scope.root(),
                summary.cancelled,
                summary.failed
            );
        }
        summary
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        self.scope.release();
    }
}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeHandle").field(&self.scope).finish()
    }
}

/// Setup failed part way through
///
/// Carries the scope so the caller can still release whatever the setup
/// registered before failing.
#[derive(Error, Debug)]
#[error("scope setup failed: {source}")]
pub struct SetupError {
    #[source]
    pub source: MotionError,
    pub scope: ScopeHandle,
}

impl SetupError {
    pub fn into_parts(self) -> (MotionError, ScopeHandle) {
        (self.source, self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{Viewport, ViewportObservers};
    use soleado_animation::AnimationScheduler;
    use soleado_core::{NewElement, Rect};
    use std::cell::Cell;

    struct Fixture {
        doc: SharedDocument,
        scheduler: AnimationScheduler,
        observers: ViewportObservers,
        root: ElementId,
        items: Vec<ElementId>,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let root = doc.append(doc.root(), NewElement::new().bounds(Rect::new(0.0, 0.0, 800.0, 3000.0)));
        let items = (0..3)
            .map(|i| {
                doc.append(
                    root,
                    NewElement::new()
                        .attr("data-item", "")
                        .bounds(Rect::new(0.0, 1000.0 * i as f32, 800.0, 200.0)),
                )
            })
            .collect();
        let doc = doc.shared();
        let scheduler = AnimationScheduler::new(Rc::clone(&doc));
        let observers = ViewportObservers::new(Rc::clone(&doc), Viewport::new(900.0));
        Fixture {
            doc,
            scheduler,
            observers,
            root,
            items,
        }
    }

    fn scope(f: &Fixture) -> ScopeHandle {
        ScopeHandle::new(Scope::new(
            f.root,
            MotionPreference::NoPreference,
            Services {
                document: Rc::clone(&f.doc),
                scheduler: f.scheduler.handle(),
                viewport: f.observers.handle(),
            },
        ))
    }

    struct Failing;

    impl Cancellable for Failing {
        fn cancel(&mut self) -> Result<()> {
            Err(MotionError::Cancel("boom".into()))
        }

        fn describe(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_release_restores_inline_styles() {
        let f = fixture();
        let handle = scope(&f);
        let s = handle.scope();
        s.set(&f.items, &StyleProps::new().opacity(0.0).y(16.0)).unwrap();
        s.to(&f.items[..1], StyleProps::new().opacity(1.0), TweenOptions::new(500.0))
            .unwrap();
        f.scheduler.advance(100.0);

        handle.release();
        assert_eq!(f.scheduler.tween_count(), 0);
        for item in &f.items {
            assert_eq!(f.doc.borrow().inline_style(*item), Some(StyleProps::default()));
        }
    }

    #[test]
    fn test_release_is_idempotent_and_tolerates_failures() {
        let f = fixture();
        let handle = scope(&f);
        let ran = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ran);
        handle.scope().register(Box::new(Failing));
        handle.scope().on_release("counter", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let summary = handle.release();
        assert_eq!(summary, ReleaseSummary { cancelled: 1, failed: 1 });
        assert_eq!(ran.get(), 1);
        assert_eq!(handle.release(), ReleaseSummary::default());
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_register_after_release_cancels_immediately() {
        let f = fixture();
        let handle = scope(&f);
        let s = handle.scope().clone();
        handle.release();

        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let id = s.on_release("late", move || {
            flag.set(true);
            Ok(())
        });
        assert!(id.is_none());
        assert!(ran.get());
        assert_eq!(
            s.set(&f.items, &StyleProps::new().opacity(0.0)),
            Err(MotionError::ScopeReleased)
        );
    }

    #[test]
    fn test_weak_scope_dies_with_release() {
        let f = fixture();
        let handle = scope(&f);
        let weak = handle.scope().downgrade();
        assert!(weak.upgrade().is_some());
        drop(handle);
        assert!(weak.upgrade().is_none());
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_observers_removed_on_release() {
        let f = fixture();
        let handle = scope(&f);
        handle
            .scope()
            .observe_crossing(&f.items[1..], TriggerLine::top_at(0.88), |_| {})
            .unwrap();
        assert_eq!(f.observers.observer_count(), 1);
        handle.release();
        assert_eq!(f.observers.observer_count(), 0);
    }

    #[test]
    fn test_settled_tweens_are_pruned() {
        let f = fixture();
        let handle = scope(&f);
        let s = handle.scope();
        s.to(&f.items[..1], StyleProps::new().opacity(0.5), TweenOptions::new(10.0))
            .unwrap();
        f.scheduler.advance(20.0);
        // snapshot + finished tween; registering prunes the tween
        s.on_release("noop", || Ok(()));
        assert_eq!(s.pending(), 2);
    }
}
