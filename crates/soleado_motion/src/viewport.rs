//! Viewport observers
//!
//! Watches elements against the scroll position. Two kinds of observer:
//!
//! - **Crossing** (one-shot per element): fires when an element's edge
//!   crosses a trigger line, then stops watching that element. Elements that
//!   cross during the same update are delivered together, in registration
//!   order. An element already past the line fires as soon as it is observed.
//! - **Progress** (continuous): reports how far the scroll position is
//!   between a start and an end trigger, clamped to `0.0..=1.0`, on every
//!   update where the value changes.
//!
//! The host feeds scroll and resize events in; callbacks run after the
//! registry's own state has been released, and an observer removed by an
//! earlier callback in the same update is skipped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use soleado_core::{ElementId, MotionError, Rect, SharedDocument};

new_key_type! {
    /// Handle to a registered observer
    pub struct ObserverId;
}

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Document offset of the viewport's top edge
    pub scroll_y: f32,
    /// Viewport height in pixels
    pub height: f32,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            height: height.max(0.0),
        }
    }

    pub fn top(&self) -> f32 {
        self.scroll_y
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }
}

/// Reference edge of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "top" => Some(Edge::Top),
            "center" => Some(Edge::Center),
            "bottom" => Some(Edge::Bottom),
            _ => None,
        }
    }

    fn fraction(self) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }

    fn y(self, rect: &Rect) -> f32 {
        rect.top() + rect.height() * self.fraction()
    }
}

/// "Element edge meets a line this far down the viewport"
///
/// Parsed from strings like `"top 88%"`, `"top bottom"` or `"bottom top"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerLine {
    pub edge: Edge,
    /// Position of the line as a fraction of the viewport height
    pub viewport_fraction: f32,
}

impl TriggerLine {
    pub const fn new(edge: Edge, viewport_fraction: f32) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Element top meets the given fraction of the viewport
    pub const fn top_at(viewport_fraction: f32) -> Self {
        Self::new(Edge::Top, viewport_fraction)
    }

    /// Document y of the trigger line for the given viewport
    pub fn line_y(&self, viewport: &Viewport) -> f32 {
        viewport.scroll_y + viewport.height * self.viewport_fraction
    }

    /// Whether the element's edge is at or above the line
    pub fn is_crossed(&self, rect: &Rect, viewport: &Viewport) -> bool {
        self.edge.y(rect) <= self.line_y(viewport)
    }

    /// Scroll offset at which the element's edge sits exactly on the line
    pub fn scroll_position(&self, rect: &Rect, viewport_height: f32) -> f32 {
        self.edge.y(rect) - viewport_height * self.viewport_fraction
    }
}

impl FromStr for TriggerLine {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MotionError::InvalidTrigger(s.to_string());
        let mut words = s.split_whitespace();
        let (Some(edge), Some(line), None) = (words.next(), words.next(), words.next()) else {
            return Err(invalid());
        };

        let edge = Edge::from_word(edge).ok_or_else(invalid)?;

        let viewport_fraction = match line.strip_suffix('%') {
            Some(percent) => percent.parse::<f32>().map_err(|_| invalid())? / 100.0,
            None => Edge::from_word(line).ok_or_else(invalid)?.fraction(),
        };

        if !viewport_fraction.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(edge, viewport_fraction))
    }
}

/// Linear position of `viewport` between the scroll offsets where `start`
/// and `end` are crossed for `rect`, clamped to `0.0..=1.0`
pub fn scroll_progress(rect: &Rect, viewport: &Viewport, start: TriggerLine, end: TriggerLine) -> f32 {
    let from = start.scroll_position(rect, viewport.height);
    let to = end.scroll_position(rect, viewport.height);
    let span = to - from;
    if span.abs() < f32::EPSILON {
        return if viewport.scroll_y >= to { 1.0 } else { 0.0 };
    }
    ((viewport.scroll_y - from) / span).clamp(0.0, 1.0)
}

/// Called with the elements that crossed during one update
pub type CrossingCallback = Box<dyn FnMut(&[ElementId])>;

/// Called with the new progress value
pub type ProgressCallback = Box<dyn FnMut(f32)>;

enum ObserverKind {
    Crossing {
        pending: SmallVec<[ElementId; 8]>,
        line: TriggerLine,
        on_enter: Rc<RefCell<CrossingCallback>>,
    },
    Progress {
        trigger: ElementId,
        start: TriggerLine,
        end: TriggerLine,
        last: Option<f32>,
        on_update: Rc<RefCell<ProgressCallback>>,
    },
}

struct Observer {
    kind: ObserverKind,
    /// Registration sequence number
    order: u64,
    /// One-shot observer with nothing left to watch
    retired: bool,
}

enum Dispatch {
    Crossing(ObserverId, Rc<RefCell<CrossingCallback>>, SmallVec<[ElementId; 8]>),
    Progress(ObserverId, Rc<RefCell<ProgressCallback>>, f32),
}

struct ObserversInner {
    observers: SlotMap<ObserverId, Observer>,
    viewport: Viewport,
    document: SharedDocument,
    next_order: u64,
}

impl ObserversInner {
    fn insert(&mut self, kind: ObserverKind) -> ObserverId {
        let order = self.next_order;
        self.next_order += 1;
        self.observers.insert(Observer {
            kind,
            order,
            retired: false,
        })
    }

    /// Work out which callbacks are due, without running them
    fn collect(&mut self, only: Option<ObserverId>) -> Vec<Dispatch> {
        let viewport = self.viewport;
        let document = self.document.borrow();
        let mut due = Vec::new();

        let ids: Vec<ObserverId> = match only {
            Some(id) => vec![id],
            None => {
                // Slot reuse means map order is not registration order
                let mut ordered: Vec<(u64, ObserverId)> =
                    self.observers.iter().map(|(id, o)| (o.order, id)).collect();
                ordered.sort_unstable_by_key(|(order, _)| *order);
                ordered.into_iter().map(|(_, id)| id).collect()
            }
        };

        for id in ids {
            let Some(observer) = self.observers.get_mut(id) else {
                continue;
            };
            if observer.retired {
                continue;
            }

            match &mut observer.kind {
                ObserverKind::Crossing {
                    pending,
                    line,
                    on_enter,
                } => {
                    let mut entered = SmallVec::new();
                    pending.retain(|element| match document.bounds(*element) {
                        Some(rect) if line.is_crossed(&rect, &viewport) => {
                            entered.push(*element);
                            false
                        }
                        Some(_) => true,
                        // Gone from the tree: stop watching
                        None => false,
                    });
                    if pending.is_empty() {
                        observer.retired = true;
                    }
                    if !entered.is_empty() {
                        due.push(Dispatch::Crossing(id, Rc::clone(on_enter), entered));
                    }
                }
                ObserverKind::Progress {
                    trigger,
                    start,
                    end,
                    last,
                    on_update,
                } => {
                    let Some(rect) = document.bounds(*trigger) else {
                        continue;
                    };
                    let progress = scroll_progress(&rect, &viewport, *start, *end);
                    if *last != Some(progress) {
                        *last = Some(progress);
                        due.push(Dispatch::Progress(id, Rc::clone(on_update), progress));
                    }
                }
            }
        }

        due
    }
}

/// Registry of viewport observers for one page
pub struct ViewportObservers {
    inner: Rc<RefCell<ObserversInner>>,
}

impl ViewportObservers {
    pub fn new(document: SharedDocument, viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObserversInner {
                observers: SlotMap::with_key(),
                viewport,
                document,
                next_order: 0,
            })),
        }
    }

    pub fn handle(&self) -> ViewportHandle {
        ViewportHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Move the viewport and fire whatever became due
    pub fn scroll_to(&self, scroll_y: f32) {
        self.inner.borrow_mut().viewport.scroll_y = scroll_y.max(0.0);
        self.refresh();
    }

    /// Change the viewport height and fire whatever became due
    pub fn resize(&self, height: f32) {
        self.inner.borrow_mut().viewport.height = height.max(0.0);
        self.refresh();
    }

    /// Re-evaluate every observer against the current viewport and layout
    pub fn refresh(&self) {
        dispatch(&self.inner, None);
    }

    /// Watch `elements` for crossing `line`, one-shot per element
    pub fn observe_crossing<F>(&self, elements: &[ElementId], line: TriggerLine, on_enter: F) -> ObserverId
    where
        F: FnMut(&[ElementId]) + 'static,
    {
        let id = self.inner.borrow_mut().insert(ObserverKind::Crossing {
            pending: elements.iter().copied().collect(),
            line,
            on_enter: Rc::new(RefCell::new(Box::new(on_enter))),
        });
        tracing::debug!(
            "viewport: observing {} element(s) for crossing at {:.0}%",
            elements.len(),
            line.viewport_fraction * 100.0
        );
        dispatch(&self.inner, Some(id));
        id
    }

    /// Report scroll progress of `trigger` between `start` and `end`
    pub fn observe_progress<F>(
        &self,
        trigger: ElementId,
        start: TriggerLine,
        end: TriggerLine,
        on_update: F,
    ) -> ObserverId
    where
        F: FnMut(f32) + 'static,
    {
        let id = self.inner.borrow_mut().insert(ObserverKind::Progress {
            trigger,
            start,
            end,
            last: None,
            on_update: Rc::new(RefCell::new(Box::new(on_update))),
        });
        dispatch(&self.inner, Some(id));
        id
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        self.inner.borrow_mut().observers.remove(id).is_some()
    }

    pub fn is_observing(&self, id: ObserverId) -> bool {
        self.inner.borrow().observers.contains_key(id)
    }
}

impl fmt::Debug for ViewportObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ViewportObservers")
            .field("viewport", &inner.viewport)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

fn dispatch(inner: &Rc<RefCell<ObserversInner>>, only: Option<ObserverId>) {
    let due = inner.borrow_mut().collect(only);
    let alive = |id: ObserverId| inner.borrow().observers.contains_key(id);

    for item in due {
        match item {
            Dispatch::Crossing(id, callback, entered) => {
                if alive(id) {
                    (callback.borrow_mut())(&entered);
                }
            }
            Dispatch::Progress(id, callback, progress) => {
                if alive(id) {
                    (callback.borrow_mut())(progress);
                }
            }
        }
    }

    inner.borrow_mut().observers.retain(|_, o| !o.retired);
}

/// Weak handle to the observer registry
#[derive(Clone)]
pub struct ViewportHandle {
    inner: Weak<RefCell<ObserversInner>>,
}

impl ViewportHandle {
    fn upgrade(&self) -> Option<ViewportObservers> {
        self.inner.upgrade().map(|inner| ViewportObservers { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.upgrade().map(|v| v.viewport())
    }

    pub fn observe_crossing<F>(&self, elements: &[ElementId], line: TriggerLine, on_enter: F) -> Option<ObserverId>
    where
        F: FnMut(&[ElementId]) + 'static,
    {
        self.upgrade().map(|v| v.observe_crossing(elements, line, on_enter))
    }

    pub fn observe_progress<F>(
        &self,
        trigger: ElementId,
        start: TriggerLine,
        end: TriggerLine,
        on_update: F,
    ) -> Option<ObserverId>
    where
        F: FnMut(f32) + 'static,
    {
        self.upgrade()
            .map(|v| v.observe_progress(trigger, start, end, on_update))
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        self.upgrade().is_some_and(|v| v.unobserve(id))
    }

    pub fn is_observing(&self, id: ObserverId) -> bool {
        self.upgrade().is_some_and(|v| v.is_observing(id))
    }
}
