//! Disclosure groups (single-open accordion)
//!
//! An ordered set of expandable panels where at most one is expanded.
//! Opening a panel while another is expanded first collapses the other one;
//! the new panel only starts growing once that collapse has finished, so the
//! two never animate at the same time. If the user clicks several panels
//! while a collapse is running, the last one clicked is the one that opens.
//!
//! ```text
//!            toggle                    complete
//!   Closed ─────────▶ Opening ───────────────────▶ Open
//!     ▲                  │ toggle                   │ toggle
//!     │ complete         ▼                          ▼
//!     └──────────────── Closing ◀────────────────────┘
//! ```
//!
//! Toggling a `Closing` panel opens it again. Under reduced motion panels
//! jump straight between `Closed` and `Open`.
//!
//! Each trigger's `aria-expanded` and affordance label follow the state
//! synchronously: expanded while `Opening` or `Open`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use soleado_animation::{Easing, Tween, TweenOptions};
use soleado_core::{Document, ElementId, MotionError, Result, StyleProps};

use crate::scope::{Scope, WeakScope};

new_key_type! {
    /// Handle to a state change subscription
    pub struct SubscriptionId;
}

/// Lifecycle state of one panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelState {
    /// Whether assistive technology should announce the panel as expanded
    pub fn is_expanded(self) -> bool {
        matches!(self, PanelState::Opening | PanelState::Open)
    }

    /// Whether the panel takes part in the one-at-a-time rule
    fn is_busy(self) -> bool {
        !matches!(self, PanelState::Closed)
    }
}

/// Elements making up one panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelElements {
    /// The control the user activates; carries `aria-expanded`
    pub trigger: ElementId,
    /// The collapsible body whose height and opacity animate
    pub body: ElementId,
    /// Text showing the action ("Open" / "Close"); defaults to the trigger
    pub affordance: Option<ElementId>,
}

impl PanelElements {
    pub fn new(trigger: ElementId, body: ElementId) -> Self {
        Self {
            trigger,
            body,
            affordance: None,
        }
    }

    pub fn affordance(mut self, element: ElementId) -> Self {
        self.affordance = Some(element);
        self
    }

    fn label_target(&self) -> ElementId {
        self.affordance.unwrap_or(self.trigger)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisclosureOptions {
    pub open: TweenOptions,
    pub close: TweenOptions,
    /// Affordance text while collapsed
    pub collapsed_label: String,
    /// Affordance text while expanded
    pub expanded_label: String,
}

impl Default for DisclosureOptions {
    fn default() -> Self {
        Self {
            open: TweenOptions::new(450.0).ease(Easing::POWER2_OUT),
            close: TweenOptions::new(320.0).ease(Easing::POWER2_IN_OUT),
            collapsed_label: "Open".into(),
            expanded_label: "Close".into(),
        }
    }
}

/// A state change, timestamped with the scheduler clock
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelEvent {
    pub panel: usize,
    pub state: PanelState,
    pub at_ms: f64,
}

type Listener = Rc<dyn Fn(&PanelEvent)>;

struct Panel {
    elements: PanelElements,
    state: PanelState,
    /// Bumped on every transition; completions from older transitions are dropped
    generation: u64,
}

struct GroupInner {
    panels: Vec<Panel>,
    /// Panel waiting for a collapse to finish before it opens
    pending_open: Option<usize>,
    options: DisclosureOptions,
    reduced: bool,
    listeners: SlotMap<SubscriptionId, Listener>,
}

fn collapsed() -> StyleProps {
    StyleProps::new().height(0.0).opacity(0.0)
}

fn expanded() -> StyleProps {
    StyleProps::new().height_auto().opacity(1.0)
}

/// Single-open group of disclosure panels
///
/// Cheap to clone. Bound to the scope it was created in: once that scope is
/// released every operation is a no-op and in-flight completions are dropped.
#[derive(Clone)]
pub struct DisclosureGroup {
    inner: Rc<RefCell<GroupInner>>,
    scope: WeakScope,
}

impl DisclosureGroup {
    /// Create the group with every panel collapsed
    pub fn new(scope: &Scope, panels: Vec<PanelElements>, options: DisclosureOptions) -> Result<Self> {
        let bodies: Vec<ElementId> = panels.iter().map(|p| p.body).collect();
        scope.set(&bodies, &collapsed())?;
        let markup = TriggerMarkup::capture(scope, &panels);

        let group = Self {
            inner: Rc::new(RefCell::new(GroupInner {
                panels: panels
                    .into_iter()
                    .map(|elements| Panel {
                        elements,
                        state: PanelState::Closed,
                        generation: 0,
                    })
                    .collect(),
                pending_open: None,
                options,
                reduced: scope.reduced_motion(),
                listeners: SlotMap::with_key(),
            })),
            scope: scope.downgrade(),
        };

        for index in 0..group.len() {
            group.sync_trigger(index);
        }

        let weak: Weak<RefCell<GroupInner>> = Rc::downgrade(&group.inner);
        scope.on_release("disclosure group", move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.listeners.clear();
                inner.pending_open = None;
                for panel in &mut inner.panels {
                    panel.generation += 1;
                }
            }
            Ok(())
        });

        let document = Rc::downgrade(&scope.document());
        scope.on_release("disclosure triggers", move || {
            let document = document
                .upgrade()
                .ok_or_else(|| MotionError::Cancel("document dropped before trigger restore".into()))?;
            markup.restore(&mut document.borrow_mut());
            Ok(())
        });

        tracing::debug!("disclosure: group of {} panel(s) ready", group.len());
        Ok(group)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self, panel: usize) -> Result<PanelState> {
        self.inner
            .borrow()
            .panels
            .get(panel)
            .map(|p| p.state)
            .ok_or(MotionError::UnknownPanel(panel))
    }

    pub fn states(&self) -> Vec<PanelState> {
        self.inner.borrow().panels.iter().map(|p| p.state).collect()
    }

    /// The panel currently opening or open, if any
    pub fn expanded_panel(&self) -> Option<usize> {
        self.inner
            .borrow()
            .panels
            .iter()
            .position(|p| p.state.is_expanded())
    }

    pub fn pending_open(&self) -> Option<usize> {
        self.inner.borrow().pending_open
    }

    pub fn elements(&self, panel: usize) -> Result<PanelElements> {
        self.inner
            .borrow()
            .panels
            .get(panel)
            .map(|p| p.elements)
            .ok_or(MotionError::UnknownPanel(panel))
    }

    /// Be told about every state change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&PanelEvent) + 'static,
    {
        self.inner.borrow_mut().listeners.insert(Rc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().listeners.remove(id).is_some()
    }

    /// The user activated `panel`'s trigger
    pub fn toggle(&self, panel: usize) -> Result<()> {
        let (state, reduced) = {
            let inner = self.inner.borrow();
            let state = inner
                .panels
                .get(panel)
                .map(|p| p.state)
                .ok_or(MotionError::UnknownPanel(panel))?;
            (state, inner.reduced)
        };
        let Some(scope) = self.scope.upgrade() else {
            return Err(MotionError::ScopeReleased);
        };

        if reduced {
            return self.toggle_instant(&scope, panel, state);
        }

        match state {
            PanelState::Open | PanelState::Opening => {
                {
                    let mut inner = self.inner.borrow_mut();
                    if inner.pending_open == Some(panel) {
                        inner.pending_open = None;
                    }
                }
                self.start_close(&scope, panel)
            }
            PanelState::Closed | PanelState::Closing => self.request_open(&scope, panel),
        }
    }

    fn toggle_instant(&self, scope: &Scope, panel: usize, state: PanelState) -> Result<()> {
        if state.is_expanded() {
            return self.jump(scope, panel, PanelState::Closed);
        }
        if let Some(other) = self.expanded_panel() {
            self.jump(scope, other, PanelState::Closed)?;
        }
        self.jump(scope, panel, PanelState::Open)
    }

    fn jump(&self, scope: &Scope, panel: usize, state: PanelState) -> Result<()> {
        let body = self.bump(panel);
        let style = if state.is_expanded() {
            expanded()
        } else {
            collapsed()
        };
        scope.set(&[body], &style)?;
        self.set_state(scope, panel, state);
        Ok(())
    }

    fn request_open(&self, scope: &Scope, panel: usize) -> Result<()> {
        self.inner.borrow_mut().pending_open = Some(panel);

        if let Some(other) = self.expanded_panel().filter(|other| *other != panel) {
            self.start_close(scope, other)?;
        }
        self.advance_pending(scope)
    }

    /// Start the pending open if nothing else is still moving or open
    fn advance_pending(&self, scope: &Scope) -> Result<()> {
        let ready = {
            let mut inner = self.inner.borrow_mut();
            let Some(panel) = inner.pending_open else {
                return Ok(());
            };
            let blocked = inner
                .panels
                .iter()
                .enumerate()
                .any(|(index, p)| index != panel && p.state.is_busy());
            if blocked {
                None
            } else {
                inner.pending_open = None;
                Some(panel)
            }
        };

        match ready {
            Some(panel) => self.start_open(scope, panel),
            None => Ok(()),
        }
    }

    fn start_open(&self, scope: &Scope, panel: usize) -> Result<()> {
        let body = self.bump(panel);
        let generation = self.generation(panel);
        let options = self.inner.borrow().options.open;

        scope.scheduler().kill_tweens_of(body);
        self.set_state(scope, panel, PanelState::Opening);

        let group = self.clone();
        let tween = Tween::from_to(body, collapsed(), expanded(), options).on_complete(move || {
            group.complete(panel, generation, PanelState::Open);
        });
        scope.tween(tween).map(drop)
    }

    fn start_close(&self, scope: &Scope, panel: usize) -> Result<()> {
        let body = self.bump(panel);
        let generation = self.generation(panel);
        let options = self.inner.borrow().options.close;

        scope.scheduler().kill_tweens_of(body);
        self.set_state(scope, panel, PanelState::Closing);

        let group = self.clone();
        let tween = Tween::to(body, collapsed(), options).on_complete(move || {
            group.complete(panel, generation, PanelState::Closed);
        });
        scope.tween(tween).map(drop)
    }

    /// Completion of a transition started at `generation`
    fn complete(&self, panel: usize, generation: u64, state: PanelState) {
        let Some(scope) = self.scope.upgrade() else {
            return;
        };
        if self.generation(panel) != generation {
            tracing::trace!("disclosure: stale completion for panel {}", panel);
            return;
        }

        self.set_state(&scope, panel, state);
        if state == PanelState::Closed {
            if let Err(err) = self.advance_pending(&scope) {
                tracing::warn!("disclosure: pending open failed: {}", err);
            }
        }
    }

    /// Invalidate in-flight completions; returns the panel body
    fn bump(&self, panel: usize) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let p = &mut inner.panels[panel];
        p.generation += 1;
        p.elements.body
    }

    fn generation(&self, panel: usize) -> u64 {
        self.inner
            .borrow()
            .panels
            .get(panel)
            .map(|p| p.generation)
            .unwrap_or(0)
    }

    fn set_state(&self, scope: &Scope, panel: usize, state: PanelState) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            let p = &mut inner.panels[panel];
            if p.state == state {
                return;
            }
            tracing::trace!("disclosure: panel {} {:?} -> {:?}", panel, p.state, state);
            p.state = state;
            inner.listeners.values().cloned().collect()
        };

        self.sync_trigger(panel);

        let event = PanelEvent {
            panel,
            state,
            at_ms: scope.now_ms(),
        };
        for listener in listeners {
            listener(&event);
        }
    }

    /// Mirror the panel state onto its trigger
    fn sync_trigger(&self, panel: usize) {
        let Some(scope) = self.scope.upgrade() else {
            return;
        };
        let (elements, expanded, label) = {
            let inner = self.inner.borrow();
            let p = &inner.panels[panel];
            let expanded = p.state.is_expanded();
            let label = if expanded {
                inner.options.expanded_label.clone()
            } else {
                inner.options.collapsed_label.clone()
            };
            (p.elements, expanded, label)
        };

        let document = scope.document();
        let mut document = document.borrow_mut();
        document.set_aria_expanded(elements.trigger, expanded);
        document.set_label(elements.label_target(), label);
    }
}

/// Trigger accessibility state as the markup had it before the group took over
struct TriggerMarkup {
    aria: Vec<(ElementId, Option<bool>)>,
    labels: Vec<(ElementId, Option<String>)>,
}

impl TriggerMarkup {
    fn capture(scope: &Scope, panels: &[PanelElements]) -> Self {
        let document = scope.document();
        let document = document.borrow();
        Self {
            aria: panels
                .iter()
                .map(|p| (p.trigger, document.aria_expanded(p.trigger)))
                .collect(),
            labels: panels
                .iter()
                .map(|p| {
                    let target = p.label_target();
                    (target, document.label(target).map(str::to_string))
                })
                .collect(),
        }
    }

    fn restore(&self, document: &mut Document) {
        for (trigger, aria) in &self.aria {
            document.restore_aria_expanded(*trigger, *aria);
        }
        for (target, label) in &self.labels {
            document.restore_label(*target, label.clone());
        }
    }
}

impl fmt::Debug for DisclosureGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureGroup")
            .field("states", &self.states())
            .field("pending_open", &self.pending_open())
            .finish()
    }
}
