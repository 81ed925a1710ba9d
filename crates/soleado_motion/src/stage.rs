//! The stage: one page's document, scheduler and viewport
//!
//! The host owns a [`Stage`], activates a scope per mounted section and
//! forwards scroll, resize and frame events to it.

use std::rc::Rc;
use std::sync::Arc;

use soleado_animation::AnimationScheduler;
use soleado_core::{
    motion_preference, Document, ElementId, MotionPreference, MotionPreferenceSource, Result,
    SharedDocument,
};

use crate::scope::{Scope, ScopeHandle, Services, SetupError};
use crate::viewport::{Viewport, ViewportObservers};

pub struct Stage {
    document: SharedDocument,
    scheduler: AnimationScheduler,
    viewport: ViewportObservers,
    /// Overrides the process-wide motion oracle for this stage
    motion: Option<Arc<dyn MotionPreferenceSource>>,
}

impl Stage {
    pub fn new(document: Document, viewport_height: f32) -> Self {
        let document = document.shared();
        Self {
            scheduler: AnimationScheduler::new(Rc::clone(&document)),
            viewport: ViewportObservers::new(Rc::clone(&document), Viewport::new(viewport_height)),
            document,
            motion: None,
        }
    }

    pub fn with_motion_source<S>(mut self, source: S) -> Self
    where
        S: MotionPreferenceSource + 'static,
    {
        self.motion = Some(Arc::new(source));
        self
    }

    pub fn document(&self) -> SharedDocument {
        Rc::clone(&self.document)
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn observers(&self) -> &ViewportObservers {
        &self.viewport
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Current motion preference, read from the override or the oracle
    pub fn motion_preference(&self) -> MotionPreference {
        match &self.motion {
            Some(source) => source.motion_preference(),
            None => motion_preference(),
        }
    }

    /// Mount a section: open a scope on `root` and run `setup` inside it
    ///
    /// The motion preference is read once here and fixed for the scope's
    /// lifetime. If `setup` fails, the error carries the scope so whatever
    /// it registered can still be released.
    pub fn activate<F>(&self, root: ElementId, setup: F) -> std::result::Result<ScopeHandle, SetupError>
    where
        F: FnOnce(&Scope) -> Result<()>,
    {
        let preference = self.motion_preference();
        let scope = Scope::new(
            root,
            preference,
            Services {
                document: Rc::clone(&self.document),
                scheduler: self.scheduler.handle(),
                viewport: self.viewport.handle(),
            },
        );
        tracing::debug!("stage: activating scope on {:?} ({:?})", root, preference);

        let handle = ScopeHandle::new(scope);
        match setup(handle.scope()) {
            Ok(()) => Ok(handle),
            Err(source) => {
                tracing::warn!("stage: setup for {:?} failed: {}", root, source);
                Err(SetupError {
                    source,
                    scope: handle,
                })
            }
        }
    }

    pub fn scroll_to(&self, scroll_y: f32) {
        self.viewport.scroll_to(scroll_y);
    }

    pub fn scroll_by(&self, delta: f32) {
        let current = self.viewport.viewport().scroll_y;
        self.viewport.scroll_to(current + delta);
    }

    pub fn resize(&self, height: f32) {
        self.viewport.resize(height);
    }

    /// Re-check observers after the host changed layout
    pub fn layout_changed(&self) {
        self.viewport.refresh();
    }

    /// Advance animations by `dt_ms`; true while anything is still running
    pub fn advance(&self, dt_ms: f32) -> bool {
        self.scheduler.advance(dt_ms)
    }

    /// Advance by wall-clock time
    pub fn tick(&self) -> bool {
        self.scheduler.tick()
    }

    /// Advance in fixed frames until nothing is animating
    pub fn settle(&self, frame_ms: f32, max_ms: f32) -> f32 {
        self.scheduler.run_until_idle(frame_ms, max_ms)
    }
}
