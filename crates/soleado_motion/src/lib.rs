//! Soleado Motion
//!
//! Scroll-driven presentation effects for a page of sections:
//!
//! - **Scopes**: per-section ownership of every animation side effect, undone
//!   on release
//! - **Reveals**: one-shot entrance tweens batched by viewport crossing
//! - **Parallax**: scroll-linked vertical offsets
//! - **Disclosure**: single-open accordion with sequenced close-then-open
//!
//! Everything honours the reduced-motion preference captured when a scope
//! activates.

pub mod disclosure;
pub mod parallax;
pub mod reveal;
pub mod scope;
pub mod stage;
pub mod viewport;

#[cfg(test)]
mod tests;

pub use disclosure::{
    DisclosureGroup, DisclosureOptions, PanelElements, PanelEvent, PanelState, SubscriptionId,
};
pub use parallax::{parallax_offset, ParallaxOptions};
pub use reveal::RevealOptions;
pub use scope::{
    Cancellable, CancellableId, OnRelease, ReleaseSummary, Scope, ScopeHandle, SetupError,
    WeakScope,
};
pub use stage::Stage;
pub use viewport::{
    scroll_progress, Edge, ObserverId, TriggerLine, Viewport, ViewportHandle, ViewportObservers,
};
