//! Soleado Animation System
//!
//! Tweens, easing curves and timeline orchestration driven by a
//! single-threaded frame scheduler.
//!
//! # Features
//!
//! - **Easing**: the power curve family, parsed from names like `"power3.out"`
//! - **Tweens**: from/to inline style transitions with delay and completion callbacks
//! - **Timelines**: sequenced steps with overlap offsets and stagger
//! - **Scheduler**: deterministic `advance(dt)` or wall-clock `tick()`, weak handles

pub mod easing;
pub mod scheduler;
pub mod timeline;
pub mod tween;
pub mod values;

pub use easing::{EaseDirection, Easing};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TweenId};
pub use timeline::{Position, Timeline};
pub use tween::{CompletionCallback, Tween, TweenOptions, TweenPhase, DEFAULT_EASE};
pub use values::{Interpolate, ResolvedTransition, StyleTrack};
