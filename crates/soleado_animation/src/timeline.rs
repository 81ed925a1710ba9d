//! Timeline orchestration
//!
//! Sequences `from_to` steps one after another with optional overlap,
//! the way an entrance sequence is usually written:
//!
//! ```ignore
//! let ids = Timeline::new()
//!     .defaults(Easing::POWER3_OUT)
//!     .from_to(kicker, hidden, shown, TweenOptions::new(600.0), Position::Sequence)
//!     .from_to(title, hidden, shown, TweenOptions::new(750.0), "-=0.25".parse()?)
//!     .play(&scheduler);
//! ```

use std::str::FromStr;

use smallvec::SmallVec;
use soleado_core::{ElementId, MotionError, StyleProps};

use crate::easing::Easing;
use crate::scheduler::{AnimationScheduler, TweenId};
use crate::tween::{Tween, TweenOptions, DEFAULT_EASE};

/// Where a step starts relative to the timeline built so far
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline
    Sequence,
    /// Relative to the current end (`"-=0.25"` is `Relative(-250.0)`)
    Relative(f32),
    /// At an absolute time in milliseconds
    At(f32),
    /// Together with the previous step (`"<"`)
    WithPrevious,
}

impl FromStr for Position {
    type Err = MotionError;

    /// Parse GSAP-style position strings; numbers are in seconds
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MotionError::InvalidTrigger(s.to_string());
        let seconds = |v: &str| v.trim().parse::<f32>().map_err(|_| invalid());

        if s.is_empty() {
            Ok(Position::Sequence)
        } else if s == "<" {
            Ok(Position::WithPrevious)
        } else if let Some(v) = s.strip_prefix("-=") {
            Ok(Position::Relative(-seconds(v)? * 1000.0))
        } else if let Some(v) = s.strip_prefix("+=") {
            Ok(Position::Relative(seconds(v)? * 1000.0))
        } else {
            Ok(Position::At(seconds(s)?.max(0.0) * 1000.0))
        }
    }
}

#[derive(Clone, Debug)]
struct Step {
    targets: SmallVec<[ElementId; 4]>,
    from: StyleProps,
    to: StyleProps,
    options: TweenOptions,
    start_ms: f32,
}

/// A sequence of `from_to` steps with resolved start times
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<Step>,
    default_ease: Option<Easing>,
    end_ms: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease used by steps that do not set one
    pub fn defaults(mut self, easing: Easing) -> Self {
        self.default_ease = Some(easing);
        self
    }

    /// Append a step animating `targets` (staggered by `options.stagger_ms`)
    pub fn from_to(
        mut self,
        targets: impl IntoIterator<Item = ElementId>,
        from: StyleProps,
        to: StyleProps,
        options: TweenOptions,
        position: Position,
    ) -> Self {
        let targets: SmallVec<[ElementId; 4]> = targets.into_iter().collect();
        let start_ms = match position {
            Position::Sequence => self.end_ms,
            Position::Relative(offset) => (self.end_ms + offset).max(0.0),
            Position::At(at) => at,
            Position::WithPrevious => self.steps.last().map(|s| s.start_ms).unwrap_or(0.0),
        };

        // An empty selection still occupies its slot so later offsets line up
        let length = options.delay_ms + options.total_duration(targets.len().max(1));
        self.end_ms = self.end_ms.max(start_ms + length);

        self.steps.push(Step {
            targets,
            from,
            to,
            options,
            start_ms,
        });
        self
    }

    /// Total length in milliseconds
    pub fn duration(&self) -> f32 {
        self.end_ms
    }

    /// Start time of each step in milliseconds
    pub fn start_times(&self) -> Vec<f32> {
        self.steps.iter().map(|s| s.start_ms).collect()
    }

    /// Register every step's tweens with the scheduler
    pub fn play(&self, scheduler: &AnimationScheduler) -> Vec<TweenId> {
        self.tweens()
            .into_iter()
            .map(|tween| scheduler.add(tween))
            .collect()
    }

    /// Expand the steps into individual tweens with absolute delays
    pub fn tweens(&self) -> Vec<Tween> {
        let mut out = Vec::new();
        for step in &self.steps {
            let easing = step
                .options
                .easing
                .or(self.default_ease)
                .unwrap_or(DEFAULT_EASE);
            for (index, element) in step.targets.iter().enumerate() {
                let options = TweenOptions::new(step.options.duration_ms)
                    .delay(step.start_ms + step.options.delay_for_index(index))
                    .ease(easing);
                out.push(Tween::from_to(*element, step.from, step.to, options));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn el(n: u64) -> ElementId {
        ElementId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!("-=0.25".parse::<Position>().unwrap(), Position::Relative(-250.0));
        assert_eq!("+=0.1".parse::<Position>().unwrap(), Position::Relative(100.0));
        assert_eq!("<".parse::<Position>().unwrap(), Position::WithPrevious);
        assert_eq!("1.5".parse::<Position>().unwrap(), Position::At(1500.0));
        assert!("-=abc".parse::<Position>().is_err());
    }

    #[test]
    fn test_overlapping_sequence() {
        let hidden = StyleProps::new().opacity(0.0);
        let shown = StyleProps::new().opacity(1.0);
        let tl = Timeline::new()
            .defaults(Easing::POWER3_OUT)
            .from_to([el(1)], hidden, shown, TweenOptions::new(600.0), Position::Sequence)
            .from_to(
                [el(2)],
                hidden,
                shown,
                TweenOptions::new(750.0),
                Position::Relative(-250.0),
            )
            .from_to(
                [el(3), el(4)],
                hidden,
                shown,
                TweenOptions::new(550.0).stagger(80.0),
                Position::Relative(-250.0),
            );

        assert_eq!(tl.start_times(), vec![0.0, 350.0, 850.0]);
        assert_eq!(tl.duration(), 850.0 + 630.0);

        let tweens = tl.tweens();
        assert_eq!(tweens.len(), 4);
        assert_eq!(tweens[3].options().delay_ms, 930.0);
        assert_eq!(tweens[0].options().easing, Some(Easing::POWER3_OUT));
    }
}
