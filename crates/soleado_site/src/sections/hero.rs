//! Hero entrance sequence
//!
//! Plays once on mount, not scroll triggered.

use soleado_animation::{Easing, Position, Timeline, TweenOptions};
use soleado_core::{Result, StyleProps};
use soleado_motion::Scope;

fn hidden(dy: f32) -> StyleProps {
    StyleProps::new().opacity(0.0).y(dy)
}

fn shown() -> StyleProps {
    StyleProps::new().opacity(1.0).y(0.0)
}

/// Build the entrance timeline from the hero's elements
pub fn timeline(scope: &Scope) -> Result<Timeline> {
    let select = |role: &str| scope.select(&format!("[data-hero='{role}']"));

    Ok(Timeline::new()
        .defaults(Easing::POWER3_OUT)
        .from_to(
            select("kicker")?,
            hidden(10.0),
            shown(),
            TweenOptions::new(600.0),
            Position::Sequence,
        )
        .from_to(
            select("h1")?,
            hidden(14.0),
            shown(),
            TweenOptions::new(750.0),
            "-=0.25".parse()?,
        )
        .from_to(
            select("p")?,
            hidden(10.0),
            shown(),
            TweenOptions::new(600.0),
            "-=0.35".parse()?,
        )
        .from_to(
            select("cta")?,
            hidden(10.0),
            shown(),
            TweenOptions::new(550.0).stagger(80.0),
            "-=0.25".parse()?,
        )
        .from_to(
            select("media")?,
            hidden(10.0).scale(0.985),
            shown().scale(1.0),
            TweenOptions::new(900.0),
            "-=0.5".parse()?,
        )
        .from_to(
            select("glow")?,
            StyleProps::new().opacity(0.0).scale(0.96),
            StyleProps::new().opacity(1.0).scale(1.0),
            TweenOptions::new(1200.0).ease(Easing::POWER2_OUT),
            "-=0.9".parse()?,
        ))
}

pub fn mount(scope: &Scope) -> Result<()> {
    if scope.reduced_motion() {
        return Ok(());
    }

    let timeline = timeline(scope)?;
    let tweens = scope.play(&timeline)?;
    tracing::debug!(
        "hero: playing {} tween(s) over {:.0}ms",
        tweens.len(),
        timeline.duration()
    );
    Ok(())
}
