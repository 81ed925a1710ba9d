//! Gallery: card and tag reveals plus per-frame image parallax

use soleado_animation::Easing;
use soleado_core::Result;
use soleado_motion::{parallax, reveal, ParallaxOptions, RevealOptions, Scope, TriggerLine};

use super::children;

pub fn cards() -> RevealOptions {
    RevealOptions::fade_up(16.0, 750.0).stagger(80.0)
}

pub fn pills() -> RevealOptions {
    RevealOptions::fade_up(8.0, 500.0)
        .start(TriggerLine::top_at(0.92))
        .ease(Easing::POWER2_OUT)
        .stagger(50.0)
}

/// Image drifts from +10px to -10px while its frame crosses the viewport
pub fn image_parallax() -> ParallaxOptions {
    ParallaxOptions::new(10.0, -10.0)
}

pub fn mount(scope: &Scope) -> Result<()> {
    reveal::batch_selector(scope, "[data-gal='card']", &cards())?;
    reveal::batch_selector(scope, "[data-gal='pill']", &pills())?;

    let mut bound = 0;
    for frame in scope.select("[data-gal='frame']")? {
        let Some(image) = children(scope, frame, "[data-gal='img']")?.first().copied() else {
            continue;
        };
        if parallax::bind(scope, frame, image, image_parallax())?.is_some() {
            bound += 1;
        }
    }
    tracing::debug!("gallery: {} parallax binding(s)", bound);
    Ok(())
}
