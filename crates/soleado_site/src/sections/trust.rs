//! Trust ("How booking works"): panels with their steps and tiles

use soleado_animation::Easing;
use soleado_core::Result;
use soleado_motion::{reveal, RevealOptions, Scope};

use super::{hide_all, reveal_children};

pub fn panels() -> RevealOptions {
    RevealOptions::fade_up(16.0, 750.0).stagger(100.0)
}

pub fn steps() -> RevealOptions {
    RevealOptions::fade_in_x(10.0, 450.0)
        .ease(Easing::POWER2_OUT)
        .stagger(80.0)
        .delay(120.0)
}

pub fn tiles() -> RevealOptions {
    RevealOptions::fade_up(10.0, 500.0)
        .ease(Easing::POWER2_OUT)
        .stagger(70.0)
        .delay(120.0)
}

pub fn mount(scope: &Scope) -> Result<()> {
    let panel_list = scope.select("[data-how='panel']")?;
    let panel_options = panels();

    if scope.reduced_motion() {
        reveal::batch(scope, &panel_list, &panel_options)?;
        return Ok(());
    }

    let (step_options, tile_options) = (steps(), tiles());
    hide_all(scope, "[data-how='step']", &step_options)?;
    hide_all(scope, "[data-how='tile']", &tile_options)?;

    reveal::batch_with(scope, &panel_list, &panel_options, move |scope, group| {
        scope.to(group, panel_options.to, panel_options.tween)?;
        for panel in group {
            reveal_children(scope, *panel, "[data-how='step']", &step_options)?;
            reveal_children(scope, *panel, "[data-how='tile']", &tile_options)?;
        }
        Ok(())
    })?;

    Ok(())
}
