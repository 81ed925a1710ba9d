//! Packages: cards, per-card bullets, and the add-on / steps panels

use soleado_animation::Easing;
use soleado_core::Result;
use soleado_motion::{reveal, RevealOptions, Scope, TriggerLine};

use super::{hide_all, reveal_children};

pub fn cards() -> RevealOptions {
    RevealOptions::fade_up(16.0, 750.0)
        .start(TriggerLine::top_at(0.85))
        .stagger(80.0)
}

/// Bullets follow their card, triggered a little later
pub fn bullets() -> RevealOptions {
    RevealOptions::fade_in_x(8.0, 450.0)
        .start(TriggerLine::top_at(0.80))
        .ease(Easing::POWER2_OUT)
        .stagger(30.0)
        .delay(120.0)
}

pub fn panels() -> RevealOptions {
    RevealOptions::fade_up(16.0, 750.0).stagger(100.0)
}

/// Add-ons and steps inside a panel
pub fn panel_items() -> RevealOptions {
    RevealOptions::fade_in_x(8.0, 450.0)
        .ease(Easing::POWER2_OUT)
        .stagger(60.0)
        .delay(150.0)
}

pub fn mount(scope: &Scope) -> Result<()> {
    let card_list = scope.select("[data-pkg='card']")?;
    reveal::batch(scope, &card_list, &cards())?;

    let panel_list = scope.select("[data-pkg='panel']")?;
    let panel_options = panels();

    if scope.reduced_motion() {
        reveal::batch(scope, &panel_list, &panel_options)?;
        return Ok(());
    }

    let bullet_options = bullets();
    hide_all(scope, "[data-pkg='li']", &bullet_options)?;
    reveal::on_enter_batch(scope, &card_list, bullet_options.start, move |scope, group| {
        for card in group {
            reveal_children(scope, *card, "[data-pkg='li']", &bullet_options)?;
        }
        Ok(())
    })?;

    let item_options = panel_items();
    hide_all(scope, "[data-pkg='addon']", &item_options)?;
    hide_all(scope, "[data-pkg='step']", &item_options)?;
    reveal::batch_with(scope, &panel_list, &panel_options, move |scope, group| {
        scope.to(group, panel_options.to, panel_options.tween)?;
        for panel in group {
            reveal_children(scope, *panel, "[data-pkg='addon']", &item_options)?;
            reveal_children(scope, *panel, "[data-pkg='step']", &item_options)?;
        }
        Ok(())
    })?;

    Ok(())
}
