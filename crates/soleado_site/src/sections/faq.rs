//! FAQ: item reveals and the single-open accordion

use soleado_core::{MotionError, Result};
use soleado_motion::{reveal, DisclosureGroup, DisclosureOptions, PanelElements, RevealOptions, Scope};

use super::children;

pub fn items() -> RevealOptions {
    RevealOptions::fade_up(14.0, 700.0).stagger(80.0)
}

/// Trigger, body and "Open"/"Close" label of every FAQ item
pub fn panels(scope: &Scope) -> Result<Vec<PanelElements>> {
    let mut panels = Vec::new();
    for item in scope.select("[data-faq='item']")? {
        let trigger = children(scope, item, "[data-faq='trigger']")?.first().copied();
        let body = children(scope, item, "[data-faq='panel']")?.first().copied();
        let (Some(trigger), Some(body)) = (trigger, body) else {
            return Err(MotionError::Setup(format!(
                "FAQ item {:?} is missing its trigger or panel",
                item
            )));
        };

        let mut elements = PanelElements::new(trigger, body);
        if let Some(label) = children(scope, trigger, "[data-faq='label']")?.first() {
            elements = elements.affordance(*label);
        }
        panels.push(elements);
    }
    Ok(panels)
}

pub fn mount(scope: &Scope) -> Result<DisclosureGroup> {
    reveal::batch_selector(scope, "[data-faq='item']", &items())?;

    let group = DisclosureGroup::new(scope, panels(scope)?, DisclosureOptions::default())?;
    tracing::debug!("faq: {} panel(s)", group.len());
    Ok(group)
}
